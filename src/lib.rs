pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use crate::adapters::chat_api::ChatApi;
pub use crate::adapters::placeholders::PlaceholderCatalog;
pub use crate::app::actions::ActionResponse;
pub use crate::config::AppConfig;
pub use crate::core::engine::RecipeEngine;
pub use crate::core::image_resolver::ImageResolver;
pub use crate::domain::model::{AllergenReport, NutritionFacts, Recipe, RecognizedIngredients};
pub use crate::utils::error::{Result, SageError};
