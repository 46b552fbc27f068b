pub mod analysis;
pub mod engine;
pub mod generation;
pub mod image_resolver;
pub mod recognition;

pub use crate::domain::model::{
    AllergenReport, DetectAllergensInput, GenerateRecipesInput, NutritionFacts,
    NutritionFactsInput, Recipe, RecipeImage, RecognizeIngredientsInput, RecognizedIngredients,
};
pub use crate::domain::ports::{ChatModel, ImageProvider, ModelPrompt};
pub use crate::utils::error::Result;
