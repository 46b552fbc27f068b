#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::env;

pub const API_KEY_VAR: &str = "RECIPE_SAGE_API_KEY";
pub const BASE_URL_VAR: &str = "RECIPE_SAGE_BASE_URL";
pub const MODEL_VAR: &str = "RECIPE_SAGE_MODEL";
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const GOOGLE_ENGINE_ID_VAR: &str = "GOOGLE_CSE_ID";
pub const UNSPLASH_ACCESS_KEY_VAR: &str = "UNSPLASH_ACCESS_KEY";

/// Settings for the chat-completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "google/gemini-2.5-flash".to_string(),
            api_key: None,
            temperature: 0.4,
            max_tokens: 4096,
        }
    }
}

/// Image provider credentials. Every key is optional; an absent key means
/// that provider is silently skipped in the fallback cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSearchConfig {
    pub google_endpoint: String,
    pub unsplash_endpoint: String,
    pub google_api_key: Option<String>,
    pub google_engine_id: Option<String>,
    pub unsplash_access_key: Option<String>,
}

impl Default for ImageSearchConfig {
    fn default() -> Self {
        Self {
            google_endpoint: "https://www.googleapis.com/customsearch/v1".to_string(),
            unsplash_endpoint: "https://api.unsplash.com/search/photos".to_string(),
            google_api_key: None,
            google_engine_id: None,
            unsplash_access_key: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub images: ImageSearchConfig,
}

impl AppConfig {
    /// Reads the process environment once. Unset variables leave the
    /// defaults in place (for endpoints) or stay `None` (for credentials).
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = env::var(BASE_URL_VAR) {
            config.model.base_url = base_url;
        }
        if let Ok(model) = env::var(MODEL_VAR) {
            config.model.model = model;
        }
        config.model.api_key = env::var(API_KEY_VAR).ok();
        config.images.google_api_key = env::var(GOOGLE_API_KEY_VAR).ok();
        config.images.google_engine_id = env::var(GOOGLE_ENGINE_ID_VAR).ok();
        config.images.unsplash_access_key = env::var(UNSPLASH_ACCESS_KEY_VAR).ok();

        config
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("model.base_url", &self.model.base_url)?;
        validate_non_empty_string("model.model", &self.model.model)?;
        validate_url("images.google_endpoint", &self.images.google_endpoint)?;
        validate_url("images.unsplash_endpoint", &self.images.unsplash_endpoint)?;
        Ok(())
    }
}
