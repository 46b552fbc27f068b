use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Everything one model round-trip needs: prompt text, optional photo
/// attachment and the JSON schema the response must satisfy.
#[derive(Debug, Clone)]
pub struct ModelPrompt {
    pub system: String,
    pub user: String,
    pub image_data_uri: Option<String>,
    pub schema_name: &'static str,
    pub schema: Value,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Runs one completion and returns the parsed JSON payload. Callers
    /// deserialize it into their flow's typed output.
    async fn complete(&self, prompt: ModelPrompt) -> Result<Value>;
}

#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(None)` means "no image found" or "not configured"; both are
    /// treated the same as `Err` by the cascade: fall through to the next
    /// provider without propagating.
    async fn search(&self, recipe_name: &str) -> Result<Option<String>>;
}
