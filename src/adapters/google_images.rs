use crate::config::ImageSearchConfig;
use crate::domain::ports::ImageProvider;
use crate::utils::error::{Result, SageError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Google Custom Search image lookup. Needs both an API key and a search
/// engine id; with either missing the provider reports "no image" instead of
/// failing, so the cascade moves on.
pub struct GoogleImageSearch {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    engine_id: Option<String>,
}

impl GoogleImageSearch {
    pub fn new(config: &ImageSearchConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.google_endpoint.clone(),
            api_key: config.google_api_key.clone(),
            engine_id: config.google_engine_id.clone(),
        }
    }
}

#[async_trait]
impl ImageProvider for GoogleImageSearch {
    fn name(&self) -> &str {
        "google-images"
    }

    async fn search(&self, recipe_name: &str) -> Result<Option<String>> {
        let (Some(api_key), Some(engine_id)) = (&self.api_key, &self.engine_id) else {
            tracing::debug!("Google image search is not configured, skipping");
            return Ok(None);
        };

        let query = format!("{} food photography", recipe_name);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query.as_str()),
                ("searchType", "image"),
                ("num", "1"),
                ("imgSize", "large"),
                ("key", api_key),
                ("cx", engine_id),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(SageError::HttpStatusError { status, body });
        }

        let results: GoogleSearchResponse = response.json().await?;
        Ok(results
            .items
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|item| item.link))
    }
}

#[derive(Debug, Deserialize)]
struct GoogleSearchResponse {
    items: Option<Vec<GoogleSearchItem>>,
}

#[derive(Debug, Deserialize)]
struct GoogleSearchItem {
    link: String,
}
