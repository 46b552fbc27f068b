use crate::config::ImageSearchConfig;
use crate::domain::ports::ImageProvider;
use crate::utils::error::{Result, SageError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Unsplash photo search: first landscape result for "<recipe> food".
pub struct UnsplashSearch {
    client: Client,
    endpoint: String,
    access_key: Option<String>,
}

impl UnsplashSearch {
    pub fn new(config: &ImageSearchConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.unsplash_endpoint.clone(),
            access_key: config.unsplash_access_key.clone(),
        }
    }
}

#[async_trait]
impl ImageProvider for UnsplashSearch {
    fn name(&self) -> &str {
        "unsplash"
    }

    async fn search(&self, recipe_name: &str) -> Result<Option<String>> {
        let Some(access_key) = &self.access_key else {
            tracing::debug!("Unsplash access key is not configured, skipping");
            return Ok(None);
        };

        let query = format!("{} food", recipe_name);
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("Client-ID {}", access_key))
            .query(&[
                ("query", query.as_str()),
                ("page", "1"),
                ("per_page", "1"),
                ("orientation", "landscape"),
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

        let results: UnsplashSearchResponse = response.json().await?;
        Ok(results
            .results
            .into_iter()
            .next()
            .map(|photo| photo.urls.regular))
    }
}

#[derive(Debug, Deserialize)]
struct UnsplashSearchResponse {
    #[serde(default)]
    results: Vec<UnsplashPhoto>,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    urls: UnsplashUrls,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    regular: String,
}
