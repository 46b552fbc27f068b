use serde::Deserialize;

const BUNDLED_CATALOG: &str = include_str!("../assets/placeholders.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceholderImage {
    pub hint: String,
    pub description: String,
    pub url: String,
}

/// Static catalog of bundled fallback images, keyed by descriptive hint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceholderCatalog {
    #[serde(default)]
    images: Vec<PlaceholderImage>,
}

impl PlaceholderCatalog {
    pub fn bundled() -> Self {
        toml::from_str(BUNDLED_CATALOG).unwrap_or_else(|e| {
            tracing::error!("Bundled placeholder catalog failed to parse: {}", e);
            Self::default()
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn find_by_hint(&self, hint: &str) -> Option<&PlaceholderImage> {
        self.images
            .iter()
            .find(|image| image.hint.eq_ignore_ascii_case(hint))
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
