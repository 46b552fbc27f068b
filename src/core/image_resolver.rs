use crate::adapters::placeholders::PlaceholderCatalog;
use crate::domain::ports::ImageProvider;

/// Terminal fallback when every provider fails and the catalog has no
/// "cooked meal" entry. Seeded, so the URL is stable.
pub const FALLBACK_IMAGE_URL: &str = "https://picsum.photos/seed/recipesage6/600/400";

const PLACEHOLDER_HINT: &str = "cooked meal";

/// Ordered waterfall over image providers. Each tier gets one attempt;
/// errors and empty results both fall through to the next tier, and the
/// chain terminates in a placeholder, so resolution never fails.
pub struct ImageResolver {
    providers: Vec<Box<dyn ImageProvider>>,
    placeholders: PlaceholderCatalog,
}

impl ImageResolver {
    pub fn new(providers: Vec<Box<dyn ImageProvider>>, placeholders: PlaceholderCatalog) -> Self {
        Self {
            providers,
            placeholders,
        }
    }

    pub async fn resolve(&self, recipe_name: &str) -> String {
        for provider in &self.providers {
            match provider.search(recipe_name).await {
                Ok(Some(url)) if !url.is_empty() => {
                    tracing::debug!("Image for '{}' from {}", recipe_name, provider.name());
                    return url;
                }
                Ok(_) => {
                    tracing::debug!("{} found no image for '{}'", provider.name(), recipe_name);
                }
                Err(e) => {
                    tracing::warn!(
                        "{} lookup failed for '{}': {}",
                        provider.name(),
                        recipe_name,
                        e
                    );
                }
            }
        }

        tracing::warn!("All image providers failed for '{}', using placeholder", recipe_name);
        self.placeholders
            .find_by_hint(PLACEHOLDER_HINT)
            .map(|placeholder| placeholder.url.clone())
            .unwrap_or_else(|| FALLBACK_IMAGE_URL.to_string())
    }
}
