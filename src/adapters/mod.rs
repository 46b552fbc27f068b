// Adapters layer: concrete clients for the external services (chat model,
// image search providers, bundled placeholder catalog).

pub mod chat_api;
pub mod google_images;
pub mod placeholders;
pub mod unsplash;
