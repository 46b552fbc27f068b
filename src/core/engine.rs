use crate::adapters::chat_api::ChatApi;
use crate::adapters::google_images::GoogleImageSearch;
use crate::adapters::placeholders::PlaceholderCatalog;
use crate::adapters::unsplash::UnsplashSearch;
use crate::config::AppConfig;
use crate::core::image_resolver::ImageResolver;
use crate::core::{analysis, generation, recognition};
use crate::domain::model::{
    AllergenReport, DetectAllergensInput, GenerateRecipesInput, NutritionFacts,
    NutritionFactsInput, Recipe, RecognizeIngredientsInput, RecognizedIngredients,
};
use crate::domain::ports::{ChatModel, ImageProvider};
use crate::utils::error::Result;

/// Composition root: owns the chat model and the image cascade and exposes
/// the five flows. Stateless across calls.
pub struct RecipeEngine<M: ChatModel> {
    model: M,
    images: ImageResolver,
}

impl<M: ChatModel> RecipeEngine<M> {
    pub fn new(model: M, images: ImageResolver) -> Self {
        Self { model, images }
    }

    pub async fn recognize_ingredients(
        &self,
        input: &RecognizeIngredientsInput,
    ) -> Result<RecognizedIngredients> {
        recognition::recognize_ingredients(&self.model, input).await
    }

    pub async fn generate_recipes(&self, input: &GenerateRecipesInput) -> Result<Vec<Recipe>> {
        generation::generate_recipes(&self.model, &self.images, input).await
    }

    pub async fn nutrition_facts(&self, input: &NutritionFactsInput) -> Result<NutritionFacts> {
        analysis::nutrition_facts(&self.model, input).await
    }

    pub async fn detect_allergens(&self, input: &DetectAllergensInput) -> Result<AllergenReport> {
        analysis::detect_allergens(&self.model, input).await
    }

    /// Always yields a usable URL; see `ImageResolver`.
    pub async fn resolve_recipe_image(&self, recipe_name: &str) -> String {
        self.images.resolve(recipe_name).await
    }
}

impl RecipeEngine<ChatApi> {
    /// Wires the concrete adapters: chat API plus the Google → Unsplash →
    /// placeholder cascade.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let model = ChatApi::new(&config.model)?;
        let providers: Vec<Box<dyn ImageProvider>> = vec![
            Box::new(GoogleImageSearch::new(&config.images)),
            Box::new(UnsplashSearch::new(&config.images)),
        ];
        let images = ImageResolver::new(providers, PlaceholderCatalog::bundled());
        Ok(Self::new(model, images))
    }
}
