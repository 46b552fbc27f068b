//! Operation boundary. Every flow is wrapped into a `{success, data, error}`
//! envelope with a fixed generic message on failure; internal errors are
//! logged here and never propagate further up.

use crate::core::engine::RecipeEngine;
use crate::domain::model::{
    AllergenReport, DetectAllergensInput, GenerateRecipesInput, NutritionFacts,
    NutritionFactsInput, Recipe, RecipeImage, RecognizeIngredientsInput, RecognizedIngredients,
};
use crate::domain::ports::ChatModel;
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

fn to_response<T>(result: Result<T>, operation: &str, message: &str) -> ActionResponse<T> {
    match result {
        Ok(data) => ActionResponse::ok(data),
        Err(e) => {
            tracing::error!("{} failed: {}", operation, e);
            ActionResponse::failed(message)
        }
    }
}

pub async fn handle_recognize_ingredients<M: ChatModel>(
    engine: &RecipeEngine<M>,
    input: RecognizeIngredientsInput,
) -> ActionResponse<RecognizedIngredients> {
    to_response(
        engine.recognize_ingredients(&input).await,
        "Ingredient recognition",
        "Failed to recognize ingredients.",
    )
}

pub async fn handle_generate_recipes<M: ChatModel>(
    engine: &RecipeEngine<M>,
    input: GenerateRecipesInput,
) -> ActionResponse<Vec<Recipe>> {
    to_response(
        engine.generate_recipes(&input).await,
        "Recipe generation",
        "Failed to generate recipes.",
    )
}

pub async fn handle_get_nutrition<M: ChatModel>(
    engine: &RecipeEngine<M>,
    input: NutritionFactsInput,
) -> ActionResponse<NutritionFacts> {
    to_response(
        engine.nutrition_facts(&input).await,
        "Nutrition lookup",
        "Failed to get nutrition facts.",
    )
}

pub async fn handle_detect_allergens<M: ChatModel>(
    engine: &RecipeEngine<M>,
    input: DetectAllergensInput,
) -> ActionResponse<AllergenReport> {
    to_response(
        engine.detect_allergens(&input).await,
        "Allergen detection",
        "Failed to detect allergens.",
    )
}

/// Image resolution cannot fail (the cascade ends in a placeholder), so this
/// envelope is always a success; it exists for boundary uniformity.
pub async fn handle_resolve_recipe_image<M: ChatModel>(
    engine: &RecipeEngine<M>,
    recipe_name: &str,
) -> ActionResponse<RecipeImage> {
    let image_url = engine.resolve_recipe_image(recipe_name).await;
    ActionResponse::ok(RecipeImage { image_url })
}
