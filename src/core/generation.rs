use crate::core::image_resolver::ImageResolver;
use crate::domain::model::{GenerateRecipesInput, Recipe};
use crate::domain::ports::{ChatModel, ModelPrompt};
use crate::utils::error::Result;
use futures::future::join_all;
use serde::Deserialize;
use serde_json::{json, Value};

const SYSTEM_PROMPT: &str = "You are a professional chef who specializes in creating personalized recipes \
based on available ingredients, user location, and current weather conditions.\n\n\
Generate 5-6 diverse and highly relevant recipes using the ingredients provided.\n\n\
If the user provides a specific dish name (like \"Chicken Biryani\"), the first recipe in the list MUST be \
for that exact dish. The subsequent recipes should be related variations or other dishes that can be made \
with some of the same core ingredients.\n\n\
Prioritize recipes that utilize a maximum number of the provided ingredients to reduce food waste.";

#[derive(Debug, Deserialize)]
struct GeneratedRecipes {
    recipes: Vec<Recipe>,
}

fn output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "recipes": {
                "type": "array",
                "description": "An array of generated recipes.",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string", "description": "The name of the recipe."},
                        "ingredients": {"type": "string", "description": "A list of ingredients required for the recipe."},
                        "instructions": {"type": "string", "description": "Step-by-step instructions for preparing the recipe."},
                        "contextNotes": {"type": "string", "description": "Additional notes or tips about the recipe."}
                    },
                    "required": ["name", "ingredients", "instructions"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["recipes"],
        "additionalProperties": false
    })
}

fn user_prompt(input: &GenerateRecipesInput) -> String {
    format!(
        "Location: {}\nWeather: {}\nIngredients: {}",
        input.location.as_deref().unwrap_or("not specified"),
        input.weather.as_deref().unwrap_or("not specified"),
        input.ingredients
    )
}

/// Generates candidate recipes, then resolves one image per recipe in
/// parallel and merges the URLs back positionally. A zero-recipe answer from
/// the model is an empty list, not an error.
pub async fn generate_recipes<M: ChatModel + ?Sized>(
    model: &M,
    images: &ImageResolver,
    input: &GenerateRecipesInput,
) -> Result<Vec<Recipe>> {
    let prompt = ModelPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user: user_prompt(input),
        image_data_uri: None,
        schema_name: "generated_recipes",
        schema: output_schema(),
    };

    let output = model.complete(prompt).await?;
    let generated: GeneratedRecipes = serde_json::from_value(output)?;
    let mut recipes = generated.recipes;

    if recipes.is_empty() {
        tracing::info!("Model returned zero recipes for '{}'", input.ingredients);
        return Ok(recipes);
    }
    tracing::info!("Generated {} recipes, resolving images", recipes.len());

    // 每道食譜各發一個查詢，全部完成後按位置合併
    let lookups = recipes.iter().map(|recipe| images.resolve(&recipe.name));
    let urls = join_all(lookups).await;
    for (recipe, url) in recipes.iter_mut().zip(urls) {
        recipe.image_url = Some(url);
    }

    Ok(recipes)
}
