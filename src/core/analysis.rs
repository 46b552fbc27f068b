use crate::domain::model::{
    AllergenReport, DetectAllergensInput, NutritionFacts, NutritionFactsInput,
};
use crate::domain::ports::{ChatModel, ModelPrompt};
use crate::utils::error::Result;
use serde_json::{json, Value};

const NUTRITION_SYSTEM_PROMPT: &str = "You are a nutrition expert. Given the recipe name, ingredients, and \
instructions, extract the nutrition facts, including calories, protein, carbs, and fats. \
Provide the information in a structured format.";

const ALLERGEN_SYSTEM_PROMPT: &str = "You are an expert nutritionist specializing in allergen detection in recipes.\n\n\
You will analyze the ingredients in a recipe and determine if any of them are potential allergens for a user, \
based on their specified allergies.\n\n\
Identify the ingredients that are potential allergens, and provide a warning message if any of the ingredients \
match the user's allergies. For ingredients that may be allergenic, but not directly matching the allergy list, \
include them in the allergenHighlights as well with a qualifier such as \"May contain\".";

fn nutrition_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "calories": {"type": "string", "description": "The number of calories in the recipe."},
            "protein": {"type": "string", "description": "The amount of protein in the recipe (in grams)."},
            "carbs": {"type": "string", "description": "The amount of carbohydrates in the recipe (in grams)."},
            "fat": {"type": "string", "description": "The amount of fat in the recipe (in grams)."},
            "additionalInfo": {"type": "string", "description": "Any additional nutritional information."}
        },
        "required": ["calories", "protein", "carbs", "fat"],
        "additionalProperties": false
    })
}

fn allergen_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "allergenHighlights": {
                "type": "string",
                "description": "A comma-separated list of ingredients in the recipe that are potential allergens for the user."
            },
            "allergenWarning": {
                "type": "string",
                "description": "A warning message if any of the recipe ingredients match the user's specified allergies."
            }
        },
        "required": ["allergenHighlights", "allergenWarning"],
        "additionalProperties": false
    })
}

/// One model round-trip; the four macro fields come back as text with units
/// embedded.
pub async fn nutrition_facts<M: ChatModel + ?Sized>(
    model: &M,
    input: &NutritionFactsInput,
) -> Result<NutritionFacts> {
    let prompt = ModelPrompt {
        system: NUTRITION_SYSTEM_PROMPT.to_string(),
        user: format!(
            "Recipe Name: {}\nIngredients: {}\nInstructions: {}",
            input.recipe_name, input.ingredients, input.instructions
        ),
        image_data_uri: None,
        schema_name: "nutrition_facts",
        schema: nutrition_schema(),
    };

    let output = model.complete(prompt).await?;
    Ok(serde_json::from_value(output)?)
}

/// One model round-trip. Near-allergen flagging ("May contain") is a
/// prompt-level instruction, not verified here.
pub async fn detect_allergens<M: ChatModel + ?Sized>(
    model: &M,
    input: &DetectAllergensInput,
) -> Result<AllergenReport> {
    let prompt = ModelPrompt {
        system: ALLERGEN_SYSTEM_PROMPT.to_string(),
        user: format!(
            "Recipe Name: {}\nIngredients: {}\nUser Allergies: {}",
            input.recipe_name, input.ingredients, input.allergies
        ),
        image_data_uri: None,
        schema_name: "allergen_report",
        schema: allergen_schema(),
    };

    let output = model.complete(prompt).await?;
    Ok(serde_json::from_value(output)?)
}
