use crate::domain::model::{RecognizeIngredientsInput, RecognizedIngredients};
use crate::domain::ports::{ChatModel, ModelPrompt};
use crate::utils::error::Result;
use crate::utils::validation::validate_data_uri;
use serde_json::{json, Value};

const SYSTEM_PROMPT: &str = "You are an AI assistant that identifies ingredients from a photo of a fridge. \
Analyze the image and extract a list of distinct ingredients present in the fridge. \
Respond with just a simple list of ingredients.";

fn output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "ingredients": {
                "type": "array",
                "items": {"type": "string"},
                "description": "A list of ingredients identified in the image."
            }
        },
        "required": ["ingredients"],
        "additionalProperties": false
    })
}

/// Asks the vision model which ingredients are visible in the photo. No
/// accuracy, count or dedup guarantee; the model's list is returned as-is.
pub async fn recognize_ingredients<M: ChatModel + ?Sized>(
    model: &M,
    input: &RecognizeIngredientsInput,
) -> Result<RecognizedIngredients> {
    validate_data_uri(&input.photo_data_uri)?;

    let prompt = ModelPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user: "List the distinct ingredients visible in this photo.".to_string(),
        image_data_uri: Some(input.photo_data_uri.clone()),
        schema_name: "recognized_ingredients",
        schema: output_schema(),
    };

    let output = model.complete(prompt).await?;
    let recognized: RecognizedIngredients = serde_json::from_value(output)?;

    tracing::info!("Recognized {} ingredients", recognized.ingredients.len());
    Ok(recognized)
}
