use serde::{Deserialize, Serialize};

/// One suggested recipe. Ephemeral, lives only for the duration of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub ingredients: String,
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Units are embedded in the text fields ("450 kcal", "32g"), not structured.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionFacts {
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergenReport {
    /// Comma-joined list of flagged ingredients.
    pub allergen_highlights: String,
    pub allergen_warning: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedIngredients {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeImage {
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizeIngredientsInput {
    /// `data:<mimetype>;base64,<encoded_data>` photo of fridge contents.
    pub photo_data_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRecipesInput {
    /// Comma-separated ingredients, or a specific dish name.
    pub ingredients: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionFactsInput {
    pub recipe_name: String,
    pub ingredients: String,
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectAllergensInput {
    pub recipe_name: String,
    pub ingredients: String,
    /// Comma-separated allergens the user is allergic to, e.g. "peanuts, shellfish".
    pub allergies: String,
}
