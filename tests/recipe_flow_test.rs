use anyhow::Result;
use httpmock::prelude::*;
use recipe_sage::app::actions::{
    handle_detect_allergens, handle_generate_recipes, handle_get_nutrition,
    handle_recognize_ingredients,
};
use recipe_sage::config::{AppConfig, ImageSearchConfig, ModelConfig};
use recipe_sage::domain::model::{
    DetectAllergensInput, GenerateRecipesInput, NutritionFactsInput, RecognizeIngredientsInput,
};
use recipe_sage::{ChatApi, RecipeEngine};
use serde_json::json;

fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        model: ModelConfig {
            base_url: server.base_url(),
            api_key: Some("test-key".to_string()),
            ..ModelConfig::default()
        },
        images: ImageSearchConfig {
            google_endpoint: server.url("/customsearch/v1"),
            unsplash_endpoint: server.url("/search/photos"),
            google_api_key: Some("g-key".to_string()),
            google_engine_id: Some("g-cx".to_string()),
            unsplash_access_key: Some("u-key".to_string()),
        },
    }
}

fn engine(server: &MockServer) -> RecipeEngine<ChatApi> {
    RecipeEngine::from_config(&test_config(server)).expect("engine should build")
}

fn model_recipes_body() -> serde_json::Value {
    let recipes: Vec<_> = [
        "Chicken Stir Fry",
        "Garlic Chicken Rice",
        "Broccoli Beef-Style Chicken",
        "Soy Glazed Chicken",
        "Chicken Broccoli Soup",
    ]
    .iter()
    .map(|name| {
        json!({
            "name": name,
            "ingredients": "chicken, broccoli, garlic, soy sauce",
            "instructions": "Cut, season, cook until done.",
            "contextNotes": "Great for weeknights."
        })
    })
    .collect();
    json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": json!({"recipes": recipes}).to_string()
            }
        }]
    })
}

#[tokio::test]
async fn test_generate_recipes_end_to_end_with_images() -> Result<()> {
    let server = MockServer::start();
    let model_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains("chicken, broccoli, garlic, soy sauce");
        then.status(200).json_body(model_recipes_body());
    });
    let google_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/customsearch/v1")
            .query_param("searchType", "image");
        then.status(200).json_body(json!({
            "items": [{"link": "https://images.example.com/dish.jpg"}]
        }));
    });

    let response = handle_generate_recipes(
        &engine(&server),
        GenerateRecipesInput {
            ingredients: "chicken, broccoli, garlic, soy sauce".to_string(),
            location: None,
            weather: None,
        },
    )
    .await;

    model_mock.assert();
    google_mock.assert_hits(5);

    assert!(response.success);
    let recipes = response.data.unwrap();
    assert_eq!(recipes.len(), 5);
    for recipe in &recipes {
        assert!(!recipe.name.is_empty());
        assert!(!recipe.ingredients.is_empty());
        assert!(!recipe.instructions.is_empty());
        assert_eq!(
            recipe.image_url.as_deref(),
            Some("https://images.example.com/dish.jpg")
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_generate_recipes_degrades_to_placeholders_when_providers_fail() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(model_recipes_body());
    });
    server.mock(|when, then| {
        when.method(GET).path("/customsearch/v1");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/search/photos");
        then.status(500);
    });

    let response = handle_generate_recipes(
        &engine(&server),
        GenerateRecipesInput {
            ingredients: "chicken, broccoli".to_string(),
            location: None,
            weather: None,
        },
    )
    .await;

    assert!(response.success);
    let recipes = response.data.unwrap();
    assert_eq!(recipes.len(), 5);
    for recipe in &recipes {
        let url = recipe.image_url.as_deref().unwrap();
        assert!(url.starts_with("https://picsum.photos/seed/"));
    }
    Ok(())
}

#[tokio::test]
async fn test_generate_recipes_zero_results_is_success() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(json!({
            "choices": [{
                "message": {"role": "assistant", "content": "{\"recipes\": []}"}
            }]
        }));
    });

    let response = handle_generate_recipes(
        &engine(&server),
        GenerateRecipesInput {
            ingredients: "pebbles".to_string(),
            location: None,
            weather: None,
        },
    )
    .await;

    assert!(response.success);
    assert!(response.data.unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_generate_recipes_model_failure_yields_generic_error() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(500).body("upstream exploded");
    });

    let response = handle_generate_recipes(
        &engine(&server),
        GenerateRecipesInput {
            ingredients: "chicken".to_string(),
            location: None,
            weather: None,
        },
    )
    .await;

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Failed to generate recipes."));
    Ok(())
}

#[tokio::test]
async fn test_recognize_ingredients_sends_photo_to_model() -> Result<()> {
    let server = MockServer::start();
    let model_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains("data:image/jpeg;base64,/9j/4AAQSkZJRg==");
        then.status(200).json_body(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "{\"ingredients\": [\"eggs\", \"butter\", \"kale\"]}"
                }
            }]
        }));
    });

    let response = handle_recognize_ingredients(
        &engine(&server),
        RecognizeIngredientsInput {
            photo_data_uri: "data:image/jpeg;base64,/9j/4AAQSkZJRg==".to_string(),
        },
    )
    .await;

    model_mock.assert();
    assert!(response.success);
    assert_eq!(
        response.data.unwrap().ingredients,
        vec!["eggs", "butter", "kale"]
    );
    Ok(())
}

#[tokio::test]
async fn test_nutrition_facts_round_trip() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains("Chicken Stir Fry");
        then.status(200).json_body(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": json!({
                        "calories": "480 kcal",
                        "protein": "38g",
                        "carbs": "30g",
                        "fat": "18g"
                    }).to_string()
                }
            }]
        }));
    });

    let response = handle_get_nutrition(
        &engine(&server),
        NutritionFactsInput {
            recipe_name: "Chicken Stir Fry".to_string(),
            ingredients: "chicken, broccoli, garlic, soy sauce".to_string(),
            instructions: "Stir fry everything.".to_string(),
        },
    )
    .await;

    assert!(response.success);
    let facts = response.data.unwrap();
    assert!(!facts.calories.is_empty());
    assert!(!facts.protein.is_empty());
    assert!(!facts.carbs.is_empty());
    assert!(!facts.fat.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_allergen_detection_round_trip() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains("User Allergies: peanuts");
        then.status(200).json_body(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": json!({
                        "allergenHighlights": "peanut butter",
                        "allergenWarning": "Contains peanut butter, which matches your peanut allergy."
                    }).to_string()
                }
            }]
        }));
    });

    let response = handle_detect_allergens(
        &engine(&server),
        DetectAllergensInput {
            recipe_name: "Peanut Noodles".to_string(),
            ingredients: "noodles, peanut butter, scallions".to_string(),
            allergies: "peanuts".to_string(),
        },
    )
    .await;

    assert!(response.success);
    let report = response.data.unwrap();
    assert!(report.allergen_highlights.contains("peanut butter"));
    assert!(!report.allergen_warning.is_empty());
    Ok(())
}
