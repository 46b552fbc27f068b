use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::Parser;
use recipe_sage::app::actions::{
    handle_detect_allergens, handle_generate_recipes, handle_get_nutrition,
    handle_recognize_ingredients,
};
use recipe_sage::domain::model::{
    DetectAllergensInput, GenerateRecipesInput, NutritionFactsInput, Recipe,
    RecognizeIngredientsInput,
};
use recipe_sage::utils::error::{Result, SageError};
use recipe_sage::utils::{logger, validation::Validate};
use recipe_sage::{AppConfig, ChatApi, CliArgs, RecipeEngine};
use std::path::Path;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);
    tracing::info!("Starting recipe-sage CLI");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // 驗證配置
    let config = AppConfig::from_env();
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let engine = match RecipeEngine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("💡 Set RECIPE_SAGE_API_KEY (and optionally RECIPE_SAGE_BASE_URL / RECIPE_SAGE_MODEL)");
            std::process::exit(1);
        }
    };

    // 食材來源:指令列文字,或從照片辨識
    let ingredients = match (&args.ingredients, &args.photo) {
        (Some(list), _) => list.clone(),
        (None, Some(photo)) => {
            let photo_data_uri = match photo_to_data_uri(photo) {
                Ok(uri) => uri,
                Err(e) => {
                    eprintln!("❌ Could not read photo: {}", e);
                    std::process::exit(1);
                }
            };
            let response =
                handle_recognize_ingredients(&engine, RecognizeIngredientsInput { photo_data_uri })
                    .await;
            match response.data {
                Some(recognized) if !recognized.ingredients.is_empty() => {
                    println!("📷 Recognized: {}", recognized.ingredients.join(", "));
                    recognized.ingredients.join(", ")
                }
                Some(_) => {
                    eprintln!("❌ No ingredients recognized in the photo");
                    std::process::exit(2);
                }
                None => {
                    eprintln!("❌ {}", response.error.unwrap_or_default());
                    std::process::exit(2);
                }
            }
        }
        (None, None) => {
            eprintln!("❌ Provide --ingredients or --photo");
            std::process::exit(1);
        }
    };

    let response = handle_generate_recipes(
        &engine,
        GenerateRecipesInput {
            ingredients,
            location: args.location.clone(),
            weather: args.weather.clone(),
        },
    )
    .await;

    let recipes = match response.data {
        Some(recipes) => recipes,
        None => {
            eprintln!("❌ {}", response.error.unwrap_or_default());
            std::process::exit(2);
        }
    };

    if recipes.is_empty() {
        println!("No recipes could be generated from those ingredients.");
        return Ok(());
    }

    println!("✅ Generated {} recipes:", recipes.len());
    for (index, recipe) in recipes.iter().enumerate() {
        println!("\n{}. {}", index + 1, recipe.name);
        println!("   🖼  {}", recipe.image_url.as_deref().unwrap_or("-"));
        if let Some(notes) = &recipe.context_notes {
            println!("   📝 {}", notes);
        }
    }

    if let Some(first) = recipes.first() {
        if args.nutrition {
            print_nutrition(&engine, first).await;
        }
        if let Some(allergies) = &args.allergies {
            print_allergens(&engine, first, allergies).await;
        }
    }

    Ok(())
}

async fn print_nutrition(engine: &RecipeEngine<ChatApi>, recipe: &Recipe) {
    let response = handle_get_nutrition(
        engine,
        NutritionFactsInput {
            recipe_name: recipe.name.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
        },
    )
    .await;

    match response.data {
        Some(facts) => {
            println!("\n🥦 Nutrition for '{}':", recipe.name);
            println!("   calories: {}", facts.calories);
            println!("   protein:  {}", facts.protein);
            println!("   carbs:    {}", facts.carbs);
            println!("   fat:      {}", facts.fat);
            if let Some(info) = &facts.additional_info {
                println!("   note:     {}", info);
            }
        }
        None => eprintln!("❌ {}", response.error.unwrap_or_default()),
    }
}

async fn print_allergens(engine: &RecipeEngine<ChatApi>, recipe: &Recipe, allergies: &str) {
    let response = handle_detect_allergens(
        engine,
        DetectAllergensInput {
            recipe_name: recipe.name.clone(),
            ingredients: recipe.ingredients.clone(),
            allergies: allergies.to_string(),
        },
    )
    .await;

    match response.data {
        Some(report) => {
            println!("\n⚠️  Allergen check for '{}':", recipe.name);
            println!("   flagged: {}", report.allergen_highlights);
            println!("   {}", report.allergen_warning);
        }
        None => eprintln!("❌ {}", response.error.unwrap_or_default()),
    }
}

fn photo_to_data_uri(path: &Path) -> Result<String> {
    let mime = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        other => {
            return Err(SageError::ValidationError {
                message: format!("Unsupported photo format: {:?}", other.unwrap_or("none")),
            })
        }
    };

    let bytes = std::fs::read(path)?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}
