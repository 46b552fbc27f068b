use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "recipe-sage")]
#[command(about = "Suggest recipes from ingredients, with images, nutrition and allergen checks")]
pub struct CliArgs {
    /// Comma-separated ingredients, or a specific dish name
    #[arg(long, conflicts_with = "photo")]
    pub ingredients: Option<String>,

    /// Path to a photo of your fridge contents (jpg, png, webp or gif)
    #[arg(long)]
    pub photo: Option<PathBuf>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub weather: Option<String>,

    /// Comma-separated allergies to check the first recipe against
    #[arg(long)]
    pub allergies: Option<String>,

    /// Fetch nutrition facts for the first recipe
    #[arg(long)]
    pub nutrition: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
