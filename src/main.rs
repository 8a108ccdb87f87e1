use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use recipe_insights::analysis_config::AnalysisConfig;
use recipe_insights::diet_matcher::DietAnalysisResult;
use recipe_insights::ingredient_model::Recipe;
use recipe_insights::localization::{LocalizationManager, DEFAULT_LOCALE};
use recipe_insights::recipe_analyzer::{RecipeAnalyzer, RecipeReport};
use recipe_insights::vocabulary::Vocabulary;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a recipe JSON file
    recipe: PathBuf,

    /// Serving count to scale the ingredients to (defaults to the recipe's own)
    #[arg(short, long)]
    servings: Option<u32>,

    /// Report language: he or en
    #[arg(short, long)]
    locale: Option<String>,

    /// Vocabulary JSON file replacing the built-in word lists
    #[arg(long)]
    vocabulary: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    let vocabulary_path = cli
        .vocabulary
        .or_else(|| env::var("RECIPE_VOCABULARY_PATH").ok().map(PathBuf::from));
    let locale = cli
        .locale
        .or_else(|| env::var("RECIPE_LOCALE").ok())
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

    let content = fs::read_to_string(&cli.recipe)
        .with_context(|| format!("Failed to read recipe file {}", cli.recipe.display()))?;
    let recipe: Recipe = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse recipe file {}", cli.recipe.display()))?;

    let custom_analyzer = match &vocabulary_path {
        Some(path) => {
            info!("Using vocabulary from {}", path.display());
            let vocabulary = Vocabulary::load_from_path(path)
                .with_context(|| format!("Failed to load vocabulary {}", path.display()))?;
            Some(
                RecipeAnalyzer::new(&vocabulary, AnalysisConfig::default())
                    .context("Vocabulary could not be compiled")?,
            )
        }
        None => None,
    };
    let analyzer: &RecipeAnalyzer = match &custom_analyzer {
        Some(analyzer) => analyzer,
        None => RecipeAnalyzer::builtin(),
    };

    let report = analyzer.analyze(&recipe, cli.servings.unwrap_or(recipe.servings));

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        let messages = LocalizationManager::new(&locale).context("Failed to load messages")?;
        print_report(&report, &messages);
    }

    Ok(())
}

fn print_report(report: &RecipeReport, messages: &LocalizationManager) {
    if !report.title.is_empty() {
        println!("{}", report.title);
    }
    let servings = report.servings.to_string();
    let original = report.original_servings.to_string();
    println!(
        "{}",
        messages.get_message_with_args(
            "report-servings",
            &[("servings", servings.as_str()), ("original", original.as_str())],
        )
    );
    let level = messages.difficulty_label(report.difficulty);
    println!(
        "{}",
        messages.get_message_with_args("report-difficulty", &[("level", level.as_str())])
    );

    println!();
    println!("{}", messages.get_message("report-diets-heading", None));
    if report.has_diet_badges() {
        for diet in &report.diets {
            print_diet(diet, messages);
        }
    } else {
        println!("{}", messages.get_message("report-no-diets", None));
    }

    println!();
    println!("{}", messages.get_message("report-ingredients-heading", None));
    for line in &report.ingredients {
        println!("- {}", line);
    }

    println!();
    println!("{}", messages.get_message("report-steps-heading", None));
    for step in &report.steps {
        let number = step.number.to_string();
        println!(
            "{}",
            messages.get_message_with_args(
                "report-step",
                &[("number", number.as_str()), ("text", step.instruction.as_str())],
            )
        );
        for timer in &step.timers {
            let seconds = timer.duration_seconds.to_string();
            println!(
                "   {}",
                messages.get_message_with_args(
                    "timer-line",
                    &[("label", timer.label.as_str()), ("seconds", seconds.as_str())],
                )
            );
        }
    }
}

fn print_diet(diet: &DietAnalysisResult, messages: &LocalizationManager) {
    let key = if diet.is_natively_compatible {
        "diet-native"
    } else if diet.is_convertible {
        "diet-convertible"
    } else {
        "diet-incompatible"
    };
    println!(
        "{}",
        messages.get_message_with_args(
            key,
            &[("emoji", diet.emoji.as_str()), ("label", diet.label.as_str())],
        )
    );

    for ingredient in &diet.problematic_ingredients {
        let line = match diet.substitutions.get(ingredient) {
            Some(replacement) => messages.get_message_with_args(
                "diet-substitution",
                &[("ingredient", ingredient.as_str()), ("replacement", replacement.as_str())],
            ),
            None => messages
                .get_message_with_args("diet-no-substitution", &[("ingredient", ingredient.as_str())]),
        };
        println!("   {}", line);
    }
}
