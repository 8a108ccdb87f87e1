//! # Integration Tests
//!
//! End-to-end checks over the public API: the documented recipe scenarios
//! and the properties every diet verdict, normalization and scaling result
//! must satisfy.

use recipe_insights::diet_matcher::{analyze_all_diets, analyze_diet, Diet};
use recipe_insights::difficulty::{calculate_difficulty, DifficultyLevel};
use recipe_insights::ingredient_model::{Amount, IngredientRef, Recipe, StructuredIngredient};
use recipe_insights::ingredient_normalizer::normalize;
use recipe_insights::ingredient_parser::IngredientParser;
use recipe_insights::quantity_scaler::{format_number, scale_factor, scale_ingredient};
use recipe_insights::recipe_analyzer::RecipeAnalyzer;
use recipe_insights::timer_extractor::{parse_timers_from_text, ParsedTimer};

/// Ingredient lists covering compatible, convertible and incompatible cases
fn sample_lists() -> Vec<Vec<&'static str>> {
    vec![
        vec![],
        vec!["מלח", "פלפל שחור"],
        vec!["חלב", "קמח", "מלח"],
        vec!["2 כוסות קמח", "200 גרם חמאה", "½ כוס סוכר", "3 ביצים"],
        vec!["300 גרם סלמון", "רוטב סויה", "כף דבש"],
        vec!["4 ביצים", "4 עגבניות בשלות", "בצל גדול", "שמן זית"],
        vec!["1 ק\"ג עוף", "2 כפות סילאן", "כוס קוסקוס", "חלב מרוכז"],
        vec!["", "   ", "½", "3"],
    ]
}

#[test]
fn test_shakshuka_scaled_to_half() {
    let ingredients = ["4 ביצים", "4 עגבניות בשלות", "בצל גדול", "שמן זית"];
    let rendered: Vec<String> = ingredients
        .iter()
        .map(|line| scale_ingredient(&IngredientRef::from(*line), 0.5))
        .collect();

    assert_eq!(
        rendered,
        vec!["2 ביצים", "2 עגבניות בשלות", "בצל גדול", "שמן זית"]
    );
}

#[test]
fn test_six_steps_nine_ingredients_is_medium() {
    let no_steps: [&str; 0] = [];
    assert_eq!(calculate_difficulty(6, 9, &no_steps), DifficultyLevel::Medium);
}

#[test]
fn test_minutes_then_half_hour_timers() {
    let timers = parse_timers_from_text("בשלו 10 דקות ואז המשיכו חצי שעה");
    assert_eq!(
        timers,
        vec![
            ParsedTimer {
                duration_seconds: 600,
                label: "10 דקות".to_string(),
            },
            ParsedTimer {
                duration_seconds: 1800,
                label: "חצי שעה".to_string(),
            },
        ]
    );
}

#[test]
fn test_milk_is_convertible_for_vegans() {
    let result = analyze_diet(&["חלב", "קמח", "מלח"], Diet::Vegan);

    assert!(!result.is_natively_compatible);
    assert_eq!(result.problematic_ingredients, vec!["חלב".to_string()]);
    assert!(result.is_convertible);
    assert_eq!(result.substitutions.get("חלב").map(String::as_str), Some("חלב שקדים"));
    assert_eq!(result.label, "טבעוני");
}

#[test]
fn test_native_compatibility_iff_no_problems() {
    for list in sample_lists() {
        for result in analyze_all_diets(&list) {
            assert_eq!(
                result.is_natively_compatible,
                result.problematic_ingredients.is_empty(),
                "{:?} / {}",
                list,
                result.diet
            );
        }
    }
}

#[test]
fn test_native_compatibility_implies_convertible() {
    for list in sample_lists() {
        for result in analyze_all_diets(&list) {
            if result.is_natively_compatible {
                assert!(result.is_convertible, "{:?} / {}", list, result.diet);
            }
        }
    }
}

#[test]
fn test_converted_diets_have_a_substitution_per_problem() {
    let mut converted = 0;
    for list in sample_lists() {
        for result in analyze_all_diets(&list) {
            if result.is_convertible && !result.is_natively_compatible {
                converted += 1;
                for ingredient in &result.problematic_ingredients {
                    assert!(
                        result.substitutions.contains_key(ingredient),
                        "no substitution for '{}' in {}",
                        ingredient,
                        result.diet
                    );
                }
            }
        }
    }
    assert!(converted > 0);
}

#[test]
fn test_missing_substitution_blocks_conversion() {
    let result = analyze_diet(&["300 גרם סלמון", "כף דבש"], Diet::Vegan);

    assert_eq!(result.problematic_ingredients.len(), 2);
    assert!(!result.is_convertible);
    assert_eq!(result.substitutions.len(), 1);
    assert!(result.substitutions.contains_key("כף דבש"));
}

#[test]
fn test_all_diets_in_fixed_order() {
    let diets: Vec<Diet> = analyze_all_diets(&["מלח"])
        .into_iter()
        .map(|result| result.diet)
        .collect();
    assert_eq!(diets, vec![Diet::GlutenFree, Diet::Vegan, Diet::LowSugar]);
}

#[test]
fn test_empty_list_is_compatible_with_everything() {
    let empty: [&str; 0] = [];
    let results = analyze_all_diets(&empty);

    assert_eq!(results.len(), 3);
    for result in results {
        assert!(result.is_natively_compatible);
        assert!(result.is_convertible);
        assert!(result.substitutions.is_empty());
    }
}

#[test]
fn test_normalize_is_idempotent() {
    let inputs = [
        "2 כוסות קמח",
        "½ כוס סוכר",
        "1.5 ליטר מים",
        "3 3 כפות שמן",
        "4 ביצים",
        "  שמן זית  ",
        "200 גר' שוקולד מריר",
        "1 ק\"ג עוף",
        "Butter",
        "",
        "12",
        "¾",
    ];
    for input in inputs {
        let once = normalize(input);
        assert_eq!(normalize(&once), once, "input '{}'", input);
    }
}

#[test]
fn test_unit_scale_preserves_quantity() {
    let lines = [
        ("2 כוסות קמח", "2 כוסות קמח"),
        ("½ כוס סוכר", "½ כוס סוכר"),
        ("1.5 ליטר מים", "1.5 ליטר מים"),
        ("חצי כוס שמן", "½ כוס שמן"),
        ("1/4 כפית מלח", "¼ כפית מלח"),
        ("בצל גדול", "בצל גדול"),
    ];
    for (line, expected) in lines {
        assert_eq!(scale_ingredient(&IngredientRef::from(line), 1.0), expected);
    }

    let flour = IngredientRef::from(
        StructuredIngredient::new("קמח")
            .with_amount(Amount::Number(2.0))
            .with_unit("כוסות"),
    );
    assert_eq!(scale_ingredient(&flour, 1.0), "2 כוסות קמח");
}

#[test]
fn test_format_number_examples() {
    assert_eq!(format_number(4.0), "4");
    assert_eq!(format_number(0.5), "½");
    assert_eq!(format_number(1.5), "1.5");
}

#[test]
fn test_many_steps_are_always_hard() {
    let no_steps: [&str; 0] = [];
    for steps in 9..30 {
        for ingredients in [0, 1, 5, 7, 8, 40] {
            assert_eq!(
                calculate_difficulty(steps, ingredients, &no_steps),
                DifficultyLevel::Hard
            );
        }
    }
}

#[test]
fn test_short_recipes_with_few_ingredients_stay_easy() {
    let steps = ["חותכים ירקות", "מערבבים בקערה"];
    for step_count in 0..=5 {
        for ingredient_count in (0..=7).rev() {
            assert_eq!(
                calculate_difficulty(step_count, ingredient_count, &steps),
                DifficultyLevel::Easy
            );
        }
    }
}

#[test]
fn test_both_representations_resolve_to_same_triple() {
    let parser = IngredientParser::builtin();
    let legacy = parser.parse(&IngredientRef::from("2 כוסות קמח"));
    let structured = parser.parse(&IngredientRef::from(
        StructuredIngredient::new("קמח")
            .with_amount(Amount::from("2"))
            .with_unit("כוסות"),
    ));

    assert_eq!(legacy, structured);
    assert_eq!(legacy.amount, Some(2.0));
    assert_eq!(legacy.unit, "כוסות");
    assert_eq!(legacy.name, "קמח");
}

#[test]
fn test_recipe_report_from_json() {
    let json = r#"{
        "title": "עוגת שוקולד",
        "servings": 8,
        "ingredients": [
            "2 כוסות קמח",
            {"name": "סוכר", "amount": 1, "unit": "כוס"},
            {"name": "שוקולד מריר", "amount": "200", "unit": "גרם"},
            {"name": "מלח", "amount": "קורט"},
            "4 ביצים"
        ],
        "instructions": [
            "ממיסים את השוקולד בבן מארי",
            "מערבבים את כל החומרים",
            "אופים 40 דקות"
        ]
    }"#;
    let recipe: Recipe = serde_json::from_str(json).unwrap();
    assert_eq!(scale_factor(recipe.servings, 4), 0.5);

    let report = RecipeAnalyzer::builtin().analyze(&recipe, 4);

    assert_eq!(report.servings, 4);
    assert_eq!(report.difficulty, DifficultyLevel::Hard);
    assert_eq!(
        report.ingredients,
        vec![
            "1 כוסות קמח",
            "½ כוס סוכר",
            "100 גרם שוקולד מריר",
            "קורט מלח",
            "2 ביצים",
        ]
    );
    assert!(report.has_diet_badges());

    let gluten_free = &report.diets[0];
    assert_eq!(gluten_free.problematic_ingredients, vec!["2 כוסות קמח".to_string()]);
    assert!(gluten_free.is_convertible);

    let low_sugar = &report.diets[2];
    assert_eq!(
        low_sugar.problematic_ingredients,
        vec!["1 כוס סוכר".to_string(), "200 גרם שוקולד מריר".to_string()]
    );

    assert!(report.steps[0].timers.is_empty());
    assert_eq!(report.steps[2].number, 3);
    assert_eq!(report.steps[2].timers[0].duration_seconds, 2400);
}
