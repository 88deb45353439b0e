//! Static pantry data
//!
//! Fixed ingredient lists and cooking tips. Loaded once, never mutated.

use serde_json::{Value, json};

/// Default ingredient list, also exposed as the
/// `recipes://ingredients/default` resource.
pub fn default_ingredients() -> Vec<&'static str> {
    vec![
        "pâtes",
        "tomates concassées",
        "ail",
        "oignon",
        "huile d'olive",
        "sel",
        "poivre",
    ]
}

/// Ingredient list for a named style. Unknown styles fall back to a
/// bruschetta-leaning list, matching the default branch of the suggestion
/// tool.
pub fn ingredients_for_style(style: &str) -> Vec<&'static str> {
    match style {
        "basics" => default_ingredients(),
        "fridge" => vec![
            "œufs",
            "fromage râpé",
            "lait",
            "beurre",
            "restes de légumes",
            "riz",
        ],
        _ => vec!["pain", "tomate", "mozzarella", "basilic", "huile d'olive"],
    }
}

/// Magical ingredient list for a named style.
pub fn magical_ingredients_for_style(style: &str) -> Vec<&'static str> {
    match style {
        "basics" => vec![
            "poudre de licorne",
            "ailes de fée",
            "potion d'élixir",
            "feuilles de mandragore",
            "cristaux de lune",
        ],
        "dark" => vec![
            "sang de dragon",
            "œil de troll",
            "racine de belladone",
            "poussière de vampire",
            "larmes de sirène",
        ],
        _ => vec![
            "étoiles filantes",
            "nectar d'arc-en-ciel",
            "plumes de phénix",
            "ambre magique",
            "eau de source enchantée",
        ],
    }
}

/// General cooking tips, keyed by theme. Exposed as the
/// `recipes://tips/general` resource.
pub fn general_tips() -> Value {
    json!({
        "cuisson": [
            "Saisir à feu vif puis réduire pour finir la cuisson.",
            "Saler l'eau des pâtes après ébullition.",
        ],
        "goût": [
            "Acidité: ajouter un peu de sucre ou carotte dans la sauce tomate.",
            "Umami: ajouter champignons, parmesan, sauce soja (petite quantité).",
        ],
    })
}
