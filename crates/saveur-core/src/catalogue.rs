//! In-memory recipe catalogue
//!
//! A small fixed set of recipes addressed by 1-based index, the way the host
//! sees them in `list_recipes`. The catalogue is built once at startup and
//! never mutated.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::quantity::scale_quantity;

/// One ingredient line of a recipe. Quantity is a free-form string; only
/// gram-denominated quantities participate in scaling.
#[derive(Debug, Clone, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
}

/// A catalogue recipe.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub name: String,
    pub category: String,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wine_pairing: Option<String>,
}

impl Recipe {
    /// Return a copy of this recipe adjusted to `servings` portions.
    ///
    /// Gram quantities are scaled proportionally and rounded to the nearest
    /// gram; other quantities are kept verbatim.
    pub fn scaled_to(&self, servings: u32) -> Recipe {
        let ingredients = self
            .ingredients
            .iter()
            .map(|i| Ingredient {
                name: i.name.clone(),
                quantity: scale_quantity(&i.quantity, self.servings, servings),
            })
            .collect();

        Recipe {
            name: self.name.clone(),
            category: self.category.clone(),
            servings,
            ingredients,
            steps: self.steps.clone(),
            wine_pairing: self.wine_pairing.clone(),
        }
    }
}

/// The recipe catalogue.
#[derive(Debug, Clone)]
pub struct Catalogue {
    recipes: Vec<Recipe>,
}

impl Catalogue {
    /// Build the built-in catalogue.
    pub fn builtin() -> Self {
        Self {
            recipes: builtin_recipes(),
        }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Iterate over all recipes in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Fetch a recipe by 1-based index.
    ///
    /// Index 0, negative indices, and indices past the end are all rejected
    /// with [`Error::RecipeIndexOutOfRange`].
    pub fn get(&self, index: i64) -> Result<&Recipe> {
        if index < 1 || index as usize > self.recipes.len() {
            return Err(Error::RecipeIndexOutOfRange {
                index,
                len: self.recipes.len(),
            });
        }
        Ok(&self.recipes[(index - 1) as usize])
    }

    /// Fetch a recipe by 1-based index, scaled to `servings` portions.
    pub fn get_scaled(&self, index: i64, servings: i64) -> Result<Recipe> {
        if servings < 1 {
            return Err(Error::InvalidServings { servings });
        }
        let recipe = self.get(index)?;
        Ok(recipe.scaled_to(servings as u32))
    }
}

fn recipe(
    name: &str,
    category: &str,
    servings: u32,
    ingredients: &[(&str, &str)],
    steps: &[&str],
    wine_pairing: Option<&str>,
) -> Recipe {
    Recipe {
        name: name.to_string(),
        category: category.to_string(),
        servings,
        ingredients: ingredients
            .iter()
            .map(|(n, q)| Ingredient {
                name: n.to_string(),
                quantity: q.to_string(),
            })
            .collect(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
        wine_pairing: wine_pairing.map(str::to_string),
    }
}

fn builtin_recipes() -> Vec<Recipe> {
    vec![
        recipe(
            "Pâtes à la sauce tomate",
            "plat",
            6,
            &[
                ("pâtes", "150g"),
                ("tomates concassées", "400g"),
                ("ail", "2 gousses"),
                ("oignon", "1"),
                ("huile d'olive", "2 c. à soupe"),
            ],
            &[
                "Faire revenir l'oignon et l'ail dans l'huile d'olive.",
                "Ajouter les tomates et laisser mijoter 20 minutes.",
                "Cuire les pâtes al dente et mélanger à la sauce.",
            ],
            None,
        ),
        recipe(
            "Bœuf bourguignon",
            "plat",
            6,
            &[
                ("bœuf à braiser", "1.2kg"),
                ("lardons", "150g"),
                ("carottes", "3"),
                ("champignons de Paris", "250g"),
                ("vin rouge", "75cl"),
            ],
            &[
                "Saisir la viande sur toutes les faces.",
                "Ajouter les légumes, mouiller au vin rouge.",
                "Laisser mijoter à couvert 3 heures.",
            ],
            Some("Bourgogne rouge"),
        ),
        recipe(
            "Quiche lorraine",
            "entrée",
            4,
            &[
                ("pâte brisée", "1"),
                ("lardons", "200g"),
                ("crème fraîche", "200g"),
                ("œufs", "3"),
                ("gruyère râpé", "100g"),
            ],
            &[
                "Foncer le moule avec la pâte.",
                "Répartir les lardons, verser l'appareil crème-œufs.",
                "Cuire 35 minutes à 180°C.",
            ],
            Some("Riesling"),
        ),
        recipe(
            "Ratatouille",
            "accompagnement",
            4,
            &[
                ("aubergines", "2"),
                ("courgettes", "2"),
                ("poivrons", "2"),
                ("tomates", "500g"),
                ("herbes de Provence", "1 c. à soupe"),
            ],
            &[
                "Couper tous les légumes en dés.",
                "Faire revenir séparément puis réunir.",
                "Mijoter doucement 45 minutes.",
            ],
            None,
        ),
        recipe(
            "Mousse au chocolat",
            "dessert",
            6,
            &[
                ("chocolat noir", "200g"),
                ("œufs", "6"),
                ("sucre", "30g"),
                ("sel", "1 pincée"),
            ],
            &[
                "Fondre le chocolat au bain-marie.",
                "Incorporer les jaunes, monter les blancs en neige.",
                "Mélanger délicatement et réfrigérer 4 heures.",
            ],
            None,
        ),
    ]
}
