//! Prompt templates
//!
//! Named prompts producing natural-language text from arguments. No logic
//! beyond string interpolation lives here.

use serde_json::Value;

use crate::error::Result;
use crate::registry::{PromptDescriptor, PromptRegistry};

/// Build the recipe server's prompt registry.
pub fn recipe_prompts() -> Result<PromptRegistry> {
    let mut registry = PromptRegistry::new();

    registry.register(PromptDescriptor {
        name: "recette-magique".to_string(),
        description: "Prompt to generate a magical recipe from ingredients".to_string(),
        arguments: vec!["ingredients".to_string()],
        renderer: Box::new(|args| {
            let ingredients = args
                .get("ingredients")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            format!(
                "Crée une recette magique fantastique et amusante avec ces ingrédients : {ingredients}. \
                 Inclue des étapes magiques et des effets spéciaux."
            )
        }),
    })?;

    registry.register(PromptDescriptor {
        name: "astuces-magiques".to_string(),
        description: "Prompt for magical cooking tips".to_string(),
        arguments: vec![],
        renderer: Box::new(|_| {
            "Donne-moi des astuces pour cuisiner avec des ingrédients magiques, comme comment \
             éviter les malédictions ou amplifier les sorts culinaires."
                .to_string()
        }),
    })?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    #[test]
    fn magical_recipe_prompt_interpolates_ingredients() {
        let registry = recipe_prompts().unwrap();
        let mut args = Map::new();
        args.insert(
            "ingredients".to_string(),
            json!(["poudre de licorne", "cristaux de lune"]),
        );
        let text = registry.render("recette-magique", &args).unwrap();
        assert!(text.contains("poudre de licorne, cristaux de lune"));
    }

    #[test]
    fn tips_prompt_takes_no_arguments() {
        let registry = recipe_prompts().unwrap();
        let text = registry.render("astuces-magiques", &Map::new()).unwrap();
        assert!(text.contains("malédictions"));
    }

    #[test]
    fn both_prompts_listed_in_order() {
        let registry = recipe_prompts().unwrap();
        let names: Vec<&str> = registry.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["recette-magique", "astuces-magiques"]);
    }
}
