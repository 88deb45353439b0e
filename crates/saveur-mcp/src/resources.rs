//! Read-only resources
//!
//! | URI | Description | Content-Type |
//! |-----|-------------|--------------|
//! | `recipes://ingredients/default` | Default ingredient list | application/json |
//! | `recipes://tips/general` | General cooking tips | application/json |
//! | `recipes://catalogue` | Catalogue summary | application/json |
//!
//! Producers are pure functions over static data; reading a resource twice
//! yields the same value.

use std::sync::Arc;

use serde_json::json;

use saveur_core::Catalogue;
use saveur_core::pantry;

use crate::error::Result;
use crate::registry::{ResourceDescriptor, ResourceRegistry};

/// Build the recipe server's resource registry.
pub fn recipe_resources(catalogue: Arc<Catalogue>) -> Result<ResourceRegistry> {
    let mut registry = ResourceRegistry::new();

    registry.register(ResourceDescriptor {
        uri: "recipes://ingredients/default".to_string(),
        name: "default-ingredients".to_string(),
        description: "Default ingredient list".to_string(),
        mime_type: "application/json".to_string(),
        producer: Box::new(|| json!(pantry::default_ingredients())),
    })?;

    registry.register(ResourceDescriptor {
        uri: "recipes://tips/general".to_string(),
        name: "general-tips".to_string(),
        description: "General cooking tips, not sourced from scraping".to_string(),
        mime_type: "application/json".to_string(),
        producer: Box::new(pantry::general_tips),
    })?;

    registry.register(ResourceDescriptor {
        uri: "recipes://catalogue".to_string(),
        name: "catalogue".to_string(),
        description: "Summary of the built-in recipe catalogue".to_string(),
        mime_type: "application/json".to_string(),
        producer: Box::new(move || {
            let recipes: Vec<_> = catalogue
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    json!({
                        "index": i + 1,
                        "name": r.name,
                        "category": r.category,
                        "servings": r.servings,
                    })
                })
                .collect();
            json!({ "count": recipes.len(), "recipes": recipes })
        }),
    })?;

    Ok(registry)
}
