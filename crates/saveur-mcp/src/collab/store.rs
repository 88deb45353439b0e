//! Document-store collaborator
//!
//! Raw pass-through queries against named collections. The interface mirrors
//! what a Mongo-backed client would offer; the shipped implementation is an
//! in-memory store, and extended-JSON field forms (`$oid`, `$date`) are
//! normalized to plain strings before documents cross the dispatcher
//! boundary.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::error::ToolError;

/// Document-store collaborator interface.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return all documents of `collection` matching `filter`.
    ///
    /// Matching is exact on top-level fields. An unknown collection yields
    /// an empty result, matching passthrough query semantics.
    async fn query(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
    ) -> Result<Vec<Map<String, Value>>, ToolError>;
}

/// In-memory document store.
#[derive(Default)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<Map<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named collection.
    pub fn with_collection(mut self, name: &str, documents: Vec<Value>) -> Self {
        let documents = documents
            .into_iter()
            .filter_map(|doc| match doc {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.collections.insert(name.to_string(), documents);
        self
    }

    /// Store seeded with the sample recipe collections the server ships.
    pub fn seeded() -> Self {
        Self::new()
            .with_collection(
                "recettes",
                vec![
                    json!({
                        "_id": {"$oid": "65f0a3b2c4d5e6f708192a3b"},
                        "nom": "Tarte tatin",
                        "categorie": "dessert",
                        "ajoutee_le": {"$date": "2024-03-12T09:30:00Z"},
                    }),
                    json!({
                        "_id": {"$oid": "65f0a3b2c4d5e6f708192a3c"},
                        "nom": "Soupe à l'oignon",
                        "categorie": "entrée",
                        "ajoutee_le": {"$date": "2024-04-02T18:00:00Z"},
                    }),
                ],
            )
            .with_collection(
                "avis",
                vec![
                    json!({
                        "_id": {"$oid": "65f0a3b2c4d5e6f708192a3d"},
                        "recette": "Tarte tatin",
                        "note": 5,
                        "commentaire": "Parfaite caramélisation.",
                    }),
                ],
            )
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn query(
        &self,
        collection: &str,
        filter: &Map<String, Value>,
    ) -> Result<Vec<Map<String, Value>>, ToolError> {
        let Some(documents) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|doc| filter.iter().all(|(k, v)| doc.get(k) == Some(v)))
            .cloned()
            .collect())
    }
}

/// Normalize extended-JSON forms to JSON-native values.
///
/// `{"$oid": s}` and `{"$date": s}` wrappers collapse to the inner string at
/// any nesting depth; everything else is preserved.
pub fn normalize_extended_json(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some(Value::String(s)) = map.get("$oid").or_else(|| map.get("$date")) {
                    return Value::String(s.clone());
                }
            }
            Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, normalize_extended_json(v)))
                    .collect(),
            )
        }
        Value::Array(items) => {
            Value::Array(items.into_iter().map(normalize_extended_json).collect())
        }
        other => other,
    }
}
