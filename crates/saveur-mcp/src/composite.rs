//! Composite server
//!
//! Nests the image server inside the recipe-image server: the outer registry
//! re-exports the inner tools under an `img_` prefix and adds a derived
//! `get_recipe_image` tool that forwards one call to the inner dispatcher
//! and reformats the first hit. One-level delegation only; the inner
//! dispatcher is constructed independently and never calls back out.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::dispatch::{Dispatcher, FailureKind, InvocationResponse};
use crate::error::{Error, ToolError};
use crate::registry::{ToolDescriptor, ToolRegistry};
use crate::schema::{ParamKind, ParamSpec};

/// Re-map a relayed inner failure to the matching tool error.
fn relay_failure(kind: FailureKind, message: String) -> ToolError {
    match kind {
        FailureKind::Validation => ToolError::Validation(message),
        FailureKind::NotFound => ToolError::NotFound(message),
        FailureKind::Upstream => ToolError::Upstream(message),
        FailureKind::Composition => ToolError::Composition(message),
        _ => ToolError::Handler(message),
    }
}

#[derive(Debug, Deserialize)]
struct GetRecipeImageArgs {
    recipe_name: String,
    per_page: i64,
}

async fn get_recipe_image(
    inner: Arc<Dispatcher>,
    args: Map<String, Value>,
) -> Result<Value, ToolError> {
    let args: GetRecipeImageArgs = serde_json::from_value(Value::Object(args))
        .map_err(|e| ToolError::Handler(format!("argument decode: {e}")))?;

    let inner_args = json!({
        "query": args.recipe_name,
        "per_page": args.per_page,
    });

    let payload = match inner.invoke("search_images", &inner_args).await {
        InvocationResponse::Success { payload } => payload,
        InvocationResponse::Failure { kind, message } => {
            return Err(ToolError::Composition(format!(
                "inner search_images failed ({kind}): {message}"
            )));
        }
    };

    let image = payload
        .pointer("/images/0")
        .ok_or_else(|| {
            ToolError::Composition(format!("no image found for '{}'", args.recipe_name))
        })?;

    let url = image
        .get("url")
        .and_then(Value::as_str)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| {
            ToolError::Composition(format!(
                "image result for '{}' carries no url",
                args.recipe_name
            ))
        })?;

    let photographer = image
        .get("photographer")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .unwrap_or("Inconnu");

    Ok(json!(format!(
        "Image pour '{}': {} (Photographe: {})",
        args.recipe_name, url, photographer
    )))
}

/// Build the composite registry around an inner image dispatcher.
pub fn composite_tool_registry(inner: Arc<Dispatcher>) -> Result<ToolRegistry, Error> {
    let mut registry = ToolRegistry::new();

    // Re-export each inner tool under the img_ prefix, relaying the inner
    // response verbatim.
    for descriptor in inner.list() {
        let inner_name = descriptor.name.clone();
        let forwarder = inner.clone();
        registry.register(ToolDescriptor {
            name: format!("img_{}", descriptor.name),
            description: descriptor.description.clone(),
            params: descriptor.params.clone(),
            handler: Box::new(move |args| {
                let inner = forwarder.clone();
                let inner_name = inner_name.clone();
                Box::pin(async move {
                    match inner.invoke(&inner_name, &Value::Object(args)).await {
                        InvocationResponse::Success { payload } => Ok(payload),
                        InvocationResponse::Failure { kind, message } => {
                            Err(relay_failure(kind, message))
                        }
                    }
                })
            }),
        })?;
    }

    registry.register(ToolDescriptor {
        name: "get_recipe_image".to_string(),
        description: "Find a Pexels image for a recipe name".to_string(),
        params: vec![
            ParamSpec::required("recipe_name", ParamKind::String, "Name of the recipe"),
            ParamSpec::optional(
                "per_page",
                ParamKind::Integer,
                json!(1),
                "Number of candidate images (1-20)",
            ),
        ],
        handler: Box::new(move |args| {
            let inner = inner.clone();
            Box::pin(get_recipe_image(inner, args))
        }),
    })?;

    Ok(registry)
}
