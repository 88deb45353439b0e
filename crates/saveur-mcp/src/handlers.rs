//! Tool handlers
//!
//! Tool bodies for the recipe server and the image server, plus the registry
//! construction that wires them to their collaborators. Handlers receive the
//! validated, defaulted argument map from the dispatcher and deserialize it
//! into typed argument structs.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value, json};

use saveur_core::Catalogue;
use saveur_core::pantry;

use crate::collab::{DocumentStore, ImageSearch, RecipeScraper, normalize_extended_json};
use crate::error::{Error, ToolError};
use crate::registry::{ToolDescriptor, ToolRegistry};
use crate::schema::{ParamKind, ParamSpec};

/// Collaborators and data the recipe server's tools close over.
#[derive(Clone)]
pub struct RecipeDeps {
    pub catalogue: Arc<Catalogue>,
    pub scraper: Arc<dyn RecipeScraper>,
    pub store: Arc<dyn DocumentStore>,
}

fn parse_args<T: for<'de> Deserialize<'de>>(args: Map<String, Value>) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(args))
        .map_err(|e| ToolError::Handler(format!("argument decode: {e}")))
}

// ============================================================================
// Recipe server tools
// ============================================================================

#[derive(Debug, Deserialize)]
struct StyleArgs {
    style: String,
}

async fn list_ingredients(args: Map<String, Value>) -> Result<Value, ToolError> {
    let args: StyleArgs = parse_args(args)?;
    Ok(json!(pantry::ingredients_for_style(&args.style)))
}

async fn list_magical_ingredients(args: Map<String, Value>) -> Result<Value, ToolError> {
    let args: StyleArgs = parse_args(args)?;
    Ok(json!(pantry::magical_ingredients_for_style(&args.style)))
}

#[derive(Debug, Deserialize)]
struct InventRecipeArgs {
    ingredients: Vec<String>,
    servings: i64,
    constraints: Vec<String>,
}

/// Improvise a recipe from whatever is on hand. The structured recipe object
/// is returned on every path; the vegetarian constraint only inserts an
/// extra preparation step.
async fn invent_recipe(args: Map<String, Value>) -> Result<Value, ToolError> {
    let args: InventRecipeArgs = parse_args(args)?;

    let mut steps = vec![
        "Préparer et découper les ingrédients.".to_string(),
        "Cuire/assembler selon les ingrédients disponibles.".to_string(),
        "Assaisonner, goûter, ajuster.".to_string(),
        "Servir.".to_string(),
    ];

    if args
        .constraints
        .iter()
        .any(|c| c.to_lowercase() == "vegetarien")
    {
        steps.insert(
            1,
            "Éviter les ingrédients carnés; privilégier légumes/fromages/légumineuses."
                .to_string(),
        );
    }

    Ok(json!({
        "title": "Recette improvisée",
        "servings": args.servings,
        "ingredients": args.ingredients,
        "constraints": args.constraints,
        "steps": steps,
        "tips_uri": "recipes://tips/general",
    }))
}

#[derive(Debug, Deserialize)]
struct InventMagicalRecipeArgs {
    magical_ingredients: Vec<String>,
    servings: i64,
    magic_type: String,
}

async fn invent_magical_recipe(args: Map<String, Value>) -> Result<Value, ToolError> {
    let args: InventMagicalRecipeArgs = parse_args(args)?;

    let steps = [
        "Mélanger les ingrédients magiques sous la lune.",
        "Chanter une incantation appropriée.",
        "Laisser infuser avec de la magie pure.",
        "Servir avec un sort de présentation.",
    ];

    Ok(json!({
        "title": format!("Recette Magique de {}", args.magic_type),
        "servings": args.servings,
        "ingredients": args.magical_ingredients,
        "steps": steps,
        "magic_type": args.magic_type,
        "tips_uri": "recipes://tips/general",
    }))
}

#[derive(Debug, Deserialize)]
struct ScrapeArgs {
    topic: String,
}

async fn scrape_recipes(
    scraper: Arc<dyn RecipeScraper>,
    args: Map<String, Value>,
) -> Result<Value, ToolError> {
    let args: ScrapeArgs = parse_args(args)?;
    let titles = scraper.fetch_titles(&args.topic).await?;
    Ok(json!({
        "topic": args.topic,
        "count": titles.len(),
        "titles": titles,
    }))
}

async fn list_recipes(catalogue: Arc<Catalogue>) -> Result<Value, ToolError> {
    let recipes: Vec<Value> = catalogue
        .iter()
        .enumerate()
        .map(|(i, r)| {
            json!({
                "index": i + 1,
                "name": r.name,
                "category": r.category,
                "servings": r.servings,
                "wine_pairing": r.wine_pairing,
            })
        })
        .collect();

    Ok(json!({
        "count": recipes.len(),
        "recipes": recipes,
    }))
}

#[derive(Debug, Deserialize)]
struct GetRecipeArgs {
    index: i64,
}

async fn get_recipe(
    catalogue: Arc<Catalogue>,
    args: Map<String, Value>,
) -> Result<Value, ToolError> {
    let args: GetRecipeArgs = parse_args(args)?;
    let recipe = catalogue.get(args.index)?;
    let mut value = serde_json::to_value(recipe)?;
    value["index"] = json!(args.index);
    Ok(value)
}

#[derive(Debug, Deserialize)]
struct ScaleRecipeArgs {
    index: i64,
    servings: i64,
}

async fn scale_recipe(
    catalogue: Arc<Catalogue>,
    args: Map<String, Value>,
) -> Result<Value, ToolError> {
    let args: ScaleRecipeArgs = parse_args(args)?;
    let scaled = catalogue.get_scaled(args.index, args.servings)?;
    let mut value = serde_json::to_value(&scaled)?;
    value["index"] = json!(args.index);
    Ok(value)
}

#[derive(Debug, Deserialize)]
struct QueryCollectionArgs {
    collection: String,
    filter: Map<String, Value>,
}

/// Raw pass-through query against a named collection. All `query_*`
/// endpoints collapse into this one parameterized tool.
async fn query_collection(
    store: Arc<dyn DocumentStore>,
    args: Map<String, Value>,
) -> Result<Value, ToolError> {
    let args: QueryCollectionArgs = parse_args(args)?;
    let documents = store.query(&args.collection, &args.filter).await?;

    let documents: Vec<Value> = documents
        .into_iter()
        .map(|doc| normalize_extended_json(Value::Object(doc)))
        .collect();

    Ok(json!({
        "collection": args.collection,
        "count": documents.len(),
        "documents": documents,
    }))
}

/// Build the recipe server's tool registry.
pub fn recipe_tool_registry(deps: &RecipeDeps) -> Result<ToolRegistry, Error> {
    let mut registry = ToolRegistry::new();

    registry.register(ToolDescriptor {
        name: "list_ingredients".to_string(),
        description: "List ingredients for a simple style (basics, fridge)".to_string(),
        params: vec![ParamSpec::optional(
            "style",
            ParamKind::String,
            json!("basics"),
            "Ingredient list style",
        )],
        handler: Box::new(|args| Box::pin(list_ingredients(args))),
    })?;

    registry.register(ToolDescriptor {
        name: "list_magical_ingredients".to_string(),
        description: "List magical ingredients for a style (basics, dark)".to_string(),
        params: vec![ParamSpec::optional(
            "style",
            ParamKind::String,
            json!("basics"),
            "Ingredient list style",
        )],
        handler: Box::new(|args| Box::pin(list_magical_ingredients(args))),
    })?;

    registry.register(ToolDescriptor {
        name: "invent_recipe".to_string(),
        description: "Improvise a structured recipe from a list of ingredients".to_string(),
        params: vec![
            ParamSpec::required("ingredients", ParamKind::StringArray, "Available ingredients"),
            ParamSpec::optional("servings", ParamKind::Integer, json!(2), "Number of servings"),
            ParamSpec::optional(
                "constraints",
                ParamKind::StringArray,
                json!([]),
                "Dietary constraints (e.g. vegetarien)",
            ),
        ],
        handler: Box::new(|args| Box::pin(invent_recipe(args))),
    })?;

    registry.register(ToolDescriptor {
        name: "invent_magical_recipe".to_string(),
        description: "Improvise a magical recipe from magical ingredients".to_string(),
        params: vec![
            ParamSpec::required(
                "magical_ingredients",
                ParamKind::StringArray,
                "Magical ingredients",
            ),
            ParamSpec::optional("servings", ParamKind::Integer, json!(2), "Number of servings"),
            ParamSpec::optional(
                "magic_type",
                ParamKind::String,
                json!("enchantement"),
                "Kind of magic to cook with",
            ),
        ],
        handler: Box::new(|args| Box::pin(invent_magical_recipe(args))),
    })?;

    let scraper = deps.scraper.clone();
    registry.register(ToolDescriptor {
        name: "scrape_recipes".to_string(),
        description: "Scrape recipe titles for a topic from Marmiton (at most 10)".to_string(),
        params: vec![ParamSpec::optional(
            "topic",
            ParamKind::String,
            json!("noël"),
            "Search topic",
        )],
        handler: Box::new(move |args| {
            let scraper = scraper.clone();
            Box::pin(scrape_recipes(scraper, args))
        }),
    })?;

    let catalogue = deps.catalogue.clone();
    registry.register(ToolDescriptor {
        name: "list_recipes".to_string(),
        description: "List the recipe catalogue (name, category, servings)".to_string(),
        params: vec![],
        handler: Box::new(move |_| {
            let catalogue = catalogue.clone();
            Box::pin(list_recipes(catalogue))
        }),
    })?;

    let catalogue = deps.catalogue.clone();
    registry.register(ToolDescriptor {
        name: "get_recipe".to_string(),
        description: "Fetch a catalogue recipe by 1-based index".to_string(),
        params: vec![ParamSpec::required(
            "index",
            ParamKind::Integer,
            "1-based catalogue index",
        )],
        handler: Box::new(move |args| {
            let catalogue = catalogue.clone();
            Box::pin(get_recipe(catalogue, args))
        }),
    })?;

    let catalogue = deps.catalogue.clone();
    registry.register(ToolDescriptor {
        name: "scale_recipe".to_string(),
        description: "Fetch a catalogue recipe scaled to a number of servings".to_string(),
        params: vec![
            ParamSpec::required("index", ParamKind::Integer, "1-based catalogue index"),
            ParamSpec::required("servings", ParamKind::Integer, "Target servings"),
        ],
        handler: Box::new(move |args| {
            let catalogue = catalogue.clone();
            Box::pin(scale_recipe(catalogue, args))
        }),
    })?;

    let store = deps.store.clone();
    registry.register(ToolDescriptor {
        name: "query_collection".to_string(),
        description: "Query a document-store collection with an exact-match filter".to_string(),
        params: vec![
            ParamSpec::required("collection", ParamKind::String, "Collection name"),
            ParamSpec::optional(
                "filter",
                ParamKind::Object,
                json!({}),
                "Exact-match filter on top-level fields",
            ),
        ],
        handler: Box::new(move |args| {
            let store = store.clone();
            Box::pin(query_collection(store, args))
        }),
    })?;

    Ok(registry)
}

// ============================================================================
// Image server tools
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchImagesArgs {
    query: String,
    per_page: i64,
}

async fn search_images(
    search: Arc<dyn ImageSearch>,
    args: Map<String, Value>,
) -> Result<Value, ToolError> {
    let args: SearchImagesArgs = parse_args(args)?;

    if args.query.is_empty() {
        return Err(ToolError::Validation("query must not be empty".to_string()));
    }
    if !(1..=20).contains(&args.per_page) {
        return Err(ToolError::Validation(
            "per_page must be between 1 and 20".to_string(),
        ));
    }

    let response = search.search(&args.query, args.per_page).await?;
    Ok(serde_json::to_value(response)?)
}

/// Build the image server's tool registry.
pub fn image_tool_registry(search: Arc<dyn ImageSearch>) -> Result<ToolRegistry, Error> {
    let mut registry = ToolRegistry::new();

    registry.register(ToolDescriptor {
        name: "search_images".to_string(),
        description: "Search images on Pexels by query".to_string(),
        params: vec![
            ParamSpec::required("query", ParamKind::String, "Search keywords"),
            ParamSpec::optional(
                "per_page",
                ParamKind::Integer,
                json!(5),
                "Number of images (1-20)",
            ),
        ],
        handler: Box::new(move |args| {
            let search = search.clone();
            Box::pin(search_images(search, args))
        }),
    })?;

    Ok(registry)
}
