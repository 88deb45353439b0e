//! Dispatcher-level tests for the recipe, image, and composite servers,
//! exercised against stub collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use rstest::rstest;
use serde_json::{Map, Value, json};

use saveur_core::Catalogue;
use saveur_mcp::collab::{
    DocumentStore, ImageResult, ImageSearch, ImageSearchResponse, MemoryStore, RecipeScraper,
};
use saveur_mcp::composite::composite_tool_registry;
use saveur_mcp::handlers::{RecipeDeps, image_tool_registry, recipe_tool_registry};
use saveur_mcp::{Dispatcher, FailureKind, InvocationResponse, ToolError};

// ============================================================================
// Stub collaborators
// ============================================================================

struct StubImageSearch {
    images: Vec<ImageResult>,
}

impl StubImageSearch {
    fn with_two_photos() -> Self {
        Self {
            images: vec![
                ImageResult {
                    id: 1,
                    url: "https://img.example/first.jpg".to_string(),
                    photographer: "Ana".to_string(),
                    alt: "first".to_string(),
                },
                ImageResult {
                    id: 2,
                    url: "https://img.example/second.jpg".to_string(),
                    photographer: "Ben".to_string(),
                    alt: "second".to_string(),
                },
            ],
        }
    }

    fn empty() -> Self {
        Self { images: Vec::new() }
    }
}

#[async_trait]
impl ImageSearch for StubImageSearch {
    async fn search(&self, query: &str, _per_page: i64) -> Result<ImageSearchResponse, ToolError> {
        Ok(ImageSearchResponse {
            query: query.to_string(),
            total_results: self.images.len() as i64,
            images: self.images.clone(),
        })
    }
}

struct FailingImageSearch;

#[async_trait]
impl ImageSearch for FailingImageSearch {
    async fn search(&self, _query: &str, _per_page: i64) -> Result<ImageSearchResponse, ToolError> {
        Err(ToolError::Upstream("Pexels error 500".to_string()))
    }
}

struct StubScraper;

#[async_trait]
impl RecipeScraper for StubScraper {
    async fn fetch_titles(&self, topic: &str) -> Result<Vec<String>, ToolError> {
        Ok(vec![
            format!("Recette de {topic} 1"),
            format!("Recette de {topic} 2"),
        ])
    }
}

struct BrokenScraper;

#[async_trait]
impl RecipeScraper for BrokenScraper {
    async fn fetch_titles(&self, _topic: &str) -> Result<Vec<String>, ToolError> {
        Err(ToolError::Upstream("Marmiton error 503".to_string()))
    }
}

fn recipe_dispatcher() -> Dispatcher {
    let deps = RecipeDeps {
        catalogue: Arc::new(Catalogue::builtin()),
        scraper: Arc::new(StubScraper),
        store: Arc::new(MemoryStore::seeded()),
    };
    Dispatcher::new(recipe_tool_registry(&deps).unwrap())
}

fn image_dispatcher(search: impl ImageSearch + 'static) -> Dispatcher {
    Dispatcher::new(image_tool_registry(Arc::new(search)).unwrap())
}

fn composite_dispatcher(search: impl ImageSearch + 'static) -> Dispatcher {
    let inner = Arc::new(image_dispatcher(search));
    Dispatcher::new(composite_tool_registry(inner).unwrap())
}

fn expect_failure(response: InvocationResponse) -> (FailureKind, String) {
    match response {
        InvocationResponse::Failure { kind, message } => (kind, message),
        InvocationResponse::Success { payload } => {
            panic!("expected failure, got success: {payload}")
        }
    }
}

// ============================================================================
// Dispatch contract
// ============================================================================

#[tokio::test]
async fn unknown_tool_always_fails() {
    let dispatcher = recipe_dispatcher();
    let (kind, _) = expect_failure(dispatcher.invoke("nonexistent", &json!({})).await);
    assert_eq!(kind, FailureKind::UnknownTool);
}

#[tokio::test]
async fn search_images_defaults_per_page() {
    let dispatcher = image_dispatcher(StubImageSearch::with_two_photos());
    let response = dispatcher
        .invoke("search_images", &json!({"query": "pasta"}))
        .await;
    assert!(response.is_success());
}

#[tokio::test]
async fn search_images_without_query_is_missing_argument() {
    let dispatcher = image_dispatcher(StubImageSearch::with_two_photos());
    let (kind, message) = expect_failure(dispatcher.invoke("search_images", &json!({})).await);
    assert_eq!(kind, FailureKind::MissingArgument);
    assert!(message.contains("query"));
}

#[tokio::test]
async fn empty_query_is_a_validation_failure() {
    let dispatcher = image_dispatcher(StubImageSearch::with_two_photos());
    let (kind, _) = expect_failure(
        dispatcher
            .invoke("search_images", &json!({"query": "", "per_page": 5}))
            .await,
    );
    assert_eq!(kind, FailureKind::Validation);
}

#[rstest]
#[case(0)]
#[case(21)]
#[case(-3)]
#[tokio::test]
async fn per_page_out_of_range_is_a_validation_failure(#[case] per_page: i64) {
    let dispatcher = image_dispatcher(StubImageSearch::with_two_photos());
    let (kind, message) = expect_failure(
        dispatcher
            .invoke("search_images", &json!({"query": "beach", "per_page": per_page}))
            .await,
    );
    assert_eq!(kind, FailureKind::Validation);
    assert!(message.contains("per_page"));
}

#[tokio::test]
async fn stub_search_preserves_order_and_count() {
    let dispatcher = image_dispatcher(StubImageSearch::with_two_photos());
    let payload = dispatcher
        .invoke("search_images", &json!({"query": "beach", "per_page": 5}))
        .await
        .into_payload()
        .unwrap();

    assert_eq!(payload["total_results"], 2);
    assert_eq!(payload["images"].as_array().unwrap().len(), 2);
    assert_eq!(payload["images"][0]["url"], "https://img.example/first.jpg");
    assert_eq!(payload["images"][1]["url"], "https://img.example/second.jpg");
}

#[tokio::test]
async fn upstream_failure_is_classified() {
    let dispatcher = image_dispatcher(FailingImageSearch);
    let (kind, _) = expect_failure(
        dispatcher
            .invoke("search_images", &json!({"query": "beach", "per_page": 5}))
            .await,
    );
    assert_eq!(kind, FailureKind::Upstream);
}

// ============================================================================
// Catalogue tools
// ============================================================================

#[tokio::test]
async fn scale_recipe_adjusts_gram_quantities() {
    let dispatcher = recipe_dispatcher();
    // Recipe 1 serves 6 with 150g of pasta; at 8 servings that is 200g.
    let payload = dispatcher
        .invoke("scale_recipe", &json!({"index": 1, "servings": 8}))
        .await
        .into_payload()
        .unwrap();

    assert_eq!(payload["servings"], 8);
    let ingredients = payload["ingredients"].as_array().unwrap();
    assert_eq!(ingredients[0]["quantity"], "200g");
    // Non-gram quantities pass through untouched
    assert_eq!(ingredients[2]["quantity"], "2 gousses");
}

#[tokio::test]
async fn recipe_index_zero_yields_structured_failure() {
    let dispatcher = recipe_dispatcher();
    let (kind, message) = expect_failure(dispatcher.invoke("get_recipe", &json!({"index": 0})).await);
    assert_eq!(kind, FailureKind::NotFound);
    assert!(message.contains("0"));
}

#[tokio::test]
async fn recipe_index_past_end_yields_structured_failure() {
    let dispatcher = recipe_dispatcher();
    let (kind, _) = expect_failure(dispatcher.invoke("get_recipe", &json!({"index": 99})).await);
    assert_eq!(kind, FailureKind::NotFound);
}

#[tokio::test]
async fn get_recipe_returns_full_structure() {
    let dispatcher = recipe_dispatcher();
    let payload = dispatcher
        .invoke("get_recipe", &json!({"index": 2}))
        .await
        .into_payload()
        .unwrap();
    assert_eq!(payload["name"], "Bœuf bourguignon");
    assert_eq!(payload["wine_pairing"], "Bourgogne rouge");
    assert_eq!(payload["index"], 2);
    assert!(payload["steps"].is_array());
}

#[tokio::test]
async fn list_recipes_indexes_from_one() {
    let dispatcher = recipe_dispatcher();
    let payload = dispatcher
        .invoke("list_recipes", &json!({}))
        .await
        .into_payload()
        .unwrap();
    assert_eq!(payload["count"], 5);
    assert_eq!(payload["recipes"][0]["index"], 1);
}

// ============================================================================
// Suggestion tools
// ============================================================================

#[tokio::test]
async fn invent_recipe_always_returns_a_recipe_object() {
    let dispatcher = recipe_dispatcher();

    // Without constraints
    let payload = dispatcher
        .invoke("invent_recipe", &json!({"ingredients": ["pâtes", "ail"]}))
        .await
        .into_payload()
        .unwrap();
    assert_eq!(payload["title"], "Recette improvisée");
    assert_eq!(payload["servings"], 2);
    assert_eq!(payload["steps"].as_array().unwrap().len(), 4);

    // The vegetarian constraint only adds a step
    let payload = dispatcher
        .invoke(
            "invent_recipe",
            &json!({"ingredients": ["pâtes"], "constraints": ["Vegetarien"]}),
        )
        .await
        .into_payload()
        .unwrap();
    assert_eq!(payload["steps"].as_array().unwrap().len(), 5);
    assert!(payload["steps"][1].as_str().unwrap().contains("carnés"));
}

#[tokio::test]
async fn invent_magical_recipe_carries_magic_type() {
    let dispatcher = recipe_dispatcher();
    let payload = dispatcher
        .invoke(
            "invent_magical_recipe",
            &json!({"magical_ingredients": ["poudre de licorne"], "magic_type": "illusion"}),
        )
        .await
        .into_payload()
        .unwrap();
    assert_eq!(payload["title"], "Recette Magique de illusion");
    assert_eq!(payload["magic_type"], "illusion");
    assert_eq!(payload["tips_uri"], "recipes://tips/general");
}

#[tokio::test]
async fn list_ingredients_styles() {
    let dispatcher = recipe_dispatcher();

    let payload = dispatcher
        .invoke("list_ingredients", &json!({}))
        .await
        .into_payload()
        .unwrap();
    assert!(payload.as_array().unwrap().iter().any(|v| v == "pâtes"));

    let payload = dispatcher
        .invoke("list_ingredients", &json!({"style": "fridge"}))
        .await
        .into_payload()
        .unwrap();
    assert!(payload.as_array().unwrap().iter().any(|v| v == "riz"));
}

#[tokio::test]
async fn scrape_recipes_uses_collaborator() {
    let dispatcher = recipe_dispatcher();
    let payload = dispatcher
        .invoke("scrape_recipes", &json!({}))
        .await
        .into_payload()
        .unwrap();
    assert_eq!(payload["topic"], "noël");
    assert_eq!(payload["count"], 2);
    assert_eq!(payload["titles"][0], "Recette de noël 1");
}

#[tokio::test]
async fn broken_scraper_surfaces_as_upstream() {
    let deps = RecipeDeps {
        catalogue: Arc::new(Catalogue::builtin()),
        scraper: Arc::new(BrokenScraper),
        store: Arc::new(MemoryStore::new()),
    };
    let dispatcher = Dispatcher::new(recipe_tool_registry(&deps).unwrap());

    let (kind, _) = expect_failure(dispatcher.invoke("scrape_recipes", &json!({})).await);
    assert_eq!(kind, FailureKind::Upstream);
}

// ============================================================================
// Document-store passthrough
// ============================================================================

#[tokio::test]
async fn query_collection_normalizes_extended_json() {
    let dispatcher = recipe_dispatcher();
    let payload = dispatcher
        .invoke("query_collection", &json!({"collection": "recettes"}))
        .await
        .into_payload()
        .unwrap();

    assert_eq!(payload["collection"], "recettes");
    assert_eq!(payload["count"], 2);
    // $oid and $date wrappers collapse to plain strings
    let first = &payload["documents"][0];
    assert!(first["_id"].is_string());
    assert!(first["ajoutee_le"].is_string());
}

#[tokio::test]
async fn query_collection_applies_filter() {
    let dispatcher = recipe_dispatcher();
    let payload = dispatcher
        .invoke(
            "query_collection",
            &json!({"collection": "recettes", "filter": {"categorie": "dessert"}}),
        )
        .await
        .into_payload()
        .unwrap();
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["documents"][0]["nom"], "Tarte tatin");
}

#[tokio::test]
async fn query_collection_requires_collection_name() {
    let dispatcher = recipe_dispatcher();
    let (kind, _) = expect_failure(dispatcher.invoke("query_collection", &json!({})).await);
    assert_eq!(kind, FailureKind::MissingArgument);
}

// ============================================================================
// Composite forwarding
// ============================================================================

#[tokio::test]
async fn get_recipe_image_formats_first_hit() {
    let dispatcher = composite_dispatcher(StubImageSearch::with_two_photos());
    let payload = dispatcher
        .invoke("get_recipe_image", &json!({"recipe_name": "tarte tatin"}))
        .await
        .into_payload()
        .unwrap();

    let text = payload.as_str().unwrap();
    assert!(text.contains("tarte tatin"));
    assert!(text.contains("https://img.example/first.jpg"));
    assert!(text.contains("Ana"));
}

#[tokio::test]
async fn inner_failure_becomes_composition_error() {
    let dispatcher = composite_dispatcher(FailingImageSearch);
    let (kind, message) = expect_failure(
        dispatcher
            .invoke("get_recipe_image", &json!({"recipe_name": "tarte tatin"}))
            .await,
    );
    assert_eq!(kind, FailureKind::Composition);
    assert!(message.contains("search_images"));
}

#[tokio::test]
async fn empty_result_becomes_composition_error() {
    let dispatcher = composite_dispatcher(StubImageSearch::empty());
    let (kind, message) = expect_failure(
        dispatcher
            .invoke("get_recipe_image", &json!({"recipe_name": "ratatouille"}))
            .await,
    );
    assert_eq!(kind, FailureKind::Composition);
    assert!(message.contains("ratatouille"));
}

#[tokio::test]
async fn inner_tools_are_reexported_with_prefix() {
    let dispatcher = composite_dispatcher(StubImageSearch::with_two_photos());
    let names: Vec<&str> = dispatcher.list().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["img_search_images", "get_recipe_image"]);

    let payload = dispatcher
        .invoke("img_search_images", &json!({"query": "beach"}))
        .await
        .into_payload()
        .unwrap();
    assert_eq!(payload["total_results"], 2);
}

#[tokio::test]
async fn reexported_tool_relays_inner_failures_verbatim() {
    let dispatcher = composite_dispatcher(StubImageSearch::with_two_photos());
    let (kind, _) = expect_failure(
        dispatcher
            .invoke("img_search_images", &json!({"query": ""}))
            .await,
    );
    // Relayed as-is, not wrapped in a composition error
    assert_eq!(kind, FailureKind::Validation);
}

// ============================================================================
// Registry integrity
// ============================================================================

#[tokio::test]
async fn recipe_registry_covers_all_tools() {
    let dispatcher = recipe_dispatcher();
    let names: Vec<&str> = dispatcher.list().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "list_ingredients",
            "list_magical_ingredients",
            "invent_recipe",
            "invent_magical_recipe",
            "scrape_recipes",
            "list_recipes",
            "get_recipe",
            "scale_recipe",
            "query_collection",
        ]
    );
}

#[tokio::test]
async fn undeclared_arguments_are_rejected() {
    let dispatcher = recipe_dispatcher();
    let (kind, message) = expect_failure(
        dispatcher
            .invoke("list_ingredients", &json!({"style": "basics", "spice": 11}))
            .await,
    );
    assert_eq!(kind, FailureKind::InvalidArgument);
    assert!(message.contains("spice"));
}

#[tokio::test]
async fn failure_payloads_never_carry_partial_results() {
    let dispatcher = recipe_dispatcher();
    let response = dispatcher.invoke("get_recipe", &json!({"index": 0})).await;
    assert!(response.into_payload().is_none());
}

#[tokio::test]
async fn a_failed_invocation_does_not_poison_the_dispatcher() {
    let dispatcher = recipe_dispatcher();
    let _ = dispatcher.invoke("get_recipe", &json!({"index": 0})).await;
    let response = dispatcher.invoke("get_recipe", &json!({"index": 1})).await;
    assert!(response.is_success());
}

// Stubs are maps too: a handler argument map reaching the stub store intact
#[tokio::test]
async fn filter_object_reaches_store_untouched() {
    struct RecordingStore(std::sync::Mutex<Option<Map<String, Value>>>);

    #[async_trait]
    impl DocumentStore for RecordingStore {
        async fn query(
            &self,
            _collection: &str,
            filter: &Map<String, Value>,
        ) -> Result<Vec<Map<String, Value>>, ToolError> {
            *self.0.lock().unwrap() = Some(filter.clone());
            Ok(Vec::new())
        }
    }

    let store = Arc::new(RecordingStore(std::sync::Mutex::new(None)));
    let deps = RecipeDeps {
        catalogue: Arc::new(Catalogue::builtin()),
        scraper: Arc::new(StubScraper),
        store: store.clone(),
    };
    let dispatcher = Dispatcher::new(recipe_tool_registry(&deps).unwrap());

    dispatcher
        .invoke(
            "query_collection",
            &json!({"collection": "avis", "filter": {"note": 5}}),
        )
        .await;

    let recorded = store.0.lock().unwrap().clone().unwrap();
    assert_eq!(recorded.get("note"), Some(&json!(5)));
}
