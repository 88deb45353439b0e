//! MCP server implementation
//!
//! Coordinates JSON-RPC message handling over stdio with the registries
//! built at startup. Three server flavours share this loop: the recipe
//! server, the standalone image server, and the composite recipe-image
//! server that nests an image dispatcher.

use std::io::{BufRead, Write};
use std::sync::Arc;

use serde_json::{Map, Value, json};

use saveur_core::Catalogue;

use crate::collab::ImageSearch;
use crate::composite::composite_tool_registry;
use crate::dispatch::{Dispatcher, InvocationResponse};
use crate::error::{Error, Result};
use crate::handlers::{RecipeDeps, image_tool_registry, recipe_tool_registry};
use crate::prompts::recipe_prompts;
use crate::protocol::{
    GetPromptParams, InitializeResult, JsonRpcRequest, JsonRpcResponse, PromptsCapability,
    ReadResourceParams, ResourcesCapability, ServerCapabilities, ServerInfo, ToolCallParams,
    ToolResult, ToolsCapability,
};
use crate::registry::{PromptRegistry, ResourceRegistry};
use crate::resources::recipe_resources;
use crate::schema::to_json_schema;

const PROTOCOL_VERSION: &str = "2024-11-05";

/// An MCP server: one dispatcher plus its resource and prompt registries.
pub struct McpServer {
    name: String,
    dispatcher: Arc<Dispatcher>,
    resources: ResourceRegistry,
    prompts: PromptRegistry,
}

impl McpServer {
    /// The recipe server: suggestion tools, catalogue access, scraping and
    /// document-store passthrough, plus resources and prompts.
    pub fn recipes(deps: RecipeDeps) -> Result<Self> {
        let catalogue = deps.catalogue.clone();
        Ok(Self {
            name: "saveur-recipes".to_string(),
            dispatcher: Arc::new(Dispatcher::new(recipe_tool_registry(&deps)?)),
            resources: recipe_resources(catalogue)?,
            prompts: recipe_prompts()?,
        })
    }

    /// The standalone image-search server.
    pub fn images(search: Arc<dyn ImageSearch>) -> Result<Self> {
        Ok(Self {
            name: "saveur-images".to_string(),
            dispatcher: Arc::new(Dispatcher::new(image_tool_registry(search)?)),
            resources: ResourceRegistry::new(),
            prompts: PromptRegistry::new(),
        })
    }

    /// The composite recipe-image server: an image dispatcher nested inside
    /// a forwarding outer server.
    pub fn composite(search: Arc<dyn ImageSearch>) -> Result<Self> {
        let inner = Arc::new(Dispatcher::new(image_tool_registry(search)?));
        Ok(Self {
            name: "saveur-recipe-images".to_string(),
            dispatcher: Arc::new(Dispatcher::new(composite_tool_registry(inner)?)),
            resources: ResourceRegistry::new(),
            prompts: PromptRegistry::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Run the server, processing MCP protocol messages over stdin/stdout.
    pub async fn run(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        tracing::info!(server = %self.name, "MCP server ready, listening on stdio");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            match self.handle_message(&line).await {
                Ok(response) if !response.is_empty() => {
                    writeln!(stdout, "{}", response)?;
                    stdout.flush()?;
                }
                Ok(_) => {} // Notification, no response
                Err(e) => {
                    let error_response =
                        JsonRpcResponse::error(None, -32603, format!("Internal error: {}", e));
                    writeln!(stdout, "{}", serde_json::to_string(&error_response)?)?;
                    stdout.flush()?;
                }
            }
        }

        Ok(())
    }

    /// Handle a single JSON-RPC message; empty string means notification.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let request: JsonRpcRequest = serde_json::from_str(message)?;

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id)?,
            "initialized" | "notifications/initialized" => return Ok(String::new()),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await?,
            "resources/list" => self.handle_resources_list(request.id),
            "resources/read" => self.handle_resources_read(request.id, request.params)?,
            "prompts/list" => self.handle_prompts_list(request.id),
            "prompts/get" => self.handle_prompts_get(request.id, request.params)?,
            _ => JsonRpcResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        };

        serde_json::to_string(&response).map_err(Error::from)
    }

    fn handle_initialize(&self, id: Option<Value>) -> Result<JsonRpcResponse> {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: Some(ResourcesCapability {
                    subscribe: Some(false),
                    list_changed: Some(false),
                }),
                prompts: Some(PromptsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools: Vec<Value> = self
            .dispatcher
            .list()
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": to_json_schema(&t.params),
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let params: ToolCallParams = serde_json::from_value(params)?;

        let result = match self
            .dispatcher
            .invoke(&params.name, &params.arguments)
            .await
        {
            InvocationResponse::Success { payload } => {
                ToolResult::text(serde_json::to_string_pretty(&payload)?)
            }
            InvocationResponse::Failure { kind, message } => {
                ToolResult::error(format!("{kind}: {message}"))
            }
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    fn handle_resources_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let resources: Vec<Value> = self
            .resources
            .list()
            .iter()
            .map(|r| {
                json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type,
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "resources": resources }))
    }

    fn handle_resources_read(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let params: ReadResourceParams = serde_json::from_value(params)?;

        match self.resources.read(&params.uri) {
            Ok(content) => Ok(JsonRpcResponse::success(
                id,
                json!({
                    "contents": [{
                        "uri": content.uri,
                        "mimeType": content.mime_type,
                        "text": content.text,
                    }]
                }),
            )),
            Err(e) => Ok(JsonRpcResponse::error(
                id,
                -32602,
                format!("Resource error: {}", e),
            )),
        }
    }

    fn handle_prompts_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let prompts: Vec<Value> = self
            .prompts
            .list()
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "description": p.description,
                    "arguments": p.arguments.iter().map(|a| {
                        json!({ "name": a, "required": true })
                    }).collect::<Vec<_>>(),
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "prompts": prompts }))
    }

    fn handle_prompts_get(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let params: GetPromptParams = serde_json::from_value(params)?;
        let arguments = match params.arguments {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        match self.prompts.render(&params.name, &arguments) {
            Ok(text) => Ok(JsonRpcResponse::success(
                id,
                json!({
                    "description": params.name,
                    "messages": [{
                        "role": "user",
                        "content": { "type": "text", "text": text },
                    }]
                }),
            )),
            Err(e) => Ok(JsonRpcResponse::error(
                id,
                -32602,
                format!("Prompt error: {}", e),
            )),
        }
    }
}

/// Recipe-server dependencies wired to the shipped collaborators.
pub fn default_recipe_deps() -> RecipeDeps {
    use crate::collab::{MarmitonScraper, MemoryStore};

    RecipeDeps {
        catalogue: Arc::new(Catalogue::builtin()),
        scraper: Arc::new(MarmitonScraper::new()),
        store: Arc::new(MemoryStore::seeded()),
    }
}
