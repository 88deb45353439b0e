//! MCP server for recipe suggestion and food-image lookup
//!
//! This crate exposes recipe tools, read-only resources, and prompt
//! templates via the Model Context Protocol (JSON-RPC 2.0 over stdio), so
//! an MCP host can discover and invoke them by name with structured
//! arguments.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Host ]
//!      | (JSON-RPC over stdio)
//!      v
//! [ McpServer ] -- routes methods
//!      |
//! [ Dispatcher ] -- validates arguments, runs handlers
//!      |
//! [ ToolRegistry / ResourceRegistry / PromptRegistry ]
//!      |
//!      +--> saveur-core  (catalogue, pantry data)
//!      +--> collaborators (Pexels, Marmiton scrape, document store)
//! ```
//!
//! Registries are built once during startup and consumed into an immutable
//! [`dispatch::Dispatcher`]; handlers share no mutable state and every
//! failure becomes a structured response rather than a crashed invocation.
//!
//! Three server flavours exist: the recipe server, a standalone image
//! server, and a composite server that nests the image dispatcher behind a
//! forwarding `get_recipe_image` tool.

pub mod collab;
pub mod composite;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod prompts;
pub mod protocol;
pub mod registry;
pub mod resources;
pub mod schema;
pub mod server;

pub use dispatch::{Dispatcher, FailureKind, InvocationResponse};
pub use error::{Error, Result, ToolError};
pub use handlers::RecipeDeps;
pub use registry::{
    PromptRegistry, ResourceRegistry, ToolDescriptor, ToolRegistry,
};
pub use schema::{ParamKind, ParamSpec};
pub use server::McpServer;
