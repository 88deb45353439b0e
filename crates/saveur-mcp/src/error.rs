//! Error types for the MCP server

use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during MCP server operations
#[derive(Debug, Error)]
pub enum Error {
    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error on the stdio transport
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A tool, resource, or prompt name was registered twice
    #[error("duplicate registration: {0}")]
    DuplicateName(String),

    /// Unknown resource requested
    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// Unknown prompt requested
    #[error("unknown prompt: {0}")]
    UnknownPrompt(String),
}

/// Failure raised inside a tool handler or collaborator.
///
/// The dispatcher converts these into `InvocationResponse::Failure` at its
/// boundary; no tool error ever escapes an invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Bad caller input (empty query, out-of-range argument)
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown entity (recipe index, collection name)
    #[error("not found: {0}")]
    NotFound(String),

    /// Collaborator network or parsing failure
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Inner-call failure in a forwarding tool
    #[error("composition error: {0}")]
    Composition(String),

    /// Uncategorized failure inside a tool body
    #[error("handler error: {0}")]
    Handler(String),
}

impl ToolError {
    /// Message without the variant prefix, for callers that report the
    /// classification separately.
    pub fn message(&self) -> &str {
        match self {
            ToolError::Validation(m)
            | ToolError::NotFound(m)
            | ToolError::Upstream(m)
            | ToolError::Composition(m)
            | ToolError::Handler(m) => m,
        }
    }
}

impl From<reqwest::Error> for ToolError {
    fn from(err: reqwest::Error) -> Self {
        ToolError::Upstream(err.to_string())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Handler(err.to_string())
    }
}

impl From<saveur_core::Error> for ToolError {
    fn from(err: saveur_core::Error) -> Self {
        match err {
            saveur_core::Error::RecipeIndexOutOfRange { .. } => {
                ToolError::NotFound(err.to_string())
            }
            saveur_core::Error::InvalidServings { .. } => ToolError::Validation(err.to_string()),
        }
    }
}
