//! Invocation dispatcher
//!
//! Validates and executes one tool invocation: resolve the name, check the
//! argument payload against the declared parameter specs, run the handler,
//! and wrap the outcome in an [`InvocationResponse`] envelope. Every failure
//! mode is converted to a `Failure` response here; nothing a handler returns
//! can escape the dispatcher or affect other invocations.

use serde::Serialize;
use serde_json::Value;

use crate::error::ToolError;
use crate::registry::{ToolDescriptor, ToolRegistry};
use crate::schema::{ArgumentError, validate_arguments};

/// Classification of an invocation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnknownTool,
    MissingArgument,
    InvalidArgument,
    Validation,
    NotFound,
    Upstream,
    Handler,
    Composition,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FailureKind::UnknownTool => "unknown tool",
            FailureKind::MissingArgument => "missing argument",
            FailureKind::InvalidArgument => "invalid argument",
            FailureKind::Validation => "validation error",
            FailureKind::NotFound => "not found",
            FailureKind::Upstream => "upstream error",
            FailureKind::Handler => "handler error",
            FailureKind::Composition => "composition error",
        };
        f.write_str(label)
    }
}

impl From<&ToolError> for FailureKind {
    fn from(err: &ToolError) -> Self {
        match err {
            ToolError::Validation(_) => FailureKind::Validation,
            ToolError::NotFound(_) => FailureKind::NotFound,
            ToolError::Upstream(_) => FailureKind::Upstream,
            ToolError::Composition(_) => FailureKind::Composition,
            ToolError::Handler(_) => FailureKind::Handler,
        }
    }
}

/// Outcome of one invocation. Success carries the handler payload; failure
/// carries a classification and a message, never a partial payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationResponse {
    Success { payload: Value },
    Failure { kind: FailureKind, message: String },
}

impl InvocationResponse {
    pub fn success(payload: Value) -> Self {
        InvocationResponse::Success { payload }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        InvocationResponse::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, InvocationResponse::Success { .. })
    }

    /// Success payload, if any.
    pub fn into_payload(self) -> Option<Value> {
        match self {
            InvocationResponse::Success { payload } => Some(payload),
            InvocationResponse::Failure { .. } => None,
        }
    }
}

/// Executes invocations against an immutable tool registry.
///
/// The dispatcher consumes its registry at construction, so the
/// register-then-freeze discipline is enforced by ownership: once dispatch
/// is possible, registration no longer is.
pub struct Dispatcher {
    tools: ToolRegistry,
}

impl Dispatcher {
    pub fn new(tools: ToolRegistry) -> Self {
        Self { tools }
    }

    /// Tools in registration order, for capability discovery.
    pub fn list(&self) -> &[ToolDescriptor] {
        self.tools.list()
    }

    /// Execute one invocation.
    ///
    /// Repeated identical calls re-execute fully; there is no caching,
    /// deduplication, or retrying at this level.
    pub async fn invoke(&self, name: &str, arguments: &Value) -> InvocationResponse {
        let Some(descriptor) = self.tools.get(name) else {
            return InvocationResponse::failure(
                FailureKind::UnknownTool,
                format!("no tool named `{name}`"),
            );
        };

        let validated = match validate_arguments(&descriptor.params, arguments) {
            Ok(map) => map,
            Err(ArgumentError::Missing { name }) => {
                return InvocationResponse::failure(
                    FailureKind::MissingArgument,
                    format!("required parameter `{name}` is absent"),
                );
            }
            Err(ArgumentError::Invalid { name, expected }) => {
                return InvocationResponse::failure(
                    FailureKind::InvalidArgument,
                    format!("parameter `{name}`: expected {expected}"),
                );
            }
        };

        tracing::debug!(tool = %name, "Invoking tool");

        match (descriptor.handler)(validated).await {
            Ok(payload) => InvocationResponse::success(payload),
            Err(err) => {
                tracing::debug!(tool = %name, error = %err, "Tool failed");
                InvocationResponse::failure(FailureKind::from(&err), err.message())
            }
        }
    }
}
