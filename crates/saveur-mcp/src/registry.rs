//! Tool, resource, and prompt registries
//!
//! Registries are explicit objects built during startup and handed to the
//! dispatcher/server by value; there are no ambient process-wide tables.
//! Registration order is preserved so capability listings are stable. Once a
//! registry is consumed by a [`crate::dispatch::Dispatcher`] or a server,
//! nothing can register anymore.

use std::future::Future;
use std::pin::Pin;

use serde_json::{Map, Value};

use crate::error::{Error, Result, ToolError};
use crate::schema::ParamSpec;

/// Future returned by a tool handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = std::result::Result<Value, ToolError>> + Send>>;

/// A tool body. Receives the validated, defaulted argument map.
pub type ToolHandler = Box<dyn Fn(Map<String, Value>) -> HandlerFuture + Send + Sync>;

/// A named, schema-described callable operation exposed to the host.
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
    pub handler: ToolHandler,
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Authoritative set of callable tools.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names are unique for the process lifetime.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<()> {
        if self.tools.iter().any(|t| t.name == descriptor.name) {
            return Err(Error::DuplicateName(descriptor.name));
        }
        self.tools.push(descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// All tools in registration order.
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Zero-argument producer behind a resource URI. Must be pure.
pub type ResourceProducer = Box<dyn Fn() -> Value + Send + Sync>;

/// A named, read-only data endpoint.
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
    pub producer: ResourceProducer,
}

/// Content returned by a resource read.
#[derive(Debug, Clone)]
pub struct ResourceContent {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

/// Registry of read-only resources, keyed by URI.
#[derive(Default)]
pub struct ResourceRegistry {
    resources: Vec<ResourceDescriptor>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: ResourceDescriptor) -> Result<()> {
        if self.resources.iter().any(|r| r.uri == descriptor.uri) {
            return Err(Error::DuplicateName(descriptor.uri));
        }
        self.resources.push(descriptor);
        Ok(())
    }

    pub fn list(&self) -> &[ResourceDescriptor] {
        &self.resources
    }

    /// Invoke the producer for `uri`, rendering its value as pretty JSON.
    pub fn read(&self, uri: &str) -> Result<ResourceContent> {
        let descriptor = self
            .resources
            .iter()
            .find(|r| r.uri == uri)
            .ok_or_else(|| Error::UnknownResource(uri.to_string()))?;

        let value = (descriptor.producer)();
        Ok(ResourceContent {
            uri: descriptor.uri.clone(),
            mime_type: descriptor.mime_type.clone(),
            text: serde_json::to_string_pretty(&value)?,
        })
    }
}

/// Template renderer behind a prompt name. String interpolation only.
pub type PromptRenderer = Box<dyn Fn(&Map<String, Value>) -> String + Send + Sync>;

/// A named prompt template.
pub struct PromptDescriptor {
    pub name: String,
    pub description: String,
    pub arguments: Vec<String>,
    pub renderer: PromptRenderer,
}

/// Registry of prompt templates, keyed by name.
#[derive(Default)]
pub struct PromptRegistry {
    prompts: Vec<PromptDescriptor>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: PromptDescriptor) -> Result<()> {
        if self.prompts.iter().any(|p| p.name == descriptor.name) {
            return Err(Error::DuplicateName(descriptor.name));
        }
        self.prompts.push(descriptor);
        Ok(())
    }

    pub fn list(&self) -> &[PromptDescriptor] {
        &self.prompts
    }

    pub fn render(&self, name: &str, arguments: &Map<String, Value>) -> Result<String> {
        let descriptor = self
            .prompts
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::UnknownPrompt(name.to_string()))?;
        Ok((descriptor.renderer)(arguments))
    }
}
