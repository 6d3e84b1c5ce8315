//! Tools the model can invoke with an `Action:` line.
//!
//! A tool takes one string argument and returns a string. Implementations are
//! trusted and synchronous: the registry runs them in-process without any
//! sandboxing, so a tool that interprets its argument as code must contain
//! that itself (see [`calculator`] for an evaluator that never executes code).
pub mod calculator;
pub mod dog_weight;
pub mod error;
pub mod registry;

use anyhow::Result;
use serde::Serialize;

pub use calculator::Calculator;
pub use dog_weight::DogWeight;
pub use error::{ToolError, ToolResult};
pub use registry::ToolRegistry;

/// Core trait that defines a tool an agent can call by name
pub trait Tool: Send + Sync {
    /// The action name the model uses, e.g. `calculate`
    fn name(&self) -> &str;

    /// What the tool does, shown to the model in the system prompt
    fn description(&self) -> &str;

    /// A sample argument, shown to the model as `e.g. name: example`
    fn example(&self) -> &str;

    /// Run the tool on the raw argument text
    fn invoke(&self, argument: &str) -> Result<String>;
}

/// Describes a tool for prompt rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub example: String,
}

impl ToolInfo {
    pub fn from_tool(tool: &dyn Tool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            example: tool.example().to_string(),
        }
    }
}

type Handler = dyn Fn(&str) -> Result<String> + Send + Sync;

/// Adapts a plain closure into a [`Tool`]
pub struct FnTool {
    name: String,
    description: String,
    example: String,
    handler: Box<Handler>,
}

impl FnTool {
    pub fn new<N, D, F>(name: N, description: D, handler: F) -> Self
    where
        N: Into<String>,
        D: Into<String>,
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            example: String::new(),
            handler: Box::new(handler),
        }
    }

    pub fn with_example<S: Into<String>>(mut self, example: S) -> Self {
        self.example = example.into();
        self
    }
}

impl Tool for FnTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn example(&self) -> &str {
        &self.example
    }

    fn invoke(&self, argument: &str) -> Result<String> {
        (self.handler)(argument)
    }
}
