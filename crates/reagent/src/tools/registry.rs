use std::sync::Arc;

use super::error::{ToolError, ToolResult};
use super::{Calculator, DogWeight, FnTool, Tool, ToolInfo};

/// Maps action names to tools.
///
/// Registration happens during setup; afterwards the registry is only read, so
/// one instance can be shared behind an `Arc` by any number of agents.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in `calculate` and `average_dog_weight` tools
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.tools.push(Arc::new(Calculator));
        registry.tools.push(Arc::new(DogWeight));
        registry
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> ToolResult<()> {
        self.register_arc(Arc::new(tool))
    }

    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) -> ToolResult<()> {
        if self.lookup(tool.name()).is_some() {
            return Err(ToolError::DuplicateTool(tool.name().to_string()));
        }
        tracing::debug!(tool = tool.name(), "registered tool");
        self.tools.push(tool);
        Ok(())
    }

    /// Register a closure as a tool
    pub fn register_fn<N, D, F>(&mut self, name: N, description: D, handler: F) -> ToolResult<()>
    where
        N: Into<String>,
        D: Into<String>,
        F: Fn(&str) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.register(FnTool::new(name, description, handler))
    }

    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn Tool>> {
        let index = self.tools.iter().position(|tool| tool.name() == name)?;
        Some(self.tools.remove(index))
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| tool.as_ref())
    }

    /// Run the named tool on `argument`.
    ///
    /// A failing handler is reported as [`ToolError::Execution`] with the
    /// original error and the argument that caused it.
    pub fn execute(&self, name: &str, argument: &str) -> ToolResult<String> {
        let tool = self
            .lookup(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        tool.invoke(argument).map_err(|source| ToolError::Execution {
            tool: name.to_string(),
            argument: argument.to_string(),
            source,
        })
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    pub fn infos(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|tool| ToolInfo::from_tool(tool.as_ref()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::error::Error as _;

    fn echo_registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry
            .register_fn("echo", "Echoes the input", |arg: &str| Ok(arg.to_string()))
            .unwrap();
        registry
    }

    #[test]
    fn test_execute_registered_tool() -> anyhow::Result<()> {
        let registry = echo_registry();
        assert_eq!(registry.execute("echo", "hello there")?, "hello there");
        Ok(())
    }

    #[test]
    fn test_execute_unknown_tool() {
        let registry = echo_registry();
        let err = registry.execute("missing", "x").unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(ref name) if name == "missing"));
        assert_eq!(err.to_string(), "Unknown action: missing");
    }

    #[test]
    fn test_execution_error_keeps_argument_and_cause() {
        let mut registry = ToolRegistry::new();
        registry
            .register_fn("fail", "Always fails", |_: &str| Err(anyhow!("boom")))
            .unwrap();

        let err = registry.execute("fail", "some input").unwrap_err();
        match &err {
            ToolError::Execution {
                tool,
                argument,
                source,
            } => {
                assert_eq!(tool, "fail");
                assert_eq!(argument, "some input");
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("Expected execution error, got {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "Action fail failed on input \"some input\": boom"
        );
        assert_eq!(err.source().map(|e| e.to_string()), Some("boom".to_string()));
    }

    #[test]
    fn test_execution_error_shows_argument_verbatim() {
        let mut registry = ToolRegistry::new();
        registry
            .register_fn("fail", "Always fails", |_: &str| Err(anyhow!("boom")))
            .unwrap();

        let err = registry.execute("fail", r#"say "hi" C:	mp"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Action fail failed on input "say "hi" C:	mp": boom"#
        );
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = echo_registry();
        let err = registry
            .register_fn("echo", "Another echo", |arg: &str| Ok(arg.to_string()))
            .unwrap_err();
        assert!(matches!(err, ToolError::DuplicateTool(ref name) if name == "echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister() {
        let mut registry = echo_registry();
        assert!(registry.unregister("echo").is_some());
        assert!(registry.unregister("echo").is_none());
        assert!(registry.is_empty());
        assert!(matches!(
            registry.execute("echo", "x"),
            Err(ToolError::UnknownTool(_))
        ));
    }

    #[test]
    fn test_defaults_in_registration_order() {
        let registry = ToolRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["calculate", "average_dog_weight"]);
        assert_eq!(registry.execute("calculate", "6 * 7").unwrap(), "42");
        assert!(registry.lookup("average_dog_weight").is_some());
    }
}
