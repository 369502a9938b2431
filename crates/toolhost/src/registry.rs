//! Tool registration and lookup.

use std::collections::{HashMap, HashSet};

use crate::tool::{ToolDescriptor, ToolHandler, ToolSpec};
use crate::types::{RegistryError, RegistryResult};

/// Name-indexed set of tools, kept in registration order.
///
/// Populated once at startup; the dispatcher only ever reads it.
#[derive(Debug, Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Fails on an empty name, a name already registered, or a
    /// parameter name declared twice.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> RegistryResult<()> {
        if descriptor.name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.index.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateTool(descriptor.name));
        }

        let mut seen = HashSet::new();
        for param in &descriptor.params {
            if !seen.insert(param.name.as_str()) {
                return Err(RegistryError::DuplicateParam {
                    tool: descriptor.name.clone(),
                    param: param.name.clone(),
                });
            }
        }

        tracing::debug!(
            "Registered tool {} ({} params)",
            descriptor.name,
            descriptor.params.len()
        );
        self.index.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(descriptor);
        Ok(())
    }

    /// Build the descriptor for `spec` and register it.
    pub fn register_tool(
        &mut self,
        spec: ToolSpec,
        handler: impl ToolHandler + 'static,
    ) -> RegistryResult<()> {
        self.register(ToolDescriptor::new(spec, handler))
    }

    /// All tools, in registration order.
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn lookup(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ToolCallResult;
    use crate::schema::ParamDescriptor;
    use crate::tool::Arguments;
    use crate::types::ToolResult;

    fn noop(_: Arguments) -> ToolResult<ToolCallResult> {
        Ok(ToolCallResult::text("ok"))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register_tool(ToolSpec::new("b", "second"), noop).unwrap();
        registry.register_tool(ToolSpec::new("a", "first"), noop).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["b", "a"]);
        assert_eq!(registry.lookup("a").map(|t| t.description.as_str()), Some("first"));
        assert!(registry.lookup("missing").is_none());
    }

    #[test]
    fn test_duplicate_tool_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register_tool(ToolSpec::new("echo", ""), noop).unwrap();
        let err = registry
            .register_tool(ToolSpec::new("echo", "again"), noop)
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTool("echo".to_string()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("echo").unwrap().description, "");
    }

    #[test]
    fn test_duplicate_param_rejected() {
        let mut registry = ToolRegistry::new();
        let spec = ToolSpec::new("t", "")
            .param(ParamDescriptor::new("x"))
            .param(ParamDescriptor::new("x").optional());
        assert!(matches!(
            registry.register_tool(spec, noop),
            Err(RegistryError::DuplicateParam { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut registry = ToolRegistry::new();
        assert_eq!(
            registry.register_tool(ToolSpec::new("  ", ""), noop),
            Err(RegistryError::EmptyName)
        );
    }
}
