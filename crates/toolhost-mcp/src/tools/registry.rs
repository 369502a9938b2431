//! Built-in tool registration.

use toolhost::{RegistryResult, ToolRegistry};

use super::{add, echo, fail, generate_id, now, swatch};

/// Register every built-in tool, in listing order.
pub fn register_builtins(registry: &mut ToolRegistry) -> RegistryResult<()> {
    registry.register_tool(echo::spec(), echo::execute)?;
    registry.register_tool(add::spec(), add::execute)?;
    registry.register_tool(now::spec(), now::execute)?;
    registry.register_tool(generate_id::spec(), generate_id::execute)?;
    registry.register_tool(swatch::spec(), swatch::execute)?;
    registry.register_tool(fail::spec(), fail::execute)?;
    Ok(())
}

/// A registry holding only the built-in tools.
pub fn builtin_registry() -> RegistryResult<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry)?;
    Ok(registry)
}
