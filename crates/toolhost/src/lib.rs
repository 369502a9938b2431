//! Toolhost — core tool model: parameter schemas, tool registry, argument coercion and tool results.

pub mod coerce;
pub mod registry;
pub mod result;
pub mod schema;
pub mod tool;
pub mod types;
pub mod validate;

pub use coerce::coerce_value;
pub use registry::ToolRegistry;
pub use result::{ContentItem, ToolCallResult, PNG_MIME};
pub use schema::{InputSchema, ParamDescriptor, ParamKind, ParamType, PropertyDescriptor};
pub use tool::{Arguments, ToolDescriptor, ToolHandler, ToolSpec};
pub use types::*;
pub use validate::validate_arguments;
