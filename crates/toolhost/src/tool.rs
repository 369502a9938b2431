//! Tool specs, the handler seam, and the arguments handed to handlers.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::result::ToolCallResult;
use crate::schema::{InputSchema, ParamDescriptor};
use crate::types::{ToolError, ToolResult};

/// Plain-data description of a tool, as supplied by the embedding application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    pub fn param(self, param: ParamDescriptor) -> Self {
        let mut params = self.params;
        params.push(param);
        Self { params, ..self }
    }
}

/// Validated call arguments, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// A required string argument, or `InvalidParams` naming it.
    pub fn require_str(&self, name: &str) -> ToolResult<&str> {
        self.str(name)
            .ok_or_else(|| ToolError::invalid_params(format!("'{name}' must be a string")))
    }

    /// Deserialize the whole argument object into a typed struct.
    pub fn parse<T: DeserializeOwned>(&self) -> ToolResult<T> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| ToolError::InvalidParams(e.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Arguments {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Executes a tool call.
///
/// Handlers run synchronously and may be invoked from several threads at
/// once; any state they touch is theirs to guard.
pub trait ToolHandler: Send + Sync {
    fn call(&self, args: Arguments) -> ToolResult<ToolCallResult>;
}

impl<F> ToolHandler for F
where
    F: Fn(Arguments) -> ToolResult<ToolCallResult> + Send + Sync,
{
    fn call(&self, args: Arguments) -> ToolResult<ToolCallResult> {
        self(args)
    }
}

/// A registered tool: its spec, the generated schema and the bound handler.
#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
    pub params: Vec<ParamDescriptor>,
    handler: Arc<dyn ToolHandler>,
}

impl ToolDescriptor {
    pub fn new(spec: ToolSpec, handler: impl ToolHandler + 'static) -> Self {
        Self::with_handler(spec, Arc::new(handler))
    }

    pub fn with_handler(spec: ToolSpec, handler: Arc<dyn ToolHandler>) -> Self {
        let input_schema = InputSchema::generate(&spec.params);
        Self {
            name: spec.name,
            description: spec.description,
            input_schema,
            params: spec.params,
            handler,
        }
    }

    pub fn handler(&self) -> &Arc<dyn ToolHandler> {
        &self.handler
    }

    pub fn invoke(&self, args: Arguments) -> ToolResult<ToolCallResult> {
        self.handler.call(args)
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish_non_exhaustive()
    }
}
