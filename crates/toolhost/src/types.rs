//! Error types shared by the tool model.

use crate::schema::ParamType;

/// Failures raised while building the tool registry.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    #[error("Tool '{tool}' declares parameter '{param}' more than once")]
    DuplicateParam { tool: String, param: String },

    #[error("Tool name must not be empty")]
    EmptyName,
}

/// Failures raised while checking call arguments against an input schema.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required parameter: {0}")]
    Missing(String),

    #[error("Parameter '{name}' expects {expected}, got {found}")]
    Type {
        name: String,
        expected: ParamType,
        found: &'static str,
    },
}

/// Failures a tool handler can report.
///
/// `Protocol` lets a handler pick the JSON-RPC error code itself; the other
/// variants map onto the standard codes.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("{message}")]
    Protocol { code: i32, message: String },

    #[error("Tool failed: {0}")]
    Failed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ToolError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        ToolError::InvalidParams(message.into())
    }

    pub fn failed(message: impl Into<String>) -> Self {
        ToolError::Failed(message.into())
    }

    pub fn protocol(code: i32, message: impl Into<String>) -> Self {
        ToolError::Protocol {
            code,
            message: message.into(),
        }
    }
}

/// Convenience result types.
pub type RegistryResult<T> = Result<T, RegistryError>;
pub type ToolResult<T> = Result<T, ToolError>;
