//! Error types and JSON-RPC error codes for the MCP server.

use toolhost::{ToolError, ValidationError};

use super::message::{JsonRpcErrorObject, JsonRpcResponse, RequestId};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Longest handler failure summary passed to the client.
const MAX_SUMMARY_CHARS: usize = 200;

/// All errors that can occur in the MCP server.
#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    /// A failure whose code the tool handler chose.
    #[error("{message}")]
    Tool { code: i32, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl McpError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        match self {
            McpError::ParseError(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::InternalError(_) => INTERNAL_ERROR,
            McpError::Tool { code, .. } => *code,
            McpError::Transport(_) | McpError::Io(_) => INTERNAL_ERROR,
        }
    }

    pub fn to_error_object(&self) -> JsonRpcErrorObject {
        JsonRpcErrorObject {
            code: self.code(),
            message: self.to_string(),
            data: None,
        }
    }

    pub fn to_response(&self, id: RequestId) -> JsonRpcResponse {
        JsonRpcResponse::failure(id, self.to_error_object())
    }

    /// Map a handler failure for `tool`, logging the full detail.
    pub fn from_tool_failure(tool: &str, error: ToolError) -> Self {
        match error {
            ToolError::InvalidParams(message) => McpError::InvalidParams(message),
            ToolError::Protocol { code, message } => McpError::Tool { code, message },
            other => {
                tracing::error!("Tool {tool} failed: {other:#}");
                McpError::InternalError(format!(
                    "tool '{tool}' failed: {}",
                    summarize(&other.to_string())
                ))
            }
        }
    }
}

impl From<ValidationError> for McpError {
    fn from(e: ValidationError) -> Self {
        McpError::InvalidParams(e.to_string())
    }
}

/// First line of `message`, cut to a display-friendly length.
pub fn summarize(message: &str) -> String {
    let line = message.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= MAX_SUMMARY_CHARS {
        return line.to_string();
    }
    let mut cut: String = line.chars().take(MAX_SUMMARY_CHARS).collect();
    cut.push('…');
    cut
}

pub type McpResult<T> = Result<T, McpError>;
