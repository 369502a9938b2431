//! Main request dispatcher — receives JSON-RPC messages, routes them to the
//! built-in methods or to a registered tool.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::{Map, Value};

use toolhost::{validate_arguments, ToolRegistry};

use crate::types::*;

use super::codec;
use super::validator::validate_request;

/// The closed set of methods the server answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method<'a> {
    Initialize,
    ToolsList,
    ToolsCall,
    Other(&'a str),
}

impl<'a> From<&'a str> for Method<'a> {
    fn from(name: &'a str) -> Self {
        match name {
            "initialize" => Method::Initialize,
            "tools/list" => Method::ToolsList,
            "tools/call" => Method::ToolsCall,
            other => Method::Other(other),
        }
    }
}

/// Routes decoded requests and produces exactly one response per request.
///
/// Holds no per-call state; one instance is shared across concurrent calls.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    server_info: Implementation,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self::with_server_info(registry, Implementation::default())
    }

    pub fn with_server_info(registry: ToolRegistry, server_info: Implementation) -> Self {
        tracing::info!(
            "Dispatcher ready: {} v{} with {} tools",
            server_info.name,
            server_info.version,
            registry.len()
        );
        Self {
            registry: Arc::new(registry),
            server_info,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn server_info(&self) -> &Implementation {
        &self.server_info
    }

    /// Decode, dispatch and encode one raw message.
    ///
    /// Returns `None` only for well-formed notifications, which get no reply.
    /// A malformed envelope without an id is answered with a `null` id.
    pub fn handle(&self, bytes: &[u8]) -> Option<Vec<u8>> {
        match codec::decode(bytes) {
            Ok(request) if request.is_notification() => match validate_request(&request) {
                Ok(()) => {
                    self.handle_notification(&request);
                    None
                }
                Err(e) => {
                    tracing::warn!("Invalid notification: {e}");
                    Some(codec::encode(&e.to_response(RequestId::Null)))
                }
            },
            Ok(request) => Some(codec::encode(&self.dispatch(&request))),
            Err(rejection) => {
                tracing::warn!("Rejected envelope: {}", rejection.error);
                Some(codec::encode(&rejection.into_response()))
            }
        }
    }

    /// Answer a decoded request. Never fails: every error becomes an error
    /// response carrying the request's id.
    pub fn dispatch(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.response_id();

        if let Err(e) = validate_request(request) {
            tracing::warn!("Invalid request {id}: {e}");
            return e.to_response(id);
        }

        tracing::debug!("Dispatching {} (id {id})", request.method);

        match self.route(request) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => {
                tracing::debug!("Request {id} failed with {}: {e}", e.code());
                e.to_response(id)
            }
        }
    }

    fn route(&self, request: &JsonRpcRequest) -> McpResult<Value> {
        match Method::from(request.method.as_str()) {
            Method::Initialize => self.handle_initialize(request.params.as_ref()),
            Method::ToolsList => self.handle_tools_list(),
            Method::ToolsCall => self.handle_tools_call(request.params.clone()),
            Method::Other(name) => Err(McpError::MethodNotFound(name.to_string())),
        }
    }

    fn handle_notification(&self, notification: &JsonRpcRequest) {
        match notification.method.as_str() {
            "notifications/initialized" | "initialized" => {
                tracing::info!("MCP handshake complete");
            }
            "notifications/cancelled" | "$/cancelRequest" => {
                tracing::info!("Received cancellation notification");
            }
            other => {
                tracing::debug!("Unknown notification: {other}");
            }
        }
    }

    fn handle_initialize(&self, params: Option<&Value>) -> McpResult<Value> {
        if let Some(init) = params
            .cloned()
            .and_then(|p| serde_json::from_value::<InitializeParams>(p).ok())
        {
            if let Some(client) = &init.client_info {
                tracing::info!("Initialize from client: {} v{}", client.name, client.version);
            }
            if let Some(version) = init.protocol_version.filter(|v| v != MCP_VERSION) {
                tracing::warn!(
                    "Client requested protocol version {version}, server supports {MCP_VERSION}. Proceeding with server version."
                );
            }
        }

        let result = InitializeResult::for_server(self.server_info.clone());
        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }

    fn handle_tools_list(&self) -> McpResult<Value> {
        let result = ToolListResult {
            tools: self.registry.list().iter().map(ToolDefinition::from).collect(),
        };
        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }

    fn handle_tools_call(&self, params: Option<Value>) -> McpResult<Value> {
        let call_params: ToolCallParams = match params {
            Some(params @ Value::Object(_)) => serde_json::from_value(params)
                .map_err(|e| McpError::InvalidParams(e.to_string()))?,
            Some(_) => {
                return Err(McpError::InvalidParams(
                    "Tool call params must be an object".to_string(),
                ))
            }
            None => {
                return Err(McpError::InvalidParams(
                    "Tool call params required".to_string(),
                ))
            }
        };

        let tool = self.registry.lookup(&call_params.name).ok_or_else(|| {
            McpError::MethodNotFound(format!("no tool named '{}'", call_params.name))
        })?;

        let arguments = match call_params.arguments {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(McpError::InvalidParams(
                    "'arguments' must be an object".to_string(),
                ))
            }
        };

        let args = validate_arguments(&tool.input_schema, arguments).map_err(|e| {
            tracing::warn!("Tool {} rejected arguments: {e}", tool.name);
            McpError::from(e)
        })?;

        let result = match panic::catch_unwind(AssertUnwindSafe(|| tool.invoke(args))) {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => return Err(McpError::from_tool_failure(&tool.name, e)),
            Err(payload) => {
                tracing::error!("Tool {} panicked: {}", tool.name, panic_message(&*payload));
                return Err(McpError::InternalError(format!(
                    "tool '{}' panicked",
                    tool.name
                )));
            }
        };

        if result.is_empty() && !result.is_error {
            return Err(McpError::InternalError(format!(
                "tool '{}' returned no content",
                tool.name
            )));
        }

        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
