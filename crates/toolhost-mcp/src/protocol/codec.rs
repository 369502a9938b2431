//! Envelope codec — raw bytes to requests, responses back to bytes.

use serde_json::Value;

use crate::types::{JsonRpcRequest, JsonRpcResponse, McpError, RequestId};

/// Written when a response cannot be serialized at all.
const ENCODE_FALLBACK: &[u8] = br#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"Internal error: response serialization failed"}}"#;

/// A request that could not be decoded, with whatever id was recoverable.
#[derive(Debug)]
pub struct Rejection {
    pub id: RequestId,
    pub error: McpError,
}

impl Rejection {
    fn new(id: RequestId, error: McpError) -> Self {
        Self { id, error }
    }

    pub fn into_response(self) -> JsonRpcResponse {
        self.error.to_response(self.id)
    }
}

/// Decode one request envelope.
///
/// Bytes that are not JSON fail with a parse error and a `null` id. Once the
/// bytes parse as an object, its `id` is recovered before the shape checks
/// so that shape errors can still be correlated.
pub fn decode(bytes: &[u8]) -> Result<JsonRpcRequest, Rejection> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(Rejection::new(
            RequestId::Null,
            McpError::ParseError("Empty message".to_string()),
        ));
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| Rejection::new(RequestId::Null, McpError::ParseError(e.to_string())))?;

    let obj = match value {
        Value::Object(obj) => obj,
        Value::Array(_) => {
            return Err(Rejection::new(
                RequestId::Null,
                McpError::InvalidRequest("Batch requests are not supported".to_string()),
            ))
        }
        other => {
            return Err(Rejection::new(
                RequestId::Null,
                McpError::InvalidRequest(format!(
                    "Request must be a JSON object, got {}",
                    toolhost::coerce::kind_of(&other)
                )),
            ))
        }
    };

    let id = match obj.get("id") {
        None => None,
        Some(raw) => Some(RequestId::from_value(raw).ok_or_else(|| {
            Rejection::new(
                RequestId::Null,
                McpError::InvalidRequest("Id must be a string, number or null".to_string()),
            )
        })?),
    };

    let mut request: JsonRpcRequest = serde_json::from_value(Value::Object(obj)).map_err(|e| {
        Rejection::new(
            id.clone().unwrap_or(RequestId::Null),
            McpError::InvalidRequest(e.to_string()),
        )
    })?;

    // An explicit `"id": null` still expects a reply; serde would read it as absent.
    request.id = id;
    Ok(request)
}

/// Serialize a response envelope as compact JSON.
pub fn encode(response: &JsonRpcResponse) -> Vec<u8> {
    serde_json::to_vec(response).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize response {}: {e}", response.id);
        ENCODE_FALLBACK.to_vec()
    })
}

/// Parse response bytes back into an envelope.
pub fn decode_response(bytes: &[u8]) -> Result<JsonRpcResponse, McpError> {
    serde_json::from_slice(bytes).map_err(|e| McpError::ParseError(e.to_string()))
}
