//! JSON-RPC envelope validation.

use serde_json::Value;

use crate::types::{JsonRpcRequest, McpError, McpResult, JSONRPC_VERSION};

/// Validate that a JSON-RPC request is well-formed.
pub fn validate_request(request: &JsonRpcRequest) -> McpResult<()> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(McpError::InvalidRequest(format!(
            "Expected jsonrpc version \"{JSONRPC_VERSION}\", got \"{}\"",
            request.jsonrpc
        )));
    }

    if request.method.is_empty() {
        return Err(McpError::InvalidRequest(
            "Method name must not be empty".to_string(),
        ));
    }

    match &request.params {
        None | Some(Value::Object(_)) | Some(Value::Array(_)) => Ok(()),
        Some(_) => Err(McpError::InvalidRequest(
            "Params must be an object or an array".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_request() {
        let req = JsonRpcRequest::new(1i64, "tools/list", None);
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_wrong_version() {
        let mut req = JsonRpcRequest::new(1i64, "tools/list", None);
        req.jsonrpc = "1.0".to_string();
        assert_eq!(validate_request(&req).unwrap_err().code(), -32600);
    }

    #[test]
    fn test_empty_method() {
        let req = JsonRpcRequest::new(1i64, "", None);
        assert_eq!(validate_request(&req).unwrap_err().code(), -32600);
    }

    #[test]
    fn test_scalar_params() {
        let req = JsonRpcRequest::new(1i64, "tools/call", Some(json!("echo")));
        assert_eq!(validate_request(&req).unwrap_err().code(), -32600);
    }
}
