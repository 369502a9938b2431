//! Tool: fail — Report a failure, either as a tool result or as a protocol error.

use toolhost::{Arguments, ParamDescriptor, ToolCallResult, ToolError, ToolResult, ToolSpec};

pub fn spec() -> ToolSpec {
    ToolSpec::new(
        "fail",
        "Report a failure; with 'code' it becomes a JSON-RPC error, otherwise an isError result",
    )
    .param(ParamDescriptor::new("message").describe("Failure message"))
    .param(ParamDescriptor::of::<Option<i32>>("code").describe("JSON-RPC error code to raise"))
}

pub fn execute(args: Arguments) -> ToolResult<ToolCallResult> {
    let message = args.require_str("message")?;

    match args.i64("code") {
        Some(code) => {
            let code = i32::try_from(code)
                .map_err(|_| ToolError::invalid_params("'code' is out of range"))?;
            Err(ToolError::protocol(code, message))
        }
        None => Ok(ToolCallResult::error(message)),
    }
}
