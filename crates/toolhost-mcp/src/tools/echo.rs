//! Tool: echo — Return the given text unchanged.

use toolhost::{Arguments, ParamDescriptor, ToolCallResult, ToolResult, ToolSpec};

pub fn spec() -> ToolSpec {
    ToolSpec::new("echo", "Echo the given text back unchanged")
        .param(ParamDescriptor::new("text").describe("Text to echo"))
}

pub fn execute(args: Arguments) -> ToolResult<ToolCallResult> {
    let text = args.require_str("text")?;
    Ok(ToolCallResult::text(text))
}
