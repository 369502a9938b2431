//! Tool: add — Sum two numbers.

use toolhost::{Arguments, ParamDescriptor, ToolCallResult, ToolError, ToolResult, ToolSpec};

pub fn spec() -> ToolSpec {
    ToolSpec::new("add", "Add two numbers and return the sum")
        .param(ParamDescriptor::of::<f64>("a").describe("First operand"))
        .param(ParamDescriptor::of::<f64>("b").describe("Second operand"))
}

pub fn execute(args: Arguments) -> ToolResult<ToolCallResult> {
    let (a, b) = match (args.f64("a"), args.f64("b")) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(ToolError::invalid_params("'a' and 'b' must be numbers")),
    };

    let sum = a + b;
    if !sum.is_finite() {
        return Ok(ToolCallResult::error(format!("{a} + {b} overflows")));
    }
    Ok(ToolCallResult::text(sum.to_string()))
}
