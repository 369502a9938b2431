//! Tool: now — Report the current UTC time.

use std::fmt::Write;

use chrono::{SecondsFormat, Utc};
use toolhost::{Arguments, ParamDescriptor, ToolCallResult, ToolError, ToolResult, ToolSpec};

pub fn spec() -> ToolSpec {
    ToolSpec::new("now", "Current UTC time, RFC 3339 unless a strftime format is given")
        .param(ParamDescriptor::of::<Option<String>>("format").describe("strftime format string"))
}

pub fn execute(args: Arguments) -> ToolResult<ToolCallResult> {
    let now = Utc::now();

    let Some(format) = args.str("format") else {
        return Ok(ToolCallResult::text(
            now.to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
    };

    let mut rendered = String::new();
    write!(rendered, "{}", now.format(format))
        .map_err(|_| ToolError::invalid_params(format!("invalid time format: {format}")))?;
    Ok(ToolCallResult::text(rendered))
}
