//! Tool: uuid — Generate random v4 UUIDs.

use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use toolhost::{Arguments, ParamDescriptor, ToolCallResult, ToolError, ToolResult, ToolSpec};

const MAX_COUNT: i64 = 100;

#[derive(Debug, Deserialize)]
struct UuidParams {
    #[serde(default = "default_count")]
    count: i64,
}

fn default_count() -> i64 {
    1
}

pub fn spec() -> ToolSpec {
    ToolSpec::new("uuid", "Generate random version 4 UUIDs")
        .param(ParamDescriptor::of::<Option<u32>>("count").describe("How many to generate (1-100)"))
}

pub fn execute(args: Arguments) -> ToolResult<ToolCallResult> {
    let params: UuidParams = args.parse()?;
    if !(1..=MAX_COUNT).contains(&params.count) {
        return Err(ToolError::invalid_params(format!(
            "'count' must be between 1 and {MAX_COUNT}"
        )));
    }

    let ids: Vec<String> = (0..params.count)
        .map(|_| Uuid::new_v4().to_string())
        .collect();

    if ids.len() == 1 {
        return Ok(ToolCallResult::text(ids[0].clone()));
    }
    Ok(ToolCallResult::json(&json!({ "uuids": ids })))
}
