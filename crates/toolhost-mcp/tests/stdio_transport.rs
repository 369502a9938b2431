//! Integration tests for the newline-delimited stdio transport.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, BufReader};

use toolhost_mcp::protocol::Dispatcher;
use toolhost_mcp::tools::builtin_registry;
use toolhost_mcp::transport::StdioTransport;

// ─────────────────────── helpers ───────────────────────

fn transport(max_in_flight: usize) -> StdioTransport {
    let dispatcher = Arc::new(Dispatcher::new(builtin_registry().unwrap()));
    StdioTransport::new(dispatcher).with_max_in_flight(max_in_flight)
}

/// Run the transport over scripted input chunks and collect every reply.
async fn run_script(transport: &StdioTransport, chunks: &[&[u8]]) -> Vec<Value> {
    let mut builder = tokio_test::io::Builder::new();
    for chunk in chunks {
        builder.read(chunk);
    }
    let reader = BufReader::new(builder.build());
    let (writer, mut output) = tokio::io::duplex(1 << 16);

    transport.serve(reader, writer).await.unwrap();

    let mut raw = String::new();
    output.read_to_string(&mut raw).await.unwrap();
    raw.lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// ═══════════════════════════════════════════════════════
// FRAMING
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_one_reply_per_request_line() {
    let replies = run_script(
        &transport(1),
        &[
            b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"initialize\"}\n",
            b"\n",
            b"{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n",
            b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/call\",",
            b"\"params\":{\"name\":\"echo\",\"arguments\":{\"text\":\"split\"}}}\n",
        ],
    )
    .await;

    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["id"], 1);
    assert_eq!(replies[0]["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(replies[1]["id"], 2);
    assert_eq!(replies[1]["result"]["content"][0]["text"], "split");
}

#[tokio::test]
async fn test_parse_error_does_not_stop_the_loop() {
    let replies = run_script(
        &transport(1),
        &[
            b"{\"broken\":\n",
            b"{\"jsonrpc\":\"2.0\",\"id\":\"after\",\"method\":\"tools/list\"}\n",
        ],
    )
    .await;

    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["error"]["code"], -32700);
    assert_eq!(replies[0]["id"], Value::Null);
    assert_eq!(replies[1]["id"], "after");
}

#[tokio::test]
async fn test_non_utf8_line_gets_parse_error() {
    let replies = run_script(
        &transport(1),
        &[
            b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"x\xff\"}\n",
            b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/list\"}\n",
        ],
    )
    .await;

    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["error"]["code"], -32700);
    assert_eq!(replies[0]["id"], Value::Null);
    assert_eq!(replies[1]["id"], 2);
    assert!(replies[1]["result"]["tools"].is_array());
}

#[tokio::test]
async fn test_last_line_without_newline() {
    let replies = run_script(
        &transport(4),
        &[b"{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"tools/unknown\"}"],
    )
    .await;
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["error"]["code"], -32601);
}

// ═══════════════════════════════════════════════════════
// CONCURRENCY
// ═══════════════════════════════════════════════════════

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_all_answered() {
    let lines: Vec<Vec<u8>> = (0..50)
        .map(|i| {
            let msg = json!({
                "jsonrpc": "2.0",
                "id": i,
                "method": "tools/call",
                "params": { "name": "add", "arguments": { "a": i, "b": 1 } }
            });
            let mut line = serde_json::to_vec(&msg).unwrap();
            line.push(b'\n');
            line
        })
        .collect();
    let chunks: Vec<&[u8]> = lines.iter().map(Vec::as_slice).collect();

    let mut replies = run_script(&transport(8), &chunks).await;
    assert_eq!(replies.len(), 50);

    replies.sort_by_key(|r| r["id"].as_i64().unwrap());
    for (i, reply) in replies.iter().enumerate() {
        assert_eq!(reply["id"], i as i64);
        assert_eq!(
            reply["result"]["content"][0]["text"],
            (i as f64 + 1.0).to_string()
        );
    }
}
