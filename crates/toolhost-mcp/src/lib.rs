//! Toolhost MCP Server — serves registered tools to MCP clients over JSON-RPC 2.0.

pub mod config;
pub mod protocol;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::ServerConfig;
pub use protocol::Dispatcher;
pub use transport::StdioTransport;
