//! MCP protocol handling — envelope codec and JSON-RPC dispatch.

pub mod codec;
pub mod dispatcher;
pub mod validator;

pub use dispatcher::{Dispatcher, Method};
