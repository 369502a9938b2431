//! Built-in tool implementations.

pub mod add;
pub mod echo;
pub mod fail;
pub mod generate_id;
pub mod now;
pub mod registry;
pub mod swatch;

pub use registry::{builtin_registry, register_builtins};
