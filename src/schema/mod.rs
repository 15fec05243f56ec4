//! Schema module - Configuration and edit script types.

mod config;
mod script;

pub use config::*;
pub use script::*;
