//! Configuration loading and schema definitions
//!
//! Values come from an optional TOML file; the CLI overrides them.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
