//! Core constants shared across assist crates.
//!
//! This crate provides:
//! - Default configuration values
//! - Common project metadata

pub mod defaults;

// Re-export commonly used items at crate root
pub use defaults::*;

/// Project name.
pub const PROJECT_NAME: &str = "assist-rs";
/// Project version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
