//! Shared types, error model, and configuration for adrindex.
//!
//! This crate is the foundation depended on by all other adrindex crates.
//! It provides:
//! - [`AdrIndexError`], the unified error type
//! - Domain types ([`AdrRecord`], [`Status`], [`TagGroup`])
//! - Configuration ([`AppConfig`], [`IndexConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, IndexConfig, config_dir, init_config, load_config,
    load_config_from, to_toml, user_config_path,
};
pub use error::{AdrIndexError, Result};
pub use types::{AdrRecord, Status, TagGroup, UnknownStatus};
