//! Shared types, error model, and configuration for markdrop.
//!
//! This crate is the foundation depended on by all other markdrop crates.
//! It provides:
//! - [`MarkdropError`], the unified error type
//! - Domain types ([`DocumentName`], [`DocumentEntry`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ServerConfig, StorageConfig, config_dir, config_file_path, expand_home,
    init_config, load_config, load_config_from,
};
pub use error::{MarkdropError, Result};
pub use types::{DOCUMENT_EXTENSION, DocumentEntry, DocumentName};
