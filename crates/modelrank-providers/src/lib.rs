//! modelrank-providers — Model catalog sources.
//!
//! Implements the `CatalogSource` trait for OpenAI-compatible and Anthropic
//! model listings, local JSON catalog files, and an in-memory mock.

pub mod anthropic;
pub mod config;
pub mod error;
pub mod file;
pub mod mock;
pub mod openai;

pub use config::{create_source, load_config, ModelrankConfig, ProviderConfig};
pub use error::CatalogError;
