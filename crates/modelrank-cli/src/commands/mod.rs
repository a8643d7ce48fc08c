//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::Result;

use modelrank_core::traits::CatalogSource;
use modelrank_providers::config::load_config_from;
use modelrank_providers::create_source;
use modelrank_providers::file::FileCatalog;

pub mod grade;
pub mod init;
pub mod list_models;
pub mod parse;

/// Where to fetch the catalog from.
pub struct SourceArgs {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub catalog: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    /// Build the catalog source: a local file if given, else a configured provider.
    pub fn into_source(self) -> Result<Box<dyn CatalogSource>> {
        if let Some(path) = self.catalog {
            return Ok(Box::new(FileCatalog::new(path)));
        }

        let config = load_config_from(self.config.as_deref())?;
        let (name, provider) = config.provider(self.provider.as_deref())?;
        let provider = match &self.api_key {
            Some(key) => provider.clone().with_api_key(key),
            None => provider.clone(),
        };
        tracing::debug!(provider = name, config = ?provider, "using catalog provider");
        create_source(&provider, config.timeout_secs)
    }
}
