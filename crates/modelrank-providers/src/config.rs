//! Catalog source configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use modelrank_core::traits::CatalogSource;

use crate::anthropic::AnthropicCatalog;
use crate::file::FileCatalog;
use crate::openai::OpenAiCatalog;

/// Configuration for a single catalog source.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
    },
    Anthropic {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    File {
        path: PathBuf,
    },
}

impl ProviderConfig {
    /// Replace the API key, for providers that take one.
    pub fn with_api_key(mut self, key: &str) -> Self {
        match &mut self {
            ProviderConfig::OpenAI { api_key, .. } | ProviderConfig::Anthropic { api_key, .. } => {
                *api_key = key.to_string();
            }
            ProviderConfig::File { .. } => {
                tracing::warn!("file catalogs take no API key, ignoring it");
            }
        }
        self
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .finish(),
            ProviderConfig::Anthropic {
                api_key: _,
                base_url,
            } => f
                .debug_struct("Anthropic")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::File { path } => f.debug_struct("File").field("path", path).finish(),
        }
    }
}

/// Top-level modelrank configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelrankConfig {
    /// Catalog source configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Source used when none is named on the command line.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "openai".to_string()
}
fn default_timeout() -> u64 {
    60
}

impl Default for ModelrankConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ModelrankConfig {
    /// Look up a provider by name, or the default provider when `name` is `None`.
    pub fn provider(&self, name: Option<&str>) -> Result<(&str, &ProviderConfig)> {
        let name = name.unwrap_or(self.default_provider.as_str());
        let (key, config) = self.providers.get_key_value(name).with_context(|| {
            let mut available: Vec<_> = self.providers.keys().collect();
            available.sort();
            format!("provider '{name}' not found in config. Available: {available:?}")
        })?;
        Ok((key.as_str(), config))
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Resolve env vars in a provider config.
fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => ProviderConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            org_id: org_id.as_ref().map(|o| resolve_env_vars(o)),
        },
        ProviderConfig::Anthropic { api_key, base_url } => ProviderConfig::Anthropic {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
        ProviderConfig::File { path } => ProviderConfig::File {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `modelrank.toml` in the current directory
/// 2. `~/.config/modelrank/config.toml`
///
/// Environment variable overrides: `MODELRANK_OPENAI_KEY`, `MODELRANK_ANTHROPIC_KEY`.
pub fn load_config() -> Result<ModelrankConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ModelrankConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("modelrank.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ModelrankConfig::default(),
    };

    apply_env_overrides(&mut config);

    // Resolve env vars in all provider configs
    let resolved: HashMap<String, ProviderConfig> = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();
    config.providers = resolved;

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<ModelrankConfig> {
    Ok(toml::from_str(content)?)
}

fn apply_env_overrides(config: &mut ModelrankConfig) {
    if let Ok(key) = std::env::var("MODELRANK_OPENAI_KEY") {
        config
            .providers
            .entry("openai".into())
            .or_insert(ProviderConfig::OpenAI {
                api_key: String::new(),
                base_url: None,
                org_id: None,
            });
        if let Some(ProviderConfig::OpenAI { api_key, .. }) = config.providers.get_mut("openai") {
            *api_key = key;
        }
    }

    if let Ok(key) = std::env::var("MODELRANK_ANTHROPIC_KEY") {
        config
            .providers
            .entry("anthropic".into())
            .or_insert(ProviderConfig::Anthropic {
                api_key: String::new(),
                base_url: None,
            });
        if let Some(ProviderConfig::Anthropic { api_key, .. }) =
            config.providers.get_mut("anthropic")
        {
            *api_key = key;
        }
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("modelrank"))
}

/// Create a catalog source from its configuration.
pub fn create_source(config: &ProviderConfig, timeout_secs: u64) -> Result<Box<dyn CatalogSource>> {
    match config {
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => Ok(Box::new(OpenAiCatalog::new(
            api_key,
            base_url.clone(),
            org_id.clone(),
            Some(timeout_secs),
        )?)),
        ProviderConfig::Anthropic { api_key, base_url } => Ok(Box::new(AnthropicCatalog::new(
            api_key,
            base_url.clone(),
            Some(timeout_secs),
        )?)),
        ProviderConfig::File { path } => Ok(Box::new(FileCatalog::new(path.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_MODELRANK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_MODELRANK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_MODELRANK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_MODELRANK_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_unterminated() {
        assert_eq!(resolve_env_vars("${NOT_CLOSED"), "${NOT_CLOSED");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_MODELRANK_NESTED_VAR", "sk-${_MODELRANK_NESTED_VAR}");
        std::env::set_var("_MODELRANK_PLAIN_VAR", "x");
        assert_eq!(
            resolve_env_vars("${_MODELRANK_NESTED_VAR}/${_MODELRANK_PLAIN_VAR}"),
            "sk-${_MODELRANK_NESTED_VAR}/x"
        );
        std::env::remove_var("_MODELRANK_NESTED_VAR");
        std::env::remove_var("_MODELRANK_PLAIN_VAR");
    }

    #[test]
    fn default_config() {
        let config = ModelrankConfig::default();
        assert_eq!(config.default_provider, "openai");
        assert_eq!(config.timeout_secs, 60);
        assert!(config.providers.is_empty());
    }

    #[test]
    fn parse_provider_config() {
        let toml_str = r#"
default_provider = "proxy"
timeout_secs = 30

[providers.proxy]
type = "openai"
api_key = "sk-test"
base_url = "https://aiproxy.example.com/openai"

[providers.anthropic]
type = "anthropic"
api_key = "sk-ant"

[providers.snapshot]
type = "file"
path = "catalog.json"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.providers.len(), 3);
        assert_eq!(config.timeout_secs, 30);

        let (name, provider) = config.provider(None).unwrap();
        assert_eq!(name, "proxy");
        assert!(matches!(
            provider,
            ProviderConfig::OpenAI { base_url: Some(url), .. } if url.ends_with("/openai")
        ));
        assert!(matches!(
            config.provider(Some("snapshot")).unwrap().1,
            ProviderConfig::File { .. }
        ));
    }

    #[test]
    fn unknown_provider_lists_available() {
        let config = parse_config(
            r#"
[providers.openai]
type = "openai"
api_key = "k"
"#,
        )
        .unwrap();
        let err = config.provider(Some("missing")).unwrap_err().to_string();
        assert!(err.contains("missing"));
        assert!(err.contains("openai"));
    }

    #[test]
    fn debug_masks_api_keys() {
        let config = ProviderConfig::OpenAI {
            api_key: "sk-secret".into(),
            base_url: None,
            org_id: None,
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn with_api_key_overrides() {
        let config = ProviderConfig::Anthropic {
            api_key: "old".into(),
            base_url: None,
        }
        .with_api_key("new");
        assert!(matches!(config, ProviderConfig::Anthropic { api_key, .. } if api_key == "new"));
    }

    #[test]
    fn load_explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/modelrank.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_path_resolves_env() {
        std::env::set_var("_MODELRANK_CATALOG_DIR", "/tmp/catalogs");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modelrank.toml");
        std::fs::write(
            &path,
            r#"
default_provider = "snapshot"

[providers.snapshot]
type = "file"
path = "${_MODELRANK_CATALOG_DIR}/models.json"
"#,
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        let (_, provider) = config.provider(None).unwrap();
        assert!(matches!(
            provider,
            ProviderConfig::File { path } if path == Path::new("/tmp/catalogs/models.json")
        ));
        std::env::remove_var("_MODELRANK_CATALOG_DIR");
    }

    #[test]
    fn create_source_names() {
        let file = create_source(
            &ProviderConfig::File {
                path: "c.json".into(),
            },
            10,
        )
        .unwrap();
        assert_eq!(file.name(), "file");

        let openai = create_source(
            &ProviderConfig::OpenAI {
                api_key: "k".into(),
                base_url: None,
                org_id: None,
            },
            10,
        )
        .unwrap();
        assert_eq!(openai.name(), "openai");
    }
}
