//! Configuration Management
//!
//! Handles persistent configuration storage for gcpassets.

use crate::asset::search::MAX_PAGE_SIZE;
use crate::gcp::client::DEFAULT_ASSET_ENDPOINT;
use crate::render::{HierarchyFormat, ResourceFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that supplies a default scope
pub const SCOPE_ENV: &str = "GCPASSETS_SCOPE";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Default scope, e.g. `organizations/123456789`
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub hierarchy_format: Option<HierarchyFormat>,
    #[serde(default)]
    pub resource_format: Option<ResourceFormat>,
    /// Results requested per search page
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Cloud Asset API base URL
    #[serde(default)]
    pub asset_endpoint: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gcpassets").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path; anything unreadable falls back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {:?}: {}", path, e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Get effective scope (CLI > env > config)
    pub fn effective_scope(&self, cli: Option<&str>) -> Option<String> {
        let env = std::env::var(SCOPE_ENV).ok();
        Self::pick_scope(cli, env.as_deref(), self.scope.as_deref())
    }

    fn pick_scope(cli: Option<&str>, env: Option<&str>, config: Option<&str>) -> Option<String> {
        [cli, env, config]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Get effective hierarchy format (CLI > config > tree)
    pub fn effective_hierarchy_format(&self, cli: Option<HierarchyFormat>) -> HierarchyFormat {
        cli.or(self.hierarchy_format).unwrap_or_default()
    }

    /// Get effective resource format (CLI > config > tabular)
    pub fn effective_resource_format(&self, cli: Option<ResourceFormat>) -> ResourceFormat {
        cli.or(self.resource_format).unwrap_or_default()
    }

    pub fn effective_page_size(&self) -> u32 {
        self.page_size.unwrap_or(MAX_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn effective_endpoint(&self) -> String {
        self.asset_endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ASSET_ENDPOINT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.effective_endpoint(), DEFAULT_ASSET_ENDPOINT);
        assert_eq!(config.effective_page_size(), 500);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"scope": "organizations/42", "hierarchy_format": "pretty", "page_size": 9000}"#,
        )
        .unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.scope.as_deref(), Some("organizations/42"));
        assert_eq!(config.effective_hierarchy_format(None), HierarchyFormat::Pretty);
        assert_eq!(
            config.effective_hierarchy_format(Some(HierarchyFormat::Json)),
            HierarchyFormat::Json
        );
        assert_eq!(config.effective_resource_format(None), ResourceFormat::Tabular);
        assert_eq!(config.effective_page_size(), 500);
    }

    #[test]
    fn test_invalid_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_scope_precedence() {
        assert_eq!(
            Config::pick_scope(Some("folders/1"), Some("folders/2"), Some("folders/3")),
            Some("folders/1".to_string())
        );
        assert_eq!(
            Config::pick_scope(None, Some(" folders/2 "), Some("folders/3")),
            Some("folders/2".to_string())
        );
        assert_eq!(
            Config::pick_scope(None, Some(""), Some("folders/3")),
            Some("folders/3".to_string())
        );
        assert_eq!(Config::pick_scope(None, None, None), None);
    }
}
