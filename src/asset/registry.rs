//! Asset Type Registry - short aliases for Cloud Asset type strings
//!
//! The alias table is embedded at compile time and parsed once on first use.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Embedded alias table (compiled into the binary)
const ASSET_TYPES_FILE: &str = include_str!("../resources/asset_types.json");

/// Root structure of resources/asset_types.json
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AssetTypeConfig {
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<AssetTypeConfig> = OnceLock::new();

/// Get the alias registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static AssetTypeConfig {
    REGISTRY.get_or_init(|| match serde_json::from_str(ASSET_TYPES_FILE) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to parse embedded asset type aliases: {}", e);
            AssetTypeConfig::default()
        }
    })
}

/// Look up the fully-qualified type for an alias
pub fn get_asset_type(alias: &str) -> Option<&'static str> {
    get_registry().aliases.get(alias).map(|s| s.as_str())
}

/// Whether a type string already looks like `service.googleapis.com/Kind`
pub fn is_fully_qualified(asset_type: &str) -> bool {
    match asset_type.split_once('/') {
        Some((service, kind)) => service.contains('.') && !kind.is_empty(),
        None => false,
    }
}

/// Resolve user input to a fully-qualified asset type.
/// Unknown aliases pass through unchanged and let the API reject them.
pub fn resolve_asset_type(input: &str) -> String {
    if is_fully_qualified(input) {
        return input.to_string();
    }
    match get_asset_type(input) {
        Some(asset_type) => asset_type.to_string(),
        None => {
            tracing::debug!("No alias for '{}', using it verbatim", input);
            input.to_string()
        }
    }
}

/// All aliases sorted by alias name
pub fn all_aliases() -> Vec<(&'static str, &'static str)> {
    get_registry()
        .aliases
        .iter()
        .map(|(alias, asset_type)| (alias.as_str(), asset_type.as_str()))
        .collect()
}
