use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use wings_api::Result;
use wings_api::models::RegistryEntry;

pub const DEFAULT_ROOT: &str = "data";

/// Options the wings hook is registered with.
///
/// ```json
/// {
///   "dataset_configs": {".html": "text.TextDataSet"},
///   "paths": {"01_raw": "raw"},
///   "root": "data",
///   "namespaces": ["training"],
///   "enabled": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WingsConfig {
    /// Extension → dataset type overrides, merged over the defaults.
    pub dataset_configs: IndexMap<String, RegistryEntry>,
    /// Directory rewrites applied before building file paths.
    pub paths: IndexMap<String, String>,
    pub root: String,
    pub namespaces: Vec<String>,
    pub enabled: bool,
}

impl Default for WingsConfig {
    fn default() -> Self {
        Self {
            dataset_configs: IndexMap::new(),
            paths: IndexMap::new(),
            root: DEFAULT_ROOT.to_string(),
            namespaces: Vec::new(),
            enabled: true,
        }
    }
}

impl WingsConfig {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Namespaces with a trailing `.` removed, so `"ns."` and `"ns"` behave alike.
    pub fn normalized_namespaces(&self) -> Vec<String> {
        self.namespaces
            .iter()
            .map(|ns| ns.strip_suffix('.').unwrap_or(ns).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WingsConfig::from_json_str("{}").unwrap();
        assert_eq!(config, WingsConfig::default());
        assert_eq!(config.root, "data");
        assert!(config.enabled);
    }

    #[test]
    fn test_full_config() {
        let config = WingsConfig::from_json_str(
            r#"{
                "dataset_configs": {
                    ".html": "text.TextDataSet",
                    ".json": {"type": "json.JSONDataSet", "save_args": {"indent": 2}}
                },
                "paths": {"01_raw": "raw"},
                "root": "",
                "namespaces": ["training.", "eval"],
                "enabled": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.dataset_configs.len(), 2);
        assert_eq!(config.paths["01_raw"], "raw");
        assert_eq!(config.root, "");
        assert!(!config.enabled);
        assert_eq!(config.normalized_namespaces(), vec!["training", "eval"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(WingsConfig::from_json_str(r#"{"rooot": "x"}"#).is_err());
    }
}
