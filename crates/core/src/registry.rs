//! Extension registry: extension pattern → dataset configuration template.

use crate::parser::ExtensionMatcher;
use indexmap::IndexMap;
use serde_json::Value;
use wings_api::models::{
    ConfigMap, DatasetConfig, FILEPATH_KEY, RegistryEntry, TYPE_KEY, WingInfo,
};
use wings_api::{Result, WingsError};

/// Dataset types known without any configuration.
pub const DEFAULT_TYPES: &[(&str, &str)] = &[
    (".csv", "pandas.CSVDataSet"),
    (".yml", "yaml.YAMLDataSet"),
    (".yaml", "yaml.YAMLDataSet"),
    (".xls", "pandas.ExcelDataSet"),
    (".txt", "text.TextDataSet"),
    (".png", "pillow.ImageDataSet"),
    (".jpg", "pillow.ImageDataSet"),
    (".jpeg", "pillow.ImageDataSet"),
    (".img", "pillow.ImageDataSet"),
    (".pkl", "pickle.PickleDataSet"),
    (".parquet", "pandas.ParquetDataSet"),
];

/// Registry values are normalized to configuration objects on insertion, so
/// lookups never need to care whether the user wrote a bare type name.
#[derive(Debug, Clone)]
pub struct ExtensionRegistry {
    configs: IndexMap<String, ConfigMap>,
    matcher: ExtensionMatcher,
}

impl ExtensionRegistry {
    /// Registry holding only [`DEFAULT_TYPES`].
    pub fn new() -> Self {
        Self::empty().extended(
            DEFAULT_TYPES
                .iter()
                .map(|(ext, type_name)| (ext.to_string(), RegistryEntry::from(*type_name))),
        )
    }

    pub fn empty() -> Self {
        Self {
            configs: IndexMap::new(),
            matcher: ExtensionMatcher::default(),
        }
    }

    /// Defaults with `overrides` merged on top; identical keys replace the default.
    pub fn with_overrides(overrides: impl IntoIterator<Item = (String, RegistryEntry)>) -> Self {
        Self::new().extended(overrides)
    }

    fn extended(mut self, entries: impl IntoIterator<Item = (String, RegistryEntry)>) -> Self {
        for (extension, entry) in entries {
            self.configs.insert(extension, entry.into_config());
        }
        self.rebuild_matcher();
        self
    }

    /// Register (or replace) a single extension.
    pub fn register(&mut self, extension: impl Into<String>, entry: impl Into<RegistryEntry>) {
        self.configs
            .insert(extension.into(), entry.into().into_config());
        self.rebuild_matcher();
    }

    fn rebuild_matcher(&mut self) {
        self.matcher = ExtensionMatcher::new(self.configs.keys());
    }

    pub fn get(&self, extension: &str) -> Option<&ConfigMap> {
        self.configs.get(extension)
    }

    /// Extensions in registration order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    pub fn matcher(&self) -> &ExtensionMatcher {
        &self.matcher
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn parse<S: AsRef<str>>(&self, identifier: &str, namespaces: &[S]) -> Option<WingInfo> {
        self.matcher.parse(identifier, namespaces)
    }

    /// Build the dataset configuration for `extension`, stored at `filepath`.
    ///
    /// The computed `filepath` replaces any `filepath` found in the template.
    pub fn dataset_config(&self, extension: &str, filepath: String) -> Result<DatasetConfig> {
        let template = self
            .configs
            .get(extension)
            .ok_or_else(|| WingsError::InvalidDataSet {
                extension: extension.to_string(),
                reason: "extension is not registered".to_string(),
            })?;

        let type_name = match template.get(TYPE_KEY) {
            None => {
                return Err(WingsError::MissingType {
                    extension: extension.to_string(),
                });
            }
            Some(Value::String(type_name)) => type_name.clone(),
            Some(other) => {
                return Err(WingsError::InvalidDataSet {
                    extension: extension.to_string(),
                    reason: format!("\"type\" must be a string, got {other}"),
                });
            }
        };

        let options = template
            .iter()
            .filter(|(key, _)| key.as_str() != TYPE_KEY && key.as_str() != FILEPATH_KEY)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(DatasetConfig {
            type_name,
            filepath,
            options,
        })
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full(value: Value) -> RegistryEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults_registered() {
        let registry = ExtensionRegistry::new();
        assert_eq!(registry.len(), DEFAULT_TYPES.len());
        assert_eq!(
            registry.get(".csv"),
            Some(&RegistryEntry::from("pandas.CSVDataSet").into_config())
        );
    }

    #[test]
    fn test_override_replaces_default() {
        let registry = ExtensionRegistry::with_overrides([
            (".csv".to_string(), RegistryEntry::from("dask.CSVDataSet")),
            (
                ".profile.html".to_string(),
                full(json!({"type": "text.TextDataSet"})),
            ),
        ]);

        assert_eq!(registry.len(), DEFAULT_TYPES.len() + 1);
        let config = registry
            .dataset_config(".csv", "data/x.csv".to_string())
            .unwrap();
        assert_eq!(config.type_name, "dask.CSVDataSet");
        assert_eq!(registry.matcher().extensions()[0], ".profile.html");
    }

    #[test]
    fn test_register_updates_matcher() {
        let mut registry = ExtensionRegistry::empty();
        assert!(registry.parse("a/b.md", &["x"]).is_none());

        registry.register(".md", "text.TextDataSet");
        let wing = registry.parse("a/b.md", &["x"]).unwrap();
        assert_eq!(wing.extension, ".md");
    }

    #[test]
    fn test_missing_type_is_an_error() {
        let registry =
            ExtensionRegistry::with_overrides([(".x".to_string(), full(json!({"not_type": 1})))]);

        let err = registry
            .dataset_config(".x", "data/a.x".to_string())
            .unwrap_err();
        match err {
            WingsError::MissingType { extension } => assert_eq!(extension, ".x"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_non_string_type_is_invalid() {
        let registry =
            ExtensionRegistry::with_overrides([(".x".to_string(), full(json!({"type": 3})))]);
        assert!(matches!(
            registry.dataset_config(".x", "data/a.x".to_string()),
            Err(WingsError::InvalidDataSet { .. })
        ));
    }

    #[test]
    fn test_filepath_in_template_is_superseded() {
        let registry = ExtensionRegistry::with_overrides([(
            ".json".to_string(),
            full(json!({
                "type": "json.JSONDataSet",
                "filepath": "somewhere/else.json",
                "fs_args": {"open_args_save": {"mode": "w"}}
            })),
        )]);

        let config = registry
            .dataset_config(".json", "data/01_raw/a.json".to_string())
            .unwrap();
        assert_eq!(
            config.to_value(),
            json!({
                "type": "json.JSONDataSet",
                "filepath": "data/01_raw/a.json",
                "fs_args": {"open_args_save": {"mode": "w"}}
            })
        );
    }
}
