use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form adapter options, as they appear in a catalog entry.
pub type ConfigMap = serde_json::Map<String, Value>;

pub const TYPE_KEY: &str = "type";
pub const FILEPATH_KEY: &str = "filepath";

/// A value of the extension registry.
///
/// Users may write either `".csv": "pandas.CSVDataSet"` or a full object
/// such as `".csv": {"type": "pandas.CSVDataSet", "load_args": {"sep": ";"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegistryEntry {
    BareType(String),
    FullConfig(ConfigMap),
}

impl RegistryEntry {
    /// Normalize into a configuration object. A bare type becomes `{"type": name}`.
    pub fn into_config(self) -> ConfigMap {
        match self {
            RegistryEntry::BareType(type_name) => {
                let mut config = ConfigMap::new();
                config.insert(TYPE_KEY.to_string(), Value::String(type_name));
                config
            }
            RegistryEntry::FullConfig(config) => config,
        }
    }
}

impl From<&str> for RegistryEntry {
    fn from(type_name: &str) -> Self {
        RegistryEntry::BareType(type_name.to_string())
    }
}

impl From<ConfigMap> for RegistryEntry {
    fn from(config: ConfigMap) -> Self {
        RegistryEntry::FullConfig(config)
    }
}

/// Storage configuration synthesized for one identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(rename = "type")]
    pub type_name: String,
    pub filepath: String,
    /// Adapter specific keys copied from the registry entry.
    #[serde(flatten)]
    pub options: ConfigMap,
}

impl DatasetConfig {
    pub fn new(type_name: impl Into<String>, filepath: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            filepath: filepath.into(),
            options: ConfigMap::new(),
        }
    }

    /// Flatten into a single JSON object, the shape a catalog file would hold.
    pub fn to_value(&self) -> Value {
        let mut object = self.options.clone();
        object.insert(TYPE_KEY.to_string(), Value::String(self.type_name.clone()));
        object.insert(
            FILEPATH_KEY.to_string(),
            Value::String(self.filepath.clone()),
        );
        Value::Object(object)
    }
}
