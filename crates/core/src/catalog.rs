//! In-memory catalog and the insert-if-absent merge.

use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use wings_api::models::DatasetConfig;
use wings_api::{BoxError, DataCatalog, Result, WingsError};

/// Add every entry whose name the catalog does not already list.
///
/// Returns the names that were added, in `entries` order.
pub fn merge_into<C: DataCatalog>(
    catalog: &mut C,
    entries: &IndexMap<String, C::DataSet>,
) -> Vec<String> {
    let existing: std::collections::HashSet<String> = catalog.list().into_iter().collect();
    let mut added = Vec::new();
    for (name, dataset) in entries {
        if existing.contains(name) {
            continue;
        }
        catalog.add(name, dataset.clone());
        added.push(name.clone());
    }
    added
}

/// Catalog holding dataset descriptions as shared JSON objects.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    datasets: IndexMap<String, Arc<Value>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a catalog object: `{"name": {"type": ..., ...}, ...}`.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(entries) = value else {
            return Err(WingsError::Catalog(
                "catalog must be a JSON object".to_string(),
            ));
        };
        Ok(Self {
            datasets: entries
                .into_iter()
                .map(|(name, entry)| (name, Arc::new(entry)))
                .collect(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_value(serde_json::from_str(&content)?)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Arc<Value>)> {
        self.datasets.iter()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.datasets
                .iter()
                .map(|(name, entry)| (name.clone(), entry.as_ref().clone()))
                .collect(),
        )
    }
}

impl DataCatalog for MemoryCatalog {
    type DataSet = Arc<Value>;

    fn list(&self) -> Vec<String> {
        self.datasets.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> Option<Self::DataSet> {
        self.datasets.get(name).cloned()
    }

    fn add(&mut self, name: &str, dataset: Self::DataSet) {
        self.datasets.insert(name.to_string(), dataset);
    }

    fn from_config(&self, _name: &str, config: &DatasetConfig) -> std::result::Result<Self::DataSet, BoxError> {
        Ok(Arc::new(config.to_value()))
    }

    fn contains(&self, name: &str) -> bool {
        self.datasets.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_requires_object() {
        assert!(MemoryCatalog::from_value(json!(["a"])).is_err());

        let catalog = MemoryCatalog::from_value(json!({
            "companies": {"type": "pandas.CSVDataSet", "filepath": "data/01_raw/companies.csv"}
        }))
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("companies"));
    }

    #[test]
    fn test_merge_never_overwrites() {
        let declared = Arc::new(json!({"type": "pandas.SQLTableDataSet"}));
        let mut catalog = MemoryCatalog::new();
        catalog.add("01_raw/data.csv", declared.clone());

        let mut entries = IndexMap::new();
        entries.insert("01_raw/data.csv".to_string(), Arc::new(json!({"type": "other"})));
        entries.insert("01_raw/new.csv".to_string(), Arc::new(json!({"type": "new"})));

        let added = merge_into(&mut catalog, &entries);
        assert_eq!(added, vec!["01_raw/new.csv"]);
        assert!(Arc::ptr_eq(&catalog.get("01_raw/data.csv").unwrap(), &declared));

        assert!(merge_into(&mut catalog, &entries).is_empty());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_from_config_flattens() {
        let catalog = MemoryCatalog::new();
        let dataset = catalog
            .from_config("a.csv", &DatasetConfig::new("pandas.CSVDataSet", "data/a.csv"))
            .unwrap();
        assert_eq!(
            *dataset,
            json!({"type": "pandas.CSVDataSet", "filepath": "data/a.csv"})
        );
    }
}
