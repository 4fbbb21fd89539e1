use serde_json::json;
use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Arc;
use wings_api::models::{Node, Pipeline};
use wings_api::{BoxError, DataCatalog, HostContext, WingsError};
use wings_core::{MemoryCatalog, Wings, WingsConfig};

/// Project context with a fixed set of pipelines and a declared catalog.
struct Project {
    pipelines: HashMap<String, Pipeline>,
    declared: serde_json::Value,
    loads: Cell<usize>,
    broken: bool,
}

impl Project {
    fn new() -> Self {
        let mut pipelines = HashMap::new();
        pipelines.insert(
            "de".to_string(),
            Pipeline::new(vec![Node::new(["companies"], ["02_intermediate/companies.parquet"])]),
        );
        pipelines.insert(
            "ds".to_string(),
            Pipeline::new(vec![Node::new(
                ["02_intermediate/companies.parquet"],
                ["06_models/regressor.pkl", "companies!"],
            )]),
        );

        Self {
            pipelines,
            declared: json!({
                "companies": {"type": "pandas.CSVDataSet", "filepath": "data/01_raw/companies.csv"}
            }),
            loads: Cell::new(0),
            broken: false,
        }
    }
}

impl HostContext for Project {
    type Catalog = MemoryCatalog;

    fn pipelines(&self) -> Vec<Pipeline> {
        self.pipelines.values().cloned().collect()
    }

    fn load_catalog(&self) -> Result<MemoryCatalog, BoxError> {
        if self.broken {
            return Err("credentials.yml not found".into());
        }
        self.loads.set(self.loads.get() + 1);
        Ok(MemoryCatalog::from_value(self.declared.clone())?)
    }
}

#[test]
fn test_attached_context_extends_every_catalog() {
    let context = Wings::default().attach(Project::new()).unwrap();
    assert_eq!(context.host().loads.get(), 1);
    assert_eq!(context.entries().len(), 3);

    let first = context.catalog().unwrap();
    let second = context.catalog().unwrap();
    assert_eq!(context.host().loads.get(), 3);

    let mut names = first.list();
    names.sort();
    assert_eq!(
        names,
        vec![
            "02_intermediate/companies.parquet",
            "06_models/regressor.pkl",
            "companies",
            "companies!"
        ]
    );
    assert_eq!(first.list().len(), second.list().len());

    // Entries are built once and shared between catalogs.
    assert!(Arc::ptr_eq(
        &first.get("06_models/regressor.pkl").unwrap(),
        &second.get("06_models/regressor.pkl").unwrap()
    ));
}

#[test]
fn test_attached_context_keeps_declared_entries() {
    let context = Wings::default().attach(Project::new()).unwrap();
    let catalog = context.catalog().unwrap();

    assert_eq!(
        *catalog.get("companies").unwrap(),
        json!({"type": "pandas.CSVDataSet", "filepath": "data/01_raw/companies.csv"})
    );
    assert_eq!(
        *catalog.get("companies!").unwrap(),
        *catalog.get("companies").unwrap()
    );
}

#[test]
fn test_disabled_wings_leave_context_unchanged() {
    let config = WingsConfig {
        enabled: false,
        ..Default::default()
    };
    let context = Wings::new(config).attach(Project::new()).unwrap();

    assert!(context.entries().is_empty());
    assert_eq!(context.host().loads.get(), 0);
    assert_eq!(context.catalog().unwrap().list(), vec!["companies"]);
}

#[test]
fn test_broken_catalog_is_reported() {
    let mut project = Project::new();
    project.broken = true;

    let err = Wings::default().attach(project).err().unwrap();
    assert!(matches!(err, WingsError::Catalog(ref message) if message.contains("credentials")));
}

#[test]
fn test_into_inner_returns_host() {
    let context = Wings::default().attach(Project::new()).unwrap();
    let project = context.into_inner();
    assert_eq!(project.pipelines.len(), 2);
}
