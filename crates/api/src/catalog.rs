use crate::models::{DatasetConfig, Pipeline};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The catalog a pipeline run reads its datasets from.
///
/// Wings only ever looks entries up and inserts new ones; it never removes or
/// replaces an entry the catalog already holds.
pub trait DataCatalog {
    /// Handle to a materialized dataset. Cloning must share the underlying
    /// dataset, so that aliases point at the same object.
    type DataSet: Clone;

    /// Names of all registered datasets.
    fn list(&self) -> Vec<String>;

    fn get(&self, name: &str) -> Option<Self::DataSet>;

    fn add(&mut self, name: &str, dataset: Self::DataSet);

    /// Build a dataset instance from a synthesized configuration.
    fn from_config(&self, name: &str, config: &DatasetConfig) -> Result<Self::DataSet, BoxError>;

    fn contains(&self, name: &str) -> bool {
        self.list().iter().any(|n| n == name)
    }
}

/// A long-lived project context, as used from notebooks and shells.
pub trait HostContext {
    type Catalog: DataCatalog;

    /// All pipelines registered on the project.
    fn pipelines(&self) -> Vec<Pipeline>;

    /// Build a fresh catalog for this context.
    fn load_catalog(&self) -> Result<Self::Catalog, BoxError>;
}
