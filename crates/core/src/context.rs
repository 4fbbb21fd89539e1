use crate::catalog::merge_into;
use indexmap::IndexMap;
use wings_api::{DataCatalog, HostContext, Result, WingsError};

type DataSetOf<H> = <<H as HostContext>::Catalog as DataCatalog>::DataSet;

/// A host context whose catalogs are extended with precomputed wing entries.
///
/// Produced by [`crate::Wings::attach`]. It does not implement
/// [`HostContext`] itself, so a context can only be wrapped once.
pub struct WingedContext<H: HostContext> {
    host: H,
    entries: IndexMap<String, DataSetOf<H>>,
}

impl<H: HostContext> WingedContext<H> {
    pub(crate) fn new(host: H, entries: IndexMap<String, DataSetOf<H>>) -> Self {
        Self { host, entries }
    }

    /// Load the host's catalog and add the wing entries it lacks.
    ///
    /// Calls the host's own loader exactly once per invocation.
    pub fn catalog(&self) -> Result<H::Catalog> {
        let mut catalog = self
            .host
            .load_catalog()
            .map_err(|e| WingsError::Catalog(e.to_string()))?;
        merge_into(&mut catalog, &self.entries);
        Ok(catalog)
    }

    pub fn entries(&self) -> &IndexMap<String, DataSetOf<H>> {
        &self.entries
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_inner(self) -> H {
        self.host
    }
}
