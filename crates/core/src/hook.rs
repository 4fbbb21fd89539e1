use crate::catalog::merge_into;
use crate::config::WingsConfig;
use crate::context::WingedContext;
use crate::registry::ExtensionRegistry;
use crate::synth::Synthesizer;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, warn};
use wings_api::models::Pipeline;
use wings_api::{DataCatalog, HostContext, Result, WingsError};

/// Parameters of a pipeline run, as handed to the hook.
pub type RunParams = serde_json::Map<String, Value>;

/// Creates catalog entries for every wing used by a pipeline.
#[derive(Debug, Clone)]
pub struct Wings {
    synthesizer: Synthesizer,
    enabled: bool,
}

impl Default for Wings {
    fn default() -> Self {
        Self::new(WingsConfig::default())
    }
}

impl Wings {
    pub fn new(config: WingsConfig) -> Self {
        let namespaces = config.normalized_namespaces();
        let registry = ExtensionRegistry::with_overrides(config.dataset_configs);
        let synthesizer = Synthesizer::new(registry)
            .with_paths(config.paths)
            .with_root(config.root)
            .with_namespaces(namespaces);

        Self {
            synthesizer,
            enabled: config.enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn synthesizer(&self) -> &Synthesizer {
        &self.synthesizer
    }

    /// Datasets for every identifier in `names` that `catalog` does not know yet.
    ///
    /// Chronocoded identifiers may reuse datasets already in `catalog`. Nothing
    /// is added to the catalog here.
    pub fn create_entries<C, I>(&self, names: I, catalog: &C) -> Result<IndexMap<String, C::DataSet>>
    where
        C: DataCatalog,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let existing: std::collections::HashSet<String> = catalog.list().into_iter().collect();
        let pending = names.into_iter().filter(|name| {
            let known = existing.contains(name.as_ref());
            if known {
                debug!("{} is declared in the catalog, skipping", name.as_ref());
            }
            !known
        });

        self.synthesizer.create_entries(
            pending,
            |target| catalog.get(target),
            |name, config| {
                catalog
                    .from_config(name, &config)
                    .map_err(|e| WingsError::Adapter {
                        name: name.to_string(),
                        message: e.to_string(),
                    })
            },
        )
    }

    /// Add entries for the pipeline's datasets to `catalog` before it runs.
    ///
    /// Every entry is created before the catalog is touched, so a failure
    /// leaves the catalog unchanged. Returns the names that were added.
    pub fn before_pipeline_run<C: DataCatalog>(
        &self,
        run_params: &RunParams,
        pipeline: &Pipeline,
        catalog: &mut C,
    ) -> Result<Vec<String>> {
        if !self.enabled {
            warn!("Wings is disabled, catalog left unchanged");
            return Ok(Vec::new());
        }

        let entries = self.create_entries(pipeline.dataset_names(), &*catalog)?;
        let added = merge_into(catalog, &entries);

        match run_params.get("run_id").and_then(Value::as_str) {
            Some(run_id) => info!("Wings added {} entries to catalog for run {}", added.len(), run_id),
            None => info!("Wings added {} entries to catalog", added.len()),
        }
        Ok(added)
    }

    /// Wrap a host context so every catalog it builds includes the wings of
    /// all its pipelines.
    ///
    /// Entries are created once, here; each later catalog access only merges
    /// them in.
    pub fn attach<H: HostContext>(&self, host: H) -> Result<WingedContext<H>> {
        if !self.enabled {
            warn!("Wings is disabled, context left unchanged");
            return Ok(WingedContext::new(host, IndexMap::new()));
        }

        let pipeline = Pipeline::combine(&host.pipelines());
        let catalog = host
            .load_catalog()
            .map_err(|e| WingsError::Catalog(e.to_string()))?;
        let entries = self.create_entries(pipeline.dataset_names(), &catalog)?;

        info!("Wings added to context with {} entries", entries.len());
        Ok(WingedContext::new(host, entries))
    }
}
