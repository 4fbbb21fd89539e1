//! Catalog entry synthesis.
//!
//! Turns the identifiers used by a pipeline into dataset configurations, and
//! resolves chronocoded identifiers (`name!`) either to their own wing or to
//! the dataset they reuse.

use crate::registry::ExtensionRegistry;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;
use wings_api::models::{DatasetConfig, WingInfo};
use wings_api::{Result, WingsError};

/// Trailing marker of a chronocoded identifier.
pub const CHRONO_MARKER: char = '!';

#[derive(Debug, Clone)]
pub struct Synthesizer {
    registry: ExtensionRegistry,
    paths: IndexMap<String, String>,
    root: String,
    namespaces: Vec<String>,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(ExtensionRegistry::new())
    }
}

impl Synthesizer {
    /// A synthesizer rooted at `data` with no path rewrites or namespaces.
    pub fn new(registry: ExtensionRegistry) -> Self {
        Self {
            registry,
            paths: IndexMap::new(),
            root: "data".to_string(),
            namespaces: Vec::new(),
        }
    }

    pub fn with_paths(mut self, paths: IndexMap<String, String>) -> Self {
        self.paths = paths;
        self
    }

    /// An empty root means filepaths are not prefixed at all.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_namespaces(mut self, namespaces: Vec<String>) -> Self {
        self.namespaces = namespaces;
        self
    }

    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    pub fn parse(&self, identifier: &str) -> Option<WingInfo> {
        self.registry.parse(identifier, &self.namespaces)
    }

    /// `root / rewritten directory / basename`, skipping empty components.
    pub fn filepath(&self, wing: &WingInfo) -> String {
        let directory = self
            .paths
            .get(&wing.directory)
            .map(String::as_str)
            .unwrap_or(&wing.directory);

        [self.root.as_str(), directory, wing.basename.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn dataset_config(&self, wing: &WingInfo) -> Result<DatasetConfig> {
        self.registry
            .dataset_config(&wing.extension, self.filepath(wing))
    }

    /// Synthesize configurations for every identifier that carries a wing.
    ///
    /// Chronocoded identifiers can only reuse entries synthesized in the same
    /// call; use [`Synthesizer::create_entries`] to also reuse existing ones.
    pub fn synthesize<I>(&self, identifiers: I) -> Result<IndexMap<String, Arc<DatasetConfig>>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.create_entries(identifiers, |_| None, |_, config| Ok(Arc::new(config)))
    }

    /// Create entries for `identifiers`.
    ///
    /// `known` looks up datasets that already exist outside this batch;
    /// `materialize` turns a configuration into the entry type `D`. An alias
    /// receives a clone of its target's `D`, never a new materialization.
    pub fn create_entries<I, D, K, M>(
        &self,
        identifiers: I,
        known: K,
        mut materialize: M,
    ) -> Result<IndexMap<String, D>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        D: Clone,
        K: Fn(&str) -> Option<D>,
        M: FnMut(&str, DatasetConfig) -> Result<D>,
    {
        let identifiers: Vec<I::Item> = identifiers.into_iter().collect();
        let mut entries = IndexMap::new();

        for identifier in &identifiers {
            let identifier = identifier.as_ref();
            if identifier.ends_with(CHRONO_MARKER) {
                continue;
            }
            let Some(wing) = self.parse(identifier) else {
                continue;
            };
            let config = self.dataset_config(&wing)?;
            debug!("Synthesized {} -> {}", identifier, config.filepath);
            entries.insert(identifier.to_string(), materialize(identifier, config)?);
        }

        // A target is always shorter than its alias, so `data!` resolves before `data!!`.
        let mut chronocoded: Vec<&str> = identifiers
            .iter()
            .map(|identifier| identifier.as_ref())
            .filter(|identifier| identifier.ends_with(CHRONO_MARKER))
            .collect();
        chronocoded.sort_by_key(|identifier| identifier.len());

        for identifier in chronocoded {
            let Some(target) = identifier.strip_suffix(CHRONO_MARKER) else {
                continue;
            };

            if let Some(wing) = self.parse(target) {
                let config = self.dataset_config(&wing)?;
                debug!("Synthesized {} -> {}", identifier, config.filepath);
                entries.insert(identifier.to_string(), materialize(identifier, config)?);
                continue;
            }

            let found = entries.get(target).cloned().or_else(|| known(target));
            match found {
                Some(dataset) => {
                    debug!("Reusing {} for {}", target, identifier);
                    entries.insert(identifier.to_string(), dataset);
                }
                None => {
                    return Err(WingsError::MissingChronoDataSetTarget(
                        identifier.to_string(),
                    ));
                }
            }
        }

        Ok(entries)
    }
}
