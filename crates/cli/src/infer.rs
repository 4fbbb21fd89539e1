use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::info;
use wings_api::DataCatalog;
use wings_api::models::Pipeline;
use wings_core::{MemoryCatalog, RunParams, Wings};

/// A pipeline file holds either one pipeline or several named ones.
#[derive(Deserialize)]
#[serde(untagged)]
enum PipelineFile {
    Single(Pipeline),
    Named(IndexMap<String, Pipeline>),
}

impl PipelineFile {
    fn into_pipeline(self) -> Pipeline {
        match self {
            PipelineFile::Single(pipeline) => pipeline,
            PipelineFile::Named(pipelines) => Pipeline::combine(pipelines.values()),
        }
    }
}

pub fn load_pipeline(path: &Path) -> Result<Pipeline, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let file: PipelineFile = serde_json::from_str(&content)?;
    Ok(file.into_pipeline())
}

/// Run the hook against `pipeline` and render the result as JSON.
pub fn run(
    pipeline: &Path,
    config: Option<&Path>,
    catalog: Option<&Path>,
    all: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let wings = Wings::new(crate::load_config(config)?);
    let pipeline = load_pipeline(pipeline)?;
    let mut catalog = match catalog {
        Some(path) => MemoryCatalog::from_path(path)?,
        None => MemoryCatalog::new(),
    };

    info!(
        "Inferring entries for {} datasets",
        pipeline.dataset_names().len()
    );
    let added = wings.before_pipeline_run(&RunParams::new(), &pipeline, &mut catalog)?;

    let output = if all {
        catalog.to_value()
    } else {
        Value::Object(
            added
                .iter()
                .filter_map(|name| {
                    catalog
                        .get(name)
                        .map(|entry| (name.clone(), entry.as_ref().clone()))
                })
                .collect(),
        )
    };
    Ok(serde_json::to_string_pretty(&output)?)
}
