use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// One step of a pipeline, reduced to the dataset identifiers it touches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "dataset_refs")]
    pub inputs: Vec<String>,
    #[serde(default, deserialize_with = "dataset_refs")]
    pub outputs: Vec<String>,
}

impl Node {
    pub fn new<I, O>(inputs: I, outputs: O) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            name: None,
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: outputs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Inputs and outputs may be declared as a single name, a list, or a
/// mapping from argument name to dataset name.
#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetRefs {
    Single(String),
    List(Vec<String>),
    Named(IndexMap<String, String>),
}

fn dataset_refs<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<DatasetRefs>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(DatasetRefs::Single(name)) => vec![name],
        Some(DatasetRefs::List(names)) => names,
        Some(DatasetRefs::Named(names)) => names.into_values().collect(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pipeline {
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl Pipeline {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Every identifier read or written by any node, de-duplicated and sorted.
    pub fn dataset_names(&self) -> BTreeSet<String> {
        self.nodes
            .iter()
            .flat_map(|node| node.inputs.iter().chain(node.outputs.iter()))
            .cloned()
            .collect()
    }

    /// Concatenate several pipelines into one.
    pub fn combine<'a>(pipelines: impl IntoIterator<Item = &'a Pipeline>) -> Pipeline {
        Pipeline {
            nodes: pipelines
                .into_iter()
                .flat_map(|p| p.nodes.iter().cloned())
                .collect(),
        }
    }
}
