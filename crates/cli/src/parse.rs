use serde_json::json;
use std::path::Path;
use tracing::info;
use wings_core::Wings;

/// Describe how `identifier` is parsed and the entry it would get.
pub fn run(
    identifier: &str,
    config: Option<&Path>,
    namespaces: Vec<String>,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = crate::load_config(config)?;
    config.namespaces.extend(namespaces);
    let wings = Wings::new(config);
    let synthesizer = wings.synthesizer();

    let Some(wing) = synthesizer.parse(identifier) else {
        info!("No registered extension matches {}", identifier);
        return Ok(format!("{identifier}: no registered extension matches"));
    };

    let dataset = synthesizer.dataset_config(&wing)?;
    Ok(serde_json::to_string_pretty(&json!({
        "wing": wing,
        "dataset": dataset.to_value(),
    }))?)
}
