use indexmap::IndexMap;
use wings_core::DEFAULT_TYPES;

pub fn run() -> Result<String, Box<dyn std::error::Error>> {
    let table: IndexMap<&str, &str> = DEFAULT_TYPES.iter().copied().collect();
    Ok(serde_json::to_string_pretty(&table)?)
}
