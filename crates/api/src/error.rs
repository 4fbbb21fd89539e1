#[derive(Debug, thiserror::Error)]
pub enum WingsError {
    #[error("Configuration for {extension} is missing its \"type\" key.")]
    MissingType { extension: String },
    #[error("Configuration for {extension} is not a valid dataset: {reason}")]
    InvalidDataSet { extension: String, reason: String },
    #[error("No dataset to reuse for {0}: its target is neither a wing nor a catalog entry")]
    MissingChronoDataSetTarget(String),
    #[error("Failed to create dataset {name}: {message}")]
    Adapter { name: String, message: String },
    #[error("Catalog error: {0}")]
    Catalog(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WingsError>;
