pub mod catalog;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use catalog::{BoxError, DataCatalog, HostContext};
pub use error::{Result, WingsError};
pub use models::*;
