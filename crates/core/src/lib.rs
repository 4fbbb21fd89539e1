//! Catalog entries inferred from dataset names.
//!
//! A pipeline that reads `01_raw/companies.csv` and writes
//! `06_models/regressor.pkl` does not need either dataset declared by hand:
//! the extension picks the dataset type and the name becomes the file path.

pub mod catalog;
pub mod config;
pub mod context;
pub mod hook;
pub mod logging;
pub mod parser;
pub mod registry;
pub mod synth;

pub use catalog::{MemoryCatalog, merge_into};
pub use config::WingsConfig;
pub use context::WingedContext;
pub use hook::{RunParams, Wings};
pub use parser::{ExtensionMatcher, parse_wing_info};
pub use registry::{DEFAULT_TYPES, ExtensionRegistry};
pub use synth::{CHRONO_MARKER, Synthesizer};
pub use wings_api::{Result, WingsError};
