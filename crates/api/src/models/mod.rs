pub mod dataset;
pub mod pipeline;
pub mod wing;

pub use dataset::*;
pub use pipeline::*;
pub use wing::*;
