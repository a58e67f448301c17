pub mod artifact;
pub mod config;
pub mod error;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::artifact::{write_atomic, write_json_pretty};
    pub use crate::config::{DEFAULT_DATASET, MalformedPolicy, RunConfig};
    pub use crate::error::{DatasetError, Result, VerityError};
}
