use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The only fallible surface is the top-level entry point; every analysis
/// below it is a total function over its inputs.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("source file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}
