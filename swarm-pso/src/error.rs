//! Errors raised at the file boundary.

use std::io;
use std::path::PathBuf;

/// Error type for run-file and driver operations
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The run file could not be opened
    #[error("cannot open {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or writing failed after the file was opened
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The core rejected the request or the file contents
    #[error(transparent)]
    Core(#[from] swarm_pso_core::Error),
}

impl RunError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RunError::FileOpen {
            path: path.into(),
            source,
        }
    }
}
