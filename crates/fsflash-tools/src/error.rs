//! Error types for the tool layer

use std::path::PathBuf;

use fsflash_core::ResolveError;
use thiserror::Error;

/// Errors produced by tool execution and the pipeline
#[derive(Debug, Error)]
pub enum ToolError {
    /// Expected source data folder is absent
    #[error("data folder {} does not exist", .0.display())]
    MissingDataFolder(PathBuf),

    /// Board resolution failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// External tool could not be launched
    #[error("failed to launch `{tool}`: {source}")]
    SpawnFailure {
        /// The command that failed to spawn
        tool: String,
        /// The underlying OS error
        source: std::io::Error,
    },

    /// Filesystem image builder exited non-zero
    #[error("filesystem image builder exited with code {0}")]
    BuildFailure(i32),

    /// Uploader exited non-zero
    #[error("uploader exited with code {0}")]
    UploadFailure(i32),

    /// Another pipeline run is already in flight
    #[error("an upload is already in progress")]
    PipelineBusy,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
