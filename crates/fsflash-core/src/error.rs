//! Error types for board metadata resolution

use thiserror::Error;

/// Errors produced while resolving board metadata into a filesystem layout
/// and upload target
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Board metadata or the board identifier is unavailable
    #[error("board details unavailable: {0}")]
    MissingBoardDetails(String),

    /// The board's device family is not one of the supported ones
    #[error("unsupported board family `{0}` (supported: rp2040, esp8266)")]
    UnsupportedBoard(String),

    /// Geometry fields are unresolved or invalid (`end <= start`)
    #[error(
        "no filesystem partition configured; select a flash layout that reserves filesystem space"
    )]
    MissingFilesystemConfig,

    /// No serial port selected, or the selected port's transport is not serial
    #[error("unusable upload port: {0}")]
    UnsupportedPort(String),
}
