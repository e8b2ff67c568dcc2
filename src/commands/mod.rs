//! Subcommand implementations

pub mod build;
pub mod resolve;
pub mod upload;
