//! fsflash-tools - External tool location and the build/upload pipeline
//!
//! Everything that touches the filesystem or spawns processes lives here:
//! locating the platform's build and upload tools from board properties,
//! running them with streamed output, and sequencing the build and upload
//! stages into one fail-fast pipeline.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod image;
pub mod locate;
pub mod pipeline;
pub mod process;
pub mod sink;
pub mod upload;

pub use error::ToolError;
pub use sink::{BufferSink, OutputSink, StdoutSink};
