//! The build/upload pipeline
//!
//! One linear sequence of gates; the first failure aborts the run and is
//! reported once. At most one pipeline is in flight per process: a second
//! invocation is rejected instead of queued, keeping the temporary image
//! and the sink single-owner.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use fsflash_core::{resolver, BoardMetadata, FilesystemLayout, ResolveError, UploadTarget};

use crate::error::ToolError;
use crate::image;
use crate::locate::{self, ToolSet};
use crate::sink::OutputSink;
use crate::upload;

static PIPELINE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Holds the process-wide single-flight slot; released on drop
struct FlightSlot;

impl FlightSlot {
    fn acquire() -> Result<Self, ToolError> {
        if PIPELINE_ACTIVE.swap(true, Ordering::AcqRel) {
            return Err(ToolError::PipelineBusy);
        }
        Ok(Self)
    }
}

impl Drop for FlightSlot {
    fn drop(&mut self) {
        PIPELINE_ACTIVE.store(false, Ordering::Release);
    }
}

/// Run the whole pipeline: validate, resolve, locate tools, build, upload
pub async fn run(
    board: &BoardMetadata,
    data_dir: &Path,
    sink: &dyn OutputSink,
) -> Result<(), ToolError> {
    let _slot = FlightSlot::acquire()?;
    sink.clear();

    // Preconditions
    if board.fqbn.is_empty() {
        return Err(ResolveError::MissingBoardDetails(
            "no board selected; compile a sketch first".to_string(),
        )
        .into());
    }
    if !data_dir.is_dir() {
        return Err(ToolError::MissingDataFolder(data_dir.to_path_buf()));
    }

    // Configuration
    let (layout, target) = resolver::resolve(board)?;
    sink.write_line(&format!(
        "Filesystem region 0x{:X}..0x{:X} ({} bytes, page {}, block {})",
        layout.start,
        layout.end,
        layout.size_bytes(),
        layout.page_size,
        layout.block_size
    ));

    // Tools
    let tools = locate::locate_tools(board, target.family);
    log::info!("builder: {}", tools.builder.display());
    log::info!("interpreter: {}", tools.interpreter.display());

    run_stages(data_dir, &layout, &target, &tools, sink).await
}

/// Build then upload; the temporary image lives until both stages are done
async fn run_stages(
    data_dir: &Path,
    layout: &FilesystemLayout,
    target: &UploadTarget,
    tools: &ToolSet,
    sink: &dyn OutputSink,
) -> Result<(), ToolError> {
    let image = image::build(data_dir, layout, &tools.builder, sink).await?;
    upload::upload(&image, layout, target, tools, sink).await?;
    sink.write_line("Filesystem upload complete");
    Ok(())
}
