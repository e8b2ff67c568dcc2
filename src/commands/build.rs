//! The build command: image only, explicit output path, no upload

use std::error::Error;
use std::path::Path;

use fsflash_core::{resolver, BoardMetadata};
use fsflash_tools::{image, locate, StdoutSink, ToolError};

/// Build the filesystem image to `output`
pub async fn run(
    board_details: &Path,
    data_dir: &Path,
    output: &Path,
) -> Result<(), Box<dyn Error>> {
    let board = BoardMetadata::from_json_file(board_details)?;
    let family = resolver::resolve_family(&board)?;
    let layout = resolver::resolve_layout(&board, family)?;

    if !data_dir.is_dir() {
        return Err(ToolError::MissingDataFolder(data_dir.to_path_buf()).into());
    }

    let tools = locate::locate_tools(&board, family);
    let sink = StdoutSink;
    image::build_to(data_dir, &layout, &tools.builder, output, &sink).await?;

    println!(
        "Wrote {} byte filesystem image to {}",
        layout.size_bytes(),
        output.display()
    );
    Ok(())
}
