//! The upload command: the full build/upload pipeline

use std::error::Error;
use std::path::Path;

use fsflash_core::board::PortDetails;
use fsflash_core::BoardMetadata;
use fsflash_tools::{pipeline, StdoutSink};

/// Run the pipeline against the given board details and data folder
pub async fn run(
    board_details: &Path,
    data_dir: &Path,
    port: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let mut board = BoardMetadata::from_json_file(board_details)?;
    if let Some(address) = port {
        board.port = Some(PortDetails {
            address,
            protocol: "serial".to_string(),
        });
    }

    let sink = StdoutSink;
    pipeline::run(&board, data_dir, &sink).await?;
    Ok(())
}
