//! The resolve command: print geometry without touching any tool

use std::error::Error;
use std::path::Path;

use fsflash_core::{resolver, BoardMetadata, Family};

/// Resolve and print the filesystem geometry and upload target
pub fn run(board_details: &Path) -> Result<(), Box<dyn Error>> {
    let board = BoardMetadata::from_json_file(board_details)?;
    let family = resolver::resolve_family(&board)?;
    let layout = resolver::resolve_layout(&board, family)?;

    println!("Board:       {}", board.fqbn);
    println!("Family:      {}", family);
    println!("Start:       0x{:08X}", layout.start);
    println!("End:         0x{:08X}", layout.end);
    println!("Size:        {} bytes", layout.size_bytes());
    println!("Page size:   {} bytes", layout.page_size);
    println!("Block size:  {} bytes", layout.block_size);

    match resolver::resolve_target(&board, family) {
        Ok(target) => {
            println!("Port:        {}", target.port);
            if family == Family::Esp8266 {
                println!("Baud:        {}", target.baud);
            }
        }
        Err(e) => println!("Port:        unavailable ({})", e),
    }

    Ok(())
}
