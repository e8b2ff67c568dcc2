//! fsflash - Filesystem image build and upload for embedded boards
//!
//! Builds a flash filesystem image from a data folder using the board
//! platform's external tools and writes it to an rp2040 or esp8266 device
//! over serial, driven entirely by a board-details document.
//!
//! # Architecture
//!
//! - `fsflash-core` resolves the board-details document into filesystem
//!   geometry and an upload target
//! - `fsflash-tools` locates the platform's builder and upload helper,
//!   runs them with streamed output, and sequences the pipeline

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    let result = match cli.command {
        Commands::Upload {
            board_details,
            data_dir,
            port,
        } => commands::upload::run(&board_details, &data_dir, port).await,
        Commands::Build {
            board_details,
            data_dir,
            output,
        } => commands::build::run(&board_details, &data_dir, &output).await,
        Commands::Resolve { board_details } => commands::resolve::run(&board_details),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
