//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fsflash")]
#[command(author, version, about = "Filesystem image build and upload over serial", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the filesystem image and upload it to the device
    Upload {
        /// Board-details JSON document from the board toolchain
        #[arg(long)]
        board_details: PathBuf,

        /// Folder whose contents become the filesystem
        #[arg(long)]
        data_dir: PathBuf,

        /// Serial port override (defaults to the port in the board details)
        #[arg(long)]
        port: Option<String>,
    },

    /// Build the filesystem image to a file without uploading
    Build {
        /// Board-details JSON document from the board toolchain
        #[arg(long)]
        board_details: PathBuf,

        /// Folder whose contents become the filesystem
        #[arg(long)]
        data_dir: PathBuf,

        /// Output image path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show the resolved filesystem geometry and upload target
    Resolve {
        /// Board-details JSON document from the board toolchain
        #[arg(long)]
        board_details: PathBuf,
    },
}
