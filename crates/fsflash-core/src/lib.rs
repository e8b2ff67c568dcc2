//! fsflash-core - Board metadata and filesystem geometry resolution
//!
//! This crate models the board-details document supplied by the
//! board-description toolchain and resolves it into the filesystem geometry
//! and upload target that drive an image build and serial upload. It is pure
//! data and logic: no processes are spawned and no files are touched here.
//!
//! # Example
//!
//! ```ignore
//! use fsflash_core::{resolver, BoardMetadata};
//!
//! fn show_geometry(board: &BoardMetadata) {
//!     match resolver::resolve(board) {
//!         Ok((layout, target)) => {
//!             println!("{} bytes at 0x{:X}", layout.size_bytes(), layout.start);
//!             println!("upload via {}", target.port);
//!         }
//!         Err(e) => println!("resolution failed: {}", e),
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod board;
pub mod error;
pub mod layout;
pub mod resolver;

pub use board::BoardMetadata;
pub use error::ResolveError;
pub use layout::{Family, FilesystemLayout, UploadTarget};
