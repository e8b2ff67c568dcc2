//! Filesystem image creation
//!
//! Drives the external `mklittlefs`-style builder. For the pipeline the
//! image lands in a uniquely named temporary file owned by the returned
//! [`TempPath`], which removes it on drop whatever the run's outcome.

use std::ffi::OsString;
use std::path::Path;

use tempfile::TempPath;

use fsflash_core::FilesystemLayout;

use crate::error::ToolError;
use crate::process;
use crate::sink::OutputSink;

/// Builder argument vector:
/// `-c <dataDir> -p <pageSize> -b <blockSize> -s <sizeBytes> <outPath>`
///
/// Order and flag letters are the external tool's fixed contract, identical
/// for every supported tool variant.
pub fn builder_args(data_dir: &Path, layout: &FilesystemLayout, image: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-c"),
        data_dir.into(),
        OsString::from("-p"),
        layout.page_size.to_string().into(),
        OsString::from("-b"),
        layout.block_size.to_string().into(),
        OsString::from("-s"),
        layout.size_bytes().to_string().into(),
        image.into(),
    ]
}

/// Run the builder for an already-chosen output path
pub async fn build_to(
    data_dir: &Path,
    layout: &FilesystemLayout,
    builder: &Path,
    image: &Path,
    sink: &dyn OutputSink,
) -> Result<(), ToolError> {
    let args = builder_args(data_dir, layout, image);
    let code = process::run(builder, &args, sink).await?;
    if code != 0 {
        return Err(ToolError::BuildFailure(code));
    }
    Ok(())
}

/// Build the filesystem image into a fresh temporary file
///
/// A non-zero builder exit aborts with [`ToolError::BuildFailure`]; the
/// half-written image is still removed when the returned path drops.
pub async fn build(
    data_dir: &Path,
    layout: &FilesystemLayout,
    builder: &Path,
    sink: &dyn OutputSink,
) -> Result<TempPath, ToolError> {
    let image = tempfile::Builder::new()
        .prefix("fsflash-")
        .suffix(".bin")
        .tempfile()?
        .into_temp_path();

    sink.write_line(&format!(
        "Building {} byte filesystem image from {}",
        layout.size_bytes(),
        data_dir.display()
    ));
    build_to(data_dir, layout, builder, &image, sink).await?;
    Ok(image)
}
