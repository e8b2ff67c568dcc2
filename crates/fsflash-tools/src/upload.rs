//! Image upload over serial
//!
//! Both families upload through a helper script run by the platform's
//! interpreter: rp2040 converts the image to UF2 and transfers it in one
//! step, esp8266 goes through the chip-upload wrapper's `write_flash`
//! subcommand.

use std::ffi::OsString;
use std::path::Path;

use fsflash_core::{Family, FilesystemLayout, UploadTarget};

use crate::error::ToolError;
use crate::locate::ToolSet;
use crate::process;
use crate::sink::OutputSink;

/// Interpreter argument vector for the family's upload helper
///
/// rp2040:
/// `<tools>/uf2conv.py --base <start> --serial <port> --family RP2040 <image>`
///
/// esp8266:
/// `<tools>/upload.py --chip esp8266 --port <port> --baud <baud> write_flash <start> <image>`
pub fn upload_args(
    image: &Path,
    layout: &FilesystemLayout,
    target: &UploadTarget,
    platform_tools: &Path,
) -> Vec<OsString> {
    match target.family {
        Family::Rp2040 => vec![
            platform_tools.join("uf2conv.py").into(),
            "--base".into(),
            layout.start.to_string().into(),
            "--serial".into(),
            target.port.as_str().into(),
            "--family".into(),
            "RP2040".into(),
            image.into(),
        ],
        Family::Esp8266 => vec![
            platform_tools.join("upload.py").into(),
            "--chip".into(),
            "esp8266".into(),
            "--port".into(),
            target.port.as_str().into(),
            "--baud".into(),
            target.baud.to_string().into(),
            "write_flash".into(),
            layout.start.to_string().into(),
            image.into(),
        ],
    }
}

/// Write the built image to the device
///
/// Non-zero helper exit is [`ToolError::UploadFailure`]; the device is left
/// however the external tool left it.
pub async fn upload(
    image: &Path,
    layout: &FilesystemLayout,
    target: &UploadTarget,
    tools: &ToolSet,
    sink: &dyn OutputSink,
) -> Result<(), ToolError> {
    sink.write_line(&format!(
        "Uploading filesystem image to {} ({})",
        target.port, target.family
    ));
    let args = upload_args(image, layout, target, &tools.platform_tools);
    let code = process::run(&tools.interpreter, &args, sink).await?;
    if code != 0 {
        return Err(ToolError::UploadFailure(code));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(args: &[OsString]) -> Vec<String> {
        args.iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn rp2040_upload_args() {
        let layout = FilesystemLayout {
            start: 3_145_728,
            end: 4_194_304,
            page_size: 256,
            block_size: 4096,
        };
        let target = UploadTarget {
            family: Family::Rp2040,
            port: "/dev/ttyACM0".to_string(),
            baud: 115_200,
        };
        let args = upload_args(
            Path::new("/tmp/fs.bin"),
            &layout,
            &target,
            Path::new("/platform/tools"),
        );
        assert_eq!(
            rendered(&args),
            [
                "/platform/tools/uf2conv.py",
                "--base",
                "3145728",
                "--serial",
                "/dev/ttyACM0",
                "--family",
                "RP2040",
                "/tmp/fs.bin",
            ]
        );
    }

    #[test]
    fn esp8266_upload_args() {
        let layout = FilesystemLayout {
            start: 2_097_152,
            end: 0x2F_B000,
            page_size: 256,
            block_size: 8192,
        };
        let target = UploadTarget {
            family: Family::Esp8266,
            port: "/dev/ttyUSB0".to_string(),
            baud: 460_800,
        };
        let args = upload_args(
            Path::new("/tmp/fs.bin"),
            &layout,
            &target,
            Path::new("/platform/tools"),
        );
        assert_eq!(
            rendered(&args),
            [
                "/platform/tools/upload.py",
                "--chip",
                "esp8266",
                "--port",
                "/dev/ttyUSB0",
                "--baud",
                "460800",
                "write_flash",
                "2097152",
                "/tmp/fs.bin",
            ]
        );
    }
}
