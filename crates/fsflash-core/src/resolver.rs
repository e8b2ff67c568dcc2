//! Filesystem geometry resolution from board metadata
//!
//! Geometry comes from the board's menu system: the selected value of the
//! family's sizing option names a build-property subtree
//! (`menu.<option>.<value>.build.<marker>`) carrying the partition bounds.
//! rp2040 cores fix page and block size in the on-device driver; esp8266
//! cores publish them as two more properties under the same menu path.

use crate::board::BoardMetadata;
use crate::error::ResolveError;
use crate::layout::{Family, FilesystemLayout, UploadTarget, DEFAULT_BAUD};

/// Per-family option and property marker names
struct FamilyKeys {
    size_option: &'static str,
    fs_start: &'static str,
    fs_end: &'static str,
}

const RP2040_KEYS: FamilyKeys = FamilyKeys {
    size_option: "flash",
    fs_start: "fs_start",
    fs_end: "fs_end",
};

const ESP8266_KEYS: FamilyKeys = FamilyKeys {
    size_option: "eesz",
    fs_start: "spiffs_start",
    fs_end: "spiffs_end",
};

/// rp2040 LittleFS page size, dictated by the on-device driver
const RP2040_PAGE_SIZE: u32 = 256;
/// rp2040 LittleFS block size, dictated by the on-device driver
const RP2040_BLOCK_SIZE: u32 = 4096;

/// Parse a build-property integer, decimal or `0x`-prefixed hex
pub fn parse_u32(s: &str) -> Option<u32> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}

/// Resolve board metadata into filesystem geometry and an upload target
///
/// Fails with [`ResolveError::MissingBoardDetails`] for a malformed board
/// identifier, [`ResolveError::UnsupportedBoard`] for an unknown family,
/// [`ResolveError::MissingFilesystemConfig`] when the selected variant does
/// not carve out a filesystem region, and [`ResolveError::UnsupportedPort`]
/// when no serial port is selected.
pub fn resolve(board: &BoardMetadata) -> Result<(FilesystemLayout, UploadTarget), ResolveError> {
    let family = resolve_family(board)?;
    let layout = resolve_layout(board, family)?;
    let target = resolve_target(board, family)?;
    Ok((layout, target))
}

/// Determine the device family from the board identifier
pub fn resolve_family(board: &BoardMetadata) -> Result<Family, ResolveError> {
    let segment = board.family_segment().ok_or_else(|| {
        ResolveError::MissingBoardDetails(format!(
            "board identifier `{}` is missing a family segment",
            board.fqbn
        ))
    })?;
    Family::from_fqbn_segment(segment)
        .ok_or_else(|| ResolveError::UnsupportedBoard(segment.to_string()))
}

/// Resolve the filesystem region for a known family
///
/// Validation is eager and exhaustive: a missing menu selection, a missing
/// or unparseable property, a zero field, and `end <= start` all collapse
/// into the one user-facing `MissingFilesystemConfig` error.
pub fn resolve_layout(
    board: &BoardMetadata,
    family: Family,
) -> Result<FilesystemLayout, ResolveError> {
    let keys = match family {
        Family::Rp2040 => &RP2040_KEYS,
        Family::Esp8266 => &ESP8266_KEYS,
    };

    let selected = board
        .selected_value(keys.size_option)
        .ok_or(ResolveError::MissingFilesystemConfig)?;
    log::debug!("sizing option `{}` = `{}`", keys.size_option, selected);

    let start = menu_u32(board, keys.size_option, selected, keys.fs_start).unwrap_or(0);
    let end = menu_u32(board, keys.size_option, selected, keys.fs_end).unwrap_or(0);
    let (page_size, block_size) = match family {
        Family::Rp2040 => (RP2040_PAGE_SIZE, RP2040_BLOCK_SIZE),
        Family::Esp8266 => (
            menu_u32(board, keys.size_option, selected, "spiffs_pagesize").unwrap_or(0),
            menu_u32(board, keys.size_option, selected, "spiffs_blocksize").unwrap_or(0),
        ),
    };

    let layout = FilesystemLayout {
        start,
        end,
        page_size,
        block_size,
    };
    if !layout.is_resolved() {
        return Err(ResolveError::MissingFilesystemConfig);
    }
    log::debug!(
        "filesystem region 0x{:X}..0x{:X} ({} bytes, page {}, block {})",
        layout.start,
        layout.end,
        layout.size_bytes(),
        layout.page_size,
        layout.block_size
    );
    Ok(layout)
}

/// Resolve the upload target (serial port and baud rate)
pub fn resolve_target(board: &BoardMetadata, family: Family) -> Result<UploadTarget, ResolveError> {
    let port = match &board.port {
        Some(p) if p.protocol == "serial" => p.address.clone(),
        Some(p) => {
            return Err(ResolveError::UnsupportedPort(format!(
                "port `{}` has transport `{}`, expected serial",
                p.address, p.protocol
            )))
        }
        None => {
            return Err(ResolveError::UnsupportedPort(
                "no port selected".to_string(),
            ))
        }
    };

    let baud = board
        .selected_value("baud")
        .and_then(parse_u32)
        .unwrap_or(DEFAULT_BAUD);

    Ok(UploadTarget { family, port, baud })
}

/// Look up and parse a menu-path property:
/// `menu.<option>.<value>.build.<marker>`
fn menu_u32(board: &BoardMetadata, option: &str, value: &str, marker: &str) -> Option<u32> {
    let key = format!("menu.{}.{}.build.{}", option, value, marker);
    let raw = board.property(&key)?;
    let parsed = parse_u32(raw);
    if parsed.is_none() {
        log::warn!("property `{}` = `{}` is not an integer", key, raw);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ConfigOption, OptionValue, PortDetails};

    fn option(name: &str, selected: Option<&str>) -> ConfigOption {
        ConfigOption {
            option: name.to_string(),
            values: vec![
                OptionValue {
                    value: "unused".to_string(),
                    selected: false,
                },
                OptionValue {
                    value: selected.unwrap_or("ignored").to_string(),
                    selected: selected.is_some(),
                },
            ],
        }
    }

    fn serial_port(address: &str) -> Option<PortDetails> {
        Some(PortDetails {
            address: address.to_string(),
            protocol: "serial".to_string(),
        })
    }

    fn rp2040_board() -> BoardMetadata {
        let mut board = BoardMetadata {
            fqbn: "vendor:rp2040:boardX".to_string(),
            config_options: vec![option("flash", Some("2097152_1048576"))],
            port: serial_port("/dev/ttyACM0"),
            ..Default::default()
        };
        board.build_properties.insert(
            "menu.flash.2097152_1048576.build.fs_start".to_string(),
            "0x300000".to_string(),
        );
        board.build_properties.insert(
            "menu.flash.2097152_1048576.build.fs_end".to_string(),
            "0x400000".to_string(),
        );
        board
    }

    fn esp8266_board() -> BoardMetadata {
        let mut board = BoardMetadata {
            fqbn: "vendor:esp8266:boardY".to_string(),
            config_options: vec![
                option("eesz", Some("4M2M")),
                option("baud", Some("460800")),
            ],
            port: serial_port("/dev/ttyUSB0"),
            ..Default::default()
        };
        for (marker, value) in [
            ("spiffs_start", "0x200000"),
            ("spiffs_end", "0x2FB000"),
            ("spiffs_pagesize", "256"),
            ("spiffs_blocksize", "8192"),
        ] {
            board.build_properties.insert(
                format!("menu.eesz.4M2M.build.{}", marker),
                value.to_string(),
            );
        }
        board
    }

    #[test]
    fn parse_u32_hex_and_decimal() {
        assert_eq!(parse_u32("0x300000"), Some(0x30_0000));
        assert_eq!(parse_u32("0X1000"), Some(0x1000));
        assert_eq!(parse_u32("4096"), Some(4096));
        assert_eq!(parse_u32(""), None);
        assert_eq!(parse_u32("0xZZ"), None);
    }

    #[test]
    fn rp2040_scenario() {
        let (layout, target) = resolve(&rp2040_board()).unwrap();
        assert_eq!(
            layout,
            FilesystemLayout {
                start: 3_145_728,
                end: 4_194_304,
                page_size: 256,
                block_size: 4096,
            }
        );
        assert_eq!(layout.size_bytes(), 1_048_576);
        assert_eq!(target.family, Family::Rp2040);
        assert_eq!(target.port, "/dev/ttyACM0");
        assert_eq!(target.baud, DEFAULT_BAUD);
    }

    #[test]
    fn esp8266_scenario() {
        let (layout, target) = resolve(&esp8266_board()).unwrap();
        assert_eq!(
            layout,
            FilesystemLayout {
                start: 2_097_152,
                end: 0x2F_B000,
                page_size: 256,
                block_size: 8192,
            }
        );
        assert_eq!(target.family, Family::Esp8266);
        assert_eq!(target.port, "/dev/ttyUSB0");
        assert_eq!(target.baud, 460_800);
    }

    #[test]
    fn unsupported_family() {
        let board = BoardMetadata {
            fqbn: "vendor:unsupported_family:board".to_string(),
            ..Default::default()
        };
        assert_eq!(
            resolve(&board),
            Err(ResolveError::UnsupportedBoard(
                "unsupported_family".to_string()
            ))
        );
    }

    #[test]
    fn malformed_fqbn() {
        let board = BoardMetadata::default();
        assert!(matches!(
            resolve(&board),
            Err(ResolveError::MissingBoardDetails(_))
        ));
    }

    #[test]
    fn flash_option_without_selection() {
        let mut board = rp2040_board();
        board.config_options = vec![option("flash", None)];
        assert_eq!(
            resolve(&board),
            Err(ResolveError::MissingFilesystemConfig)
        );
    }

    #[test]
    fn missing_start_property() {
        let mut board = rp2040_board();
        board
            .build_properties
            .remove("menu.flash.2097152_1048576.build.fs_start");
        assert_eq!(
            resolve(&board),
            Err(ResolveError::MissingFilesystemConfig)
        );
    }

    #[test]
    fn end_not_after_start() {
        let mut board = rp2040_board();
        board.build_properties.insert(
            "menu.flash.2097152_1048576.build.fs_end".to_string(),
            "0x300000".to_string(),
        );
        assert_eq!(
            resolve(&board),
            Err(ResolveError::MissingFilesystemConfig)
        );
    }

    #[test]
    fn esp8266_missing_blocksize() {
        let mut board = esp8266_board();
        board
            .build_properties
            .remove("menu.eesz.4M2M.build.spiffs_blocksize");
        assert_eq!(
            resolve(&board),
            Err(ResolveError::MissingFilesystemConfig)
        );
    }

    #[test]
    fn port_validation() {
        let mut board = rp2040_board();
        board.port = None;
        assert!(matches!(
            resolve(&board),
            Err(ResolveError::UnsupportedPort(_))
        ));

        let mut board = rp2040_board();
        board.port = Some(PortDetails {
            address: "192.168.0.2".to_string(),
            protocol: "network".to_string(),
        });
        assert!(matches!(
            resolve(&board),
            Err(ResolveError::UnsupportedPort(_))
        ));
    }

    #[test]
    fn baud_defaults_when_unselected() {
        let mut board = esp8266_board();
        board.config_options = vec![option("eesz", Some("4M2M")), option("baud", None)];
        let (_, target) = resolve(&board).unwrap();
        assert_eq!(target.baud, DEFAULT_BAUD);
    }
}
