//! External tool location from board properties
//!
//! Platforms publish their tool directories as build properties
//! (`runtime.tools.<name>.path`, versioned variants included). Absence is
//! not an error: the bare executable name is left to the system's search
//! path.

use std::path::{Path, PathBuf};

use fsflash_core::{BoardMetadata, Family};

/// The external tools one family's pipeline needs
#[derive(Debug, Clone)]
pub struct ToolSet {
    /// Filesystem image builder executable
    pub builder: PathBuf,
    /// Interpreter that runs the platform's upload helper scripts
    pub interpreter: PathBuf,
    /// Directory holding the upload helper scripts
    pub platform_tools: PathBuf,
}

/// Find the directory for a tool whose property key starts with `prefix`
///
/// Matches arrive in sorted key order and the last one wins, so the highest
/// versioned variant is preferred when several are installed.
pub fn find_tool_dir<'a>(board: &'a BoardMetadata, prefix: &str) -> Option<&'a str> {
    let mut found = None;
    for (key, value) in &board.build_properties {
        if key.starts_with(prefix) && !value.is_empty() {
            found = Some((key.as_str(), value.as_str()));
        }
    }
    let (key, dir) = found?;
    log::debug!("tool prefix `{}` resolved via `{}` -> {}", prefix, key, dir);
    Some(dir)
}

/// Resolve a tool executable: property-announced directory, or the bare
/// name for the system search path. The platform executable suffix is
/// appended either way.
pub fn resolve_tool(board: &BoardMetadata, prefix: &str, name: &str) -> PathBuf {
    let exe = format!("{}{}", name, std::env::consts::EXE_SUFFIX);
    match find_tool_dir(board, prefix) {
        Some(dir) => Path::new(dir).join(exe),
        None => PathBuf::from(exe),
    }
}

/// Locate the builder, interpreter, and platform tools directory for a family
pub fn locate_tools(board: &BoardMetadata, family: Family) -> ToolSet {
    let (builder_prefix, interpreter_prefix) = match family {
        Family::Rp2040 => ("runtime.tools.pqt-mklittlefs", "runtime.tools.pqt-python3"),
        Family::Esp8266 => ("runtime.tools.mklittlefs", "runtime.tools.python3"),
    };

    // An absent platform path degrades to bare script names, resolved like
    // bare executables.
    let platform_tools = match board.property("runtime.platform.path") {
        Some(path) => Path::new(path).join("tools"),
        None => {
            log::warn!("runtime.platform.path not set; upload scripts fall back to bare names");
            PathBuf::new()
        }
    };

    ToolSet {
        builder: resolve_tool(board, builder_prefix, "mklittlefs"),
        interpreter: resolve_tool(board, interpreter_prefix, "python3"),
        platform_tools,
    }
}
