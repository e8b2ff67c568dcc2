//! Board-details document model
//!
//! The board-description toolchain supplies one JSON document per
//! invocation: the fully-qualified board name, the flat build-property map,
//! the user's menu selections, and the selected port. This module models
//! that document; interpreting it is [`crate::resolver`]'s job.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::ResolveError;

/// One selectable value of a configuration option
#[derive(Debug, Clone, Deserialize)]
pub struct OptionValue {
    /// Raw value, as it appears inside menu-path property keys
    pub value: String,
    /// Whether the user selected this value
    #[serde(default)]
    pub selected: bool,
}

/// A user-selectable board configuration axis (flash layout, baud rate, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigOption {
    /// Option name, e.g. `flash`, `eesz`, `baud`
    pub option: String,
    /// Ordered values; at most one is expected to be selected
    #[serde(default)]
    pub values: Vec<OptionValue>,
}

/// The port selected for upload
#[derive(Debug, Clone, Deserialize)]
pub struct PortDetails {
    /// Device path, e.g. `/dev/ttyACM0`
    pub address: String,
    /// Transport protocol; only `serial` is usable for upload
    pub protocol: String,
}

/// Board metadata as supplied by the board-description toolchain
///
/// Read-only for the duration of one invocation. Property keys follow the
/// dotted menu-path convention (`menu.<option>.<value>.build.<marker>`,
/// `runtime.tools.<name>.path`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMetadata {
    /// Fully-qualified board name, `vendor:family:board`
    #[serde(default)]
    pub fqbn: String,
    /// Flat build-property map. A `BTreeMap` keeps prefix scans in sorted
    /// key order, which the tool locator relies on.
    #[serde(default)]
    pub build_properties: BTreeMap<String, String>,
    /// Menu options with the user's selections
    #[serde(default)]
    pub config_options: Vec<ConfigOption>,
    /// Selected port, if any
    #[serde(default)]
    pub port: Option<PortDetails>,
}

impl BoardMetadata {
    /// Load a board-details document from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, ResolveError> {
        let file = File::open(path).map_err(|e| {
            ResolveError::MissingBoardDetails(format!("cannot open {}: {}", path.display(), e))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            ResolveError::MissingBoardDetails(format!("cannot parse {}: {}", path.display(), e))
        })
    }

    /// The family segment of the fqbn (second colon-separated field)
    pub fn family_segment(&self) -> Option<&str> {
        self.fqbn.split(':').nth(1).filter(|s| !s.is_empty())
    }

    /// Look up a build property by exact key
    pub fn property(&self, key: &str) -> Option<&str> {
        self.build_properties.get(key).map(String::as_str)
    }

    /// The selected value of a named config option, if the option exists
    /// and has a selection
    pub fn selected_value(&self, option: &str) -> Option<&str> {
        self.config_options
            .iter()
            .find(|o| o.option == option)?
            .values
            .iter()
            .find(|v| v.selected)
            .map(|v| v.value.as_str())
    }
}
