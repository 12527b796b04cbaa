use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::lib::errors::ConfigError;

pub const DEFAULT_BRIDGE_EXECUTABLE: &str = "websockify";
pub const DEFAULT_HEARTBEAT_SECS: u32 = 30;
pub const DEFAULT_WEB_DIR: &str = "web/noVNC-1.2.0";
pub const DEFAULT_ENTRY_PAGE: &str = "/vnc_lite.html";
const MAX_HEARTBEAT_SECS: u32 = 3600;

/// WebSocket bridge settings.
#[derive(Debug, Clone, Serialize)]
pub struct BridgeSection {
    pub executable: String,
    pub heartbeat_secs: u32,
    /// Web client directory, relative to the share directory unless absolute.
    pub web_dir: PathBuf,
    /// Page the proxy root is rewritten to.
    pub entry_page: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawBridgeSection {
    pub executable: Option<String>,
    pub heartbeat_secs: Option<u32>,
    pub web_dir: Option<PathBuf>,
    pub entry_page: Option<String>,
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            executable: DEFAULT_BRIDGE_EXECUTABLE.to_string(),
            heartbeat_secs: DEFAULT_HEARTBEAT_SECS,
            web_dir: PathBuf::from(DEFAULT_WEB_DIR),
            entry_page: DEFAULT_ENTRY_PAGE.to_string(),
        }
    }
}

pub fn parse_bridge_section(
    raw: Option<RawBridgeSection>,
    path: &Path,
) -> Result<BridgeSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let defaults = BridgeSection::default();

    let executable = raw.executable.unwrap_or(defaults.executable);
    if executable.trim().is_empty() {
        return Err(ConfigError::invalid(
            path,
            "bridge.executable",
            "Specify the bridge executable name or path",
        ));
    }

    let heartbeat_secs = raw.heartbeat_secs.unwrap_or(defaults.heartbeat_secs);
    if !(1..=MAX_HEARTBEAT_SECS).contains(&heartbeat_secs) {
        return Err(ConfigError::invalid(
            path,
            "bridge.heartbeat_secs",
            format!("Use a value in the range 1-{MAX_HEARTBEAT_SECS}"),
        ));
    }

    let web_dir = raw.web_dir.unwrap_or(defaults.web_dir);
    if web_dir.as_os_str().is_empty() {
        return Err(ConfigError::invalid(
            path,
            "bridge.web_dir",
            "Specify the web client directory",
        ));
    }

    let entry_page = raw.entry_page.unwrap_or(defaults.entry_page);
    if !entry_page.starts_with('/') {
        return Err(ConfigError::invalid(
            path,
            "bridge.entry_page",
            "The entry page must start with `/`",
        ));
    }

    Ok(BridgeSection {
        executable,
        heartbeat_secs,
        web_dir,
        entry_page,
    })
}
