use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::lib::{errors::ConfigError, paths::is_nonempty_absolute};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_TIMEOUT_SECS: u64 = 3600;

/// Host-facing launch metadata and socket placement.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchSection {
    pub timeout_secs: u64,
    pub new_browser_window: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket_root: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawLaunchSection {
    pub timeout_secs: Option<u64>,
    pub new_browser_window: Option<bool>,
    pub socket_root: Option<PathBuf>,
}

impl Default for LaunchSection {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            new_browser_window: true,
            socket_root: None,
        }
    }
}

pub fn parse_launch_section(
    raw: Option<RawLaunchSection>,
    path: &Path,
) -> Result<LaunchSection, ConfigError> {
    let raw = raw.unwrap_or_default();

    let timeout_secs = raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if !(1..=MAX_TIMEOUT_SECS).contains(&timeout_secs) {
        return Err(ConfigError::invalid(
            path,
            "launch.timeout_secs",
            format!("Use a value in the range 1-{MAX_TIMEOUT_SECS}"),
        ));
    }

    if let Some(root) = &raw.socket_root {
        if !is_nonempty_absolute(root) {
            return Err(ConfigError::invalid(
                path,
                "launch.socket_root",
                "Specify an absolute directory",
            ));
        }
    }

    Ok(LaunchSection {
        timeout_secs,
        new_browser_window: raw.new_browser_window.unwrap_or(true),
        socket_root: raw.socket_root,
    })
}
