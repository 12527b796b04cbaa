use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::lib::errors::ConfigError;

pub const DEFAULT_VNC_EXECUTABLE: &str = "vncserver";
pub const DEFAULT_SOCKET_CAPABLE_MARKER: &str = "TigerVNC";

/// VNC server lookup and fingerprint settings.
#[derive(Debug, Clone, Serialize)]
pub struct VncSection {
    pub executable: String,
    pub socket_capable_marker: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawVncSection {
    pub executable: Option<String>,
    pub socket_capable_marker: Option<String>,
}

impl Default for VncSection {
    fn default() -> Self {
        Self {
            executable: DEFAULT_VNC_EXECUTABLE.to_string(),
            socket_capable_marker: DEFAULT_SOCKET_CAPABLE_MARKER.to_string(),
        }
    }
}

pub fn parse_vnc_section(
    raw: Option<RawVncSection>,
    path: &Path,
) -> Result<VncSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let executable = raw
        .executable
        .unwrap_or_else(|| DEFAULT_VNC_EXECUTABLE.to_string());
    if executable.trim().is_empty() {
        return Err(ConfigError::invalid(
            path,
            "vnc.executable",
            "Specify the VNC server executable name or path",
        ));
    }

    let socket_capable_marker = raw
        .socket_capable_marker
        .unwrap_or_else(|| DEFAULT_SOCKET_CAPABLE_MARKER.to_string());
    if socket_capable_marker.is_empty() {
        return Err(ConfigError::invalid(
            path,
            "vnc.socket_capable_marker",
            "An empty marker would classify every server as socket capable",
        ));
    }

    Ok(VncSection {
        executable,
        socket_capable_marker,
    })
}
