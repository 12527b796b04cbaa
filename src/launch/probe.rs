//! VNC server resolution and variant detection.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::debug;

use crate::lib::{errors::LaunchError, fs::file_contains};

/// Capability class of a VNC server build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VncVariant {
    /// Can listen on a Unix domain socket (`-rfbunixpath`).
    SocketCapable,
    /// Listens on TCP only.
    PortOnly,
}

impl VncVariant {
    pub const fn as_str(&self) -> &'static str {
        match self {
            VncVariant::SocketCapable => "socket_capable",
            VncVariant::PortOnly => "port_only",
        }
    }

    pub const fn supports_unix_socket(&self) -> bool {
        matches!(self, VncVariant::SocketCapable)
    }
}

/// Abstraction for classifying a resolved VNC server executable.
pub trait VncProbe {
    fn probe(&self, executable: &Path) -> Result<VncVariant, LaunchError>;
}

/// Fingerprints the executable by searching its contents for a marker string.
///
/// TigerVNC and TurboVNC both ship `vncserver` as a Perl script; only the
/// TigerVNC one mentions its own name.
#[derive(Debug, Clone)]
pub struct MarkerProbe {
    marker: String,
}

impl MarkerProbe {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl VncProbe for MarkerProbe {
    fn probe(&self, executable: &Path) -> Result<VncVariant, LaunchError> {
        let found = file_contains(executable, self.marker.as_bytes()).map_err(|source| {
            LaunchError::VncServerUnreadable {
                path: executable.to_path_buf(),
                source,
            }
        })?;
        Ok(if found {
            VncVariant::SocketCapable
        } else {
            VncVariant::PortOnly
        })
    }
}

/// Finds the VNC server on the search path, falling back to a bundled copy.
#[derive(Debug, Clone)]
pub struct VncLocator {
    executable: String,
    search_path: Option<OsString>,
    fallback: PathBuf,
}

impl VncLocator {
    pub fn new(executable: impl Into<String>, fallback: PathBuf) -> Self {
        Self {
            executable: executable.into(),
            search_path: None,
            fallback,
        }
    }

    /// Search `paths` (a `PATH`-style list) instead of the process `PATH`.
    pub fn with_search_path(mut self, paths: Option<OsString>) -> Self {
        self.search_path = paths;
        self
    }

    pub fn resolve(&self) -> PathBuf {
        let found = match &self.search_path {
            Some(paths) => {
                let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
                which::which_in(&self.executable, Some(paths), cwd)
            }
            None => which::which(&self.executable),
        };

        match found {
            Ok(path) => {
                debug!(
                    target: "remote_desktop_proxy::launch",
                    path = %path.display(),
                    "Found VNC server on search path"
                );
                path
            }
            Err(err) => {
                debug!(
                    target: "remote_desktop_proxy::launch",
                    executable = %self.executable,
                    fallback = %self.fallback.display(),
                    reason = %err,
                    "VNC server not on search path; using bundled copy"
                );
                self.fallback.clone()
            }
        }
    }
}
