//! Launch configuration handed to the proxy host.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Token in `command` that the host replaces with the port it allocated.
pub const PORT_PLACEHOLDER: &str = "{port}";

/// Icon metadata shown by the host launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LauncherEntry {
    pub icon_path: String,
}

/// How the host should run and expose the remote desktop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LaunchConfig {
    /// Argument vector for the bridge process, containing `{port}` once.
    pub command: Vec<String>,
    /// Seconds to wait for the service to become ready.
    pub timeout: u64,
    /// URL path rewrites applied by the host.
    pub mappath: BTreeMap<String, String>,
    pub new_browser_window: bool,
    pub launcher_entry: LauncherEntry,
}

impl LaunchConfig {
    /// Argument vector with the port placeholder substituted.
    pub fn command_for_port(&self, port: u16) -> Vec<String> {
        let port = port.to_string();
        self.command
            .iter()
            .map(|arg| {
                if arg == PORT_PLACEHOLDER {
                    port.clone()
                } else {
                    arg.clone()
                }
            })
            .collect()
    }
}
