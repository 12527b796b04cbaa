//! Load and validate launcher configuration.
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{launch::programs::ProgramTable, lib::errors::ConfigError};

pub mod assets;
pub mod bridge;
pub mod launch;
pub mod programs;
pub mod telemetry;
pub mod vnc;

pub use assets::{default_share_dir, parse_assets_section, AssetsSection, RawAssetsSection};
pub use bridge::{
    parse_bridge_section, BridgeSection, RawBridgeSection, DEFAULT_BRIDGE_EXECUTABLE,
    DEFAULT_ENTRY_PAGE, DEFAULT_HEARTBEAT_SECS, DEFAULT_WEB_DIR,
};
pub use launch::{parse_launch_section, LaunchSection, RawLaunchSection, DEFAULT_TIMEOUT_SECS};
pub use programs::{parse_programs_section, RawProgramEntry};
pub use vnc::{
    parse_vnc_section, RawVncSection, VncSection, DEFAULT_SOCKET_CAPABLE_MARKER,
    DEFAULT_VNC_EXECUTABLE,
};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_KEY: &str = "REMOTE_DESKTOP_PROXY_CONFIG";

/// Where the configuration file path came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` on the command line.
    Cli,
    /// The [`CONFIG_ENV_KEY`] environment variable.
    Env,
    /// No file named; built-in defaults.
    #[default]
    Defaults,
}

impl ConfigSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigSource::Cli => "cli",
            ConfigSource::Env => "env",
            ConfigSource::Defaults => "defaults",
        }
    }
}

/// Top-level configuration container.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProxyConfig {
    pub assets: AssetsSection,
    pub vnc: VncSection,
    pub bridge: BridgeSection,
    pub launch: LaunchSection,
    pub programs: ProgramTable,
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
    #[serde(skip)]
    pub source: ConfigSource,
}

#[derive(Debug, Deserialize)]
struct RawProxyConfig {
    assets: Option<RawAssetsSection>,
    vnc: Option<RawVncSection>,
    bridge: Option<RawBridgeSection>,
    launch: Option<RawLaunchSection>,
    programs: Option<BTreeMap<String, RawProgramEntry>>,
}

impl ProxyConfig {
    /// Load from `path` when given; otherwise fall back to built-in defaults.
    pub fn load(path: Option<PathBuf>, source: ConfigSource) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path, source),
            None => {
                telemetry::log_defaults(source);
                Ok(Self {
                    source,
                    ..Self::default()
                })
            }
        }
    }

    /// Load configuration from a specific path named by `source`.
    pub fn load_from_path(path: PathBuf, source: ConfigSource) -> Result<Self, ConfigError> {
        telemetry::log_load_started(&path, source);

        let builder = config::Config::builder()
            .add_source(config::File::from(path.clone()).format(config::FileFormat::Toml));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "remote_desktop_proxy::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawProxyConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "remote_desktop_proxy::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone(), source).map_err(|err| {
            error!(
                target: "remote_desktop_proxy::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(
        raw: RawProxyConfig,
        path: PathBuf,
        source: ConfigSource,
    ) -> Result<Self, ConfigError> {
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let assets = parse_assets_section(raw.assets, &base_dir, &path)?;
        let vnc = parse_vnc_section(raw.vnc, &path)?;
        let bridge = parse_bridge_section(raw.bridge, &path)?;
        let launch = parse_launch_section(raw.launch, &path)?;
        let programs = parse_programs_section(raw.programs, &path)?;

        Ok(Self {
            assets,
            vnc,
            bridge,
            launch,
            programs,
            source_path: Some(path),
            source,
        })
    }

    /// Web client directory resolved against the share directory.
    pub fn web_dir(&self) -> PathBuf {
        crate::lib::paths::resolve_against(&self.assets.share_dir, &self.bridge.web_dir)
    }

    /// Effective configuration rendered as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
