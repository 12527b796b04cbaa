use std::path::Path;

use tracing::{debug, info};

use super::{ConfigSource, ProxyConfig, CONFIG_ENV_KEY};

pub fn log_defaults(source: ConfigSource) {
    debug!(
        target: "remote_desktop_proxy::config",
        env = CONFIG_ENV_KEY,
        source = source.as_str(),
        "No configuration file given; using built-in defaults"
    );
}

pub fn log_load_started(path: &Path, source: ConfigSource) {
    info!(
        target: "remote_desktop_proxy::config",
        path = %path.display(),
        source = source.as_str(),
        "Starting configuration load"
    );
}

pub fn log_loaded(config: &ProxyConfig) {
    info!(
        target: "remote_desktop_proxy::config",
        path = %config
            .source_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
        source = config.source.as_str(),
        share_dir = %config.assets.share_dir.display(),
        vnc_executable = %config.vnc.executable,
        bridge_executable = %config.bridge.executable,
        programs = config.programs.len(),
        timeout_secs = config.launch.timeout_secs,
        "Configuration file loaded successfully"
    );
}
