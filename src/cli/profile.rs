//! LaunchProfile and config path resolution.
use std::{env, path::PathBuf};

use anyhow::{Context, Result};

use crate::proxy::config::{ConfigSource, CONFIG_ENV_KEY};

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub config_path: Option<PathBuf>,
    pub config_source: ConfigSource,
}

/// Resolve config path in the order: CLI override → env var → built-in defaults.
pub fn resolve_config_path(
    override_path: Option<PathBuf>,
) -> Result<(Option<PathBuf>, ConfigSource)> {
    let env_path = env::var_os(CONFIG_ENV_KEY)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    let (path, source) = match (override_path, env_path) {
        (Some(path), _) => (path, ConfigSource::Cli),
        (None, Some(path)) => (path, ConfigSource::Env),
        (None, None) => return Ok((None, ConfigSource::Defaults)),
    };

    if path.is_absolute() {
        return Ok((Some(path), source));
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok((Some(cwd.join(path)), source))
}
