use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: String,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }

    /// Build an `InvalidField` error for `field` in the file at `path`.
    pub fn invalid(
        path: &std::path::Path,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            path: path.to_path_buf(),
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Failures while building a launch plan.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Program `{name}` is not supported (known programs: {known})")]
    UnsupportedProgram { name: String, known: String },
    #[error("Startup script for `{program}` not found at {path}")]
    StartupScriptMissing { program: String, path: PathBuf },
    #[error("Failed to create socket directory under {root}: {source}")]
    SocketDir {
        root: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read VNC server executable {path}: {source}")]
    VncServerUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to obtain current directory: {source}")]
    CurrentDir {
        #[source]
        source: io::Error,
    },
    #[error("Path {path} cannot be embedded in a shell command")]
    UnquotablePath { path: PathBuf },
    #[error("Argument `{argument}` cannot be embedded in a shell command")]
    UnquotableArgument { argument: String },
}

/// Failures while supervising a launched bridge process.
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error("Launch command is empty")]
    EmptyCommand,
    #[error("Failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while waiting for `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to install signal handler: {source}")]
    Signal {
        #[source]
        source: io::Error,
    },
    #[error("Failed to remove socket directory {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
