use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tempfile::TempDir;

use remote_desktop_proxy::{launch::LaunchEnvironment, proxy::config::ProxyConfig};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_remote-desktop-proxy");
pub const TIGERVNC_SCRIPT: &str =
    "#!/usr/bin/perl\n# vncserver - wrapper for TigerVNC Xvnc\nexit 0;\n";
pub const TURBOVNC_SCRIPT: &str =
    "#!/usr/bin/perl\n# vncserver - wrapper for TurboVNC Xvnc\nexit 0;\n";

/// Throwaway share directory, bin directory and socket root.
pub struct Workspace {
    pub temp: TempDir,
    pub share: PathBuf,
    pub bin: PathBuf,
    pub sockets: PathBuf,
    pub work: PathBuf,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        Self::with_share_name("share")
    }

    /// Workspace whose share directory is called `share_name`.
    pub fn with_share_name(share_name: &str) -> Result<Self> {
        let temp = tempfile::tempdir().context("failed to create temporary directory")?;
        let share = temp.path().join(share_name);
        let bin = temp.path().join("bin");
        let sockets = temp.path().join("sockets");
        let work = temp.path().join("work");
        for dir in [share.join("icons"), bin.clone(), sockets.clone(), work.clone()] {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        for program in ["bandage", "igv"] {
            write_executable(&share.join(program), "#!/bin/sh\nexec true\n")?;
            fs::write(share.join(format!("icons/{program}.svg")), "<svg/>")
                .context("failed to write icon")?;
        }
        Ok(Self {
            temp,
            share,
            bin,
            sockets,
            work,
        })
    }

    /// Install a fake `vncserver` on the workspace search path.
    pub fn install_vncserver(&self, contents: &str) -> Result<PathBuf> {
        let path = self.bin.join("vncserver");
        write_executable(&path, contents)?;
        Ok(path)
    }

    pub fn config(&self) -> ProxyConfig {
        let mut config = ProxyConfig::default();
        config.assets.share_dir = self.share.clone();
        config.launch.socket_root = Some(self.sockets.clone());
        config
    }

    pub fn environment(&self) -> LaunchEnvironment {
        LaunchEnvironment {
            search_path: Some(self.bin.clone().into_os_string()),
            working_dir: Some(self.work.clone()),
        }
    }

    /// Write a TOML config pointing at this workspace, followed by `extra`.
    pub fn write_config_file(&self, extra: &str) -> Result<PathBuf> {
        let path = self.temp.path().join("proxy.toml");
        let contents = format!(
            "[assets]\nshare_dir = {share:?}\n\n[launch]\nsocket_root = {sockets:?}\n\n{extra}",
            share = self.share.display().to_string(),
            sockets = self.sockets.display().to_string(),
        );
        fs::write(&path, contents).context("failed to write config")?;
        Ok(path)
    }

    pub fn socket_dirs(&self) -> Result<Vec<PathBuf>> {
        let mut dirs = fs::read_dir(&self.sockets)
            .context("failed to list socket root")?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()?;
        dirs.sort();
        Ok(dirs)
    }
}

pub fn write_executable(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("failed to chmod {}", path.display()))?;
    Ok(())
}

/// `PATH` for child processes with the workspace bin directory first.
pub fn search_path_with(bin: &Path) -> String {
    match std::env::var("PATH") {
        Ok(existing) if !existing.is_empty() => format!("{}:{existing}", bin.display()),
        _ => format!("{}:/usr/bin:/bin", bin.display()),
    }
}
