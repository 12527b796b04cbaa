use std::{
    env,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::lib::{errors::ConfigError, paths::resolve_against};

/// Share directory name used for installed layouts (`<prefix>/share/<name>`).
pub const INSTALLED_SHARE_NAME: &str = "remote-desktop-proxy";

/// Location of bundled startup scripts, icons, web client and fallback VNC server.
#[derive(Debug, Clone, Serialize)]
pub struct AssetsSection {
    pub share_dir: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawAssetsSection {
    pub share_dir: Option<PathBuf>,
}

impl AssetsSection {
    /// Bundled TigerVNC used when no `vncserver` is on the search path.
    pub fn bundled_vncserver(&self) -> PathBuf {
        self.share_dir.join("tigervnc/bin/vncserver")
    }
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            share_dir: default_share_dir(),
        }
    }
}

pub fn parse_assets_section(
    raw: Option<RawAssetsSection>,
    base_dir: &Path,
    path: &Path,
) -> Result<AssetsSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let Some(share_dir) = raw.share_dir else {
        return Ok(AssetsSection::default());
    };
    if share_dir.as_os_str().is_empty() {
        return Err(ConfigError::invalid(
            path,
            "assets.share_dir",
            "Specify a non-empty directory",
        ));
    }
    Ok(AssetsSection {
        share_dir: resolve_against(base_dir, &share_dir),
    })
}

/// `<exe>/../share/remote-desktop-proxy` when installed, else the crate's `share/`.
pub fn default_share_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| {
            exe.parent()
                .and_then(Path::parent)
                .map(|prefix| prefix.join("share").join(INSTALLED_SHARE_NAME))
        })
        .filter(|candidate| candidate.is_dir())
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("share"))
}
