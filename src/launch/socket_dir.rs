//! Private per-launch directory that holds the VNC Unix socket.

use std::{
    env, io,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::lib::{errors::LaunchError, fs::restrict_to_owner};

/// File name of the Unix socket inside the directory.
pub const SOCKET_FILE_NAME: &str = "vnc-socket";

/// Owned temporary directory; removed on drop unless [`SocketDir::keep`] is called.
#[derive(Debug)]
pub struct SocketDir {
    dir: TempDir,
    socket_path: PathBuf,
}

impl SocketDir {
    /// Create a fresh directory named `<prefix>XXXXXX` under `root` (or the system temp dir).
    pub fn create(prefix: &str, root: Option<&Path>) -> Result<Self, LaunchError> {
        let root = root.map(Path::to_path_buf).unwrap_or_else(env::temp_dir);
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(&root)
            .map_err(|source| LaunchError::SocketDir {
                root: root.clone(),
                source,
            })?;
        restrict_to_owner(dir.path())
            .map_err(|source| LaunchError::SocketDir { root, source })?;

        let socket_path = dir.path().join(SOCKET_FILE_NAME);
        Ok(Self { dir, socket_path })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Hand the directory over to the caller; it is no longer removed automatically.
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }

    /// Remove the directory and everything in it, reporting failures.
    pub fn close(self) -> Result<(), io::Error> {
        self.dir.close()
    }
}
