//! Filesystem helpers for socket directories and executable inspection.

use std::{
    fs,
    io::{self, Read},
    os::unix::fs::PermissionsExt,
    path::Path,
};

/// Permission bits for directories that only the owning user may enter.
pub const OWNER_ONLY_DIR_MODE: u32 = 0o700;

/// Restrict `dir` to read, write and search for the owner only.
pub fn restrict_to_owner(dir: &Path) -> Result<(), io::Error> {
    fs::set_permissions(dir, fs::Permissions::from_mode(OWNER_ONLY_DIR_MODE))
}

/// Return the permission bits of `path` (without file type bits).
pub fn mode_bits(path: &Path) -> Result<u32, io::Error> {
    Ok(fs::metadata(path)?.permissions().mode() & 0o7777)
}

/// Report whether the file at `path` contains `needle` anywhere in its bytes.
///
/// Binary content is searched as-is, so a non-UTF-8 executable never fails
/// the check on decoding.
pub fn file_contains(path: &Path, needle: &[u8]) -> Result<bool, io::Error> {
    let mut contents = Vec::new();
    fs::File::open(path)?.read_to_end(&mut contents)?;
    if needle.is_empty() {
        return Ok(true);
    }
    Ok(contents
        .windows(needle.len())
        .any(|window| window == needle))
}
