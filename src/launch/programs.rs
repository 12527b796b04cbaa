//! Program table mapping identifiers to their startup script and icon assets.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::lib::{errors::LaunchError, paths::resolve_against};

/// Programs shipped with startup scripts and icons in the share directory.
pub const BUILTIN_PROGRAMS: &[&str] = &["bandage", "igv"];

/// Asset locations for one program, relative to the share directory unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramEntry {
    pub script: PathBuf,
    pub icon: PathBuf,
}

impl ProgramEntry {
    /// Layout used by bundled programs: `<id>` and `icons/<id>.svg`.
    pub fn conventional(id: &str) -> Self {
        Self {
            script: PathBuf::from(id),
            icon: PathBuf::from("icons").join(format!("{id}.svg")),
        }
    }
}

/// Absolute asset paths for a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramAssets {
    pub script: PathBuf,
    pub icon: PathBuf,
}

/// Lookup table keyed by program identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProgramTable {
    entries: BTreeMap<String, ProgramEntry>,
}

impl Default for ProgramTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProgramTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Table holding the bundled programs.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for id in BUILTIN_PROGRAMS {
            table.insert(id, ProgramEntry::conventional(id));
        }
        table
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, id: &str, entry: ProgramEntry) {
        self.entries.insert(id.to_string(), entry);
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&ProgramEntry, LaunchError> {
        self.entries
            .get(id)
            .ok_or_else(|| LaunchError::UnsupportedProgram {
                name: id.to_string(),
                known: self.ids().collect::<Vec<_>>().join(", "),
            })
    }

    /// Resolve the entry for `id` to absolute paths under `share_dir`.
    pub fn resolve(&self, id: &str, share_dir: &Path) -> Result<ProgramAssets, LaunchError> {
        let entry = self.get(id)?;
        Ok(ProgramAssets {
            script: resolve_against(share_dir, &entry.script),
            icon: resolve_against(share_dir, &entry.icon),
        })
    }
}
