use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    launch::programs::{ProgramEntry, ProgramTable},
    lib::errors::ConfigError,
};

#[derive(Debug, Deserialize, Default)]
pub struct RawProgramEntry {
    pub script: Option<PathBuf>,
    pub icon: Option<PathBuf>,
}

/// Merge configured programs over the bundled table.
pub fn parse_programs_section(
    raw: Option<BTreeMap<String, RawProgramEntry>>,
    path: &Path,
) -> Result<ProgramTable, ConfigError> {
    let mut table = ProgramTable::builtin();
    for (id, entry) in raw.unwrap_or_default() {
        validate_program_id(&id, path)?;
        let conventional = ProgramEntry::conventional(&id);
        table.insert(
            &id,
            ProgramEntry {
                script: entry.script.unwrap_or(conventional.script),
                icon: entry.icon.unwrap_or(conventional.icon),
            },
        );
    }
    Ok(table)
}

fn validate_program_id(id: &str, path: &Path) -> Result<(), ConfigError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if valid {
        return Ok(());
    }

    Err(ConfigError::invalid(
        path,
        format!("programs.{id}"),
        "Program identifiers may only contain a-z, 0-9, `-` and `_`",
    ))
}
