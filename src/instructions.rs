//! Remediation instructions for deprecated options.
//!
//! The table is an explicit value handed to the checker, so tests and callers
//! can supply their own. A missing entry is not an error; it renders as empty
//! text.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const BUILTIN: &[(&str, &str)] = &[
    ("archives.builds", "replace `builds` with `ids`"),
    (
        "archives.format",
        "replace `format` with `formats` and make its value an array",
    ),
    (
        "archives.format_overrides.format",
        "replace `format` with `formats` and make its value an array",
    ),
    ("builds.gobinary", "rename `gobinary` to `tool`"),
    (
        "homebrew_casks.manpage",
        "replace `manpage` with `manpages`, and make its value an array",
    ),
    (
        "homebrew_casks.binary",
        "replace `binary` with `binaries`, and make its value an array",
    ),
    (
        "homebrew_casks.conflicts.formula",
        "remove the `formula: <name>` from the `conflicts` list",
    ),
    (
        "kos.repository",
        "replace `repository` with `repositories`, and make its value an array",
    ),
    (
        "kos.sbom",
        "the value of `sbom` can only be `spdx` or `none`, set it to `spdx` if there's any other value there",
    ),
    ("nfpms.builds", "rename `builds` to `ids`"),
    (
        "nightly.name_template",
        "rename `name_template` to `version_template`",
    ),
    ("snapcrafts.builds", "rename `builds` to `ids`"),
    ("snaps.builds", "rename `builds` to `ids`"),
    (
        "snapshot.name_template",
        "rename `name_template` to `version_template`",
    ),
];

/// Mapping from deprecation path to human-readable remediation text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instructions {
    entries: BTreeMap<String, String>,
}

impl Instructions {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The instructions shipped for GoReleaser configurations.
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .map(|(path, text)| (path.to_string(), text.to_string()))
            .collect()
    }

    /// Parse a table from a YAML mapping of path to text.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a table from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Serialize the table back to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(path.into(), text.into());
    }

    /// Add every entry of `other`, replacing existing ones.
    pub fn merge(&mut self, other: Instructions) {
        self.entries.extend(other.entries);
    }

    /// Instructions for a path, or an empty string if there are none.
    pub fn lookup(&self, path: &str) -> &str {
        self.entries.get(path).map(String::as_str).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Instructions {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
