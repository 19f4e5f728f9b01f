//! Schema definition set: table manifests discovered under the schema directory
//!
//! A manifest is any `.yml`/`.yaml` file declaring `kind: tables`:
//!
//! ```yaml
//! kind: tables
//! tables:
//!   - user
//!   - session
//!   - user_activity_logs
//! ```
//!
//! Column definitions live with the ORM and are not modelled here; the reset
//! tool only needs to know which tables exist.

use crate::error::{CoreError, CoreResult};
use crate::table_name::TableName;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Value of the `kind` field that marks a table manifest
pub const MANIFEST_KIND: &str = "tables";

/// A single table manifest file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableManifest {
    #[allow(dead_code)]
    kind: String,

    #[serde(default)]
    #[allow(dead_code)]
    description: Option<String>,

    #[serde(default)]
    tables: Vec<String>,
}

/// Ordered, de-duplicated set of tables known to the schema definition.
///
/// Order is deterministic: manifests sorted by path, tables in declaration
/// order, first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSet {
    tables: Vec<TableName>,
    manifests: Vec<PathBuf>,
}

impl TableSet {
    /// Discover every manifest under `dir` (recursively) and collect tables.
    pub fn load(dir: &Path) -> CoreResult<Self> {
        if !dir.is_dir() {
            return Err(CoreError::SchemaDirNotFound {
                path: dir.display().to_string(),
            });
        }

        let mut files = Vec::new();
        collect_yaml_files(dir, &mut files)?;
        files.sort();

        let mut set = Self::default();
        let mut seen: HashSet<TableName> = HashSet::new();
        for path in files {
            let Some(manifest) = read_manifest(&path)? else {
                continue;
            };
            for raw in manifest.tables {
                let name = TableName::parse(raw.clone()).map_err(|reason| {
                    CoreError::InvalidTableName {
                        name: raw,
                        path: path.display().to_string(),
                        reason: reason.to_string(),
                    }
                })?;
                if seen.insert(name.clone()) {
                    set.tables.push(name);
                } else {
                    log::warn!(
                        "Table '{}' declared more than once (again in {})",
                        name,
                        path.display()
                    );
                }
            }
            set.manifests.push(path);
        }

        log::debug!(
            "Loaded {} table(s) from {} manifest(s) under {}",
            set.tables.len(),
            set.manifests.len(),
            dir.display()
        );
        Ok(set)
    }

    /// Tables in drop order
    pub fn iter(&self) -> impl Iterator<Item = &TableName> {
        self.tables.iter()
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when no table is declared
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Manifest files that contributed, sorted
    pub fn manifests(&self) -> &[PathBuf] {
        &self.manifests
    }
}

fn collect_yaml_files(dir: &Path, files: &mut Vec<PathBuf>) -> CoreResult<()> {
    let io_err = |e: std::io::Error| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    };
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            collect_yaml_files(&path, files)?;
        } else if path.extension().is_some_and(|e| e == "yml" || e == "yaml") {
            files.push(path);
        }
    }
    Ok(())
}

/// Parse a manifest, returning `None` for YAML files of another kind.
fn read_manifest(path: &Path) -> CoreResult<Option<TableManifest>> {
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;
    let parse_err = |e: serde_yaml::Error| CoreError::ManifestParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let probe: serde_yaml::Value = serde_yaml::from_str(&content).map_err(parse_err)?;
    if probe.get("kind").and_then(|k| k.as_str()) != Some(MANIFEST_KIND) {
        log::debug!("Skipping {} (not kind: {})", path.display(), MANIFEST_KIND);
        return Ok(None);
    }

    serde_yaml::from_str(&content).map(Some).map_err(parse_err)
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
