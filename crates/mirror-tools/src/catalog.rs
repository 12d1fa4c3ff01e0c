//! Catalog (plugin manifest) regeneration
//!
//! Scans the local agents and commands directories for markdown files and
//! rewrites the catalog JSON in place: the `agents` and `commands` arrays,
//! a regenerated description, and a minor version bump. Unknown catalog
//! fields are preserved untouched.

use std::path::Path;

use serde_json::Value;

use crate::{Error, Result};

/// Summary of one catalog regeneration.
#[derive(Debug, Clone)]
pub struct CatalogUpdate {
    pub version: String,
    pub agents: Vec<String>,
    pub commands: Vec<String>,
}

/// Sorted basenames (without extension) of the `*.md` files in a directory.
///
/// A missing directory yields an empty list.
pub fn markdown_basenames(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter_map(|name| name.strip_suffix(".md").map(str::to_string))
        .collect();
    names.sort();
    Ok(names)
}

/// Bump `x.y.z` to `x.(y+1).0`. Returns `None` for anything unparsable.
fn bump_minor(version: &str) -> Option<String> {
    let mut parts = version.split('.');
    let major: u64 = parts.next()?.parse().ok()?;
    let minor: u64 = parts.next()?.parse().ok()?;
    parts.next()?;
    Some(format!("{}.{}.0", major, minor + 1))
}

/// Regenerate the catalog file from the contents of the agents and
/// commands directories.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read, is not a JSON object,
/// or cannot be written back.
pub fn update_catalog(
    catalog_path: &Path,
    agents_dir: &Path,
    commands_dir: &Path,
) -> Result<CatalogUpdate> {
    let content =
        std::fs::read_to_string(catalog_path).map_err(|e| Error::io(catalog_path, e))?;
    let mut catalog: Value = serde_json::from_str(&content)?;
    if !catalog.is_object() {
        return Err(Error::MalformedCatalog {
            path: catalog_path.to_path_buf(),
        });
    }

    let agents = markdown_basenames(agents_dir)?;
    let commands = markdown_basenames(commands_dir)?;

    catalog["agents"] = Value::from(agents.clone());
    catalog["commands"] = Value::from(commands.clone());
    catalog["description"] = Value::from(format!(
        "Agent toolkit with {} specialized agents and {} workflow commands",
        agents.len(),
        commands.len()
    ));

    if let Some(section) = catalog.pointer_mut("/components/agents/description") {
        *section = Value::from(format!(
            "{} specialized agents for various development tasks",
            agents.len()
        ));
    }
    if let Some(section) = catalog.pointer_mut("/components/commands/description") {
        *section = Value::from(format!(
            "{} workflow automation commands",
            commands.len()
        ));
    }

    // Malformed versions are left alone rather than failing the update.
    let version = catalog
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let version = match bump_minor(&version) {
        Some(bumped) => {
            catalog["version"] = Value::from(bumped.clone());
            bumped
        }
        None => {
            tracing::warn!(%version, "catalog version is not x.y.z, leaving unchanged");
            version
        }
    };

    let json = format!("{}\n", serde_json::to_string_pretty(&catalog)?);
    mirror_fs::io::write_text(catalog_path, &json)?;

    Ok(CatalogUpdate {
        version,
        agents,
        commands,
    })
}
