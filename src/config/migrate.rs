//! Add missing config fields without touching the user's formatting.

use anyhow::{Context, Result};
use toml_edit::{DocumentMut, Item, Table};

use super::Config;

/// Outcome of [`migrate_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateResult {
    /// Updated file content
    pub content: String,
    /// Added keys as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that did not exist at all
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty()
    }
}

/// Merge the default config into `content`, keeping existing values,
/// comments and ordering.
pub fn migrate_config(content: &str) -> Result<MigrateResult> {
    let mut doc: DocumentMut = content.parse().context("Config is not valid TOML")?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?
        .parse()
        .context("Default config is not valid TOML")?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, default_item) in defaults.iter() {
        let Some(default_table) = default_item.as_table() else {
            continue;
        };

        match doc.get_mut(section) {
            None => {
                // Fresh table so it is written after the user's sections
                let mut table = Table::new();
                for (key, value) in default_table.iter() {
                    table.insert(key, value.clone());
                }
                doc.insert(section, Item::Table(table));
                sections_added.push(section.to_string());
                added_fields.extend(default_table.iter().map(|(key, _)| format!("{section}.{key}")));
            }
            Some(Item::Table(table)) => {
                for (key, value) in default_table.iter() {
                    if !table.contains_key(key) {
                        table.insert(key, value.clone());
                        added_fields.push(format!("{section}.{key}"));
                    }
                }
            }
            Some(_) => {
                tracing::warn!(section, "config entry is not a table, leaving it alone");
            }
        }
    }

    tracing::debug!(added = added_fields.len(), "config migration computed");
    Ok(MigrateResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
