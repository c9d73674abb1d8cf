//! Perk -> craft-mod mapping
//!
//! The table is built from a scraped perk database shipped as JSON:
//!
//! ```json
//! { "perks": [ { "name": "Refreshing", "craftModItem": "Sage's Stone" } ] }
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::SourceError;
use crate::normalize::normalize;

#[derive(Debug, Deserialize)]
struct PerkDatabase {
    perks: Vec<PerkEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PerkEntry {
    name: String,
    #[serde(default)]
    craft_mod_item: Option<String>,
}

/// Normalized perk name -> craft-mod item display name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CraftModTable {
    mods: HashMap<String, String>,
}

impl CraftModTable {
    /// Parse the perk database JSON. Perks without a craft mod are left out.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let db: PerkDatabase = serde_json::from_str(json)?;
        let mods = db
            .perks
            .into_iter()
            .filter_map(|p| {
                let craft_mod = p.craft_mod_item?.trim().to_string();
                if craft_mod.is_empty() {
                    return None;
                }
                Some((normalize(&p.name), craft_mod))
            })
            .collect();
        Ok(CraftModTable { mods })
    }

    /// Load the perk database from disk; an unreadable or empty table is an error
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let json = std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
        let table = Self::from_json(&json)?;
        if table.is_empty() {
            return Err(SourceError::Empty(path.display().to_string()));
        }
        tracing::debug!("Loaded {} craft mods from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn get(&self, perk_name: &str) -> Option<&str> {
        self.mods.get(&normalize(perk_name)).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for CraftModTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        CraftModTable {
            mods: iter
                .into_iter()
                .map(|(k, v)| (normalize(k.as_ref()), v.into()))
                .collect(),
        }
    }
}

/// Craft-mod item needed to socket `perk_name`, if any
pub fn craft_mod_for<'a>(perk_name: &str, table: &'a CraftModTable) -> Option<&'a str> {
    table.get(perk_name)
}
