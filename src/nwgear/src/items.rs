//! Extracted gear records

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// One enchantment effect on an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perk {
    pub name: String,
    pub is_gem_slot: bool,
    #[serde(default)]
    pub craft_mod_item: Option<String>,
    #[serde(default)]
    pub is_last_perk: bool,
}

impl Perk {
    pub fn new(name: &str) -> Self {
        Perk {
            name: name.to_string(),
            is_gem_slot: crate::reference::is_gem_slot(name),
            craft_mod_item: None,
            is_last_perk: false,
        }
    }
}

/// One piece of equipped gear
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    pub perks: Vec<Perk>,
    pub gear_type: Option<String>,
    pub is_artifact: bool,
    #[serde(default)]
    pub crafting_materials: Option<Vec<String>>,
}

impl Item {
    /// Build an item and derive its last-perk marks
    pub fn new(name: &str, gear_type: Option<String>, is_artifact: bool, perks: Vec<Perk>) -> Self {
        let mut item = Item {
            name: name.to_string(),
            perks,
            gear_type,
            is_artifact,
            crafting_materials: None,
        };
        item.mark_last_perk();
        item
    }

    pub fn is_named(&self) -> bool {
        self.gear_type
            .as_deref()
            .is_some_and(|t| normalize(t) == "named")
    }

    /// Artifact and named items only pay for their last perk
    pub fn is_special(&self) -> bool {
        self.is_artifact || self.is_named()
    }

    pub fn last_perk(&self) -> Option<&Perk> {
        self.perks.iter().find(|p| p.is_last_perk)
    }

    /// Re-classify the item (a user override from the display layer) and
    /// re-derive the last-perk marks. Nothing is re-extracted.
    pub fn override_gear_type(&mut self, gear_type: Option<String>) {
        self.gear_type = gear_type;
        self.mark_last_perk();
    }

    /// Mark only the final perk of a special item; clear marks otherwise
    fn mark_last_perk(&mut self) {
        let special = self.is_special();
        let last = self.perks.len().checked_sub(1);
        for (i, perk) in self.perks.iter_mut().enumerate() {
            perk.is_last_perk = special && Some(i) == last;
        }
    }
}
