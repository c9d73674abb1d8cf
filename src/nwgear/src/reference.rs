//! Reference data for gear builds
//!
//! Hardcoded tables shipped with the library: gem-slot placeholders, artifact
//! names, recipe-name synonyms, equipment slot keywords, and the special
//! materials synthesized for artifact and named gear. Set members are stored
//! in normalized form.

use crate::normalize::normalize;

// ============================================================================
// Perks
// ============================================================================

/// Perk labels that stand for an empty or filled gem socket rather than a
/// named enchantment.
pub static GEM_SLOT_NAMES: phf::Set<&'static str> = phf::phf_set! {
    "gem slot",
    "empty gem slot",
    "empty socket",
    "gem socket",
    "socket",
};

/// Check a perk name against the gem-slot set
pub fn is_gem_slot(perk_name: &str) -> bool {
    GEM_SLOT_NAMES.contains(normalize(perk_name).as_str())
}

// ============================================================================
// Artifacts
// ============================================================================

/// Known artifact items by name
pub static ARTIFACT_NAMES: phf::Set<&'static str> = phf::phf_set! {
    "azoth staff",
    "blood of the sands",
    "boltcaster",
    "featherweight",
    "hailstorm",
    "kingslayer",
    "mask of deception",
    "mjolnir",
    "spear of nysa",
    "the abyss",
    "the butcher",
    "the tempest",
    "unbroken",
    "winter's bite",
};

/// Check an item name against the artifact list
pub fn is_artifact_name(item_name: &str) -> bool {
    ARTIFACT_NAMES.contains(normalize(item_name).as_str())
}

// ============================================================================
// Recipe matching
// ============================================================================

/// Text substitution tried by the resolver's synonym stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynonymRule {
    pub from: &'static str,
    pub to: &'static str,
}

/// Synonym rules in the order they are applied
pub const SYNONYM_RULES: &[SynonymRule] = &[
    SynonymRule {
        from: "sabatons",
        to: "boots",
    },
    SynonymRule {
        from: "void gauntlet",
        to: "ice gauntlet",
    },
    SynonymRule {
        from: "gorgonite",
        to: "gorgon's",
    },
    SynonymRule {
        from: "gorgon's",
        to: "gorgonite",
    },
    SynonymRule {
        from: "gloves",
        to: "gauntlets",
    },
    SynonymRule {
        from: "pants",
        to: "leggings",
    },
];

/// Equipment slot keywords used by the slot-based fallback
pub const SLOT_KEYWORDS: &[&str] = &[
    "mask", "shirt", "leggings", "hat", "gloves", "boots", "pants", "helm", "coat", "gauntlets",
    "shoes",
];

/// Names containing this marker are "gorgon-like" (covers "gorgonite" too)
pub const GORGON_MARKER: &str = "gorgon";

pub fn is_gorgon_like(name: &str) -> bool {
    name.contains(GORGON_MARKER)
}

// ============================================================================
// Special materials
// ============================================================================

pub const GOLDCURSED_COCONUT: &str = "Goldcursed Coconut";
pub const DARK_MATTER: &str = "Dark Matter";
pub const CHROMATIC_SEAL: &str = "Chromatic Seal";

/// Material required per artifact or named item, independent of its recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialMaterial {
    pub name: &'static str,
    pub per_artifact: u64,
    pub per_named: u64,
}

pub const SPECIAL_MATERIALS: &[SpecialMaterial] = &[
    SpecialMaterial {
        name: GOLDCURSED_COCONUT,
        per_artifact: 1,
        per_named: 1,
    },
    SpecialMaterial {
        name: DARK_MATTER,
        per_artifact: 600,
        per_named: 250,
    },
    SpecialMaterial {
        name: CHROMATIC_SEAL,
        per_artifact: 1,
        per_named: 3,
    },
];

impl SpecialMaterial {
    /// Quantity needed for a build with the given artifact and named counts
    pub fn quantity(&self, artifacts: u64, named: u64) -> u64 {
        artifacts
            .saturating_mul(self.per_artifact)
            .saturating_add(named.saturating_mul(self.per_named))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gem_slot_lookup() {
        assert!(is_gem_slot("Empty Gem Slot"));
        assert!(is_gem_slot(" gem slot "));
        assert!(!is_gem_slot("Refreshing"));
    }

    #[test]
    fn test_artifact_lookup() {
        assert!(is_artifact_name("Kingslayer"));
        assert!(is_artifact_name("  Spear of Nysa"));
        assert!(!is_artifact_name("Gorgonite Hat"));
    }

    #[test]
    fn test_sets_are_normalized() {
        for name in GEM_SLOT_NAMES.iter().chain(ARTIFACT_NAMES.iter()) {
            assert_eq!(normalize(name), *name);
        }
    }

    #[test]
    fn test_gorgon_like() {
        assert!(is_gorgon_like("gorgonite hat"));
        assert!(is_gorgon_like("gorgon's mask"));
        assert!(!is_gorgon_like("prismatic hat"));
    }

    #[test]
    fn test_special_material_quantities() {
        let by_name = |n: &str| SPECIAL_MATERIALS.iter().find(|m| m.name == n).unwrap();
        assert_eq!(by_name(DARK_MATTER).quantity(2, 1), 1450);
        assert_eq!(by_name(GOLDCURSED_COCONUT).quantity(2, 1), 3);
        assert_eq!(by_name(CHROMATIC_SEAL).quantity(2, 1), 5);
        assert_eq!(by_name(DARK_MATTER).quantity(u64::MAX, 1), u64::MAX);
    }
}
