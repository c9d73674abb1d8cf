//! Recipe store
//!
//! Recipes come from a flat text file:
//!
//! ```text
//! Recipe: Gorgonite Hat
//! 80x Prismatic Ingot
//! 5x Gorgon Essence
//!
//! Recipe: Gorgon's Mask
//! ...
//! ```
//!
//! A `Recipe: ` line opens a block keyed by the normalized item name; every
//! following non-blank line is one material requirement, kept verbatim.

use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::error::SourceError;
use crate::normalize::normalize;

/// Line prefix that opens a recipe block
pub const RECIPE_PREFIX: &str = "Recipe: ";

/// Normalized item name -> ordered material requirement lines.
///
/// Keys keep file order, which the resolver's slot fallback relies on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeStore {
    recipes: IndexMap<String, Vec<String>>,
    fingerprint: String,
}

impl RecipeStore {
    /// Load a recipe file from disk.
    ///
    /// Fails when the file cannot be read or contains no recipes, so that
    /// "no recipe for this item" is never reported because of a broken file.
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
        let store = load_recipes(&text);
        if store.is_empty() {
            return Err(SourceError::Empty(path.display().to_string()));
        }
        tracing::debug!("Loaded {} recipes from {}", store.len(), path.display());
        Ok(store)
    }

    /// Exact lookup by an already-normalized name
    pub fn get(&self, normalized_name: &str) -> Option<&[String]> {
        self.recipes.get(normalized_name).map(|v| v.as_slice())
    }

    /// Exact lookup returning the stored key alongside its materials
    pub fn get_key_value(&self, normalized_name: &str) -> Option<(&str, &[String])> {
        self.recipes
            .get_key_value(normalized_name)
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn contains(&self, normalized_name: &str) -> bool {
        self.recipes.contains_key(normalized_name)
    }

    /// Recipe keys in file order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.recipes.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.recipes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// SHA-256 over the store's contents, hex encoded
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl FromIterator<(String, Vec<String>)> for RecipeStore {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let recipes: IndexMap<String, Vec<String>> = iter
            .into_iter()
            .map(|(name, materials)| (normalize(&name), materials))
            .collect();
        let fingerprint = fingerprint_of(&recipes);
        RecipeStore {
            recipes,
            fingerprint,
        }
    }
}

fn fingerprint_of(recipes: &IndexMap<String, Vec<String>>) -> String {
    let mut hasher = Sha256::new();
    for (name, materials) in recipes {
        hasher.update(name.as_bytes());
        hasher.update([0u8]);
        for material in materials {
            hasher.update(material.as_bytes());
            hasher.update([0u8]);
        }
        hasher.update([1u8]);
    }
    hex::encode(hasher.finalize())
}

/// Parse recipe source text into a store.
///
/// Material lines that appear before the first `Recipe: ` header are dropped.
/// A repeated header replaces the earlier block.
pub fn load_recipes(source: &str) -> RecipeStore {
    let mut recipes: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut current: Option<String> = None;

    for line in source.lines() {
        if let Some(name) = line.strip_prefix(RECIPE_PREFIX) {
            let key = normalize(name);
            recipes.insert(key.clone(), Vec::new());
            current = Some(key);
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        match &current {
            Some(key) => {
                if let Some(materials) = recipes.get_mut(key) {
                    materials.push(line.to_string());
                }
            }
            None => tracing::debug!("Dropping material line outside a recipe: {:?}", line),
        }
    }

    let fingerprint = fingerprint_of(&recipes);
    RecipeStore {
        recipes,
        fingerprint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Recipe: Gorgonite Hat\n80x Prismatic Ingot\n5x Gorgon Essence\n\nRecipe: Gorgon's Mask\n40x Prismatic Leather\n";

    #[test]
    fn test_load_recipes_basic() {
        let store = load_recipes(SAMPLE);
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get("gorgonite hat"),
            Some(&["80x Prismatic Ingot".to_string(), "5x Gorgon Essence".to_string()][..])
        );
        assert_eq!(
            store.get("gorgon's mask"),
            Some(&["40x Prismatic Leather".to_string()][..])
        );
    }

    #[test]
    fn test_keys_keep_file_order() {
        let store = load_recipes(SAMPLE);
        let keys: Vec<&str> = store.keys().collect();
        assert_eq!(keys, vec!["gorgonite hat", "gorgon's mask"]);
    }

    #[test]
    fn test_materials_are_verbatim() {
        let store = load_recipes("Recipe:   Spaced Name  \n  10x Odd Spacing  \n");
        assert_eq!(
            store.get("spaced name"),
            Some(&["  10x Odd Spacing  ".to_string()][..])
        );
    }

    #[test]
    fn test_orphan_lines_dropped() {
        let store = load_recipes("5x Orphan\n\nRecipe: Boots\n1x Leather\n");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("boots"), Some(&["1x Leather".to_string()][..]));
    }

    #[test]
    fn test_header_needs_exact_prefix() {
        // Lowercase "recipe:" is just a material line
        let store = load_recipes("Recipe: Hat\nrecipe: not a header\n");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("hat").map(|m| m.len()), Some(1));
    }

    #[test]
    fn test_repeated_header_replaces() {
        let store = load_recipes("Recipe: Hat\n1x Old\nRecipe: hat\n2x New\n");
        assert_eq!(store.get("hat"), Some(&["2x New".to_string()][..]));
    }

    #[test]
    fn test_crlf_lines() {
        let store = load_recipes("Recipe: Hat\r\n3x Cloth\r\n\r\n");
        assert_eq!(store.get("hat"), Some(&["3x Cloth".to_string()][..]));
    }

    #[test]
    fn test_empty_recipe_kept() {
        let store = load_recipes("Recipe: Nothing\n");
        assert_eq!(store.get("nothing"), Some(&[][..]));
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = load_recipes(SAMPLE);
        let b = load_recipes(SAMPLE);
        let c = load_recipes("Recipe: Gorgonite Hat\n81x Prismatic Ingot\n");
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn test_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("recipes.txt");
        std::fs::write(&path, SAMPLE).unwrap();

        let store = RecipeStore::from_file(&path).unwrap();
        assert_eq!(store, load_recipes(SAMPLE));
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.txt");
        assert!(matches!(
            RecipeStore::from_file(&path),
            Err(SourceError::Io { .. })
        ));
    }

    #[test]
    fn test_from_file_without_recipes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("empty.txt");
        std::fs::write(&path, "just some text\n").unwrap();
        assert!(matches!(
            RecipeStore::from_file(&path),
            Err(SourceError::Empty(_))
        ));
    }

    #[test]
    fn test_from_iterator_normalizes_keys() {
        let store: RecipeStore = vec![(" Gorgon's Hat".to_string(), vec!["1x A".to_string()])]
            .into_iter()
            .collect();
        assert!(store.contains("gorgon's hat"));
    }
}
