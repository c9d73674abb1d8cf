//! Recipe resolution
//!
//! Item names scraped from a build rarely match recipe keys exactly, so lookup
//! runs in three stages and stops at the first hit:
//!
//! 1. exact key match
//! 2. synonym rewrite, one rule at a time, checking the store after each
//! 3. slot fallback for gorgon-like names

use std::collections::HashMap;

use crate::recipes::RecipeStore;
use crate::reference::{is_gorgon_like, SLOT_KEYWORDS, SYNONYM_RULES};

/// Which stage produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Synonym,
    Slot,
}

/// A resolved recipe and how it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeMatch<'a> {
    pub key: &'a str,
    pub materials: &'a [String],
    pub kind: MatchKind,
}

/// Resolve a normalized item name to its material list
pub fn resolve<'a>(normalized_name: &str, store: &'a RecipeStore) -> Option<&'a [String]> {
    resolve_match(normalized_name, store).map(|m| m.materials)
}

/// Resolve a normalized item name, reporting the matched key and stage
pub fn resolve_match<'a>(normalized_name: &str, store: &'a RecipeStore) -> Option<RecipeMatch<'a>> {
    if let Some(found) = exact(normalized_name, store, MatchKind::Exact) {
        return Some(found);
    }

    if let Some(found) = by_synonym(normalized_name, store) {
        tracing::debug!("Recipe for {:?} found via synonym: {:?}", normalized_name, found.key);
        return Some(found);
    }

    if let Some(found) = by_slot(normalized_name, store) {
        tracing::debug!("Recipe for {:?} found via slot fallback: {:?}", normalized_name, found.key);
        return Some(found);
    }

    tracing::debug!("No recipe for {:?}", normalized_name);
    None
}

fn exact<'a>(name: &str, store: &'a RecipeStore, kind: MatchKind) -> Option<RecipeMatch<'a>> {
    store
        .get_key_value(name)
        .map(|(key, materials)| RecipeMatch {
            key,
            materials,
            kind,
        })
}

/// Rules apply cumulatively in declared order, replacing the first
/// occurrence only; the store is checked after each rule that changed the
/// name. No other combinations are searched.
fn by_synonym<'a>(name: &str, store: &'a RecipeStore) -> Option<RecipeMatch<'a>> {
    let mut current = name.to_string();
    for rule in SYNONYM_RULES {
        if !current.contains(rule.from) {
            continue;
        }
        current = current.replacen(rule.from, rule.to, 1);
        if let Some(found) = exact(&current, store, MatchKind::Synonym) {
            return Some(found);
        }
    }
    None
}

fn by_slot<'a>(name: &str, store: &'a RecipeStore) -> Option<RecipeMatch<'a>> {
    if !is_gorgon_like(name) {
        return None;
    }

    for keyword in SLOT_KEYWORDS.iter().copied().filter(|k| name.contains(k)) {
        let hit = store.iter().find(|&(key, _)| {
            is_gorgon_like(key) && (key.contains(keyword) || keyword.contains(key))
        });
        if let Some((key, materials)) = hit {
            return Some(RecipeMatch {
                key,
                materials,
                kind: MatchKind::Slot,
            });
        }
    }
    None
}

/// Memoized resolution results for one recipe store.
///
/// Owned by the caller. Results are keyed by the store's fingerprint, so
/// resolving against a different store clears the cache first.
#[derive(Debug, Clone, Default)]
pub struct ResolveCache {
    fingerprint: Option<String>,
    entries: HashMap<String, Option<Vec<String>>>,
}

impl ResolveCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached equivalent of [`resolve`]
    pub fn resolve(&mut self, normalized_name: &str, store: &RecipeStore) -> Option<Vec<String>> {
        if self.fingerprint.as_deref() != Some(store.fingerprint()) {
            self.invalidate();
            self.fingerprint = Some(store.fingerprint().to_string());
        }

        if let Some(cached) = self.entries.get(normalized_name) {
            return cached.clone();
        }

        let resolved = resolve(normalized_name, store).map(|m| m.to_vec());
        self.entries
            .insert(normalized_name.to_string(), resolved.clone());
        resolved
    }

    /// Drop every cached result
    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.fingerprint = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
