//! Name canonicalization shared by every matching step.

/// Canonical form used as the join key between extracted names, recipe keys,
/// craft-mod perks and price entries: surrounding whitespace trimmed,
/// lowercased.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// True when two names are equal after normalization.
pub fn same_name(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}
