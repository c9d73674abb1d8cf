//! Item extraction from a rendered gear-build page
//!
//! Walks the document tree, turning each item card into an [`Item`]. A card
//! with no usable name is skipped; a perk label holding only a stat delta
//! (`+42`, `-3.5`) is not a perk and is dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::config::ExtractorConfig;
use crate::document::Node;
use crate::error::ConfigError;
use crate::items::{Item, Perk};
use crate::reference::is_artifact_name;

#[derive(Error, Debug, PartialEq)]
pub enum ExtractError {
    /// The tree contains no item cards at all. This can mean an empty build
    /// or a page the extractor does not understand; the two cannot be told
    /// apart from the tree alone.
    #[error("No item cards found in document")]
    NoStructureFound,

    #[error("Invalid extractor configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Signed ASCII integer or decimal with nothing else around it
static NUMERIC_PERK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").expect("numeric perk pattern is valid")
});

/// True for perk text that is really a numeric stat delta
pub fn is_numeric_perk(text: &str) -> bool {
    NUMERIC_PERK.is_match(text)
}

/// Trim a perk label and strip one trailing colon
pub fn clean_perk_name(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_suffix(':').unwrap_or(trimmed).trim()
}

/// Extract every item card in document order.
///
/// Returns [`ExtractError::NoStructureFound`] when the tree has no item cards;
/// cards that are present but unusable are skipped, which can yield `Ok` with
/// an empty list.
pub fn extract(root: &Node, config: &ExtractorConfig) -> Result<Vec<Item>, ExtractError> {
    let rarity = config.rarity_regex()?;

    let cards: Vec<&Node> = root.find_all_class(&config.item_card_class).collect();
    if cards.is_empty() {
        return Err(ExtractError::NoStructureFound);
    }

    let items: Vec<Item> = cards
        .iter()
        .enumerate()
        .filter_map(|(index, card)| {
            let item = extract_card(card, config, &rarity);
            if item.is_none() {
                tracing::debug!("Skipping item card {} without a name", index);
            }
            item
        })
        .collect();

    tracing::debug!("Extracted {} items from {} cards", items.len(), cards.len());
    Ok(items)
}

/// Like [`extract`], but folds "no structure" into an empty list
pub fn extract_or_empty(root: &Node, config: &ExtractorConfig) -> Vec<Item> {
    match extract(root, config) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Extraction produced no items: {}", e);
            Vec::new()
        }
    }
}

fn extract_card(card: &Node, config: &ExtractorConfig, rarity: &Regex) -> Option<Item> {
    let name = card.find_path(&config.name_path)?.text_content();
    if name.is_empty() {
        return None;
    }

    let gear_type = card
        .descendants()
        .find(|n| n.classes.iter().any(|c| rarity.is_match(c)))
        .map(|n| n.text_content())
        .filter(|t| !t.is_empty());

    let perks = card
        .find_class(&config.perk_section_class)
        .map(|section| extract_perks(section, &config.perk_label_class))
        .unwrap_or_default();

    // Name list only; the gear-type label is not consulted
    let is_artifact = is_artifact_name(&name);

    Some(Item::new(&name, gear_type, is_artifact, perks))
}

fn extract_perks(section: &Node, label_class: &str) -> Vec<Perk> {
    section
        .find_all_class(label_class)
        .filter_map(|label| {
            let text = label.text_content();
            let name = clean_perk_name(&text);
            if name.is_empty() || is_numeric_perk(name) {
                return None;
            }
            Some(Perk::new(name))
        })
        .collect()
}
