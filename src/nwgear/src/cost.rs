//! Cost aggregation
//!
//! Turns enriched items plus a price lookup into per-item costs and build-wide
//! material totals.
//!
//! Inclusion rules depend on the item type:
//! - ordinary gear pays for every recipe material line and every perk's
//!   craft mod;
//! - artifact and named gear pay only for the craft mod of their last perk,
//!   plus the special materials every such item consumes. Their recipe lines
//!   stay attached for display but are not costed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::items::Item;
use crate::normalize::normalize;
use crate::prices::PriceLookup;
use crate::reference::SPECIAL_MATERIALS;

/// `<count><optional x><whitespace><name>`
static QUANTITY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)x?\s+(.+)$").expect("quantity pattern is valid"));

/// Split a material requirement into (quantity, name).
///
/// `"80x Prismatic Ingot"` -> `(80, "Prismatic Ingot")`; a line without a
/// leading count is a single unit of the whole line. A count too large for
/// `u64` saturates.
pub fn parse_material_line(line: &str) -> (u64, String) {
    let line = line.trim();
    match QUANTITY_LINE.captures(line) {
        Some(caps) => {
            let quantity = caps[1].parse::<u64>().unwrap_or_else(|_| {
                tracing::debug!("Quantity out of range in {:?}, saturating", line);
                u64::MAX
            });
            (quantity, caps[2].trim().to_string())
        }
        None => (1, line.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Material,
    CraftMod,
    Special,
}

/// One priced requirement of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostLine {
    pub name: String,
    pub quantity: u64,
    pub kind: LineKind,
    pub unit_price: Option<f64>,
    pub cost: f64,
}

/// Cost breakdown of a single item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCost {
    pub name: String,
    pub gear_type: Option<String>,
    pub special: bool,
    pub lines: Vec<CostLine>,
    pub total: f64,
}

/// Derived cost view of a build; recomputed on demand, never authoritative
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub per_item_cost: BTreeMap<String, f64>,
    pub material_totals: BTreeMap<String, u64>,
    pub craft_mod_totals: BTreeMap<String, u64>,
    pub grand_total: f64,
    pub artifact_count: u64,
    pub named_count: u64,
    pub items: Vec<ItemCost>,
}

impl CostSummary {
    /// Sum of per-item costs; matches `grand_total` up to float rounding
    pub fn items_total(&self) -> f64 {
        self.per_item_cost.values().sum()
    }

    /// Materials and craft mods the price lookup knew nothing about
    pub fn unpriced(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .items
            .iter()
            .flat_map(|i| i.lines.iter())
            .filter(|l| l.unit_price.is_none())
            .map(|l| l.name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

/// Quantities keyed by name, merging names that normalize equally under the
/// first spelling seen
#[derive(Default)]
struct Totals {
    spelling: HashMap<String, String>,
    totals: BTreeMap<String, u64>,
}

impl Totals {
    fn add(&mut self, name: &str, quantity: u64) {
        let display = self
            .spelling
            .entry(normalize(name))
            .or_insert_with(|| name.to_string())
            .clone();
        let total = self.totals.entry(display).or_insert(0);
        *total = total.saturating_add(quantity);
    }

    fn into_map(self) -> BTreeMap<String, u64> {
        self.totals
    }
}

fn line(name: &str, quantity: u64, kind: LineKind, prices: &impl PriceLookup) -> CostLine {
    let unit_price = prices.price(name);
    CostLine {
        name: name.to_string(),
        quantity,
        kind,
        unit_price,
        cost: quantity as f64 * unit_price.unwrap_or(0.0),
    }
}

fn item_lines(item: &Item, prices: &impl PriceLookup) -> Vec<CostLine> {
    let mut lines = Vec::new();

    if item.is_special() {
        if let Some(craft_mod) = item.last_perk().and_then(|p| p.craft_mod_item.as_deref()) {
            lines.push(line(craft_mod, 1, LineKind::CraftMod, prices));
        }
        for special in SPECIAL_MATERIALS {
            let quantity = special.quantity(
                u64::from(item.is_artifact),
                u64::from(item.is_named()),
            );
            if quantity > 0 {
                lines.push(line(special.name, quantity, LineKind::Special, prices));
            }
        }
        return lines;
    }

    for craft_mod in item.perks.iter().filter_map(|p| p.craft_mod_item.as_deref()) {
        lines.push(line(craft_mod, 1, LineKind::CraftMod, prices));
    }
    for material in item.crafting_materials.iter().flatten() {
        let (quantity, name) = parse_material_line(material);
        if name.is_empty() {
            continue;
        }
        lines.push(line(&name, quantity, LineKind::Material, prices));
    }
    lines
}

/// Aggregate costs for a build. Missing prices count as zero.
pub fn aggregate(items: &[Item], prices: &impl PriceLookup) -> CostSummary {
    let mut materials = Totals::default();
    let mut craft_mods = Totals::default();
    let mut per_item_cost: BTreeMap<String, f64> = BTreeMap::new();
    let mut breakdown = Vec::with_capacity(items.len());

    for item in items {
        let lines = item_lines(item, prices);
        for l in &lines {
            match l.kind {
                LineKind::CraftMod => craft_mods.add(&l.name, l.quantity),
                LineKind::Material | LineKind::Special => materials.add(&l.name, l.quantity),
            }
        }

        let total: f64 = lines.iter().map(|l| l.cost).sum();
        *per_item_cost.entry(item.name.clone()).or_insert(0.0) += total;
        breakdown.push(ItemCost {
            name: item.name.clone(),
            gear_type: item.gear_type.clone(),
            special: item.is_special(),
            lines,
            total,
        });
    }

    let material_totals = materials.into_map();
    let craft_mod_totals = craft_mods.into_map();
    let grand_total: f64 = material_totals
        .iter()
        .chain(craft_mod_totals.iter())
        .map(|(name, quantity)| *quantity as f64 * prices.price(name).unwrap_or(0.0))
        .sum();

    CostSummary {
        per_item_cost,
        material_totals,
        craft_mod_totals,
        grand_total,
        artifact_count: items.iter().filter(|i| i.is_artifact).count() as u64,
        named_count: items.iter().filter(|i| i.is_named()).count() as u64,
        items: breakdown,
    }
}
