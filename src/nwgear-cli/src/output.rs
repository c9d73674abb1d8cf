//! Report rendering for the terminal

use anyhow::{Context, Result};
use nwgear::{CostSummary, Item};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::cli::OutputFormat;

/// Serialize `value` as JSON or YAML; `None` for table output
pub fn structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(Some)
            .context("Failed to serialize JSON"),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(Some)
            .context("Failed to serialize YAML"),
        OutputFormat::Table => Ok(None),
    }
}

fn price(value: f64) -> String {
    format!("{:.2}", value)
}

/// Item list with gear type and perks
pub fn items_table(items: &[Item]) -> String {
    let mut out = String::new();
    let width = items
        .iter()
        .map(|i| i.name.len())
        .max()
        .unwrap_or(0)
        .max("Item".len());

    out.push_str(&format!("{:<width$}  {:<12}  Perks\n", "Item", "Type", width = width));
    out.push_str(&format!("{}\n", "-".repeat(width + 21)));
    for item in items {
        let gear_type = item.gear_type.as_deref().unwrap_or("-");
        let marker = if item.is_artifact { "*" } else { "" };
        let perks: Vec<String> = item
            .perks
            .iter()
            .map(|p| match &p.craft_mod_item {
                Some(m) => format!("{} ({})", p.name, m),
                None => p.name.clone(),
            })
            .collect();
        out.push_str(&format!(
            "{:<width$}  {:<12}  {}\n",
            format!("{}{}", item.name, marker),
            gear_type,
            perks.join(", "),
            width = width
        ));
    }
    out
}

fn quantity_section(
    out: &mut String,
    title: &str,
    totals: &BTreeMap<String, u64>,
    unit_prices: &BTreeMap<&str, Option<f64>>,
) {
    if totals.is_empty() {
        return;
    }
    out.push_str(&format!("\n{}:\n", title));
    for (name, quantity) in totals {
        let unit = unit_prices.get(name.as_str()).copied().flatten();
        match unit {
            Some(unit) => out.push_str(&format!(
                "  {:>6}  {:<28} @ {:>10} = {:>12}\n",
                quantity,
                name,
                price(unit),
                price(unit * *quantity as f64)
            )),
            None => out.push_str(&format!("  {:>6}  {:<28}   (no price)\n", quantity, name)),
        }
    }
}

/// Per-item costs, material and craft-mod totals, grand total
pub fn summary_table(summary: &CostSummary) -> String {
    let mut out = String::new();

    let unit_prices: BTreeMap<&str, Option<f64>> = summary
        .items
        .iter()
        .flat_map(|i| i.lines.iter())
        .map(|l| (l.name.as_str(), l.unit_price))
        .collect();

    if !summary.per_item_cost.is_empty() {
        out.push_str("Item costs:\n");
        for (name, cost) in &summary.per_item_cost {
            out.push_str(&format!("  {:<36} {:>12}\n", name, price(*cost)));
        }
    }

    quantity_section(&mut out, "Materials", &summary.material_totals, &unit_prices);
    quantity_section(&mut out, "Craft mods", &summary.craft_mod_totals, &unit_prices);

    out.push_str(&format!(
        "\nArtifacts: {}  Named: {}\n",
        summary.artifact_count, summary.named_count
    ));
    out.push_str(&format!("Total: {}\n", price(summary.grand_total)));

    let unpriced = summary.unpriced();
    if !unpriced.is_empty() {
        out.push_str(&format!("Unpriced: {}\n", unpriced.join(", ")));
    }
    out
}
