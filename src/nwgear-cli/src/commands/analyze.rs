//! Single build analysis

use anyhow::{bail, Context, Result};
use nwgear::{same_name, BuildReport, Node};
use std::path::Path;

use crate::cli::{DataArgs, OutputFormat};
use crate::config::Config;
use crate::output;

/// Parse a `NAME=TYPE` override; an empty type clears the gear type
pub fn parse_gear_type(arg: &str) -> Result<(String, Option<String>)> {
    let Some((name, gear_type)) = arg.split_once('=') else {
        bail!("Invalid gear type override {:?}, expected NAME=TYPE", arg);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Invalid gear type override {:?}, item name is empty", arg);
    }
    let gear_type = gear_type.trim();
    Ok((
        name.to_string(),
        (!gear_type.is_empty()).then(|| gear_type.to_string()),
    ))
}

/// Apply overrides to matching items; returns how many items changed
pub fn apply_gear_types(report: &mut BuildReport, overrides: &[(String, Option<String>)]) -> usize {
    let mut changed = 0;
    for (name, gear_type) in overrides {
        let mut matched = false;
        for item in report.items.iter_mut().filter(|i| same_name(&i.name, name)) {
            item.override_gear_type(gear_type.clone());
            matched = true;
            changed += 1;
        }
        if !matched {
            tracing::warn!("No item named {:?} in this build", name);
        }
    }
    changed
}

pub fn handle(
    input: &Path,
    format: OutputFormat,
    gear_types: &[String],
    data: &DataArgs,
) -> Result<()> {
    let config = Config::load()?;
    let overrides = gear_types
        .iter()
        .map(|s| parse_gear_type(s))
        .collect::<Result<Vec<_>>>()?;

    let root = Node::from_file(input)
        .with_context(|| format!("Failed to load build {}", input.display()))?;
    let prices = super::price_table(data, &config)?;
    let mut analyzer = super::analyzer(data, &config)?;

    let mut report = analyzer
        .analyze_or_empty(&root, &prices)
        .with_context(|| format!("Failed to analyze {}", input.display()))?;

    if apply_gear_types(&mut report, &overrides) > 0 {
        report.recompute(&prices);
    }

    match output::structured(&report, format)? {
        Some(text) => println!("{}", text),
        None => {
            print!("{}", output::items_table(&report.items));
            println!();
            print!("{}", output::summary_table(&report.summary));
        }
    }

    Ok(())
}
