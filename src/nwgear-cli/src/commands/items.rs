//! Extraction-only view of a build

use anyhow::{Context, Result};
use nwgear::{extract, Node};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::output;

pub fn handle(input: &Path, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let root = Node::from_file(input)
        .with_context(|| format!("Failed to load build {}", input.display()))?;
    let items = extract(&root, &config.extractor)
        .with_context(|| format!("Failed to extract items from {}", input.display()))?;

    match output::structured(&items, format)? {
        Some(text) => println!("{}", text),
        None => print!("{}", output::items_table(&items)),
    }
    Ok(())
}
