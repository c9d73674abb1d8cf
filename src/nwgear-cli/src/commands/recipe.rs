//! Recipe lookup for a single item name

use anyhow::Result;
use nwgear::{normalize, resolve_match, MatchKind, RecipeMatch};

use crate::cli::DataArgs;
use crate::config::Config;

fn describe(found: &RecipeMatch<'_>) -> String {
    let how = match found.kind {
        MatchKind::Exact => "exact",
        MatchKind::Synonym => "synonym",
        MatchKind::Slot => "slot fallback",
    };
    let mut out = format!("Recipe: {} ({})\n", found.key, how);
    for material in found.materials {
        out.push_str(&format!("  {}\n", material));
    }
    out
}

pub fn handle(name: &str, data: &DataArgs) -> Result<()> {
    let config = Config::load()?;
    let store = super::recipe_store(data, &config)?;

    match resolve_match(&normalize(name), &store) {
        Some(found) => print!("{}", describe(&found)),
        None => println!("No recipe found for {:?}", name),
    }
    Ok(())
}
