//! Craft-mod lookup for a single perk

use anyhow::Result;
use nwgear::{craft_mod_for, is_gem_slot};

use crate::cli::DataArgs;
use crate::config::Config;

pub fn handle(perk: &str, data: &DataArgs) -> Result<()> {
    let config = Config::load()?;
    let table = super::craft_mod_table(data, &config)?;

    match craft_mod_for(perk, &table) {
        Some(item) => println!("{}: {}", perk.trim(), item),
        None if is_gem_slot(perk) => println!("{}: gem slot, no craft mod", perk.trim()),
        None => println!("No craft mod for {:?}", perk),
    }
    Ok(())
}
