//! Command handlers for nwgear CLI
//!
//! Each subcommand has its own module with handler functions. Data loading
//! shared between them lives here: flags win over the config file, which wins
//! over the files shipped under `share/`.

pub mod analyze;
pub mod batch;
pub mod configure;
pub mod craft_mod;
pub mod items;
pub mod prices;
pub mod recipe;

use anyhow::{Context, Result};
use nwgear::{
    fetch_or_empty, BuildAnalyzer, CraftModTable, PriceTable, RecipeStore, StaticPriceSource,
    DEFAULT_SERVER,
};
use std::path::PathBuf;

use crate::cli::DataArgs;
use crate::config::Config;
use crate::sources::HttpPriceSource;

const DEFAULT_RECIPES: &str = "share/recipes.txt";
const DEFAULT_CRAFT_MODS: &str = "share/craft_mods.json";

fn pick(flag: &Option<PathBuf>, configured: &Option<PathBuf>, default: &str) -> PathBuf {
    flag.clone()
        .or_else(|| configured.clone())
        .unwrap_or_else(|| PathBuf::from(default))
}

pub fn recipe_store(data: &DataArgs, config: &Config) -> Result<RecipeStore> {
    let path = pick(&data.recipes, &config.recipes, DEFAULT_RECIPES);
    RecipeStore::from_file(&path)
        .with_context(|| format!("Failed to load recipes from {}", path.display()))
}

pub fn craft_mod_table(data: &DataArgs, config: &Config) -> Result<CraftModTable> {
    let path = pick(&data.craft_mods, &config.craft_mods, DEFAULT_CRAFT_MODS);
    CraftModTable::from_file(&path)
        .with_context(|| format!("Failed to load craft mods from {}", path.display()))
}

pub fn server(data: &DataArgs, config: &Config) -> String {
    data.server
        .clone()
        .or_else(|| config.server.clone())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string())
}

/// Prices for the selected server.
///
/// A broken price file is an error; an unreachable price service or a server
/// without prices only degrades to an empty table.
pub fn price_table(data: &DataArgs, config: &Config) -> Result<PriceTable> {
    let server = server(data, config);

    if let Some(url) = data.price_url.as_ref().or(config.price_url.as_ref()) {
        return Ok(fetch_or_empty(&HttpPriceSource::new(url, &config.fetch), &server));
    }

    let source = match data.prices.as_ref().or(config.prices.as_ref()) {
        Some(path) => StaticPriceSource::from_file(path)
            .with_context(|| format!("Failed to load prices from {}", path.display()))?,
        None => StaticPriceSource::builtin().context("Built-in price tables are invalid")?,
    };
    Ok(fetch_or_empty(&source, &server))
}

pub fn analyzer(data: &DataArgs, config: &Config) -> Result<BuildAnalyzer> {
    Ok(BuildAnalyzer::new(
        recipe_store(data, config)?,
        craft_mod_table(data, config)?,
        config.extractor.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_beats_config() {
        let data = DataArgs {
            server: Some("aries".to_string()),
            ..Default::default()
        };
        let config = Config {
            server: Some("valhalla".to_string()),
            ..Default::default()
        };
        assert_eq!(server(&data, &config), "aries");
        assert_eq!(server(&DataArgs::default(), &config), "valhalla");
        assert_eq!(server(&DataArgs::default(), &Config::default()), DEFAULT_SERVER);
    }

    #[test]
    fn test_price_file_from_flag() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("prices.json");
        std::fs::write(&path, r#"{"Dark Matter": 0.75}"#).unwrap();

        let data = DataArgs {
            prices: Some(path),
            ..Default::default()
        };
        let table = price_table(&data, &Config::default()).unwrap();
        assert_eq!(table.get("Dark Matter"), Some(0.75));
    }

    #[test]
    fn test_broken_price_file_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("prices.json");
        std::fs::write(&path, "not json").unwrap();

        let data = DataArgs {
            prices: Some(path),
            ..Default::default()
        };
        assert!(price_table(&data, &Config::default()).is_err());
    }

    #[test]
    fn test_missing_recipe_file_is_error() {
        let data = DataArgs {
            recipes: Some(PathBuf::from("/nonexistent/recipes.txt")),
            ..Default::default()
        };
        assert!(recipe_store(&data, &Config::default()).is_err());
    }
}
