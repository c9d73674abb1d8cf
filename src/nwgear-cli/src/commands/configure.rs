//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up nwgear CLI defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Values to store; `None` leaves the current setting alone
#[derive(Debug, Default)]
pub struct Updates {
    pub server: Option<String>,
    pub recipes: Option<PathBuf>,
    pub craft_mods: Option<PathBuf>,
    pub prices: Option<PathBuf>,
    pub price_url: Option<String>,
    pub render_url: Option<String>,
}

impl Updates {
    fn is_empty(&self) -> bool {
        self.server.is_none()
            && self.recipes.is_none()
            && self.craft_mods.is_none()
            && self.prices.is_none()
            && self.price_url.is_none()
            && self.render_url.is_none()
    }

    fn apply(self, config: &mut Config) {
        if let Some(server) = self.server {
            config.server = Some(server);
        }
        if let Some(path) = self.recipes {
            config.recipes = Some(path);
        }
        if let Some(path) = self.craft_mods {
            config.craft_mods = Some(path);
        }
        if let Some(path) = self.prices {
            config.prices = Some(path);
        }
        if let Some(url) = self.price_url {
            config.price_url = Some(url);
        }
        if let Some(url) = self.render_url {
            config.render_url = Some(url);
        }
    }
}

/// Handle the configure command
///
/// # Arguments
/// * `updates` - Settings to store as defaults
/// * `show` - If true, show current configuration
pub fn handle(updates: Updates, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if updates.is_empty() {
        show_usage();
        return Ok(());
    }

    updates.apply(&mut config);
    config.save()?;

    println!("Configuration updated");
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

fn setting<T: std::fmt::Display>(label: &str, value: Option<T>) {
    match value {
        Some(v) => println!("{:<12} {}", label, v),
        None => println!("{:<12} (default)", label),
    }
}

/// Display current configuration
fn show_config(config: &Config) {
    setting("Server:", config.server.as_deref());
    setting("Recipes:", config.recipes.as_ref().map(|p| p.display()));
    setting("Craft mods:", config.craft_mods.as_ref().map(|p| p.display()));
    setting("Prices:", config.prices.as_ref().map(|p| p.display()));
    setting("Price URL:", config.price_url.as_deref());
    setting("Render URL:", config.render_url.as_deref());
    println!(
        "Fetch:       timeout {}ms, delay {}ms, {} at once, wait for {:?}",
        config.fetch.timeout_ms,
        config.fetch.request_delay_ms,
        config.fetch.max_concurrency,
        config.fetch.wait_for_selector
    );

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: nwgear configure --server SERVER");
    println!("   or: nwgear configure --render-url URL --price-url URL");
    println!("   or: nwgear configure --show");
    println!();
    println!("Fetch settings ([fetch] table) are edited in the config file directly.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }

    #[test]
    fn test_updates_apply() {
        let mut config = Config {
            server: Some("aries".to_string()),
            render_url: Some("http://old".to_string()),
            ..Default::default()
        };
        let updates = Updates {
            render_url: Some("http://new".to_string()),
            ..Default::default()
        };
        assert!(!updates.is_empty());
        updates.apply(&mut config);

        assert_eq!(config.server.as_deref(), Some("aries"));
        assert_eq!(config.render_url.as_deref(), Some("http://new"));
    }

    #[test]
    fn test_empty_updates() {
        assert!(Updates::default().is_empty());
    }

    #[test]
    fn test_config_path_exists() {
        assert!(Config::config_path().is_ok());
    }
}
