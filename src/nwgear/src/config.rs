//! Explicit configuration for extraction and document fetching
//!
//! Both structs deserialize with defaults for every field, so a partial TOML
//! table is enough. Call `validate()` before use.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

/// Where the extractor finds things inside a rendered build page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Class marking one equipped-item card
    pub item_card_class: String,
    /// Class chain from the card down to the item name label
    pub name_path: Vec<String>,
    /// Regex a class must match for its node to hold the gear type label
    pub rarity_class_pattern: String,
    /// Class of the container holding the perk labels
    pub perk_section_class: String,
    /// Class of one perk label
    pub perk_label_class: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            item_card_class: "item-card".to_string(),
            name_path: vec!["item-header".to_string(), "item-name".to_string()],
            rarity_class_pattern: r"^(text-)?rarity(-[a-z0-9]+)?$".to_string(),
            perk_section_class: "item-perks".to_string(),
            perk_label_class: "perk-label".to_string(),
        }
    }
}

impl ExtractorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty("item_card_class", &self.item_card_class)?;
        non_empty("perk_section_class", &self.perk_section_class)?;
        non_empty("perk_label_class", &self.perk_label_class)?;
        if self.name_path.is_empty() || self.name_path.iter().any(|c| c.is_empty()) {
            return Err(ConfigError::EmptyField { field: "name_path" });
        }
        self.rarity_regex()?;
        Ok(())
    }

    /// Compile the rarity class pattern
    pub fn rarity_regex(&self) -> Result<Regex, ConfigError> {
        Regex::new(&self.rarity_class_pattern).map_err(|e| ConfigError::InvalidPattern {
            field: "rarity_class_pattern",
            message: e.to_string(),
        })
    }
}

/// How build documents are acquired from the render service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout
    pub timeout_ms: u64,
    /// Selector the renderer waits for before snapshotting the page
    pub wait_for_selector: String,
    /// Pause between consecutive requests from one worker
    pub request_delay_ms: u64,
    /// Number of builds fetched at once
    pub max_concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            timeout_ms: 30_000,
            wait_for_selector: ".item-card".to_string(),
            request_delay_ms: 2_000,
            max_concurrency: 1,
        }
    }
}

/// Upper bound on the per-request timeout (10 minutes)
const MAX_TIMEOUT_MS: u64 = 600_000;
const MAX_CONCURRENCY: usize = 16;

impl FetchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 || self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::OutOfRange {
                field: "timeout_ms",
                value: self.timeout_ms,
            });
        }
        if self.max_concurrency == 0 || self.max_concurrency > MAX_CONCURRENCY {
            return Err(ConfigError::OutOfRange {
                field: "max_concurrency",
                value: self.max_concurrency as u64,
            });
        }
        non_empty("wait_for_selector", &self.wait_for_selector)?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyField { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(ExtractorConfig::default().validate(), Ok(()));
        assert_eq!(FetchConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_rarity_pattern() {
        let re = ExtractorConfig::default().rarity_regex().unwrap();
        assert!(re.is_match("rarity"));
        assert!(re.is_match("rarity-4"));
        assert!(re.is_match("text-rarity-named"));
        assert!(!re.is_match("item-rarity-panel-wrapper"));
    }

    #[test]
    fn test_extractor_rejects_bad_pattern() {
        let config = ExtractorConfig {
            rarity_class_pattern: "(".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPattern { field: "rarity_class_pattern", .. })
        ));
    }

    #[test]
    fn test_extractor_rejects_empty_name_path() {
        let config = ExtractorConfig {
            name_path: vec![],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyField { field: "name_path" })
        );
    }

    #[test]
    fn test_fetch_rejects_zero_concurrency() {
        let config = FetchConfig {
            max_concurrency: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "max_concurrency",
                value: 0
            })
        );
    }

    #[test]
    fn test_fetch_rejects_zero_timeout() {
        let config = FetchConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: FetchConfig = serde_json::from_str(r#"{"request_delay_ms": 500}"#).unwrap();
        assert_eq!(config.request_delay(), Duration::from_millis(500));
        assert_eq!(config.max_concurrency, 1);
    }
}
