//! Market prices
//!
//! Prices are supplied from outside the core. Anything that can answer
//! "what does one unit of X cost?" implements [`PriceLookup`]; a missing
//! answer means the material is not priced yet, never an error.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

use crate::error::SourceError;
use crate::normalize::normalize;

// Mock per-server price tables shipped with the library
const MOCK_PRICES_JSON: &str = include_str!("../../../share/mock_prices.json");

/// Server id whose table is served when a server has no table of its own
pub const DEFAULT_SERVER: &str = "default";

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("No price table for server: {0}")]
    UnknownServer(String),

    #[error("Price fetch failed: {0}")]
    Fetch(String),

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Unit price lookup by material or craft-mod name
pub trait PriceLookup {
    fn price(&self, name: &str) -> Option<f64>;
}

impl<F> PriceLookup for F
where
    F: Fn(&str) -> Option<f64>,
{
    fn price(&self, name: &str) -> Option<f64> {
        self(name)
    }
}

/// Material name -> unit price, matched through the name normalizer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    entries: BTreeMap<String, (String, f64)>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, price: f64) {
        self.entries
            .insert(normalize(name), (name.trim().to_string(), price));
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.get(&normalize(name)).map(|(_, price)| *price)
    }

    /// (display name, price) pairs ordered by normalized name
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .values()
            .map(|(name, price)| (name.as_str(), *price))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a flat `{ "name": price }` JSON object
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let raw: HashMap<String, f64> = serde_json::from_str(json)?;
        Ok(raw.into_iter().collect())
    }
}

impl<K: AsRef<str>> FromIterator<(K, f64)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut table = PriceTable::new();
        for (name, price) in iter {
            table.insert(name.as_ref(), price);
        }
        table
    }
}

impl PriceLookup for PriceTable {
    fn price(&self, name: &str) -> Option<f64> {
        self.get(name)
    }
}

/// Where price tables come from
pub trait PriceSource {
    fn fetch(&self, server: &str) -> Result<PriceTable, PriceError>;
}

/// A price file holds either one flat table or one table per server
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceFile {
    Flat(HashMap<String, f64>),
    PerServer(HashMap<String, HashMap<String, f64>>),
}

/// Fixed price tables keyed by server id
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    servers: HashMap<String, PriceTable>,
}

impl StaticPriceSource {
    /// The mock tables embedded in the library
    pub fn builtin() -> Result<Self, SourceError> {
        Self::from_json(MOCK_PRICES_JSON)
    }

    /// Parse a price file. A flat table is served for every server.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let servers: HashMap<String, PriceTable> = match serde_json::from_str::<PriceFile>(json)? {
            PriceFile::Flat(prices) => HashMap::from([(
                DEFAULT_SERVER.to_string(),
                prices.into_iter().collect::<PriceTable>(),
            )]),
            PriceFile::PerServer(servers) => servers
                .into_iter()
                .map(|(server, prices)| (normalize(&server), prices.into_iter().collect()))
                .collect(),
        };
        Ok(StaticPriceSource { servers })
    }

    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let json = std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
        let source = Self::from_json(&json)?;
        if source.servers.values().all(|t| t.is_empty()) {
            return Err(SourceError::Empty(path.display().to_string()));
        }
        Ok(source)
    }

    /// Server ids with their own table, sorted
    pub fn servers(&self) -> Vec<&str> {
        let mut servers: Vec<&str> = self.servers.keys().map(|s| s.as_str()).collect();
        servers.sort_unstable();
        servers
    }
}

impl PriceSource for StaticPriceSource {
    fn fetch(&self, server: &str) -> Result<PriceTable, PriceError> {
        self.servers
            .get(&normalize(server))
            .or_else(|| self.servers.get(DEFAULT_SERVER))
            .cloned()
            .ok_or_else(|| PriceError::UnknownServer(server.to_string()))
    }
}

/// Fetch prices, degrading any failure to an empty table
pub fn fetch_or_empty(source: &dyn PriceSource, server: &str) -> PriceTable {
    match source.fetch(server) {
        Ok(table) => {
            tracing::debug!("Loaded {} prices for server {}", table.len(), server);
            table
        }
        Err(e) => {
            tracing::warn!("No prices for server {}: {}", server, e);
            PriceTable::new()
        }
    }
}
