//! # nwgear
//!
//! New World gear build costing - extraction, recipe resolution and pricing.
//!
//! This library provides functionality to:
//! - Extract equipped items and perks from a rendered build page tree
//! - Resolve item names against a crafting recipe store (with synonym and
//!   slot fallbacks)
//! - Map perks to the craft-mod items that socket them
//! - Aggregate material quantities and costs for a whole build
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let recipes = nwgear::RecipeStore::from_file(Path::new("share/recipes.txt"))?;
//! let craft_mods = nwgear::CraftModTable::from_file(Path::new("share/craft_mods.json"))?;
//! let mut analyzer =
//!     nwgear::BuildAnalyzer::new(recipes, craft_mods, nwgear::ExtractorConfig::default());
//!
//! // A build page rendered to a JSON node tree
//! let page = nwgear::Node::from_file(Path::new("build.json"))?;
//! let prices = nwgear::fetch_or_empty(&nwgear::StaticPriceSource::builtin()?, "aries");
//!
//! let report = analyzer.analyze(&page, &prices)?;
//! for (material, quantity) in &report.summary.material_totals {
//!     println!("{:>6}  {}", quantity, material);
//! }
//! println!("Total: {:.2}", report.summary.grand_total);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod cost;
pub mod craft_mods;
pub mod document;
pub mod error;
pub mod extract;
pub mod items;
pub mod normalize;
pub mod pipeline;
pub mod prices;
pub mod recipes;
pub mod reference;
pub mod resolve;

// Re-export commonly used items
#[doc(inline)]
pub use config::{ExtractorConfig, FetchConfig};
#[doc(inline)]
pub use cost::{aggregate, parse_material_line, CostLine, CostSummary, ItemCost, LineKind};
#[doc(inline)]
pub use craft_mods::{craft_mod_for, CraftModTable};
#[doc(inline)]
pub use document::{DocumentError, Node};
#[doc(inline)]
pub use error::{ConfigError, SourceError};
#[doc(inline)]
pub use extract::{extract, extract_or_empty, ExtractError};
#[doc(inline)]
pub use items::{Item, Perk};
#[doc(inline)]
pub use normalize::{normalize, same_name};
#[doc(inline)]
pub use pipeline::{BuildAnalyzer, BuildReport};
#[doc(inline)]
pub use prices::{
    fetch_or_empty, PriceError, PriceLookup, PriceSource, PriceTable, StaticPriceSource,
    DEFAULT_SERVER,
};
#[doc(inline)]
pub use recipes::{load_recipes, RecipeStore};
#[doc(inline)]
pub use resolve::{resolve, resolve_match, MatchKind, RecipeMatch, ResolveCache};

// Reference data (gem slots, artifacts, synonyms, special materials)
#[doc(inline)]
pub use reference::{
    is_artifact_name, is_gem_slot, is_gorgon_like, SpecialMaterial, SynonymRule,
    SPECIAL_MATERIALS, SYNONYM_RULES,
};
