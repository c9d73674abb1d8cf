//! Extraction -> resolution -> aggregation for one build document

use serde::{Deserialize, Serialize};

use crate::config::ExtractorConfig;
use crate::cost::{aggregate, CostSummary};
use crate::craft_mods::{craft_mod_for, CraftModTable};
use crate::document::Node;
use crate::extract::{extract, ExtractError};
use crate::items::Item;
use crate::normalize::normalize;
use crate::prices::PriceLookup;
use crate::recipes::RecipeStore;
use crate::resolve::ResolveCache;

/// Items of one build together with their cost summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub items: Vec<Item>,
    pub summary: CostSummary,
}

impl BuildReport {
    /// Re-price after items changed (e.g. a gear type override) without
    /// touching the document again
    pub fn recompute(&mut self, prices: &impl PriceLookup) {
        self.summary = aggregate(&self.items, prices);
    }
}

/// Owns the static inputs and the resolution cache for a run of analyses.
///
/// Clone one per worker when analyzing builds in parallel.
#[derive(Debug, Clone)]
pub struct BuildAnalyzer {
    recipes: RecipeStore,
    craft_mods: CraftModTable,
    config: ExtractorConfig,
    cache: ResolveCache,
}

impl BuildAnalyzer {
    pub fn new(recipes: RecipeStore, craft_mods: CraftModTable, config: ExtractorConfig) -> Self {
        BuildAnalyzer {
            recipes,
            craft_mods,
            config,
            cache: ResolveCache::new(),
        }
    }

    pub fn recipes(&self) -> &RecipeStore {
        &self.recipes
    }

    pub fn craft_mods(&self) -> &CraftModTable {
        &self.craft_mods
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Swap in a new recipe store; cached resolutions are dropped
    pub fn replace_recipes(&mut self, recipes: RecipeStore) {
        self.recipes = recipes;
        self.cache.invalidate();
    }

    /// Extract items from a document without resolving anything
    pub fn extract(&self, root: &Node) -> Result<Vec<Item>, ExtractError> {
        extract(root, &self.config)
    }

    /// Attach recipe materials and per-perk craft mods to extracted items
    pub fn enrich(&mut self, items: Vec<Item>) -> Vec<Item> {
        items
            .into_iter()
            .map(|mut item| {
                item.crafting_materials = self.cache.resolve(&normalize(&item.name), &self.recipes);
                for perk in &mut item.perks {
                    perk.craft_mod_item =
                        craft_mod_for(&perk.name, &self.craft_mods).map(|s| s.to_string());
                }
                item
            })
            .collect()
    }

    /// Full pipeline for one document
    pub fn analyze(
        &mut self,
        root: &Node,
        prices: &impl PriceLookup,
    ) -> Result<BuildReport, ExtractError> {
        let items = self.enrich(self.extract(root)?);
        let summary = aggregate(&items, prices);
        tracing::info!(
            "Analyzed {} items: {} materials, {} craft mods, total {:.2}",
            items.len(),
            summary.material_totals.len(),
            summary.craft_mod_totals.len(),
            summary.grand_total
        );
        Ok(BuildReport { items, summary })
    }

    /// Like [`analyze`](Self::analyze), but a document without item cards
    /// becomes an empty report with zero cost. Configuration errors still fail.
    pub fn analyze_or_empty(
        &mut self,
        root: &Node,
        prices: &impl PriceLookup,
    ) -> Result<BuildReport, ExtractError> {
        match self.analyze(root, prices) {
            Err(ExtractError::NoStructureFound) => {
                tracing::warn!("No item cards found; reporting an empty build");
                Ok(BuildReport {
                    items: Vec::new(),
                    summary: aggregate(&[], prices),
                })
            }
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::PriceTable;
    use crate::recipes::load_recipes;

    fn analyzer() -> BuildAnalyzer {
        let recipes = load_recipes("Recipe: Gorgon's Hat\n10x Prismatic Cloth\n");
        let craft_mods: CraftModTable = [("Refreshing", "Sage's Stone")].into_iter().collect();
        BuildAnalyzer::new(recipes, craft_mods, ExtractorConfig::default())
    }

    #[test]
    fn test_enrich_resolves_recipe_and_craft_mods() {
        let mut analyzer = analyzer();
        let items = vec![Item::new(
            "Gorgonite Hat",
            None,
            false,
            vec![crate::items::Perk::new("Refreshing"), crate::items::Perk::new("Keen")],
        )];
        let items = analyzer.enrich(items);
        assert_eq!(
            items[0].crafting_materials,
            Some(vec!["10x Prismatic Cloth".to_string()])
        );
        assert_eq!(items[0].perks[0].craft_mod_item.as_deref(), Some("Sage's Stone"));
        assert!(items[0].perks[1].craft_mod_item.is_none());
    }

    #[test]
    fn test_enrich_without_recipe() {
        let mut analyzer = analyzer();
        let items = analyzer.enrich(vec![Item::new("Unknown Boots", None, false, vec![])]);
        assert!(items[0].crafting_materials.is_none());
    }

    #[test]
    fn test_replace_recipes() {
        let mut analyzer = analyzer();
        analyzer.enrich(vec![Item::new("Gorgonite Hat", None, false, vec![])]);
        analyzer.replace_recipes(load_recipes("Recipe: Gorgonite Hat\n1x Other\n"));
        let items = analyzer.enrich(vec![Item::new("Gorgonite Hat", None, false, vec![])]);
        assert_eq!(items[0].crafting_materials, Some(vec!["1x Other".to_string()]));
    }

    #[test]
    fn test_analyze_empty_document() {
        let mut analyzer = analyzer();
        assert_eq!(
            analyzer.analyze(&Node::element("body"), &PriceTable::new()),
            Err(ExtractError::NoStructureFound)
        );
    }

    #[test]
    fn test_analyze_or_empty_reports_zero_cost() {
        let mut analyzer = analyzer();
        let report = analyzer
            .analyze_or_empty(&Node::element("body"), &PriceTable::new())
            .unwrap();
        assert!(report.items.is_empty());
        assert_eq!(report.summary, CostSummary::default());
    }

    #[test]
    fn test_analyze_or_empty_keeps_config_errors() {
        let config = ExtractorConfig {
            rarity_class_pattern: "(".to_string(),
            ..Default::default()
        };
        let mut analyzer = BuildAnalyzer::new(RecipeStore::default(), CraftModTable::default(), config);
        assert!(matches!(
            analyzer.analyze_or_empty(&Node::element("body"), &PriceTable::new()),
            Err(ExtractError::Config(_))
        ));
    }

    #[test]
    fn test_recompute_after_override() {
        let mut report = BuildReport {
            items: vec![Item::new("Hat", Some("Epic".to_string()), false, vec![])],
            summary: CostSummary::default(),
        };
        report.items[0].override_gear_type(Some("Named".to_string()));
        report.recompute(&PriceTable::new());
        assert_eq!(report.summary.named_count, 1);
    }
}
