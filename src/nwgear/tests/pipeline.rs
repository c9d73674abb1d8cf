//! End-to-end analysis against the shipped data files

use std::path::PathBuf;

use nwgear::{
    BuildAnalyzer, CraftModTable, ExtractorConfig, MatchKind, Node, PriceTable, RecipeStore,
};

fn share(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../share")
        .join(file)
}

fn analyzer() -> anyhow::Result<BuildAnalyzer> {
    let recipes = RecipeStore::from_file(&share("recipes.txt"))?;
    let craft_mods = CraftModTable::from_file(&share("craft_mods.json"))?;
    Ok(BuildAnalyzer::new(recipes, craft_mods, ExtractorConfig::default()))
}

fn card(name: &str, gear_type: &str, perks: &[&str]) -> Node {
    Node::element("div")
        .with_class("item-card")
        .with_child(
            Node::element("div")
                .with_class("item-header")
                .with_child(Node::element("span").with_class("item-name").with_text(name))
                .with_child(
                    Node::element("span")
                        .with_class("text-rarity-2")
                        .with_text(gear_type),
                ),
        )
        .with_child(
            Node::element("div").with_class("item-perks").with_children(
                perks
                    .iter()
                    .map(|p| Node::element("span").with_class("perk-label").with_text(p)),
            ),
        )
}

fn page(cards: Vec<Node>) -> Node {
    Node::element("html").with_child(Node::element("body").with_children(cards))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_crafted_hat_end_to_end() -> anyhow::Result<()> {
    let mut analyzer = analyzer()?;
    let prices: PriceTable = [
        ("Prismatic Cloth", 2.0),
        ("Gorgon Essence", 10.0),
        ("Phoenixweave", 1.0),
        ("Sage's Stone", 3.0),
    ]
    .into_iter()
    .collect();

    let root = page(vec![card("Gorgonite Hat", "Crafting", &["Refreshing: ", "+42"])]);
    let report = analyzer.analyze(&root, &prices)?;

    assert_eq!(report.items.len(), 1);
    let item = &report.items[0];
    assert_eq!(item.name, "Gorgonite Hat");
    assert_eq!(item.gear_type.as_deref(), Some("Crafting"));
    assert_eq!(item.perks.len(), 1);
    assert_eq!(item.perks[0].craft_mod_item.as_deref(), Some("Sage's Stone"));
    assert_eq!(
        item.crafting_materials.as_deref(),
        Some(
            &[
                "10x Prismatic Cloth".to_string(),
                "5x Gorgon Essence".to_string(),
                "2x Phoenixweave".to_string(),
            ][..]
        )
    );

    let summary = &report.summary;
    assert_eq!(summary.material_totals["Prismatic Cloth"], 10);
    assert_eq!(summary.craft_mod_totals["Sage's Stone"], 1);
    assert!(approx(summary.per_item_cost["Gorgonite Hat"], 75.0));
    assert!(approx(summary.grand_total, 75.0));
    Ok(())
}

#[test]
fn test_artifacts_and_named_special_materials() -> anyhow::Result<()> {
    let mut analyzer = analyzer()?;
    let root = page(vec![
        card("Kingslayer", "Legendary", &["Refreshing", "Vitality"]),
        card("Spear of Nysa", "Artifact", &["Keen"]),
        card("Gorgon's Hat", "Named", &["Freedom:", "Hearty:"]),
    ]);
    let report = analyzer.analyze(&root, &PriceTable::new())?;
    let summary = &report.summary;

    assert_eq!(summary.artifact_count, 2);
    assert_eq!(summary.named_count, 1);
    assert_eq!(summary.material_totals["Dark Matter"], 1450);
    assert_eq!(summary.material_totals["Goldcursed Coconut"], 3);
    assert_eq!(summary.material_totals["Chromatic Seal"], 5);

    // only the last perk's craft mod counts for special items
    assert_eq!(summary.craft_mod_totals.get("Ancient Tissue"), Some(&1));
    assert_eq!(summary.craft_mod_totals.get("Pristine Topaz"), Some(&1));
    assert!(!summary.craft_mod_totals.contains_key("Sage's Stone"));
    assert!(!summary.craft_mod_totals.contains_key("Spiked Pelt"));
    assert!(!summary.material_totals.contains_key("Prismatic Cloth"));
    Ok(())
}

#[test]
fn test_synonym_and_slot_resolution() -> anyhow::Result<()> {
    let store = RecipeStore::from_file(&share("recipes.txt"))?;

    let void = nwgear::resolve_match("void gauntlet", &store).map(|m| (m.key, m.kind));
    assert_eq!(void, Some(("ice gauntlet", MatchKind::Synonym)));

    let sabatons = nwgear::resolve_match("gorgon's sabatons", &store).map(|m| (m.key, m.kind));
    assert_eq!(sabatons, Some(("gorgon's boots", MatchKind::Synonym)));

    let slot = nwgear::resolve_match("gorgonite shirt of the deep", &store).map(|m| (m.key, m.kind));
    assert_eq!(slot, Some(("gorgon's shirt", MatchKind::Slot)));

    assert!(nwgear::resolve("silk robe", &store).is_none());
    Ok(())
}

#[test]
fn test_report_serializes_camel_case() -> anyhow::Result<()> {
    let mut analyzer = analyzer()?;
    let root = page(vec![card("Prismatic Helm", "Crafting", &["Empty Gem Slot"])]);
    let report = analyzer.analyze(&root, &PriceTable::new())?;

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["items"][0]["perks"][0]["isGemSlot"], true);
    assert_eq!(json["summary"]["materialTotals"]["Prismatic Ingot"], 25);
    assert!(json["summary"]["grandTotal"].is_number());
    Ok(())
}

#[test]
fn test_document_loaded_from_json_file() -> anyhow::Result<()> {
    let root = page(vec![card("Prismatic Boots", "Epic", &["Vitality:"])]);
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("build.json");
    std::fs::write(&path, serde_json::to_string(&root)?)?;

    let mut analyzer = analyzer()?;
    let loaded = Node::from_file(&path)?;
    let report = analyzer.analyze(&loaded, &PriceTable::new())?;
    assert_eq!(report.summary.material_totals["Asmodeum"], 6);
    assert_eq!(report.summary.craft_mod_totals["Ancient Tissue"], 1);
    Ok(())
}
