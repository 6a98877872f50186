//! Content domain: tests for pack loading, migration and the catalog.

use image::{Rgba, RgbaImage};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use super::validation::{migrate_type, parse_seasons, validate_model};
use super::{TextureCatalog, TextureLoadError, load_content_packs};
use crate::core::{ModConfig, Season};
use crate::textures::{TextureModel, TextureSheet, TextureType};

// -----------------------------------------------------------------------------
// Fixtures
// -----------------------------------------------------------------------------

fn write_manifest(pack_dir: &Path, name: &str, unique_id: &str) {
    fs::create_dir_all(pack_dir).unwrap();
    let manifest = json!({
        "Name": name,
        "UniqueID": unique_id,
        "Author": "Tester",
        "Version": "1.0.0",
    });
    fs::write(pack_dir.join("manifest.json"), manifest.to_string()).unwrap();
}

fn write_texture(folder: &Path, descriptor: Value, images: &[(&str, RgbaImage)]) {
    fs::create_dir_all(folder).unwrap();
    fs::write(folder.join("texture.json"), descriptor.to_string()).unwrap();
    for (name, image) in images {
        image.save(folder.join(name)).unwrap();
    }
}

fn solid(width: u32, height: u32, shade: u8) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([shade, shade, shade, 255]))
}

fn load(root: &TempDir) -> (TextureCatalog, super::LoadReport) {
    load_content_packs(root.path(), &ModConfig::default())
}

// -----------------------------------------------------------------------------
// Loader tests
// -----------------------------------------------------------------------------

#[test]
fn test_load_expands_seasons() {
    let root = TempDir::new().unwrap();
    let pack = root.path().join("OakPack");
    write_manifest(&pack, "Oak Pack", "Tester.Oak");
    write_texture(
        &pack.join("Textures").join("Oak"),
        json!({
            "ItemName": "Oak",
            "Type": "Tree",
            "Seasons": ["spring", "Fall"],
            "TextureWidth": 16,
            "TextureHeight": 16,
            "Variations": 3,
        }),
        &[("texture.png", solid(16, 48, 10))],
    );

    let (catalog, report) = load(&root);
    assert!(report.errors.is_empty(), "{:?}", report.errors);
    assert_eq!(report.packs, 1);
    assert_eq!(catalog.len(), 2);

    let spring = catalog.get("Tester.Oak.Tree_Oak_Spring").unwrap();
    assert_eq!(spring.season, Some(Season::Spring));
    assert_eq!(spring.variations, 3);
    assert!(spring.texture(2).is_some());
    assert!(catalog.get("tester.oak.tree_oak_fall").is_some());
    assert!(!catalog.has_any("Tree_Oak"));
}

#[test]
fn test_collective_names_share_decoded_images() {
    let root = TempDir::new().unwrap();
    let pack = root.path().join("Crafts");
    write_manifest(&pack, "Crafts", "Tester.Crafts");
    write_texture(
        &pack.join("Textures").join("Barrels"),
        json!({
            "CollectiveNames": ["Keg", "Cask"],
            "Type": "Craftable",
            "TextureWidth": 16,
            "TextureHeight": 32,
            "Variations": 2,
        }),
        &[("texture.png", solid(16, 64, 20))],
    );

    let (catalog, report) = load(&root);
    assert!(report.errors.is_empty(), "{:?}", report.errors);

    let keg = catalog.get("Tester.Crafts.Craftable_Keg").unwrap();
    let cask = catalog.get("Tester.Crafts.Craftable_Cask").unwrap();
    assert!(Arc::ptr_eq(keg.texture(1).unwrap(), cask.texture(1).unwrap()));
}

#[test]
fn test_item_id_joins_collective_ids() {
    let root = TempDir::new().unwrap();
    let pack = root.path().join("Ids");
    write_manifest(&pack, "Ids", "Tester.Ids");
    write_texture(
        &pack.join("Textures").join("Chest"),
        json!({
            "ItemName": "Chest",
            "ItemId": "130",
            "Type": "Craftable",
            "TextureWidth": 16,
            "TextureHeight": 32,
        }),
        &[("texture.png", solid(16, 32, 0))],
    );

    let (catalog, _) = load(&root);
    let chest = catalog.get("Tester.Ids.Craftable_Chest").unwrap();
    assert_eq!(chest.item_id.as_deref(), Some("130"));
}

#[test]
fn test_grass_models_always_named_grass() {
    let root = TempDir::new().unwrap();
    let pack = root.path().join("Grass");
    write_manifest(&pack, "Grass", "Tester.Grass");
    write_texture(
        &pack.join("Textures").join("Tall"),
        json!({
            "ItemName": "Tall Grass",
            "Type": "Grass",
            "TextureWidth": 15,
            "TextureHeight": 20,
        }),
        &[("texture.png", solid(15, 20, 0))],
    );

    let (catalog, _) = load(&root);
    assert!(catalog.get("Tester.Grass.Grass_Grass").is_some());
}

#[test]
fn test_legacy_types_are_migrated() {
    let root = TempDir::new().unwrap();
    let pack = root.path().join("Legacy");
    write_manifest(&pack, "Legacy", "Tester.Legacy");
    write_texture(
        &pack.join("Textures").join("Sprinkler"),
        json!({
            "ItemName": "Sprinkler",
            "Type": "BigCraftable",
            "TextureWidth": 16,
            "TextureHeight": 32,
        }),
        &[("texture.png", solid(16, 32, 0))],
    );
    write_texture(
        &pack.join("Textures").join("Floors"),
        json!({
            "ItemName": "Ignored",
            "Type": "Floor",
            "TextureWidth": 32,
            "TextureHeight": 32,
            "Variations": 16,
        }),
        &[("texture.png", solid(256, 64, 0))],
    );

    let (catalog, report) = load(&root);
    assert!(report.errors.is_empty(), "{:?}", report.errors);

    let sprinkler = catalog.get("Tester.Legacy.Craftable_Sprinkler").unwrap();
    assert_eq!(sprinkler.texture_type, TextureType::Craftable);

    let floor = catalog.get("Tester.Legacy.Decoration_Floor").unwrap();
    assert!(floor.is_floor());
    assert!(matches!(floor.sheet, TextureSheet::Decoration { columns: 8, .. }));
}

#[test]
fn test_legacy_item_names_follow_config() {
    let root = TempDir::new().unwrap();
    let pack = root.path().join("Renamed");
    write_manifest(&pack, "Renamed", "Tester.Renamed");
    write_texture(
        &pack.join("Textures").join("Stone"),
        json!({
            "ItemName": "Stone Fence",
            "Type": "Craftable",
            "TextureWidth": 16,
            "TextureHeight": 32,
        }),
        &[("texture.png", solid(16, 32, 0))],
    );

    let mut config = ModConfig::default();
    config
        .legacy_item_names
        .insert("stone fence".to_string(), "Stone Wall".to_string());

    let (catalog, _) = load_content_packs(root.path(), &config);
    assert!(catalog.get("Tester.Renamed.Craftable_Stone Wall").is_some());
    assert!(catalog.get("Tester.Renamed.Craftable_Stone Fence").is_none());
}

#[test]
fn test_split_files_are_ordered_by_index() {
    let root = TempDir::new().unwrap();
    let pack = root.path().join("Split");
    write_manifest(&pack, "Split", "Tester.Split");
    write_texture(
        &pack.join("Textures").join("Pine"),
        json!({
            "ItemName": "Pine",
            "Type": "Tree",
            "TextureWidth": 16,
            "TextureHeight": 16,
            "Variations": 3,
        }),
        &[
            ("texture_10.png", solid(16, 16, 30)),
            ("texture_2.png", solid(16, 16, 20)),
            ("texture_0.png", solid(16, 16, 10)),
        ],
    );

    let (catalog, report) = load(&root);
    assert!(report.errors.is_empty(), "{:?}", report.errors);

    let pine = catalog.get("Tester.Split.Tree_Pine").unwrap();
    assert_eq!(pine.texture(0).unwrap().get_pixel(0, 0)[0], 10);
    assert_eq!(pine.texture(1).unwrap().get_pixel(0, 0)[0], 20);
    assert_eq!(pine.texture(2).unwrap().get_pixel(0, 0)[0], 30);
    assert_eq!(pine.tile_sheet_path, Path::new("Textures/Pine/texture_0.png").display().to_string());
}

#[test]
fn test_extra_split_files_warn() {
    let root = TempDir::new().unwrap();
    let pack = root.path().join("Extra");
    write_manifest(&pack, "Extra", "Tester.Extra");
    write_texture(
        &pack.join("Textures").join("Maple"),
        json!({
            "ItemName": "Maple",
            "Type": "Tree",
            "TextureWidth": 16,
            "TextureHeight": 16,
            "Variations": 1,
        }),
        &[
            ("texture_0.png", solid(16, 16, 1)),
            ("texture_1.png", solid(16, 16, 2)),
        ],
    );

    let (catalog, report) = load(&root);
    assert_eq!(catalog.len(), 1);
    assert!(report.errors.is_empty());
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn test_manual_variations_define_count_and_inherit_keywords() {
    let root = TempDir::new().unwrap();
    let pack = root.path().join("Manual");
    write_manifest(&pack, "Manual", "Tester.Manual");
    write_texture(
        &pack.join("Textures").join("Chest"),
        json!({
            "ItemName": "Chest",
            "Type": "Craftable",
            "TextureWidth": 16,
            "TextureHeight": 32,
            "Variations": 1,
            "Keywords": ["Wooden"],
            "ManualVariations": [
                { "Id": 0, "ChanceWeight": 0.5, "Keywords": ["Red"] },
                { "Id": 1 }
            ],
        }),
        &[("texture.png", solid(16, 64, 0))],
    );

    let (catalog, report) = load(&root);
    assert!(report.errors.is_empty(), "{:?}", report.errors);

    let chest = catalog.get("Tester.Manual.Craftable_Chest").unwrap();
    assert_eq!(chest.variations, 2);
    assert_eq!(chest.keywords, vec!["Wooden", "Tester.Manual"]);
    assert_eq!(chest.manual_variations[0].keywords, vec!["Red", "Wooden", "Tester.Manual"]);
    assert_eq!(chest.manual_variations[1].chance_weight, 1.0);
}

#[test]
fn test_manual_variations_not_zero_indexed_are_rejected() {
    let root = TempDir::new().unwrap();
    let pack = root.path().join("BadManual");
    write_manifest(&pack, "BadManual", "Tester.BadManual");
    write_texture(
        &pack.join("Textures").join("Chest"),
        json!({
            "ItemName": "Chest",
            "Type": "Craftable",
            "TextureWidth": 16,
            "TextureHeight": 32,
            "ManualVariations": [{ "Id": 1 }, { "Id": 2 }],
        }),
        &[("texture.png", solid(16, 64, 0))],
    );

    let (catalog, report) = load(&root);
    assert!(catalog.is_empty());
    assert_eq!(report.errors.len(), 1);
    assert!(matches!(
        report.errors[0].error,
        TextureLoadError::ManualVariationsNotZeroIndexed
    ));
}

#[test]
fn test_broken_pack_does_not_block_others() {
    let root = TempDir::new().unwrap();

    // No manifest at all.
    fs::create_dir_all(root.path().join("Broken").join("Textures").join("Oak")).unwrap();

    let good = root.path().join("Good");
    write_manifest(&good, "Good", "Tester.Good");
    write_texture(
        &good.join("Textures").join("Oak"),
        json!({
            "ItemName": "Oak",
            "Type": "Tree",
            "TextureWidth": 16,
            "TextureHeight": 16,
        }),
        &[("texture.png", solid(16, 16, 0))],
    );
    let bad_json = good.join("Textures").join("Broken");
    fs::create_dir_all(&bad_json).unwrap();
    fs::write(bad_json.join("texture.json"), "{ not json").unwrap();

    let (catalog, report) = load(&root);
    assert_eq!(catalog.len(), 1);
    assert_eq!(report.models, 1);
    assert_eq!(report.errors.len(), 2);
    assert!(report
        .errors
        .iter()
        .any(|e| matches!(e.error, TextureLoadError::MissingManifest)));
    assert!(report
        .errors
        .iter()
        .any(|e| matches!(e.error, TextureLoadError::Json(_))));
}

#[test]
fn test_oversized_geometry_stays_inside_its_pack() {
    let root = TempDir::new().unwrap();

    let bad = root.path().join("Bad");
    write_manifest(&bad, "Bad", "Tester.Bad");
    write_texture(
        &bad.join("Textures").join("Huge"),
        json!({
            "ItemName": "Oak",
            "Type": "Tree",
            "TextureWidth": 16,
            "TextureHeight": 65536,
            "Variations": 65536,
        }),
        &[("texture.png", solid(16, 16, 0))],
    );

    let good = root.path().join("Good");
    write_manifest(&good, "Good", "Tester.Good");
    write_texture(
        &good.join("Textures").join("Oak"),
        json!({
            "ItemName": "Oak",
            "Type": "Tree",
            "TextureWidth": 16,
            "TextureHeight": 16,
        }),
        &[("texture.png", solid(16, 16, 0))],
    );

    let (catalog, report) = load(&root);
    assert_eq!(catalog.len(), 1);
    assert!(catalog.get("Tester.Good.Tree_Oak").is_some());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].pack, "Bad");
    assert!(matches!(
        report.errors[0].error,
        TextureLoadError::InvalidDimensions {
            texture_height: 65536,
            variations: 65536
        }
    ));
}

#[test]
fn test_only_leaf_folders_need_descriptors() {
    let root = TempDir::new().unwrap();
    let pack = root.path().join("Nested");
    write_manifest(&pack, "Nested", "Tester.Nested");
    write_texture(
        &pack.join("Textures").join("Trees").join("Oak"),
        json!({
            "ItemName": "Oak",
            "Type": "Tree",
            "TextureWidth": 16,
            "TextureHeight": 16,
        }),
        &[("texture.png", solid(16, 16, 0))],
    );
    fs::create_dir_all(pack.join("Textures").join("Empty")).unwrap();

    let (catalog, report) = load(&root);
    assert_eq!(catalog.len(), 1);
    assert_eq!(report.errors.len(), 1);
    assert!(matches!(report.errors[0].error, TextureLoadError::MissingDescriptor));
    assert!(report.errors[0].path.ends_with("Empty"));
}

#[test]
fn test_pack_without_texture_folders_is_reported() {
    let root = TempDir::new().unwrap();
    let pack = root.path().join("Hollow");
    write_manifest(&pack, "Hollow", "Tester.Hollow");
    fs::create_dir_all(pack.join("Textures")).unwrap();

    let (_, report) = load(&root);
    assert_eq!(report.packs, 0);
    assert!(matches!(report.errors[0].error, TextureLoadError::NoTextureFolders));
}

#[test]
fn test_missing_root_is_reported() {
    let root = TempDir::new().unwrap();
    let (catalog, report) =
        load_content_packs(&root.path().join("missing"), &ModConfig::default());
    assert!(catalog.is_empty());
    assert!(matches!(report.errors[0].error, TextureLoadError::Io(_)));
}

// -----------------------------------------------------------------------------
// Validation tests
// -----------------------------------------------------------------------------

#[test]
fn test_migrate_type_aliases() {
    assert_eq!(migrate_type("HoeDirt").unwrap().texture_type, TextureType::Crop);
    assert_eq!(
        migrate_type("ResourceClump").unwrap().texture_type,
        TextureType::GiantCrop
    );
    assert_eq!(migrate_type("Object").unwrap().texture_type, TextureType::Craftable);

    let wallpaper = migrate_type("Wallpaper").unwrap();
    assert_eq!(wallpaper.texture_type, TextureType::Decoration);
    assert_eq!(wallpaper.implied_item_name, Some("Wallpaper"));

    let tree = migrate_type("tree").unwrap();
    assert!(!tree.migrated);
    assert_eq!(tree.texture_type, TextureType::Tree);
}

#[test]
fn test_migrate_type_rejects_unknown() {
    assert!(matches!(migrate_type("Unknown"), Err(TextureLoadError::UnknownType(_))));
    assert!(matches!(migrate_type("Boat"), Err(TextureLoadError::UnknownType(_))));
}

#[test]
fn test_parse_seasons() {
    assert_eq!(parse_seasons(&[]).unwrap(), vec![None]);
    assert_eq!(
        parse_seasons(&["Winter".to_string(), "winter".to_string()]).unwrap(),
        vec![Some(Season::Winter)]
    );
    assert!(parse_seasons(&["Monsoon".to_string()]).is_err());
}

#[test]
fn test_validate_model_default_variation_range() {
    let mut model = TextureModel::fixture("A", TextureType::Tree, "Oak", None, 2);
    model.default_variation = Some(-1);
    assert!(validate_model(&model).is_ok());

    model.default_variation = Some(2);
    assert!(matches!(
        validate_model(&model),
        Err(TextureLoadError::DefaultVariationOutOfRange { default: 2, variations: 2 })
    ));

    model.default_variation = None;
    model.variations = 0;
    assert!(validate_model(&model).is_err());
}

// -----------------------------------------------------------------------------
// Catalog tests
// -----------------------------------------------------------------------------

#[test]
fn test_register_replaces_duplicate_id() {
    let mut catalog = TextureCatalog::default();
    catalog.register(TextureModel::fixture("A", TextureType::Tree, "Oak", None, 1));
    catalog.register(TextureModel::fixture("A", TextureType::Tree, "Oak", None, 4));

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("A.Tree_Oak").unwrap().variations, 4);
}

#[test]
fn test_name_indexes_follow_replacement() {
    let mut catalog = TextureCatalog::default();
    catalog.register(TextureModel::fixture("A", TextureType::Tree, "Oak", None, 1));
    catalog.register(TextureModel::fixture("a", TextureType::Tree, "OAK", None, 2));
    catalog.register(TextureModel::fixture("B", TextureType::Tree, "Oak", Some(Season::Fall), 1));

    assert_eq!(catalog.len(), 2);
    assert!(catalog.has_any("TREE_OAK"));
    assert!(catalog.has_any("tree_oak_fall"));
    assert!(!catalog.has_any("Tree_Oak_Winter"));

    let named = catalog.models_named("Tree_Oak");
    assert_eq!(named.len(), 1);
    assert_eq!(named[0].variations, 2);
    assert_eq!(catalog.lookup("tree_oak", Season::Fall).len(), 2);
    assert_eq!(catalog.models_for_item(TextureType::Tree, "Oak").len(), 2);
}

#[test]
fn test_lookup_orders_exact_season_first() {
    let mut catalog = TextureCatalog::default();
    catalog.register(TextureModel::fixture("A", TextureType::Tree, "Oak", None, 1));
    catalog.register(TextureModel::fixture("B", TextureType::Tree, "Oak", Some(Season::Fall), 1));
    catalog.register(TextureModel::fixture("C", TextureType::Tree, "Oak", Some(Season::Spring), 1));

    let fall: Vec<&str> = catalog
        .lookup("Tree_Oak", Season::Fall)
        .iter()
        .map(|m| m.texture_id.as_str())
        .collect();
    assert_eq!(fall, vec!["B.Tree_Oak_Fall", "A.Tree_Oak"]);

    assert_eq!(catalog.lookup("Tree_Oak", Season::Winter).len(), 1);
    assert!(catalog.lookup("Tree_Pine", Season::Fall).is_empty());
}

#[test]
fn test_available_models_include_season_variant() {
    let mut catalog = TextureCatalog::default();
    catalog.register(TextureModel::fixture("A", TextureType::Craftable, "Flowers", None, 1));
    catalog.register(TextureModel::fixture("B", TextureType::Craftable, "Flowers", Some(Season::Spring), 1));
    catalog.register(TextureModel::fixture("C", TextureType::Craftable, "Flowers", Some(Season::Summer), 1));

    assert_eq!(catalog.available_models("Craftable_Flowers", Season::Spring).len(), 2);
    assert_eq!(catalog.models_for_item(TextureType::Craftable, "Flowers").len(), 3);
    assert_eq!(catalog.owners().len(), 3);
}

#[test]
fn test_random_model_picks_every_pack() {
    let mut catalog = TextureCatalog::default();
    catalog.register(TextureModel::fixture("A", TextureType::Tree, "Oak", None, 1));
    catalog.register(TextureModel::fixture("B", TextureType::Tree, "Oak", None, 1));

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut owners = std::collections::BTreeSet::new();
    for _ in 0..100 {
        let model = catalog.random_model("tree_oak", &mut rng).unwrap();
        owners.insert(model.owner.clone());
    }
    assert_eq!(owners.len(), 2);
    assert!(catalog.random_model("Tree_Pine", &mut rng).is_none());
}

#[test]
fn test_replace_with_swaps_whole_index() {
    let mut live = TextureCatalog::default();
    live.register(TextureModel::fixture("A", TextureType::Tree, "Oak", None, 1));

    let mut fresh = TextureCatalog::default();
    fresh.register(TextureModel::fixture("B", TextureType::Tree, "Pine", None, 1));

    live.replace_with(fresh);
    assert!(live.get("A.Tree_Oak").is_none());
    assert!(live.get("B.Tree_Pine").is_some());
    assert!(live.summary().contains("1 model(s)"));
}
