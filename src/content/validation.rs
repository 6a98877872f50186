//! Descriptor validation and legacy name/type migration.

use crate::content::data::{CollectiveEntry, TextureDescriptor};
use crate::content::error::TextureLoadError;
use crate::core::{ModConfig, Season};
use crate::textures::{TextureModel, TextureType};

/// Outcome of migrating a descriptor's `Type` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMigration {
    pub texture_type: TextureType,
    /// Item name implied by the legacy type (e.g. `Floor` for decorations).
    pub implied_item_name: Option<&'static str>,
    pub migrated: bool,
}

/// Resolve a descriptor type, translating names used by older packs.
pub fn migrate_type(raw: &str) -> Result<TypeMigration, TextureLoadError> {
    let legacy = |texture_type, implied_item_name| TypeMigration {
        texture_type,
        implied_item_name,
        migrated: true,
    };

    let trimmed = raw.trim();
    let migration = match trimmed.to_ascii_lowercase().as_str() {
        "hoedirt" => legacy(TextureType::Crop, None),
        "resourceclump" => legacy(TextureType::GiantCrop, None),
        "object" | "bigcraftable" => legacy(TextureType::Craftable, None),
        "floor" => legacy(TextureType::Decoration, Some("Floor")),
        "wallpaper" => legacy(TextureType::Decoration, Some("Wallpaper")),
        _ => {
            let texture_type: TextureType = trimmed
                .parse()
                .map_err(|_| TextureLoadError::UnknownType(raw.to_string()))?;
            if texture_type == TextureType::Unknown {
                return Err(TextureLoadError::UnknownType(raw.to_string()));
            }
            TypeMigration {
                texture_type,
                implied_item_name: None,
                migrated: false,
            }
        }
    };

    Ok(migration)
}

/// Rewrite outdated item names in place. Returns `(old, new)` for each change.
pub fn migrate_item_names(
    descriptor: &mut TextureDescriptor,
    config: &ModConfig,
) -> Vec<(String, String)> {
    let mut changes = Vec::new();
    let mut migrate = |name: &mut String| {
        let current = config.current_item_name(name);
        if current != name.as_str() {
            let current = current.to_string();
            changes.push((std::mem::replace(name, current.clone()), current));
        }
    };

    if let Some(name) = descriptor.item_name.as_mut() {
        migrate(name);
    }
    for name in descriptor.collective_names.iter_mut() {
        migrate(name);
    }

    changes
}

/// Every item a descriptor applies to. `ItemId` joins the ids, otherwise
/// `ItemName` joins the names.
pub fn collective_entries(
    descriptor: &TextureDescriptor,
) -> Result<Vec<CollectiveEntry>, TextureLoadError> {
    let mut names = descriptor.collective_names.clone();
    let mut ids = descriptor.collective_ids.clone();

    match (&descriptor.item_id, &descriptor.item_name) {
        (Some(id), _) if !id.is_empty() => ids.push(id.clone()),
        (_, Some(name)) if !name.is_empty() => names.push(name.clone()),
        _ => {}
    }

    let entries: Vec<CollectiveEntry> = names
        .into_iter()
        .filter(|n| !n.is_empty())
        .map(CollectiveEntry::Name)
        .chain(ids.into_iter().filter(|i| !i.is_empty()).map(CollectiveEntry::Id))
        .collect();

    if entries.is_empty() {
        return Err(TextureLoadError::MissingItemName);
    }

    Ok(entries)
}

/// Parse declared seasons. An empty list means "all seasons" and yields `[None]`.
pub fn parse_seasons(seasons: &[String]) -> Result<Vec<Option<Season>>, TextureLoadError> {
    if seasons.is_empty() {
        return Ok(vec![None]);
    }

    let mut parsed = Vec::with_capacity(seasons.len());
    for season in seasons.iter().take(Season::ALL.len()) {
        let season: Season = season.parse().map_err(TextureLoadError::Season)?;
        if !parsed.contains(&Some(season)) {
            parsed.push(Some(season));
        }
    }

    Ok(parsed)
}

/// Check the invariants every registered model must hold.
pub fn validate_model(model: &TextureModel) -> Result<(), TextureLoadError> {
    if model.variations < 1 || model.texture_height == 0 || model.texture_width == 0 {
        return Err(TextureLoadError::InvalidDimensions {
            texture_height: model.texture_height,
            variations: model.variations,
        });
    }

    if !model.is_manual_variations_valid() {
        return Err(TextureLoadError::ManualVariationsNotZeroIndexed);
    }

    if let Some(default) = model.default_variation {
        if !(-1..model.variations).contains(&default) {
            return Err(TextureLoadError::DefaultVariationOutOfRange {
                default,
                variations: model.variations,
            });
        }
    }

    Ok(())
}
