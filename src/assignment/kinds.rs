//! Assignment domain: the closed set of host entity kinds.

use bevy::prelude::*;

use crate::textures::{TextureType, model_name};

/// Which per-category randomness toggle governs an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RandomCategory {
    Flooring,
    Tree,
    FruitTree,
    Crop,
    Grass,
    Furniture,
    Object,
    FarmAnimal,
    Monster,
    Building,
    ArtifactSpot,
    /// No user toggle exists for this kind.
    Always,
}

/// Kind of host entity carrying alternate textures.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Flooring,
    Tree,
    FruitTree,
    Grass,
    Bush,
    GiantCrop,
    Crop,
    Building,
    Furniture,
    Craftable,
    Decoration,
    ArtifactSpot,
    FarmAnimal,
    Monster,
    Character,
}

impl EntityKind {
    pub fn texture_type(&self) -> TextureType {
        match self {
            EntityKind::Flooring => TextureType::Flooring,
            EntityKind::Tree => TextureType::Tree,
            EntityKind::FruitTree => TextureType::FruitTree,
            EntityKind::Grass => TextureType::Grass,
            EntityKind::Bush => TextureType::Bush,
            EntityKind::GiantCrop => TextureType::GiantCrop,
            EntityKind::Crop => TextureType::Crop,
            EntityKind::Building => TextureType::Building,
            EntityKind::Furniture => TextureType::Furniture,
            EntityKind::Craftable => TextureType::Craftable,
            EntityKind::Decoration => TextureType::Decoration,
            EntityKind::ArtifactSpot => TextureType::ArtifactSpot,
            EntityKind::FarmAnimal | EntityKind::Monster | EntityKind::Character => {
                TextureType::Character
            }
        }
    }

    pub fn random_category(&self) -> RandomCategory {
        match self {
            EntityKind::Flooring => RandomCategory::Flooring,
            EntityKind::Tree => RandomCategory::Tree,
            EntityKind::FruitTree => RandomCategory::FruitTree,
            EntityKind::Grass => RandomCategory::Grass,
            EntityKind::Crop => RandomCategory::Crop,
            EntityKind::Building => RandomCategory::Building,
            EntityKind::Furniture => RandomCategory::Furniture,
            EntityKind::Craftable => RandomCategory::Object,
            EntityKind::ArtifactSpot => RandomCategory::ArtifactSpot,
            EntityKind::FarmAnimal => RandomCategory::FarmAnimal,
            EntityKind::Monster => RandomCategory::Monster,
            EntityKind::Bush
            | EntityKind::GiantCrop
            | EntityKind::Decoration
            | EntityKind::Character => RandomCategory::Always,
        }
    }

    /// `{Type}_{item_key}`, the unqualified name used to look up models.
    pub fn instance_name(&self, item_key: &str) -> String {
        match self {
            EntityKind::Grass => model_name(TextureType::Grass, "Grass", None),
            _ => model_name(self.texture_type(), item_key, None),
        }
    }
}

/// Host item an entity represents, plus its current sprite index.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct TextureItem {
    /// Item name (or id) used to build the instance name.
    pub key: String,
    pub sheet_index: i32,
    /// Record `sheet_index` at assignment so later drift can be measured.
    pub track_sheet_id: bool,
    /// Restricts manual variation picks, e.g. to a paint tool's palette.
    pub keywords: Vec<String>,
}

impl TextureItem {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            sheet_index: 0,
            track_sheet_id: false,
            keywords: Vec::new(),
        }
    }

    pub fn with_sheet_index(mut self, sheet_index: i32) -> Self {
        self.sheet_index = sheet_index;
        self.track_sheet_id = true;
        self
    }

    pub fn with_keywords<S: Into<String>>(
        mut self,
        keywords: impl IntoIterator<Item = S>,
    ) -> Self {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}
