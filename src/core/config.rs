//! User-facing configuration, persisted as RON next to the content packs.

use bevy::prelude::*;
use ron::Options;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::assignment::RandomCategory;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModConfig {
    pub use_random_textures_when_placing_flooring: bool,
    pub use_random_textures_when_placing_tree: bool,
    pub use_random_textures_when_placing_fruit_tree: bool,
    pub use_random_textures_when_placing_crop: bool,
    pub use_random_textures_when_placing_grass: bool,
    pub use_random_textures_when_placing_furniture: bool,
    pub use_random_textures_when_placing_object: bool,
    pub use_random_textures_when_placing_farm_animal: bool,
    pub use_random_textures_when_placing_monster: bool,
    pub use_random_textures_when_placing_building: bool,
    pub use_random_textures_when_spawning_artifact_spots: bool,
    /// Dump every registered model at trace level after loading.
    pub output_texture_data_to_log: bool,
    /// Texture id -> variations the user switched off.
    pub disabled_textures: BTreeMap<String, BTreeSet<i32>>,
    /// Outdated item name -> current item name, applied to descriptors at load.
    pub legacy_item_names: BTreeMap<String, String>,
    /// Fixed seed for the texture RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            use_random_textures_when_placing_flooring: true,
            use_random_textures_when_placing_tree: true,
            use_random_textures_when_placing_fruit_tree: true,
            use_random_textures_when_placing_crop: true,
            use_random_textures_when_placing_grass: true,
            use_random_textures_when_placing_furniture: true,
            use_random_textures_when_placing_object: true,
            use_random_textures_when_placing_farm_animal: true,
            use_random_textures_when_placing_monster: true,
            use_random_textures_when_placing_building: true,
            use_random_textures_when_spawning_artifact_spots: true,
            output_texture_data_to_log: false,
            disabled_textures: BTreeMap::new(),
            legacy_item_names: BTreeMap::new(),
            seed: None,
        }
    }
}

impl ModConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(ron_options().from_str(&contents)?)
    }

    /// Load the config, falling back to defaults when the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            warn!("Config not found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config {:?}: {}. Using defaults", path, e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = ron::ser::to_string_pretty(self, PrettyConfig::default())?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Whether random textures may be rolled for entities of this category.
    /// Categories without a toggle are always enabled.
    pub fn randomness_enabled(&self, category: RandomCategory) -> bool {
        match category {
            RandomCategory::Flooring => self.use_random_textures_when_placing_flooring,
            RandomCategory::Tree => self.use_random_textures_when_placing_tree,
            RandomCategory::FruitTree => self.use_random_textures_when_placing_fruit_tree,
            RandomCategory::Crop => self.use_random_textures_when_placing_crop,
            RandomCategory::Grass => self.use_random_textures_when_placing_grass,
            RandomCategory::Furniture => self.use_random_textures_when_placing_furniture,
            RandomCategory::Object => self.use_random_textures_when_placing_object,
            RandomCategory::FarmAnimal => self.use_random_textures_when_placing_farm_animal,
            RandomCategory::Monster => self.use_random_textures_when_placing_monster,
            RandomCategory::Building => self.use_random_textures_when_placing_building,
            RandomCategory::ArtifactSpot => {
                self.use_random_textures_when_spawning_artifact_spots
            }
            RandomCategory::Always => true,
        }
    }

    pub fn is_texture_variation_disabled(&self, texture_id: &str, variation: i32) -> bool {
        self.disabled_textures
            .get(texture_id)
            .is_some_and(|disabled| disabled.contains(&variation))
    }

    pub fn set_texture_status(&mut self, texture_id: &str, variation: i32, enabled: bool) {
        if enabled {
            if let Some(disabled) = self.disabled_textures.get_mut(texture_id) {
                disabled.remove(&variation);
                if disabled.is_empty() {
                    self.disabled_textures.remove(texture_id);
                }
            }
        } else {
            self.disabled_textures
                .entry(texture_id.to_string())
                .or_default()
                .insert(variation);
        }
    }

    /// Current name for an item, following `legacy_item_names` if it was renamed.
    pub fn current_item_name<'a>(&'a self, item_name: &'a str) -> &'a str {
        self.legacy_item_names
            .iter()
            .find(|(legacy, _)| legacy.eq_ignore_ascii_case(item_name))
            .map(|(_, current)| current.as_str())
            .unwrap_or(item_name)
    }
}
