//! Alternative textures: content-pack driven texture overrides for host entities.
//!
//! Add [`AlternativeTexturesPlugin`] to a Bevy app. The host spawns entities
//! with an [`EntityKind`](assignment::EntityKind) and a
//! [`TextureItem`](assignment::TextureItem); the engine assigns each one a
//! texture and leaves a [`ResolvedTexture`](sprites::ResolvedTexture) telling
//! the host what to draw every frame.

pub mod assignment;
pub mod content;
pub mod core;
pub mod sprites;
pub mod textures;

use bevy::prelude::*;
use std::path::PathBuf;

use crate::core::{ModConfig, TextureRng};

pub struct AlternativeTexturesPlugin {
    /// Directory holding one folder per content pack.
    pub content_root: PathBuf,
    /// RON config file. Missing or broken files fall back to defaults.
    pub config_path: PathBuf,
}

impl Default for AlternativeTexturesPlugin {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("assets/content_packs"),
            config_path: PathBuf::from("config.ron"),
        }
    }
}

impl Plugin for AlternativeTexturesPlugin {
    fn build(&self, app: &mut App) {
        let config = ModConfig::load_or_default(&self.config_path);
        let rng = TextureRng::from_seed(config.seed);

        app.add_plugins((
            core::CorePlugin,
            content::ContentPlugin {
                content_root: self.content_root.clone(),
            },
            assignment::AssignmentPlugin,
            sprites::SpritesPlugin,
        ))
        .insert_resource(config)
        .insert_resource(rng);
    }
}
