//! Sprites module: animation clocks and draw-time texture resolution.
//!
//! The engine never draws. Each frame it leaves a [`ResolvedTexture`] on every
//! textured entity telling the host which image and rectangle to use.

pub mod animation;
pub mod draw;
#[cfg(test)]
mod tests;

use bevy::prelude::*;

pub use animation::AnimationClock;
pub use draw::{MachineActive, ResolvedTexture, resolve_textures};

use crate::core::engine_active;

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, resolve_textures.run_if(engine_active));
    }
}
