//! Per-frame draw resolution for textured entities.

use bevy::prelude::*;

use crate::assignment::{DrawOverride, DrawRequest, TextureAnnotations, TextureItem, resolve_draw};
use crate::content::TextureCatalog;
use crate::core::ModConfig;

/// Present while the entity is working (a machine processing input).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MachineActive;

/// What the host should draw this frame. `None` keeps the base sprite.
#[derive(Component, Debug, Clone, Default)]
pub struct ResolvedTexture(pub Option<DrawOverride>);

impl ResolvedTexture {
    pub fn is_overridden(&self) -> bool {
        self.0.is_some()
    }
}

/// System that resolves every textured entity and advances its animation.
pub fn resolve_textures(
    time: Res<Time>,
    catalog: Res<TextureCatalog>,
    config: Res<ModConfig>,
    mut query: Query<(
        &TextureItem,
        &mut TextureAnnotations,
        &mut ResolvedTexture,
        Has<MachineActive>,
    )>,
) {
    let delta_ms = time.delta().as_millis().min(u32::MAX as u128) as u32;

    for (item, mut annotations, mut resolved, active) in &mut query {
        let request = DrawRequest {
            sheet_index: item.sheet_index,
            delta_ms,
            active,
        };
        resolved.0 = resolve_draw(&catalog, &config, &mut annotations, request);
    }
}
