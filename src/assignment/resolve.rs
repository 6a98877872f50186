//! Assignment domain: draw-time resolution of an entity's texture.

use image::RgbaImage;
use std::sync::Arc;

use crate::assignment::annotations::TextureAnnotations;
use crate::content::TextureCatalog;
use crate::core::ModConfig;
use crate::sprites::AnimationClock;
use crate::textures::SourceRect;

/// Per-draw inputs from the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawRequest {
    /// The host's current sprite index for the entity.
    pub sheet_index: i32,
    pub delta_ms: u32,
    /// Whether the entity is working (drives state-gated animation frames).
    pub active: bool,
}

/// Texture and rectangle to draw instead of the host's base sprite.
#[derive(Debug, Clone)]
pub struct DrawOverride {
    pub texture_id: String,
    pub variation: i32,
    pub texture: Arc<RgbaImage>,
    pub source: SourceRect,
    /// Column offset applied to `source`, in tiles.
    pub x_tile_offset: i32,
}

/// Work out what to draw for an entity, advancing its animation.
///
/// `None` means "draw the base texture"; stale names, bad variations,
/// missing images and offsets that leave the image all end up there.
pub fn resolve_draw(
    catalog: &TextureCatalog,
    config: &ModConfig,
    annotations: &mut TextureAnnotations,
    request: DrawRequest,
) -> Option<DrawOverride> {
    let model = catalog.get(annotations.name.as_deref()?)?;
    let variation = annotations.variation?;
    if variation == -1 || config.is_texture_variation_disabled(&model.texture_id, variation) {
        return None;
    }
    let texture = model.texture(variation)?.clone();

    let mut x_tile_offset = match annotations.sheet_id {
        Some(sheet_id) => request.sheet_index - sheet_id,
        None => 0,
    };

    if model.has_animation(variation) {
        let frames = model.animation(variation);
        if annotations.animation.is_none() {
            annotations.animation = AnimationClock::start(frames);
        }
        let clock = annotations.animation.as_mut()?;
        clock.tick(frames, request.delta_ms, request.active);
        x_tile_offset = clock.current_frame;
    }

    let mut source = model.source_rect(variation)?;
    let shift = i64::from(x_tile_offset) * i64::from(model.texture_width);
    source.x = u32::try_from(i64::from(source.x) + shift).ok()?;
    if !source.fits_within(texture.width(), texture.height()) {
        return None;
    }

    Some(DrawOverride {
        texture_id: model.texture_id.clone(),
        variation,
        texture,
        source,
        x_tile_offset,
    })
}
