//! Assignment domain: choosing, recording and resolving textures per entity.

pub mod annotations;
pub mod engine;
pub mod events;
pub mod kinds;
pub mod resolve;
pub mod selection;
mod systems;

pub use annotations::TextureAnnotations;
pub use engine::{DEFAULT_OWNER, TextureEngine};
pub use events::{ClearTextureRequested, InvalidateTexture, SetTextureRequested, TextureAssigned};
pub use kinds::{EntityKind, RandomCategory, TextureItem};
pub use resolve::{DrawOverride, DrawRequest, resolve_draw};
pub use selection::select_variation;

use bevy::prelude::*;

use crate::assignment::systems::{
    assign_new_items, handle_clear_requests, handle_invalidations, handle_set_texture_requests,
    migrate_seasons, refresh_sheet_ids,
};
use crate::core::engine_active;

pub struct AssignmentPlugin;

impl Plugin for AssignmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ClearTextureRequested>()
            .add_message::<InvalidateTexture>()
            .add_message::<SetTextureRequested>()
            .add_message::<TextureAssigned>()
            .add_systems(
                Update,
                (
                    assign_new_items,
                    handle_set_texture_requests,
                    handle_clear_requests,
                    handle_invalidations,
                    migrate_seasons,
                    refresh_sheet_ids,
                )
                    .chain()
                    .run_if(engine_active),
            );
    }
}
