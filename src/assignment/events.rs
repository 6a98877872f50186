//! Assignment domain: requests from the host and assignment notifications.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Remove the entity's alternate texture entirely.
#[derive(Debug, Clone, Copy)]
pub struct ClearTextureRequested {
    pub entity: Entity,
}

impl Message for ClearTextureRequested {}

/// Keep the entity's texture name but draw the base texture
/// (crop harvested, item rotted).
#[derive(Debug, Clone, Copy)]
pub struct InvalidateTexture {
    pub entity: Entity,
}

impl Message for InvalidateTexture {}

/// Explicitly apply one texture and variation.
#[derive(Debug, Clone)]
pub struct SetTextureRequested {
    pub entity: Entity,
    pub texture_id: String,
    pub variation: i32,
}

impl Message for SetTextureRequested {}

/// Fired whenever an entity receives a texture, including the default sentinel.
#[derive(Debug, Clone)]
pub struct TextureAssigned {
    pub entity: Entity,
    pub texture_id: String,
    pub variation: i32,
}

impl Message for TextureAssigned {}
