//! Assignment domain: systems reacting to new entities and host messages.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::assignment::annotations::TextureAnnotations;
use crate::assignment::engine::TextureEngine;
use crate::assignment::events::{
    ClearTextureRequested, InvalidateTexture, SetTextureRequested, TextureAssigned,
};
use crate::assignment::kinds::{EntityKind, TextureItem};
use crate::content::TextureCatalog;
use crate::core::{CurrentSeason, DayStarted, ModConfig, SeasonChanged, TextureRng};
use crate::sprites::ResolvedTexture;

/// Give every newly spawned textured entity its texture.
pub fn assign_new_items(
    mut commands: Commands,
    catalog: Res<TextureCatalog>,
    config: Res<ModConfig>,
    season: Res<CurrentSeason>,
    mut rng: ResMut<TextureRng>,
    query: Query<(Entity, &EntityKind, &TextureItem, Option<&TextureAnnotations>), Added<TextureItem>>,
    mut assigned_events: MessageWriter<TextureAssigned>,
) {
    let engine = TextureEngine::new(&catalog, &config, season.0);

    for (entity, kind, item, existing) in &query {
        let mut annotations = existing.cloned().unwrap_or_default();
        let instance_name = kind.instance_name(&item.key);
        let sheet_id = item.track_sheet_id.then_some(item.sheet_index);

        let scoped = engine.with_keywords(&item.keywords);
        if scoped.assign_texture(*kind, &mut annotations, &instance_name, sheet_id, &mut rng.0) {
            if let (Some(texture_id), Some(variation)) = (&annotations.name, annotations.variation) {
                assigned_events.write(TextureAssigned {
                    entity,
                    texture_id: texture_id.clone(),
                    variation,
                });
            }
        }

        commands
            .entity(entity)
            .insert((annotations, ResolvedTexture::default()));
    }
}

pub fn handle_set_texture_requests(
    mut requests: MessageReader<SetTextureRequested>,
    catalog: Res<TextureCatalog>,
    config: Res<ModConfig>,
    season: Res<CurrentSeason>,
    mut query: Query<&mut TextureAnnotations>,
    mut assigned_events: MessageWriter<TextureAssigned>,
) {
    let engine = TextureEngine::new(&catalog, &config, season.0);

    for request in requests.read() {
        let Ok(mut annotations) = query.get_mut(request.entity) else {
            warn!("SetTextureRequested for untextured entity {:?}", request.entity);
            continue;
        };
        if engine.set_texture(&mut annotations, &request.texture_id, request.variation) {
            assigned_events.write(TextureAssigned {
                entity: request.entity,
                texture_id: request.texture_id.clone(),
                variation: request.variation,
            });
        }
    }
}

pub fn handle_clear_requests(
    mut requests: MessageReader<ClearTextureRequested>,
    mut query: Query<&mut TextureAnnotations>,
) {
    for request in requests.read() {
        if let Ok(mut annotations) = query.get_mut(request.entity) {
            TextureEngine::clear_texture(&mut annotations);
        }
    }
}

pub fn handle_invalidations(
    mut requests: MessageReader<InvalidateTexture>,
    mut query: Query<&mut TextureAnnotations>,
) {
    for request in requests.read() {
        if let Ok(mut annotations) = query.get_mut(request.entity) {
            TextureEngine::invalidate(&mut annotations);
        }
    }
}

/// Re-qualify season-tracked names when the season turns.
pub fn migrate_seasons(
    mut season_events: MessageReader<SeasonChanged>,
    catalog: Res<TextureCatalog>,
    config: Res<ModConfig>,
    mut query: Query<&mut TextureAnnotations>,
) {
    let Some(season) = season_events.read().last().map(|event| event.season) else {
        return;
    };
    let engine = TextureEngine::new(&catalog, &config, season);

    let migrated = query
        .iter_mut()
        .filter_map(|mut annotations| engine.migrate_season(&mut annotations).then_some(()))
        .count();
    if migrated > 0 {
        debug!("Migrated {} texture(s) to {}", migrated, season);
    }
}

/// Adopt drifted sprite indices at the start of each day.
pub fn refresh_sheet_ids(
    mut day_events: MessageReader<DayStarted>,
    mut query: Query<(&TextureItem, &mut TextureAnnotations)>,
) {
    if day_events.read().count() == 0 {
        return;
    }

    for (item, mut annotations) in &mut query {
        TextureEngine::refresh_sheet_id(&mut annotations, item.sheet_index);
    }
}
