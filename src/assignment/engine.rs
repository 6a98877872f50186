//! Assignment domain: writing texture choices onto entity annotations.

use bevy::prelude::*;
use rand::Rng;

use crate::assignment::annotations::TextureAnnotations;
use crate::assignment::kinds::EntityKind;
use crate::assignment::selection::select_variation;
use crate::content::TextureCatalog;
use crate::core::{ModConfig, Season};

/// Owner recorded for entities that were considered but got no alternate texture.
pub const DEFAULT_OWNER: &str = "Stardew.Default";

/// Borrowed context every assignment runs against.
#[derive(Clone, Copy)]
pub struct TextureEngine<'a> {
    pub catalog: &'a TextureCatalog,
    pub config: &'a ModConfig,
    pub season: Season,
    /// Manual variation picks are limited to entries sharing one of these.
    pub keywords: &'a [String],
}

impl<'a> TextureEngine<'a> {
    pub fn new(catalog: &'a TextureCatalog, config: &'a ModConfig, season: Season) -> Self {
        Self {
            catalog,
            config,
            season,
            keywords: &[],
        }
    }

    /// The same context, scoping manual variation picks to `keywords`.
    pub fn with_keywords(self, keywords: &'a [String]) -> Self {
        Self { keywords, ..self }
    }

    /// Choose and record a texture for a freshly placed or spawned entity.
    ///
    /// `instance_name` is `{Type}_{item}`. Both it and its season-qualified
    /// form are tried; with neither registered (or randomness switched off for
    /// the kind) the entity gets the default sentinel. Returns false when the
    /// entity already had a texture, either live or parked.
    pub fn assign_texture(
        &self,
        kind: EntityKind,
        annotations: &mut TextureAnnotations,
        instance_name: &str,
        track_sheet_id: Option<i32>,
        rng: &mut impl Rng,
    ) -> bool {
        if annotations.restore_cached_name() || annotations.is_assigned() {
            return false;
        }

        let instance_season_name = format!("{}_{}", instance_name, self.season);
        annotations.base_name = Some(instance_name.to_string());

        if !self.config.randomness_enabled(kind.random_category()) {
            return self.assign_default(annotations, &instance_season_name, true, track_sheet_id);
        }

        let plain = self.catalog.has_any(instance_name);
        let seasonal = self.catalog.has_any(&instance_season_name);

        let assigned = match (plain, seasonal) {
            (true, true) => {
                if rng.random_bool(0.5) {
                    self.assign_model(annotations, &instance_season_name, true, track_sheet_id, rng)
                } else {
                    self.assign_model(annotations, instance_name, false, track_sheet_id, rng)
                }
            }
            (true, false) => self.assign_model(annotations, instance_name, false, track_sheet_id, rng),
            (false, true) => {
                self.assign_model(annotations, &instance_season_name, true, track_sheet_id, rng)
            }
            (false, false) => false,
        };

        assigned || self.assign_default(annotations, &instance_season_name, true, track_sheet_id)
    }

    /// Pick one pack's model for `model_name` and a variation within it.
    pub fn assign_model(
        &self,
        annotations: &mut TextureAnnotations,
        model_name: &str,
        track_season: bool,
        track_sheet_id: Option<i32>,
        rng: &mut impl Rng,
    ) -> bool {
        let Some(model) = self.catalog.random_model(model_name, rng) else {
            return false;
        };
        let variation = select_variation(model, self.keywords, rng);

        annotations.owner = Some(model.owner.clone());
        annotations.name = Some(model.texture_id.clone());
        annotations.variation = Some(variation);
        annotations.animation = None;
        if track_season && model.season.is_some() {
            annotations.season = Some(self.season);
        }
        if let Some(sheet_id) = track_sheet_id {
            annotations.sheet_id = Some(sheet_id);
        }

        debug!("Assigned {} variation {}", model.texture_id, variation);
        true
    }

    /// Record that the entity was considered and keeps its base texture.
    pub fn assign_default(
        &self,
        annotations: &mut TextureAnnotations,
        model_name: &str,
        track_season: bool,
        track_sheet_id: Option<i32>,
    ) -> bool {
        annotations.owner = Some(DEFAULT_OWNER.to_string());
        annotations.name = Some(format!("{}.{}", DEFAULT_OWNER, model_name));
        annotations.variation = Some(-1);
        annotations.animation = None;
        if track_season {
            annotations.season = Some(self.season);
        }
        if let Some(sheet_id) = track_sheet_id {
            annotations.sheet_id = Some(sheet_id);
        }
        true
    }

    /// Apply an explicit choice, e.g. from a paint tool or the debug API.
    pub fn set_texture(
        &self,
        annotations: &mut TextureAnnotations,
        texture_id: &str,
        variation: i32,
    ) -> bool {
        let Some(model) = self.catalog.get(texture_id) else {
            warn!("Cannot apply unknown texture {}", texture_id);
            return false;
        };
        if variation != -1 && !model.contains_variation(variation) {
            warn!(
                "Cannot apply variation {} of {}: it has {} variation(s)",
                variation, model.texture_id, model.variations
            );
            return false;
        }

        annotations.owner = Some(model.owner.clone());
        annotations.name = Some(model.texture_id.clone());
        annotations.variation = Some(variation);
        annotations.season = model.season;
        annotations.base_name = Some(model.base_name());
        annotations.cached_name = None;
        annotations.animation = None;
        true
    }

    /// Forget the entity's texture. Host keys survive.
    pub fn clear_texture(annotations: &mut TextureAnnotations) -> bool {
        let had_texture = annotations.is_assigned() || annotations.cached_name.is_some();
        annotations.clear();
        had_texture
    }

    /// Fall back to the base texture while keeping the name, e.g. after a
    /// crop is harvested or an item rots.
    pub fn invalidate(annotations: &mut TextureAnnotations) -> bool {
        if !annotations.is_assigned() {
            return false;
        }
        annotations.variation = Some(-1);
        annotations.animation = None;
        true
    }

    /// Re-qualify a season-tracked name with `self.season`.
    pub fn migrate_season(&self, annotations: &mut TextureAnnotations) -> bool {
        let (Some(current), Some(owner), Some(base_name)) = (
            annotations.season,
            annotations.owner.as_deref(),
            annotations.base_name.as_deref(),
        ) else {
            return false;
        };
        if current == self.season || !annotations.is_assigned() {
            return false;
        }

        let name = format!("{}.{}_{}", owner, base_name, self.season);
        trace!("Migrating {:?} -> {} for {}", annotations.name, name, self.season);
        annotations.name = Some(name);
        annotations.season = Some(self.season);
        annotations.animation = None;
        true
    }

    /// Adopt the host's current sprite index as the new baseline.
    pub fn refresh_sheet_id(annotations: &mut TextureAnnotations, sheet_index: i32) -> bool {
        match annotations.sheet_id {
            Some(sheet_id) if sheet_id != sheet_index && annotations.is_assigned() => {
                annotations.sheet_id = Some(sheet_index);
                true
            }
            _ => false,
        }
    }
}
