//! TextureCatalog resource: every registered model, indexed by texture id
//! and by model name.

use bevy::prelude::*;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

use crate::core::Season;
use crate::textures::{TextureModel, TextureType, model_name};

/// Central index of all alternate textures loaded from content packs.
///
/// Keys are stored lowercased so lookups ignore case the way pack authors
/// expect. The catalog is only ever replaced as a whole after a reload.
#[derive(Resource, Debug, Default, Clone)]
pub struct TextureCatalog {
    models: BTreeMap<String, TextureModel>,
    /// Model name, possibly season-qualified, to texture ids.
    by_model_name: BTreeMap<String, BTreeSet<String>>,
    /// Unqualified `{Type}_{ItemName}` to texture ids per season.
    by_base_name: BTreeMap<String, BTreeMap<Option<Season>, BTreeSet<String>>>,
}

fn key(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl TextureCatalog {
    /// Insert a model. A model with the same texture id is replaced.
    pub fn register(&mut self, model: TextureModel) {
        let id = key(&model.texture_id);
        if let Some(previous) = self.models.remove(&id) {
            self.unindex(&id, &previous);
            debug!(
                "Replaced previously registered texture {} from '{}'",
                previous.texture_id, previous.pack_name
            );
        }

        self.by_model_name
            .entry(key(&model.model_name))
            .or_default()
            .insert(id.clone());
        self.by_base_name
            .entry(key(&model.base_name()))
            .or_default()
            .entry(model.season)
            .or_default()
            .insert(id.clone());
        self.models.insert(id, model);
    }

    fn unindex(&mut self, id: &str, model: &TextureModel) {
        let name = key(&model.model_name);
        if let Some(ids) = self.by_model_name.get_mut(&name) {
            ids.remove(id);
            if ids.is_empty() {
                self.by_model_name.remove(&name);
            }
        }

        let base = key(&model.base_name());
        if let Some(seasons) = self.by_base_name.get_mut(&base) {
            if let Some(ids) = seasons.get_mut(&model.season) {
                ids.remove(id);
                if ids.is_empty() {
                    seasons.remove(&model.season);
                }
            }
            if seasons.is_empty() {
                self.by_base_name.remove(&base);
            }
        }
    }

    fn models_for_ids<'a>(
        &'a self,
        ids: impl IntoIterator<Item = &'a String>,
    ) -> Vec<&'a TextureModel> {
        ids.into_iter().filter_map(|id| self.models.get(id)).collect()
    }

    pub fn get(&self, texture_id: &str) -> Option<&TextureModel> {
        self.models.get(&key(texture_id))
    }

    /// Models whose unqualified name matches, restricted to `season` or
    /// season-agnostic. Exact-season models come first.
    pub fn lookup(&self, base_name: &str, season: Season) -> Vec<&TextureModel> {
        let Some(seasons) = self.by_base_name.get(&key(base_name)) else {
            return Vec::new();
        };
        self.models_for_ids(
            seasons
                .get(&Some(season))
                .into_iter()
                .chain(seasons.get(&None))
                .flatten(),
        )
    }

    /// Whether any pack registered the exact (possibly season-qualified) name.
    pub fn has_any(&self, model_name: &str) -> bool {
        self.by_model_name.contains_key(&key(model_name))
    }

    /// Every pack's model for a name, in texture-id order.
    pub fn models_named(&self, model_name: &str) -> Vec<&TextureModel> {
        self.models_for_ids(self.by_model_name.get(&key(model_name)).into_iter().flatten())
    }

    /// Uniform pick among the packs declaring `model_name`.
    pub fn random_model(&self, model_name: &str, rng: &mut impl Rng) -> Option<&TextureModel> {
        let ids = self.by_model_name.get(&key(model_name))?;
        if ids.is_empty() {
            return None;
        }
        let id = ids.iter().nth(rng.random_range(0..ids.len()))?;
        self.models.get(id)
    }

    /// Models a player could pick for an item: the plain name plus the
    /// variant for the given season.
    pub fn available_models(&self, model_name: &str, season: Season) -> Vec<&TextureModel> {
        let names = [key(model_name), key(&format!("{}_{}", model_name, season))];
        let ids: BTreeSet<&String> = names
            .iter()
            .filter_map(|name| self.by_model_name.get(name))
            .flatten()
            .collect();
        self.models_for_ids(ids)
    }

    /// Models for `(texture_type, item_name)` in every season.
    pub fn models_for_item(&self, texture_type: TextureType, item_name: &str) -> Vec<&TextureModel> {
        let base = key(&model_name(texture_type, item_name, None));
        let ids: BTreeSet<&String> = self
            .by_base_name
            .get(&base)
            .into_iter()
            .flat_map(|seasons| seasons.values())
            .flatten()
            .collect();
        self.models_for_ids(ids)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureModel> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Unique ids of the packs that contributed at least one model.
    pub fn owners(&self) -> BTreeSet<&str> {
        self.models.values().map(|model| model.owner.as_str()).collect()
    }

    /// Swap in a freshly built catalog.
    pub fn replace_with(&mut self, other: TextureCatalog) {
        *self = other;
    }

    /// Returns a summary of loaded models for logging.
    pub fn summary(&self) -> String {
        let mut per_type: BTreeMap<TextureType, usize> = BTreeMap::new();
        for model in self.models.values() {
            *per_type.entry(model.texture_type).or_default() += 1;
        }

        let mut summary = format!(
            "TextureCatalog loaded {} model(s) from {} pack(s):",
            self.models.len(),
            self.owners().len()
        );
        for (texture_type, count) in per_type {
            summary.push_str(&format!("\n - {}: {}", texture_type, count));
        }
        summary
    }
}
