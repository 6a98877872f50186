//! Assignment domain: the engine's view of a host entity's annotation bag.

use bevy::prelude::*;
use std::collections::BTreeMap;

use crate::core::Season;
use crate::sprites::AnimationClock;

pub const OWNER_KEY: &str = "AlternativeTextureOwner";
pub const NAME_KEY: &str = "AlternativeTextureName";
pub const VARIATION_KEY: &str = "AlternativeTextureVariation";
pub const SEASON_KEY: &str = "AlternativeTextureSeason";
pub const SHEET_ID_KEY: &str = "AlternativeTextureSheetId";
pub const BASE_NAME_KEY: &str = "AlternativeTextureBaseName";
pub const NAME_CACHED_KEY: &str = "AlternativeTextureNameCached";
pub const CURRENT_FRAME_KEY: &str = "AlternativeTextureCurrentFrame";
pub const FRAME_INDEX_KEY: &str = "AlternativeTextureFrameIndex";
pub const FRAME_DURATION_KEY: &str = "AlternativeTextureFrameDuration";
pub const ELAPSED_DURATION_KEY: &str = "AlternativeTextureElapsedDuration";

/// Keys written and read by the engine. Anything else belongs to the host.
pub const ENGINE_KEYS: [&str; 11] = [
    OWNER_KEY,
    NAME_KEY,
    VARIATION_KEY,
    SEASON_KEY,
    SHEET_ID_KEY,
    BASE_NAME_KEY,
    NAME_CACHED_KEY,
    CURRENT_FRAME_KEY,
    FRAME_INDEX_KEY,
    FRAME_DURATION_KEY,
    ELAPSED_DURATION_KEY,
];

/// Typed record of the annotations the engine owns on one entity.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct TextureAnnotations {
    pub owner: Option<String>,
    /// Texture id: `{owner}.{model_name}`.
    pub name: Option<String>,
    /// `-1` means "draw the host's base texture".
    pub variation: Option<i32>,
    /// Season the name was last qualified with.
    pub season: Option<Season>,
    /// Host sprite index at assignment time.
    pub sheet_id: Option<i32>,
    /// Unqualified instance name, kept for season migration.
    pub base_name: Option<String>,
    /// Name parked while the host serializes the entity.
    pub cached_name: Option<String>,
    pub animation: Option<AnimationClock>,
    /// Host keys the engine does not recognise, carried through untouched.
    pub extra: BTreeMap<String, String>,
}

impl TextureAnnotations {
    pub fn is_assigned(&self) -> bool {
        self.name.is_some()
    }

    /// The model name without its owner prefix.
    pub fn model_name(&self) -> Option<&str> {
        let name = self.name.as_deref()?;
        match self.owner.as_deref() {
            Some(owner) => name
                .strip_prefix(owner)
                .and_then(|rest| rest.strip_prefix('.'))
                .or(Some(name)),
            None => Some(name),
        }
    }

    /// Move the live name aside so a host round trip cannot strip it.
    pub fn park_name(&mut self) -> bool {
        match self.name.take() {
            Some(name) => {
                self.cached_name = Some(name);
                true
            }
            None => false,
        }
    }

    /// Put a parked name back. Returns whether one was waiting.
    pub fn restore_cached_name(&mut self) -> bool {
        match self.cached_name.take() {
            Some(name) => {
                self.name = Some(name);
                true
            }
            None => false,
        }
    }

    /// Drop every engine-owned field, keeping host keys.
    pub fn clear(&mut self) {
        let extra = std::mem::take(&mut self.extra);
        *self = TextureAnnotations {
            extra,
            ..Default::default()
        };
    }

    /// Read the host's string bag. Malformed numbers read as absent.
    pub fn from_mod_data(data: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| data.get(key).cloned();
        let number = |key: &str| data.get(key).and_then(|value| value.trim().parse::<i64>().ok());

        let animation = match (
            number(CURRENT_FRAME_KEY).and_then(|v| i32::try_from(v).ok()),
            number(FRAME_INDEX_KEY).and_then(|v| usize::try_from(v).ok()),
            number(FRAME_DURATION_KEY).and_then(|v| u32::try_from(v).ok()),
            number(ELAPSED_DURATION_KEY).and_then(|v| u32::try_from(v).ok()),
        ) {
            (Some(current_frame), Some(frame_index), Some(frame_duration_ms), Some(elapsed_ms)) => {
                Some(AnimationClock {
                    current_frame,
                    frame_index,
                    frame_duration_ms,
                    elapsed_ms,
                })
            }
            _ => None,
        };

        TextureAnnotations {
            owner: text(OWNER_KEY),
            name: text(NAME_KEY),
            variation: number(VARIATION_KEY).and_then(|v| i32::try_from(v).ok()),
            season: data.get(SEASON_KEY).and_then(|s| s.parse().ok()),
            sheet_id: number(SHEET_ID_KEY).and_then(|v| i32::try_from(v).ok()),
            base_name: text(BASE_NAME_KEY),
            cached_name: text(NAME_CACHED_KEY),
            animation,
            extra: data
                .iter()
                .filter(|(key, _)| !ENGINE_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }

    /// Write back into the host's string bag format.
    pub fn to_mod_data(&self) -> BTreeMap<String, String> {
        let mut data = self.extra.clone();
        let mut put = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                data.insert(key.to_string(), value);
            }
        };

        put(OWNER_KEY, self.owner.clone());
        put(NAME_KEY, self.name.clone());
        put(VARIATION_KEY, self.variation.map(|v| v.to_string()));
        put(SEASON_KEY, self.season.map(|s| s.to_string()));
        put(SHEET_ID_KEY, self.sheet_id.map(|v| v.to_string()));
        put(BASE_NAME_KEY, self.base_name.clone());
        put(NAME_CACHED_KEY, self.cached_name.clone());
        if let Some(clock) = &self.animation {
            put(CURRENT_FRAME_KEY, Some(clock.current_frame.to_string()));
            put(FRAME_INDEX_KEY, Some(clock.frame_index.to_string()));
            put(FRAME_DURATION_KEY, Some(clock.frame_duration_ms.to_string()));
            put(ELAPSED_DURATION_KEY, Some(clock.elapsed_ms.to_string()));
        }

        data
    }
}
