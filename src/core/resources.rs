//! Core domain: shared resources for season tracking, randomness and engine status.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// In-game season. Content packs may scope a texture to one or more seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown season '{}'", s))
    }
}

/// The season of the location the host is currently simulating.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CurrentSeason(pub Season);

/// Random source shared by every texture assignment.
///
/// Selection functions take `&mut impl Rng`, so tests pass their own seeded
/// stream instead of this resource.
#[derive(Resource, Debug)]
pub struct TextureRng(pub ChaCha8Rng);

impl TextureRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for TextureRng {
    fn default() -> Self {
        Self::from_seed(None)
    }
}

/// Whether the engine is running. A startup failure disables every system
/// rather than leaving the host half-patched.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub enum EngineStatus {
    #[default]
    Active,
    Disabled(String),
}

impl EngineStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, EngineStatus::Active)
    }

    pub fn disable(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        error!("Alternative textures disabled: {}", reason);
        *self = EngineStatus::Disabled(reason);
    }
}

/// Run condition: returns true only while the engine has not been disabled.
pub fn engine_active(status: Res<EngineStatus>) -> bool {
    status.is_active()
}
