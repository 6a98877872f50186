//! Core domain: season, configuration, randomness and engine status.

pub mod config;
pub mod events;
pub mod resources;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

pub use config::{ConfigError, ModConfig};
pub use events::{DayStarted, SeasonChanged};
pub use resources::{CurrentSeason, EngineStatus, Season, TextureRng, engine_active};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentSeason>()
            .init_resource::<EngineStatus>()
            .init_resource::<ModConfig>()
            .add_message::<SeasonChanged>()
            .add_message::<DayStarted>()
            .add_systems(PreUpdate, track_current_season);
    }
}

/// Keep `CurrentSeason` in step with the host's season messages.
fn track_current_season(
    mut season_events: MessageReader<SeasonChanged>,
    mut current: ResMut<CurrentSeason>,
) {
    for event in season_events.read() {
        if current.0 != event.season {
            info!("Season changed: {} -> {}", current.0, event.season);
        }
        current.0 = event.season;
    }
}
