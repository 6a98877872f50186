//! Core domain: host clock messages.

use bevy::ecs::message::Message;

use crate::core::resources::Season;

/// Sent by the host when the simulated location changes season.
#[derive(Debug, Clone, Copy)]
pub struct SeasonChanged {
    pub season: Season,
}

impl Message for SeasonChanged {}

/// Sent by the host at the start of each in-game day.
#[derive(Debug, Clone, Copy)]
pub struct DayStarted;

impl Message for DayStarted {}
