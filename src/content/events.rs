//! Content domain: reload requests and load notifications.

use bevy::ecs::message::Message;

/// Ask the engine to rebuild the catalog from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReloadTexturesRequested;

impl Message for ReloadTexturesRequested {}

/// Fired after every (re)load with the size of the new catalog.
#[derive(Debug, Clone, Copy)]
pub struct ContentPacksLoaded {
    pub models: usize,
    pub errors: usize,
}

impl Message for ContentPacksLoaded {}
