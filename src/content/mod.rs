//! Content domain: content-pack parsing, validation and the texture catalog.

pub mod catalog;
pub mod data;
pub mod error;
pub mod events;
pub mod loader;
#[cfg(test)]
mod tests;
pub mod validation;

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use std::path::PathBuf;

pub use catalog::TextureCatalog;
pub use data::{CollectiveEntry, PackManifest, TextureDescriptor};
pub use error::{ContentLoadError, TextureLoadError};
pub use events::{ContentPacksLoaded, ReloadTexturesRequested};
pub use loader::{LoadReport, load_content_packs};

use crate::core::{EngineStatus, ModConfig, engine_active};

/// Directory holding one sub-folder per content pack.
#[derive(Resource, Debug, Clone)]
pub struct ContentRoot(pub PathBuf);

pub struct ContentPlugin {
    pub content_root: PathBuf,
}

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ContentRoot(self.content_root.clone()))
            .init_resource::<TextureCatalog>()
            .init_resource::<LoadReport>()
            .add_message::<ReloadTexturesRequested>()
            .add_message::<ContentPacksLoaded>()
            .add_systems(Startup, load_textures_at_startup)
            .add_systems(Update, reload_textures.run_if(engine_active));
    }
}

fn load_textures_at_startup(
    root: Res<ContentRoot>,
    config: Res<ModConfig>,
    mut catalog: ResMut<TextureCatalog>,
    mut report: ResMut<LoadReport>,
    mut status: ResMut<EngineStatus>,
    mut loaded: MessageWriter<ContentPacksLoaded>,
) {
    if !root.0.is_dir() {
        status.disable(format!(
            "content root {} is not a readable directory",
            root.0.display()
        ));
        return;
    }

    rebuild_catalog(&root, &config, &mut catalog, &mut report, &mut loaded);
}

fn reload_textures(
    mut requests: MessageReader<ReloadTexturesRequested>,
    root: Res<ContentRoot>,
    config: Res<ModConfig>,
    mut catalog: ResMut<TextureCatalog>,
    mut report: ResMut<LoadReport>,
    mut loaded: MessageWriter<ContentPacksLoaded>,
) {
    // Several requests in one frame collapse into a single reload.
    if requests.read().count() == 0 {
        return;
    }

    info!("Reloading alternative textures from {}", root.0.display());
    rebuild_catalog(&root, &config, &mut catalog, &mut report, &mut loaded);
}

fn rebuild_catalog(
    root: &ContentRoot,
    config: &ModConfig,
    catalog: &mut TextureCatalog,
    report: &mut LoadReport,
    loaded: &mut MessageWriter<ContentPacksLoaded>,
) {
    let (fresh, fresh_report) = load_content_packs(&root.0, config);

    if fresh_report.errors.is_empty() {
        info!("{}", fresh.summary());
    } else {
        warn!(
            "{} ({} content error(s), see above)",
            fresh.summary(),
            fresh_report.errors.len()
        );
    }

    loaded.write(ContentPacksLoaded {
        models: fresh.len(),
        errors: fresh_report.errors.len(),
    });
    catalog.replace_with(fresh);
    *report = fresh_report;
}
