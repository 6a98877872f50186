use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use std::path::PathBuf;

use alternative_textures::AlternativeTexturesPlugin;

fn main() {
    let mut args = std::env::args().skip(1);
    let defaults = AlternativeTexturesPlugin::default();
    let content_root = args.next().map(PathBuf::from).unwrap_or(defaults.content_root);
    let config_path = args.next().map(PathBuf::from).unwrap_or(defaults.config_path);

    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_once()))
        .add_plugins(LogPlugin::default())
        .add_plugins(AlternativeTexturesPlugin {
            content_root,
            config_path,
        })
        .run();
}
