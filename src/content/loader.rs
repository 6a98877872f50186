//! Loader for content packs on disk.
//!
//! Layout: `<root>/<pack>/manifest.json` plus one folder per texture under
//! `<root>/<pack>/Textures/`, each holding a `texture.json` and either a
//! vertical `texture.png` or split `texture_<n>.png` files.

use bevy::prelude::*;
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::catalog::TextureCatalog;
use super::data::{CollectiveEntry, PackManifest, TextureDescriptor};
use super::error::{ContentLoadError, TextureLoadError};
use super::validation::{
    collective_entries, migrate_item_names, migrate_type, parse_seasons, validate_model,
};
use crate::core::ModConfig;
use crate::textures::{
    AtlasWarning, TextureModel, TextureSheet, TextureType, decoration_sheet, split_files,
    split_texture_index, split_vertical,
};

const MANIFEST_FILE: &str = "manifest.json";
const TEXTURES_DIR: &str = "Textures";
const DESCRIPTOR_FILE: &str = "texture.json";
const TEXTURE_FILE: &str = "texture.png";

/// What happened during the last (re)load.
#[derive(Resource, Debug, Default)]
pub struct LoadReport {
    pub packs: usize,
    pub models: usize,
    pub errors: Vec<ContentLoadError>,
    pub warnings: Vec<String>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Everything one texture folder contributes.
#[derive(Debug, Default)]
pub struct FolderOutcome {
    pub models: Vec<TextureModel>,
    pub warnings: Vec<AtlasWarning>,
}

/// Load every pack under `root` into a fresh catalog.
///
/// Failures are isolated per pack and per texture folder; they end up in the
/// report and never stop the rest of the load.
pub fn load_content_packs(root: &Path, config: &ModConfig) -> (TextureCatalog, LoadReport) {
    let started = Instant::now();
    let mut catalog = TextureCatalog::default();
    let mut report = LoadReport::default();

    let mut pack_dirs = match sub_directories(root) {
        Ok(dirs) => dirs,
        Err(e) => {
            report.errors.push(ContentLoadError {
                pack: root.display().to_string(),
                path: root.to_path_buf(),
                error: e.into(),
            });
            return (catalog, report);
        }
    };
    pack_dirs.sort();

    for pack_dir in pack_dirs {
        load_pack(&pack_dir, config, &mut catalog, &mut report);
    }

    report.models = catalog.len();
    trace!(
        "Finished loading all content packs in {:.2} seconds",
        started.elapsed().as_secs_f32()
    );

    (catalog, report)
}

fn load_pack(
    pack_dir: &Path,
    config: &ModConfig,
    catalog: &mut TextureCatalog,
    report: &mut LoadReport,
) {
    let started = Instant::now();
    let folder_name = pack_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let manifest = match read_manifest(pack_dir) {
        Ok(manifest) => manifest,
        Err(e) => {
            fail(report, &folder_name, &pack_dir.join(MANIFEST_FILE), e);
            return;
        }
    };
    debug!("Loading alternative textures from {} ({})", manifest.name, manifest.unique_id);

    let textures_dir = pack_dir.join(TEXTURES_DIR);
    let folders = match texture_folders(&textures_dir) {
        Ok(folders) if !folders.is_empty() => folders,
        Ok(_) => {
            fail(report, &manifest.name, &textures_dir, TextureLoadError::NoTextureFolders);
            return;
        }
        Err(e) => {
            fail(report, &manifest.name, &textures_dir, e.into());
            return;
        }
    };
    report.packs += 1;

    for folder in folders {
        if !folder.join(DESCRIPTOR_FILE).is_file() {
            // Intermediate folders only group textures.
            if sub_directories(&folder).is_ok_and(|dirs| dirs.is_empty()) {
                fail(report, &manifest.name, &folder, TextureLoadError::MissingDescriptor);
            }
            continue;
        }

        let relative = folder.strip_prefix(pack_dir).unwrap_or(&folder);
        match load_texture_folder(&manifest, &folder, relative, config) {
            Ok(outcome) => {
                for warning in outcome.warnings {
                    warn!("Warning for alternative texture from {}: {}", manifest.name, warning);
                    trace!("Warning raised for the following path: {}", folder.display());
                    report.warnings.push(format!("{}: {}", folder.display(), warning));
                }
                for model in outcome.models {
                    if config.output_texture_data_to_log {
                        trace!("{}", model.describe());
                    }
                    catalog.register(model);
                }
            }
            Err(e) => fail(report, &manifest.name, &folder, e),
        }
    }

    trace!(
        "[{}] finished loading in {:.2} seconds",
        manifest.name,
        started.elapsed().as_secs_f32()
    );
}

fn fail(report: &mut LoadReport, pack: &str, path: &Path, error: TextureLoadError) {
    warn!("Unable to add alternative texture from {}: {}", pack, error);
    trace!("Failure for {} located in the following path: {}", pack, path.display());
    report.errors.push(ContentLoadError {
        pack: pack.to_string(),
        path: path.to_path_buf(),
        error,
    });
}

pub fn read_manifest(pack_dir: &Path) -> Result<PackManifest, TextureLoadError> {
    let path = pack_dir.join(MANIFEST_FILE);
    if !path.is_file() {
        return Err(TextureLoadError::MissingManifest);
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn read_descriptor(folder: &Path) -> Result<TextureDescriptor, TextureLoadError> {
    let contents = fs::read_to_string(folder.join(DESCRIPTOR_FILE))?;
    Ok(serde_json::from_str(&contents)?)
}

/// Expand one `texture.json` into its models, one per season and item.
pub fn load_texture_folder(
    manifest: &PackManifest,
    folder: &Path,
    relative: &Path,
    config: &ModConfig,
) -> Result<FolderOutcome, TextureLoadError> {
    let mut descriptor = read_descriptor(folder)?;

    for (old, new) in migrate_item_names(&mut descriptor, config) {
        trace!(
            "The texture {} from {} has an outdated ItemName that was handled automatically: {} -> {}",
            new, manifest.name, old, new
        );
    }

    let migration = migrate_type(&descriptor.texture_type)?;
    if migration.migrated {
        trace!(
            "A texture from {} has an outdated Type that was handled automatically: {} -> {}",
            manifest.name, descriptor.texture_type, migration.texture_type
        );
    }
    if let Some(implied) = migration.implied_item_name {
        descriptor.item_name = Some(implied.to_string());
        descriptor.item_id = None;
        descriptor.collective_names.clear();
        descriptor.collective_ids.clear();
    }
    let texture_type = migration.texture_type;

    let entries = collective_entries(&descriptor)?;
    let seasons = parse_seasons(&descriptor.seasons)?;

    let mut keywords = descriptor.keywords.clone();
    keywords.push(manifest.unique_id.clone());
    let mut manual_variations = descriptor.manual_variations.clone();
    for variation in manual_variations.iter_mut() {
        variation.keywords.extend(keywords.iter().cloned());
    }
    let variations = if manual_variations.is_empty() {
        descriptor.variations
    } else {
        manual_variations.len() as i32
    };

    let template = TextureModel {
        owner: manifest.unique_id.clone(),
        pack_name: manifest.name.clone(),
        author: manifest.author.clone(),
        item_name: String::new(),
        item_id: None,
        texture_type,
        season: None,
        model_name: String::new(),
        texture_id: String::new(),
        texture_width: descriptor.texture_width,
        texture_height: descriptor.texture_height,
        variations,
        default_variation: descriptor.default_variation,
        manual_variations,
        keywords,
        tile_sheet_path: String::new(),
        sheet: TextureSheet::default(),
    };
    validate_model(&template)?;

    let is_floor = descriptor
        .item_name
        .as_deref()
        .is_some_and(|name| name.eq_ignore_ascii_case("Floor"));
    let (sheet, tile_sheet_path, warnings) =
        load_sheet(folder, relative, &template, is_floor)?;

    let mut outcome = FolderOutcome {
        models: Vec::with_capacity(seasons.len() * entries.len()),
        warnings,
    };

    for season in &seasons {
        for entry in &entries {
            let (item_name, item_id) = match entry {
                CollectiveEntry::Name(name) => (name.clone(), None),
                CollectiveEntry::Id(id) => (
                    descriptor.item_name.clone().unwrap_or_else(|| id.clone()),
                    Some(id.clone()),
                ),
            };
            // Grass packs always target the single grass item.
            let item_name = if texture_type == TextureType::Grass {
                "Grass".to_string()
            } else {
                item_name
            };

            let model = TextureModel {
                item_name,
                item_id,
                season: *season,
                tile_sheet_path: tile_sheet_path.clone(),
                sheet: sheet.clone(),
                ..template.clone()
            }
            .with_identity();
            outcome.models.push(model);
        }
    }

    Ok(outcome)
}

/// Decode the folder's image(s) once; every expanded model shares the result.
fn load_sheet(
    folder: &Path,
    relative: &Path,
    template: &TextureModel,
    is_floor: bool,
) -> Result<(TextureSheet, String, Vec<AtlasWarning>), TextureLoadError> {
    let single = folder.join(TEXTURE_FILE);
    if single.is_file() {
        let image = decode(&single)?;
        let path = relative.join(TEXTURE_FILE).display().to_string();
        let sheet = if template.is_decoration() {
            decoration_sheet(image, is_floor)?
        } else {
            TextureSheet::Variations(split_vertical(
                &image,
                template.texture_height,
                template.variations,
            )?)
        };
        return Ok((sheet, path, Vec::new()));
    }

    let files = split_file_paths(folder)?;
    let Some(first) = files.first() else {
        return Err(TextureLoadError::MissingTexture);
    };
    let path = relative.join(first).display().to_string();
    if template.is_decoration() {
        return Err(TextureLoadError::SplitDecoration);
    }

    let images = files
        .iter()
        .take(template.variations.max(1) as usize)
        .map(|file| decode(&folder.join(file)))
        .collect::<Result<Vec<_>, _>>()?;
    let mut outcome = split_files(images, template.variations, false)?;
    if files.len() > template.variations.max(1) as usize {
        outcome.warnings.push(AtlasWarning::MoreFilesThanVariations {
            files: files.len(),
            variations: template.variations,
        });
    }

    Ok((TextureSheet::Variations(outcome.textures), path, outcome.warnings))
}

fn decode(path: &Path) -> Result<RgbaImage, TextureLoadError> {
    Ok(image::open(path)?.to_rgba8())
}

/// `texture_<n>.png` file names in the folder, ordered by `n`.
fn split_file_paths(folder: &Path) -> Result<Vec<String>, TextureLoadError> {
    let mut files: Vec<(u32, String)> = fs::read_dir(folder)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            split_texture_index(&name).map(|index| (index, name))
        })
        .collect();
    files.sort();
    Ok(files.into_iter().map(|(_, name)| name).collect())
}

fn sub_directories(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

/// Every folder below `Textures`, depth first, in name order.
fn texture_folders(textures_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut folders = Vec::new();
    let mut pending = sub_directories(textures_dir)?;
    pending.sort_by(|a, b| b.cmp(a));

    while let Some(folder) = pending.pop() {
        let mut children = sub_directories(&folder)?;
        children.sort_by(|a, b| b.cmp(a));
        pending.extend(children);
        folders.push(folder);
    }

    Ok(folders)
}
