//! Atlas assembly: turning content-pack images into per-variation textures.

use image::{RgbaImage, imageops};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::content::TextureLoadError;
use crate::textures::model::{DECORATION_SHEET_WIDTH, MAX_TEXTURE_HEIGHT, TextureSheet};

/// Non-fatal problems found while matching split files to variations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtlasWarning {
    /// Extra files beyond the declared variation count are ignored.
    MoreFilesThanVariations { files: usize, variations: i32 },
    /// Variations without a file stay unusable.
    FewerFilesThanVariations { files: usize, variations: i32 },
}

impl std::fmt::Display for AtlasWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtlasWarning::MoreFilesThanVariations { files, variations } => write!(
                f,
                "more split textures ({}) than specified variations ({})",
                files, variations
            ),
            AtlasWarning::FewerFilesThanVariations { files, variations } => write!(
                f,
                "fewer split textures ({}) than specified variations ({}); the rest are unusable",
                files, variations
            ),
        }
    }
}

#[derive(Debug, Default)]
pub struct SplitOutcome {
    pub textures: BTreeMap<i32, Arc<RgbaImage>>,
    pub warnings: Vec<AtlasWarning>,
}

/// Slice a vertically stacked sheet into one image per variation.
///
/// Row `v` covers `[0, v * texture_height, width, texture_height]`.
pub fn split_vertical(
    image: &RgbaImage,
    texture_height: u32,
    variations: i32,
) -> Result<BTreeMap<i32, Arc<RgbaImage>>, TextureLoadError> {
    if texture_height == 0 || variations < 1 {
        return Err(TextureLoadError::InvalidDimensions {
            texture_height,
            variations,
        });
    }

    let height = image.height();
    if height > MAX_TEXTURE_HEIGHT {
        return Err(TextureLoadError::OversizedAtlas { height });
    }

    let Some(stacked) = texture_height.checked_mul(variations as u32) else {
        return Err(TextureLoadError::InvalidDimensions {
            texture_height,
            variations,
        });
    };
    if height < stacked {
        return Err(TextureLoadError::TooManyVariations {
            declared: variations,
            available: height / texture_height,
        });
    }
    if height % stacked != 0 {
        return Err(TextureLoadError::DimensionMismatch(format!(
            "sheet height {} is not a multiple of {} ({} variation(s) of {} px)",
            height, stacked, variations, texture_height
        )));
    }

    let width = image.width();
    Ok((0..variations)
        .map(|v| {
            let row = imageops::crop_imm(image, 0, v as u32 * texture_height, width, texture_height);
            (v, Arc::new(row.to_image()))
        })
        .collect())
}

/// Stack equally wide images top to bottom.
pub fn stitch_vertical(images: &[&RgbaImage]) -> Result<RgbaImage, TextureLoadError> {
    let Some(first) = images.first() else {
        return Ok(RgbaImage::new(0, 0));
    };

    let width = first.width();
    if let Some(odd) = images.iter().find(|image| image.width() != width) {
        return Err(TextureLoadError::DimensionMismatch(format!(
            "cannot stitch a {} px wide image onto a {} px wide atlas",
            odd.width(),
            width
        )));
    }

    let height: u32 = images.iter().map(|image| image.height()).sum();
    let mut atlas = RgbaImage::new(width, height);
    let mut y = 0i64;
    for image in images {
        imageops::replace(&mut atlas, *image, 0, y);
        y += image.height() as i64;
    }

    Ok(atlas)
}

/// Wallpaper/flooring sheets are kept whole and addressed as a grid.
pub fn decoration_sheet(image: RgbaImage, is_floor: bool) -> Result<TextureSheet, TextureLoadError> {
    if image.width() != DECORATION_SHEET_WIDTH {
        return Err(TextureLoadError::DecorationWidth {
            width: image.width(),
        });
    }
    if image.height() > MAX_TEXTURE_HEIGHT {
        return Err(TextureLoadError::OversizedAtlas {
            height: image.height(),
        });
    }

    Ok(TextureSheet::Decoration {
        sheet: Arc::new(image),
        columns: if is_floor { 8 } else { 16 },
    })
}

/// Match ordered split files to variations: file `k` becomes variation `k`.
pub fn split_files(
    images: Vec<RgbaImage>,
    variations: i32,
    is_decoration: bool,
) -> Result<SplitOutcome, TextureLoadError> {
    if is_decoration {
        return Err(TextureLoadError::SplitDecoration);
    }
    if images.is_empty() {
        return Err(TextureLoadError::MissingTexture);
    }
    if variations < 1 {
        return Err(TextureLoadError::InvalidDimensions {
            texture_height: images[0].height(),
            variations,
        });
    }

    let mut outcome = SplitOutcome::default();
    let files = images.len();

    if files == 1 || variations == 1 {
        if variations == 1 && files > 1 {
            outcome
                .warnings
                .push(AtlasWarning::MoreFilesThanVariations { files, variations });
        }
        if let Some(first) = images.into_iter().next() {
            outcome.textures.insert(0, Arc::new(first));
        }
        if files == 1 && variations > 1 {
            outcome
                .warnings
                .push(AtlasWarning::FewerFilesThanVariations { files, variations });
        }
        return Ok(outcome);
    }

    let (width, height) = images[0].dimensions();
    if let Some(odd) = images.iter().find(|image| image.dimensions() != (width, height)) {
        return Err(TextureLoadError::DimensionMismatch(format!(
            "split texture of {}x{} differs from the first file's {}x{}",
            odd.width(),
            odd.height(),
            width,
            height
        )));
    }

    if files > variations as usize {
        outcome
            .warnings
            .push(AtlasWarning::MoreFilesThanVariations { files, variations });
    } else if files < variations as usize {
        outcome
            .warnings
            .push(AtlasWarning::FewerFilesThanVariations { files, variations });
    }

    outcome.textures = images
        .into_iter()
        .take(variations as usize)
        .enumerate()
        .map(|(v, image)| (v as i32, Arc::new(image)))
        .collect();

    Ok(outcome)
}

/// Index `n` of a split texture file named `texture_<n>.png`.
pub fn split_texture_index(file_name: &str) -> Option<u32> {
    let lower = file_name.to_ascii_lowercase();
    lower
        .strip_prefix("texture_")?
        .strip_suffix(".png")?
        .parse()
        .ok()
}
