//! Error types for content-pack loading.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single texture folder could not be registered.
#[derive(Debug, Error)]
pub enum TextureLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("missing the ItemName, ItemId, CollectiveNames or CollectiveIds property")]
    MissingItemName,
    #[error("unknown texture type '{0}'")]
    UnknownType(String),
    #[error("no associated texture.png or split textures (texture_1.png, texture_2.png, etc.) given")]
    MissingTexture,
    #[error("split textures (texture_1.png, texture_2.png, etc.) are not allowed for Decoration types (wallpapers / floors)")]
    SplitDecoration,
    #[error("the texture has a height of {height}, larger than 16384; split it into individual textures (texture_0.png, texture_1.png, etc.)")]
    OversizedAtlas { height: u32 },
    #[error("the required image width is 256 for Decoration types (wallpapers / floors), found {width}")]
    DecorationWidth { width: u32 },
    #[error("more variations specified ({declared}) than given ({available})")]
    TooManyVariations { declared: i32, available: u32 },
    #[error("invalid geometry: texture height {texture_height}, {variations} variation(s)")]
    InvalidDimensions { texture_height: u32, variations: i32 },
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("ManualVariations is used but does not start with ID == 0 (the property should be zero-indexed)")]
    ManualVariationsNotZeroIndexed,
    #[error("DefaultVariation {default} is outside [-1, {variations})")]
    DefaultVariationOutOfRange { default: i32, variations: i32 },
    #[error("season error: {0}")]
    Season(String),
    #[error("missing manifest.json")]
    MissingManifest,
    #[error("no sub-folders found under Textures")]
    NoTextureFolders,
    #[error("missing a texture.json")]
    MissingDescriptor,
}

/// A load failure with the pack and path it happened in.
#[derive(Debug, Error)]
#[error("Failed to load {pack} ({}): {error}", .path.display())]
pub struct ContentLoadError {
    pub pack: String,
    pub path: PathBuf,
    #[source]
    pub error: TextureLoadError,
}
