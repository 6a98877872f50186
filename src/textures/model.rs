//! Registered alternate-texture models.
//!
//! A `TextureModel` is the concrete, fully expanded form of a content-pack
//! descriptor: one per declared season and per aliased item.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::core::Season;

/// Tallest single image accepted for a vertical atlas. Taller sheets must be
/// supplied as split files.
pub const MAX_TEXTURE_HEIGHT: u32 = 16384;

/// Required width of wallpaper and flooring sheets.
pub const DECORATION_SHEET_WIDTH: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TextureType {
    Character,
    Flooring,
    Tree,
    FruitTree,
    Grass,
    Bush,
    GiantCrop,
    Building,
    Furniture,
    Craftable,
    Decoration,
    Crop,
    ArtifactSpot,
    Unknown,
}

impl TextureType {
    pub const ALL: [TextureType; 14] = [
        TextureType::Character,
        TextureType::Flooring,
        TextureType::Tree,
        TextureType::FruitTree,
        TextureType::Grass,
        TextureType::Bush,
        TextureType::GiantCrop,
        TextureType::Building,
        TextureType::Furniture,
        TextureType::Craftable,
        TextureType::Decoration,
        TextureType::Crop,
        TextureType::ArtifactSpot,
        TextureType::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextureType::Character => "Character",
            TextureType::Flooring => "Flooring",
            TextureType::Tree => "Tree",
            TextureType::FruitTree => "FruitTree",
            TextureType::Grass => "Grass",
            TextureType::Bush => "Bush",
            TextureType::GiantCrop => "GiantCrop",
            TextureType::Building => "Building",
            TextureType::Furniture => "Furniture",
            TextureType::Craftable => "Craftable",
            TextureType::Decoration => "Decoration",
            TextureType::Crop => "Crop",
            TextureType::ArtifactSpot => "ArtifactSpot",
            TextureType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TextureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextureType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextureType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown texture type '{}'", s))
    }
}

/// Which host state a single animation frame may be shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrameState {
    #[default]
    Any,
    /// Only while the entity is working (e.g. a machine processing input).
    Active,
    /// Only while the entity is idle.
    Idle,
}

impl FrameState {
    pub fn allows(&self, active: bool) -> bool {
        match self {
            FrameState::Any => true,
            FrameState::Active => active,
            FrameState::Idle => !active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnimationFrame {
    /// Column of the frame within the variation's row.
    pub frame: i32,
    /// Milliseconds the frame stays on screen.
    pub duration: u32,
    #[serde(default)]
    pub state: FrameState,
}

fn default_chance_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManualVariation {
    pub id: i32,
    #[serde(default = "default_chance_weight")]
    pub chance_weight: f64,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub animation: Vec<AnimationFrame>,
}

impl ManualVariation {
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }
}

/// Pixel rectangle inside a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceRect {
    /// Whether the whole rectangle lies inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x.checked_add(self.width).is_some_and(|right| right <= width)
            && self.y.checked_add(self.height).is_some_and(|bottom| bottom <= height)
    }
}

/// Backing pixels for a model.
#[derive(Debug, Clone)]
pub enum TextureSheet {
    /// One image per variation. Missing indices are unusable.
    Variations(BTreeMap<i32, Arc<RgbaImage>>),
    /// A single wallpaper/flooring sheet laid out as a grid.
    Decoration { sheet: Arc<RgbaImage>, columns: u32 },
}

impl Default for TextureSheet {
    fn default() -> Self {
        TextureSheet::Variations(BTreeMap::new())
    }
}

#[derive(Debug, Clone)]
pub struct TextureModel {
    pub owner: String,
    pub pack_name: String,
    pub author: String,
    pub item_name: String,
    pub item_id: Option<String>,
    pub texture_type: TextureType,
    pub season: Option<Season>,
    pub model_name: String,
    pub texture_id: String,
    pub texture_width: u32,
    pub texture_height: u32,
    pub variations: i32,
    pub default_variation: Option<i32>,
    pub manual_variations: Vec<ManualVariation>,
    pub keywords: Vec<String>,
    /// Path of the image the model was built from, relative to its pack.
    pub tile_sheet_path: String,
    pub sheet: TextureSheet,
}

impl TextureModel {
    /// Build the identity fields (`model_name`, `texture_id`) from the rest.
    pub fn with_identity(mut self) -> Self {
        self.model_name = model_name(self.texture_type, &self.item_name, self.season);
        self.texture_id = format!("{}.{}", self.owner, self.model_name);
        self
    }

    /// Unqualified `{Type}_{ItemName}` name shared by every season of this model.
    pub fn base_name(&self) -> String {
        model_name(self.texture_type, &self.item_name, None)
    }

    pub fn is_decoration(&self) -> bool {
        self.texture_type == TextureType::Decoration
    }

    pub fn is_floor(&self) -> bool {
        self.item_name.eq_ignore_ascii_case("Floor")
    }

    /// Whether `variation` is a selectable, non-base index for this model.
    pub fn contains_variation(&self, variation: i32) -> bool {
        (0..self.variations).contains(&variation)
    }

    /// Manual variations must be zero-indexed when present.
    pub fn is_manual_variations_valid(&self) -> bool {
        self.manual_variations
            .iter()
            .map(|v| v.id)
            .min()
            .is_none_or(|min| min == 0)
    }

    pub fn manual_variation(&self, variation: i32) -> Option<&ManualVariation> {
        self.manual_variations.iter().find(|v| v.id == variation)
    }

    /// Y offset of `variation` within the assembled vertical atlas.
    pub fn atlas_offset(&self, variation: i32) -> u32 {
        (variation.max(0) as u32).saturating_mul(self.texture_height)
    }

    /// Image holding `variation`, if it was populated at load.
    pub fn texture(&self, variation: i32) -> Option<&Arc<RgbaImage>> {
        match &self.sheet {
            TextureSheet::Variations(textures) => textures.get(&variation),
            TextureSheet::Decoration { sheet, .. } => {
                self.contains_variation(variation).then_some(sheet)
            }
        }
    }

    /// Rectangle of `variation` within the image returned by [`Self::texture`],
    /// or `None` when the rectangle would fall outside that image.
    pub fn source_rect(&self, variation: i32) -> Option<SourceRect> {
        let image = self.texture(variation)?;
        let (x, y) = match &self.sheet {
            TextureSheet::Variations(_) => (0, 0),
            TextureSheet::Decoration { columns, .. } => {
                let v = u32::try_from(variation).ok()?;
                (
                    (v % columns).checked_mul(self.texture_width)?,
                    (v / columns).checked_mul(self.texture_height)?,
                )
            }
        };

        let rect = SourceRect {
            x,
            y,
            width: self.texture_width,
            height: self.texture_height,
        };
        rect.fits_within(image.width(), image.height()).then_some(rect)
    }

    pub fn animation(&self, variation: i32) -> &[AnimationFrame] {
        self.manual_variation(variation)
            .map(|v| v.animation.as_slice())
            .unwrap_or(&[])
    }

    /// Only multi-frame animations need a clock.
    pub fn has_animation(&self, variation: i32) -> bool {
        self.animation(variation).len() > 1
    }

    pub fn frame_at(&self, variation: i32, index: usize) -> Option<&AnimationFrame> {
        self.animation(variation).get(index)
    }

    pub fn is_frame_valid(&self, variation: i32, index: usize, active: bool) -> bool {
        self.frame_at(variation, index)
            .is_some_and(|frame| frame.state.allows(active))
    }

    /// Next frame after `index` that may be shown in the given state, wrapping
    /// around. Falls back to the first frame when none qualifies.
    pub fn next_valid_frame(&self, variation: i32, index: usize, active: bool) -> usize {
        next_valid_frame(self.animation(variation), index, active)
    }

    /// One-line description used when dumping the catalog.
    pub fn describe(&self) -> String {
        format!(
            "{} [{}] from '{}' by {}: {}x{} px, {} variation(s), season {}, default {:?}, {} manual",
            self.texture_id,
            self.texture_type,
            self.pack_name,
            self.author,
            self.texture_width,
            self.texture_height,
            self.variations,
            self.season.map(|s| s.to_string()).unwrap_or_else(|| "all".to_string()),
            self.default_variation,
            self.manual_variations.len(),
        )
    }
}

/// `{Type}_{ItemName}` optionally suffixed with `_{Season}`.
pub fn model_name(texture_type: TextureType, item_name: &str, season: Option<Season>) -> String {
    match season {
        Some(season) => format!("{}_{}_{}", texture_type, item_name, season),
        None => format!("{}_{}", texture_type, item_name),
    }
}

pub fn next_valid_frame(frames: &[AnimationFrame], index: usize, active: bool) -> usize {
    if frames.is_empty() {
        return 0;
    }

    (1..=frames.len())
        .map(|step| (index + step) % frames.len())
        .find(|&candidate| frames[candidate].state.allows(active))
        .unwrap_or(0)
}

#[cfg(test)]
impl TextureModel {
    /// Minimal 16x16 model with one blank image per variation.
    pub(crate) fn fixture(
        owner: &str,
        texture_type: TextureType,
        item_name: &str,
        season: Option<Season>,
        variations: i32,
    ) -> Self {
        let textures = (0..variations)
            .map(|v| (v, Arc::new(RgbaImage::new(16, 16))))
            .collect();

        TextureModel {
            owner: owner.to_string(),
            pack_name: owner.to_string(),
            author: "Tester".to_string(),
            item_name: item_name.to_string(),
            item_id: None,
            texture_type,
            season,
            model_name: String::new(),
            texture_id: String::new(),
            texture_width: 16,
            texture_height: 16,
            variations,
            default_variation: None,
            manual_variations: Vec::new(),
            keywords: vec![owner.to_string()],
            tile_sheet_path: "Textures/Fixture/texture.png".to_string(),
            sheet: TextureSheet::Variations(textures),
        }
        .with_identity()
    }
}
