//! Textures domain: registered models and atlas assembly.

pub mod atlas;
pub mod model;

pub use atlas::{
    AtlasWarning, SplitOutcome, decoration_sheet, split_files, split_texture_index,
    split_vertical, stitch_vertical,
};
pub use model::{
    AnimationFrame, DECORATION_SHEET_WIDTH, FrameState, MAX_TEXTURE_HEIGHT, ManualVariation,
    SourceRect, TextureModel, TextureSheet, TextureType, model_name, next_valid_frame,
};
