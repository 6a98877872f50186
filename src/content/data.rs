//! Data definitions for content-pack JSON files.
//!
//! These structs mirror `manifest.json` and `Textures/**/texture.json` and are
//! only used for deserialization. The loader expands them into
//! [`TextureModel`](crate::textures::TextureModel)s.

use serde::{Deserialize, Serialize};

use crate::textures::ManualVariation;

// ============================================================================
// Pack manifest (manifest.json)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackManifest {
    pub name: String,
    #[serde(rename = "UniqueID")]
    pub unique_id: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
}

// ============================================================================
// Texture descriptor (texture.json)
// ============================================================================

fn default_variations() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextureDescriptor {
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub collective_names: Vec<String>,
    #[serde(default)]
    pub collective_ids: Vec<String>,
    #[serde(rename = "Type")]
    pub texture_type: String,
    #[serde(default)]
    pub seasons: Vec<String>,
    pub texture_width: u32,
    pub texture_height: u32,
    #[serde(default = "default_variations")]
    pub variations: i32,
    #[serde(default)]
    pub default_variation: Option<i32>,
    #[serde(default)]
    pub manual_variations: Vec<ManualVariation>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// One item a descriptor applies to, by display name or by item id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectiveEntry {
    Name(String),
    Id(String),
}
