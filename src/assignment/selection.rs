//! Assignment domain: picking a variation within a model.

use rand::Rng;

use crate::textures::{ManualVariation, TextureModel};

/// Pick a variation for `model`. `-1` means "keep the host's base texture".
///
/// A fixed default wins outright. Otherwise manual variations compete by
/// weight, optionally restricted to those sharing one of `keywords`. With no
/// manual entry surviving the weight roll, the draw is uniform over
/// `[-1, variations)`.
pub fn select_variation(model: &TextureModel, keywords: &[String], rng: &mut impl Rng) -> i32 {
    if let Some(default) = model.default_variation {
        return default;
    }

    if !model.manual_variations.is_empty() {
        if let Some(variation) = weighted_manual_selection(model, keywords, rng) {
            return variation;
        }
    }

    rng.random_range(-1..model.variations.max(0))
}

fn weighted_manual_selection(
    model: &TextureModel,
    keywords: &[String],
    rng: &mut impl Rng,
) -> Option<i32> {
    let pool = model
        .manual_variations
        .iter()
        .filter(|variation| keywords.is_empty() || keywords.iter().any(|k| variation.has_keyword(k)));

    // Each entry rolls its own draw.
    let kept: Vec<&ManualVariation> = pool
        .filter(|variation| variation.chance_weight > rng.random::<f64>())
        .collect();
    if kept.is_empty() {
        return None;
    }

    let declares_base = model.manual_variations.iter().any(|v| v.id == -1);
    let lower = if declares_base { 0 } else { -1 };
    let draw = rng.random_range(lower..kept.len() as i32);

    Some(if draw == -1 { -1 } else { kept[draw as usize].id })
}
