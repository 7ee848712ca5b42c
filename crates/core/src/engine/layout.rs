use crate::config::DockConfig;
use crate::model::{PositionVector, ScaleVector};

/// Lay items out left to right from the container padding, each taking its
/// scaled width plus the gap.
///
/// The container width counts gaps only between items, so an empty dock is
/// just its padding.
pub fn compute_positions(scales: &ScaleVector, config: &DockConfig) -> PositionVector {
    let mut offsets = Vec::with_capacity(scales.len());
    let mut cursor = config.container_padding;
    for scale in scales.iter() {
        offsets.push(cursor);
        cursor += config.base_width * scale + config.gap;
    }

    let items_width: f64 = scales.iter().map(|s| config.base_width * s).sum();
    let gaps = scales.len().saturating_sub(1) as f64 * config.gap;
    let container_width = items_width + gaps + 2.0 * config.container_padding;

    PositionVector::new(offsets, container_width)
}

/// The item whose scaled span covers container-relative `x`.
///
/// Overlapping items are painted left to right, so the right-most match is
/// the one on top.
pub fn item_at(
    x: f64,
    scales: &ScaleVector,
    positions: &PositionVector,
    config: &DockConfig,
) -> Option<usize> {
    if !x.is_finite() {
        return None;
    }
    positions
        .as_slice()
        .iter()
        .zip(scales.iter())
        .enumerate()
        .rev()
        .find(|&(_, (&left, scale))| x >= left && x < left + config.base_width * scale)
        .map(|(index, _)| index)
}
