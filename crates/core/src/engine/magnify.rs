use crate::config::DockConfig;
use crate::model::ScaleVector;

/// Horizontal center of item `index` if every item were unscaled.
pub fn rest_center(index: usize, config: &DockConfig) -> f64 {
    index as f64 * config.rest_stride() + config.base_width / 2.0
}

/// Linear falloff from `max_scale` at distance 0 to 1.0 at `max_distance`.
pub fn scale_for_distance(distance: f64, config: &DockConfig) -> f64 {
    if !distance.is_finite() || distance > config.max_distance {
        return 1.0;
    }
    let falloff = 1.0 - distance / config.max_distance;
    1.0 + falloff * (config.max_scale - 1.0)
}

/// Scale every item for a pointer at `pointer_x`, measured from the
/// container's content edge (left edge plus padding).
///
/// A missing or non-finite pointer position means the container could not
/// be measured; every item stays at rest.
pub fn compute_scales(pointer_x: Option<f64>, len: usize, config: &DockConfig) -> ScaleVector {
    let Some(x) = pointer_x.filter(|x| x.is_finite()) else {
        return ScaleVector::ones(len);
    };
    let scales = (0..len)
        .map(|i| scale_for_distance((x - rest_center(i, config)).abs(), config))
        .collect();
    ScaleVector::from_vec(scales)
}
