//! Vertical displacement curve for the activation bounce.
//!
//! Three arches of decreasing height; the first is the tallest and longest,
//! like an icon dropped onto a shelf. Each arch eases out of the shelf and
//! back in with a half sine.

use crate::engine::JumpPhase;

/// (share of the animation, relative height) for each arch.
const ARCHES: [(f64, f64); 3] = [(0.45, 1.0), (0.33, 0.45), (0.22, 0.18)];

/// Height above the shelf at `progress` in `[0, 1]`, as a fraction of the
/// peak. Zero outside that range.
pub fn bounce_fraction(progress: f64) -> f64 {
    if !(0.0..1.0).contains(&progress) {
        return 0.0;
    }
    let mut start = 0.0;
    for (share, height) in ARCHES {
        let end = start + share;
        if progress < end {
            let local = (progress - start) / share;
            return height * (std::f64::consts::PI * local).sin();
        }
        start = end;
    }
    0.0
}

/// Upward displacement for an item in `phase`, given the peak height.
pub fn displacement(phase: Option<JumpPhase>, peak: f64) -> f64 {
    match phase {
        Some(JumpPhase::Bouncing { progress }) => bounce_fraction(progress).max(0.0) * peak,
        Some(JumpPhase::Settling) | None => 0.0,
    }
}
