use serde::{Deserialize, Serialize};

/// One scale factor per item, each in `[1.0, max_scale]`.
///
/// Only the magnification engine builds these, and always as a whole;
/// there is no way to change a single entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleVector(Vec<f64>);

impl ScaleVector {
    /// Every item at rest.
    pub fn ones(len: usize) -> Self {
        Self(vec![1.0; len])
    }

    pub(crate) fn from_vec(scales: Vec<f64>) -> Self {
        Self(scales)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, f64>> {
        self.0.iter().copied()
    }

    /// True when no item is magnified.
    pub fn is_rest(&self) -> bool {
        self.0.iter().all(|&s| s == 1.0)
    }
}

/// Left edge of each item plus the container width, derived from a
/// [`ScaleVector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionVector {
    offsets: Vec<f64>,
    container_width: f64,
}

impl PositionVector {
    pub(crate) fn new(offsets: Vec<f64>, container_width: f64) -> Self {
        Self {
            offsets,
            container_width,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.offsets.get(index).copied()
    }

    /// Scaled item widths, gaps between items, and padding on both sides.
    pub fn container_width(&self) -> f64 {
        self.container_width
    }
}
