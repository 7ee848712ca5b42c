use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ItemSpec;

/// Upper bound for each animation timing field: one minute.
const MAX_TIMING_MS: u64 = 60_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be {requirement}, got {value}")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
    #[error("item {index} has an empty label")]
    EmptyLabel { index: usize },
}

/// Geometry, timing, and item list for one dock.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    /// Unscaled item width (and height).
    pub base_width: f64,
    /// Space between adjacent items. Negative values overlap items at rest.
    pub gap: f64,
    /// Scale of an item with the pointer exactly on its rest center.
    pub max_scale: f64,
    /// Pointer distance beyond which an item is not magnified.
    pub max_distance: f64,
    pub container_padding: f64,
    pub corner_radius: f64,
    /// How long the bounce animation plays after a click.
    pub jump_visual_ms: u64,
    /// Extra time after the bounce before tooltips come back.
    pub bounce_settle_ms: u64,
    /// Peak vertical displacement of the first bounce.
    pub bounce_height: f64,
    /// Distance between the top of an icon and the tooltip's pointer.
    pub tooltip_offset: f64,
    pub items: Vec<ItemSpec>,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            base_width: 64.0,
            gap: -10.0,
            max_scale: 2.0,
            max_distance: 80.0,
            container_padding: 0.0,
            corner_radius: 16.0,
            jump_visual_ms: 1800,
            bounce_settle_ms: 600,
            bounce_height: 24.0,
            tooltip_offset: 50.0,
            items: ItemSpec::default_set(),
        }
    }
}

impl DockConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(
            path = %path.display(),
            items = config.items.len(),
            "loaded dock config"
        );
        Ok(config)
    }

    /// Reject values the engines cannot work with.
    ///
    /// A positive rest stride (`base_width + gap`) together with
    /// `max_scale >= 1` keeps every scaled stride positive, so layouts are
    /// strictly increasing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("base_width", self.base_width)?;
        positive("max_distance", self.max_distance)?;
        positive("base_width + gap", self.base_width + self.gap)?;
        if !(self.max_scale >= 1.0 && self.max_scale.is_finite()) {
            return Err(ConfigError::OutOfRange {
                field: "max_scale",
                requirement: "at least 1.0",
                value: self.max_scale,
            });
        }
        non_negative("container_padding", self.container_padding)?;
        non_negative("corner_radius", self.corner_radius)?;
        non_negative("bounce_height", self.bounce_height)?;
        non_negative("tooltip_offset", self.tooltip_offset)?;
        at_most_a_minute("jump_visual_ms", self.jump_visual_ms)?;
        at_most_a_minute("bounce_settle_ms", self.bounce_settle_ms)?;
        if let Some(index) = self.items.iter().position(|i| i.label.trim().is_empty()) {
            return Err(ConfigError::EmptyLabel { index });
        }
        Ok(())
    }

    /// Center-to-center distance of two neighbours at rest.
    pub fn rest_stride(&self) -> f64 {
        self.base_width + self.gap
    }

    /// Total time from a click until jumping clears and tooltips return.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.jump_visual_ms.saturating_add(self.bounce_settle_ms))
    }

    pub fn jump_visual_duration(&self) -> Duration {
        Duration::from_millis(self.jump_visual_ms)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            requirement: "positive",
            value,
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            requirement: "non-negative",
            value,
        })
    }
}

fn at_most_a_minute(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value <= MAX_TIMING_MS {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            requirement: "at most 60000 ms",
            value: value as f64,
        })
    }
}
