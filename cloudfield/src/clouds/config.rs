// src/clouds/config.rs

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CloudFieldError;

/// Parameters for one generation pass.
///
/// Every field has a default, so a TOML file only needs the values it
/// changes. Out-of-range values are accepted as-is; see [`GenerationConfig::warnings`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Size of one chunk of cloud.
    pub cloud_scale: f32,
    /// Factor from normalized grid coordinates into noise space.
    /// Larger values break the coverage into more, smaller patches.
    pub shape_scale: f64,
    /// How far the clouds sprawl toward the skyline. The field is a square
    /// of side `range * 8` centred on the root.
    pub range: i32,
    /// Cells per unit of range. The higher it is, the stuffier the sky looks.
    pub density: i32,
    pub height: f32,
    /// Vertical spread of the chunks. Zero places them on a flat plane.
    pub thickness: f32,
    /// Noise threshold, roughly the proportion of sky covered.
    pub coverage_rate: f64,
    pub seed: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            cloud_scale: 17.0,
            shape_scale: 12.0,
            range: 32,
            density: 6,
            height: 10.0,
            thickness: 4.0,
            coverage_rate: 0.16,
            seed: 42,
        }
    }
}

impl GenerationConfig {
    /// Cells along each axis of the grid, `range * density`.
    /// Zero when either factor is non-positive or the product overflows.
    pub fn side(&self) -> usize {
        if self.range <= 0 || self.density <= 0 {
            return 0;
        }
        self.range
            .checked_mul(self.density)
            .map_or(0, |side| side as usize)
    }

    pub fn cell_count(&self) -> usize {
        let side = self.side();
        side.saturating_mul(side)
    }

    /// Non-fatal diagnostics for designer-supplied values.
    pub fn warnings(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.range <= 0 || self.density <= 0 {
            warnings.push(ConfigWarning::EmptyGrid {
                range: self.range,
                density: self.density,
            });
        } else if self.range.checked_mul(self.density).is_none() {
            warnings.push(ConfigWarning::GridOverflow {
                range: self.range,
                density: self.density,
            });
        }

        if !(0.0..=1.0).contains(&self.coverage_rate) {
            warnings.push(ConfigWarning::CoverageOutOfRange(self.coverage_rate));
        }

        if !self.shape_scale.is_finite() || self.shape_scale <= 0.0 {
            warnings.push(ConfigWarning::DegenerateShapeScale(self.shape_scale));
        }

        if self.thickness < 0.0 {
            warnings.push(ConfigWarning::NegativeThickness(self.thickness));
        }

        warnings
    }

    pub fn from_toml_str(source: &str) -> Result<Self, CloudFieldError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CloudFieldError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| CloudFieldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigWarning {
    EmptyGrid { range: i32, density: i32 },
    GridOverflow { range: i32, density: i32 },
    CoverageOutOfRange(f64),
    DegenerateShapeScale(f64),
    NegativeThickness(f32),
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::EmptyGrid { range, density } => write!(
                f,
                "range {} x density {} leaves no cells, the field will be empty",
                range, density
            ),
            ConfigWarning::GridOverflow { range, density } => write!(
                f,
                "range {} x density {} overflows the grid, the field will be empty",
                range, density
            ),
            ConfigWarning::CoverageOutOfRange(rate) => {
                write!(f, "coverage rate {} is outside [0, 1]", rate)
            }
            ConfigWarning::DegenerateShapeScale(scale) => write!(
                f,
                "shape scale {} collapses the noise pattern to a single sample",
                scale
            ),
            ConfigWarning::NegativeThickness(thickness) => {
                write!(f, "thickness {} is negative, vertical offsets are mirrored", thickness)
            }
        }
    }
}
