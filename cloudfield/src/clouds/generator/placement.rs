use std::fmt;

use log::{debug, trace, warn};
use nalgebra::{UnitQuaternion, Vector3};

use crate::clouds::config::GenerationConfig;
use crate::clouds::coords::{cells, GridCell};
use super::coverage::CoverageNoise;
use super::jitter::{CloudJitter, JitterStream};

/// Extra squash on the vertical axis so chunks read as flat.
const FLATTEN: f32 = 0.8;

/// One cloud chunk, in coordinates local to the field root.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedCloud {
    pub cell: GridCell,
    pub position: Vector3<f32>,
    pub scale: Vector3<f32>,
    /// Rotation about the vertical axis only.
    pub yaw_degrees: f32,
    pub jitter: CloudJitter,
}

impl PlacedCloud {
    pub fn rotation(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.yaw_degrees.to_radians())
    }

    /// Size of the chunk before per-axis jitter and flattening.
    pub fn combined_scale(&self, cloud_scale: f32) -> f32 {
        cloud_scale * (self.jitter.size + 1.0)
    }
}

/// Scans the grid, keeps the cells under the coverage threshold and gives
/// each kept cell a jittered transform.
#[derive(Clone, Debug, Default)]
pub struct CloudFieldGenerator {
    noise: CoverageNoise,
}

impl CloudFieldGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_noise(noise: CoverageNoise) -> Self {
        Self { noise }
    }

    pub fn sample(&self, config: &GenerationConfig, cell: GridCell) -> f64 {
        self.noise.sample_cell(cell, config.side(), config.shape_scale)
    }

    pub fn accepts(&self, config: &GenerationConfig, cell: GridCell) -> bool {
        CoverageNoise::accepts(self.sample(config, cell), config.coverage_rate)
    }

    /// Runs one full pass. The jitter stream is seeded once here, so every
    /// draw depends on how many cells were accepted before it.
    pub fn generate(&self, config: &GenerationConfig) -> Vec<PlacedCloud> {
        for warning in config.warnings() {
            warn!("Cloud config: {}", warning);
        }

        let side = config.side();
        if side == 0 {
            debug!("Empty cloud grid (range {}, density {})", config.range, config.density);
            return Vec::new();
        }

        let mut stream = JitterStream::new(config.seed);
        let mut clouds = Vec::new();

        for cell in cells(side) {
            let sample = self.noise.sample_cell(cell, side, config.shape_scale);
            if !CoverageNoise::accepts(sample, config.coverage_rate) {
                continue;
            }

            let cloud = place_cloud(config, side, cell, &mut stream);
            trace!(
                "Cloud at ({}, {}): sample {:.3}, position {:?}",
                cell.x, cell.y, sample, cloud.position
            );
            clouds.push(cloud);
        }

        debug!(
            "Generated {} clouds on a {}x{} grid (seed {})",
            clouds.len(), side, side, config.seed
        );
        clouds
    }

    /// Which cells a pass would accept, without drawing any jitter.
    pub fn coverage_mask(&self, config: &GenerationConfig) -> CoverageMask {
        let side = config.side();
        let accepted = cells(side)
            .map(|cell| {
                let sample = self.noise.sample_cell(cell, side, config.shape_scale);
                CoverageNoise::accepts(sample, config.coverage_rate)
            })
            .collect();
        CoverageMask { side, accepted }
    }

    pub fn stats(&self, config: &GenerationConfig) -> FieldStats {
        self.coverage_mask(config).stats()
    }
}

fn place_cloud(
    config: &GenerationConfig,
    side: usize,
    cell: GridCell,
    stream: &mut JitterStream,
) -> PlacedCloud {
    let (x, z) = cell.to_local_xz(side, config.range);
    let jitter = CloudJitter::draw(stream);
    let y = jitter.height * config.thickness + config.height;

    let current_scale = config.cloud_scale * (jitter.size + 1.0);
    let scale = Vector3::new(
        current_scale * (jitter.x + 1.0),
        current_scale * (jitter.flatness() + 1.0) * FLATTEN,
        current_scale * (jitter.z + 1.0),
    );

    let yaw_degrees = stream.yaw_degrees();

    PlacedCloud {
        cell,
        position: Vector3::new(x, y, z),
        scale,
        yaw_degrees,
        jitter,
    }
}

/// Accepted cells of a grid, indexed `x * side + y`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageMask {
    side: usize,
    accepted: Vec<bool>,
}

impl CoverageMask {
    /// Rebuilds the mask from a finished pass, so callers holding the clouds
    /// don't have to sample the noise again.
    pub fn from_clouds(side: usize, clouds: &[PlacedCloud]) -> Self {
        let mut accepted = vec![false; side.saturating_mul(side)];
        for cloud in clouds {
            if cloud.cell.x < side && cloud.cell.y < side {
                accepted[cloud.cell.x * side + cloud.cell.y] = true;
            }
        }
        Self { side, accepted }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn is_accepted(&self, cell: GridCell) -> bool {
        if cell.x >= self.side || cell.y >= self.side {
            return false;
        }
        self.accepted[cell.x * self.side + cell.y]
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.iter().filter(|&&a| a).count()
    }

    pub fn stats(&self) -> FieldStats {
        FieldStats {
            side: self.side,
            cells: self.accepted.len(),
            accepted: self.accepted_count(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridCell, bool)> + '_ {
        cells(self.side).zip(self.accepted.iter().copied())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldStats {
    pub side: usize,
    pub cells: usize,
    pub accepted: usize,
}

impl FieldStats {
    pub fn coverage_fraction(&self) -> f64 {
        if self.cells == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.cells as f64
    }
}

impl fmt::Display for FieldStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} cells covered ({:.1}%) on a {}x{} grid",
            self.accepted,
            self.cells,
            self.coverage_fraction() * 100.0,
            self.side,
            self.side
        )
    }
}
