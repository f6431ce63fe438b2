use noise::{NoiseFn, Perlin};

use crate::clouds::coords::GridCell;

/// Largest value a coverage sample can take. Kept below one so that a
/// coverage rate of exactly one accepts every cell.
pub const MAX_SAMPLE: f64 = 1.0 - f64::EPSILON;

/// Smooth 2D noise deciding which cells get a cloud.
///
/// Neighbouring cells sample nearby points of a continuous field, so the
/// accepted cells form connected patches instead of independent coin flips.
#[derive(Clone, Debug)]
pub struct CoverageNoise {
    noise: Perlin,
}

impl Default for CoverageNoise {
    fn default() -> Self {
        Self::with_seed(Perlin::DEFAULT_SEED)
    }
}

impl CoverageNoise {
    pub fn new() -> Self {
        Self::default()
    }

    /// A different permutation of the same noise, for fields that should not
    /// share a coverage pattern.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
        }
    }

    /// Noise value in `[0, MAX_SAMPLE]` at a point of noise space.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let perlin_value = self.noise.get([x, y]);
        (perlin_value * 0.5 + 0.5).clamp(0.0, MAX_SAMPLE)
    }

    pub fn sample_cell(&self, cell: GridCell, side: usize, shape_scale: f64) -> f64 {
        let (u, v) = cell.normalized(side);
        self.sample(u * shape_scale, v * shape_scale)
    }

    pub fn accepts(sample: f64, coverage_rate: f64) -> bool {
        sample < coverage_rate
    }
}
