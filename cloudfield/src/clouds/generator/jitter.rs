use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Integer draws are divided by this to get small fractional offsets.
const QUANTUM: f32 = 512.0;

/// Seeded random stream owned by a single generation pass.
///
/// Draws are quantised integers so the sequence depends only on the seed and
/// on the order of calls.
#[derive(Clone, Debug)]
pub struct JitterStream {
    rng: ChaCha8Rng,
}

impl JitterStream {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `[min, max)`. Returns `min` for an empty range.
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Symmetric offset in `[-255/512, 255/512]`, scaled by thickness later.
    pub fn height_offset(&mut self) -> f32 {
        self.range(-255, 256) as f32 / QUANTUM
    }

    /// Symmetric offset in `[-127/512, 127/512]`.
    pub fn axis_jitter(&mut self) -> f32 {
        self.range(-127, 128) as f32 / QUANTUM
    }

    /// Whole degrees in `[0, 180)`. Clouds are symmetric enough that half a
    /// turn covers every look.
    pub fn yaw_degrees(&mut self) -> f32 {
        self.range(0, 180) as f32
    }
}

/// The draws that shape one cloud.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudJitter {
    pub height: f32,
    pub x: f32,
    pub z: f32,
    pub size: f32,
}

impl CloudJitter {
    /// Draws height, x, z and size, in that order.
    pub fn draw(stream: &mut JitterStream) -> Self {
        let height = stream.height_offset();
        let x = stream.axis_jitter();
        let z = stream.axis_jitter();
        let size = stream.axis_jitter();
        Self { height, x, z, size }
    }

    /// Vertical jitter. Taking the smaller horizontal draw biases chunks flat.
    pub fn flatness(&self) -> f32 {
        self.x.min(self.z)
    }
}
