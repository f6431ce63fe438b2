mod coverage;
mod jitter;
mod placement;

pub use coverage::{CoverageNoise, MAX_SAMPLE};
pub use jitter::{CloudJitter, JitterStream};
pub use placement::{
    CloudFieldGenerator,
    CoverageMask,
    FieldStats,
    PlacedCloud,
};

#[cfg(test)]
mod tests;
