pub mod config;
pub mod coords;
pub mod field;
pub mod generator;
pub mod host;

pub use config::{ConfigWarning, GenerationConfig};
pub use coords::GridCell;
pub use field::CloudField;
pub use generator::{
    CloudFieldGenerator,
    CloudJitter,
    CoverageMask,
    CoverageNoise,
    FieldStats,
    JitterStream,
    PlacedCloud,
};
pub use host::{CloudHost, MemoryScene, NodeId, SceneNode, ShadowSettings};
