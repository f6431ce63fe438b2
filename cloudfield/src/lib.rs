pub mod clouds;
pub mod error;

pub use clouds::{
    CloudField,
    CloudFieldGenerator,
    CloudHost,
    GenerationConfig,
    MemoryScene,
    PlacedCloud,
    ShadowSettings,
};
pub use error::CloudFieldError;
