mod host;
mod plugin;
mod systems;
mod types;

pub use plugin::CloudFieldPlugin;
