use bevy::prelude::*;
use cloudfield::GenerationConfig;

use crate::clouds::{
    types::CloudFieldSettings,
    systems::{setup_cloud_field, cloud_field_controls},
};

/// Looked up next to the working directory; defaults are used when missing.
const CONFIG_PATH: &str = "clouds.toml";

pub struct CloudFieldPlugin;
impl Plugin for CloudFieldPlugin {
    fn build(&self, app: &mut App) {
        let config = match GenerationConfig::load(CONFIG_PATH) {
            Ok(config) => config,
            Err(err) => {
                info!("Using default cloud config ({})", err);
                GenerationConfig::default()
            }
        };

        app
            .insert_resource(CloudFieldSettings { config, is_editing: false })
            .add_systems(Startup, setup_cloud_field)
            .add_systems(Update, cloud_field_controls);
    }
}
