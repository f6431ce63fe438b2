use bevy::prelude::*;
use cloudfield::{CloudField, GenerationConfig};

/// Designer-facing knobs. Editing the config only shows up on screen while
/// `is_editing` is on, or after a forced regeneration.
#[derive(Resource, Clone, Default)]
pub struct CloudFieldSettings {
    pub config: GenerationConfig,
    pub is_editing: bool,
}

/// What gets instantiated for every cloud chunk.
#[derive(Clone)]
pub struct CloudTemplate {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Marker for the entity every cloud chunk is parented to.
#[derive(Component)]
pub struct CloudFieldRoot;

#[derive(Resource)]
pub struct ActiveCloudField(pub CloudField<Entity, CloudTemplate>);
