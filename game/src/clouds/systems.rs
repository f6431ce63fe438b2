use bevy::prelude::*;
use cloudfield::CloudField;

use crate::clouds::{
    host::EcsCloudHost,
    types::{ActiveCloudField, CloudFieldRoot, CloudFieldSettings, CloudTemplate},
};

/// Startup: build the template, spawn the root and run the first pass.
pub fn setup_cloud_field(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<CloudFieldSettings>,
) {
    let template = CloudTemplate {
        mesh: meshes.add(Sphere::new(0.5)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, 0.85),
            perceptual_roughness: 1.0,
            alpha_mode: AlphaMode::Blend,
            ..default()
        }),
    };

    let root = commands
        .spawn((
            Name::new("CloudGroup"),
            CloudFieldRoot,
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let mut field = CloudField::new(root, template, settings.config);
    field.set_editing(settings.is_editing);

    let mut host = EcsCloudHost::new(&mut commands, 0);
    if let Err(err) = field.initialize(&mut host) {
        error!("Cloud field setup failed: {}", err);
    }

    commands.insert_resource(ActiveCloudField(field));
}

/// Update: `E` toggles live editing, `R` reseeds and regenerates once.
/// While live editing is on the whole field is rebuilt every frame.
pub fn cloud_field_controls(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<CloudFieldSettings>,
    mut field: ResMut<ActiveCloudField>,
    roots: Query<&Children, With<CloudFieldRoot>>,
) {
    if keys.just_pressed(KeyCode::KeyE) {
        settings.is_editing = !settings.is_editing;
        info!("Cloud live editing {}", if settings.is_editing { "on" } else { "off" });
    }

    let reseed = keys.just_pressed(KeyCode::KeyR);
    if reseed {
        settings.config.seed = settings.config.seed.wrapping_add(1);
        info!("Reseeding clouds with {}", settings.config.seed);
    }

    if settings.is_changed() {
        field.0.set_config(settings.config);
        field.0.set_editing(settings.is_editing);
    }

    let live_children = roots.get(field.0.root()).map_or(0, |children| children.len());
    let mut host = EcsCloudHost::new(&mut commands, live_children);

    let result = if reseed && !field.0.is_editing() {
        field.0.regenerate(&mut host).map(Some)
    } else {
        field.0.update(&mut host)
    };

    if let Err(err) = result {
        error!("Cloud field update failed: {}", err);
    }
}
