use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitSettings>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, orbit_camera);
    }
}

#[derive(Resource)]
pub struct OrbitSettings {
    pub radius: f32,
    pub elevation: f32,
    /// Radians per second while an arrow key is held.
    pub speed: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            radius: 140.0,
            elevation: -20.0,
            speed: 0.8,
        }
    }
}

/// Marker for the camera circling the cloud field
#[derive(Component, Default)]
pub struct OrbitCamera {
    angle: f32,
}

fn orbit_transform(settings: &OrbitSettings, angle: f32) -> Transform {
    let eye = Vec3::new(angle.sin() * settings.radius, settings.elevation, angle.cos() * settings.radius);
    // look up at the underside of the clouds
    Transform::from_translation(eye).looking_at(Vec3::new(0.0, 10.0, 0.0), Vec3::Y)
}

fn setup_camera(mut commands: Commands, settings: Res<OrbitSettings>) {
    commands.spawn((
        Camera3d::default(),
        OrbitCamera::default(),
        orbit_transform(&settings, 0.0),
    ));
}

fn orbit_camera(
    settings: Res<OrbitSettings>,
    time: Res<Time>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut query: Query<(&mut Transform, &mut OrbitCamera)>,
) {
    let Ok((mut transform, mut orbit)) = query.single_mut() else {
        return;
    };

    let mut direction = 0.0;
    if keyboard_input.pressed(KeyCode::ArrowLeft) {
        direction -= 1.0;
    }
    if keyboard_input.pressed(KeyCode::ArrowRight) {
        direction += 1.0;
    }
    if direction == 0.0 {
        return;
    }

    orbit.angle += direction * settings.speed * time.delta_secs();
    *transform = orbit_transform(&settings, orbit.angle);
}
