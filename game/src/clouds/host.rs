use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use cloudfield::{CloudFieldError, CloudHost, PlacedCloud, ShadowSettings};

use crate::clouds::types::CloudTemplate;

/// Spawns cloud chunks through `Commands`, so nothing shows up until the
/// command queue is applied.
pub struct EcsCloudHost<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    // children of the root when the system started, commands can't be queried
    live_children: usize,
}

impl<'a, 'w, 's> EcsCloudHost<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>, live_children: usize) -> Self {
        Self { commands, live_children }
    }
}

pub fn cloud_transform(cloud: &PlacedCloud) -> Transform {
    let rotation = cloud.rotation();
    Transform {
        translation: Vec3::new(cloud.position.x, cloud.position.y, cloud.position.z),
        rotation: Quat::from_xyzw(rotation.i, rotation.j, rotation.k, rotation.w),
        scale: Vec3::new(cloud.scale.x, cloud.scale.y, cloud.scale.z),
    }
}

impl CloudHost for EcsCloudHost<'_, '_, '_> {
    type Node = Entity;
    type Template = CloudTemplate;

    fn spawn_cloud(
        &mut self,
        template: &CloudTemplate,
        parent: Entity,
        cloud: &PlacedCloud,
        shadows: ShadowSettings,
    ) -> Result<Entity, CloudFieldError> {
        let mut entity = self.commands.spawn((
            Name::new(format!("Cloud {}x{}", cloud.cell.x, cloud.cell.y)),
            Mesh3d(template.mesh.clone()),
            MeshMaterial3d(template.material.clone()),
            cloud_transform(cloud),
            ChildOf(parent),
        ));
        if !shadows.cast_shadows {
            entity.insert(NotShadowCaster);
        }
        if !shadows.receive_shadows {
            entity.insert(NotShadowReceiver);
        }
        self.live_children += 1;
        Ok(entity.id())
    }

    fn despawn_children(&mut self, parent: Entity) -> Result<usize, CloudFieldError> {
        self.commands.entity(parent).despawn_related::<Children>();
        Ok(std::mem::take(&mut self.live_children))
    }
}
