// src/clouds/host.rs

use std::collections::BTreeMap;
use std::fmt;

use nalgebra::{UnitQuaternion, Vector3};

use crate::clouds::generator::PlacedCloud;
use crate::error::CloudFieldError;

/// Per-instance shadow toggles handed to the host renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShadowSettings {
    pub cast_shadows: bool,
    pub receive_shadows: bool,
}

impl ShadowSettings {
    /// Clouds neither cast nor receive shadows.
    pub fn disabled() -> Self {
        Self {
            cast_shadows: false,
            receive_shadows: false,
        }
    }
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            cast_shadows: true,
            receive_shadows: true,
        }
    }
}

/// The scene a cloud field is instantiated into.
///
/// Spawned instances belong to the host; the field only remembers the parent
/// node they were attached to.
pub trait CloudHost {
    type Node: Copy + Eq + fmt::Debug;
    /// Opaque handle of whatever gets instantiated per cloud.
    type Template;

    /// Instantiates `template` under `parent` using the cloud's local transform.
    fn spawn_cloud(
        &mut self,
        template: &Self::Template,
        parent: Self::Node,
        cloud: &PlacedCloud,
        shadows: ShadowSettings,
    ) -> Result<Self::Node, CloudFieldError>;

    /// Destroys every descendant of `parent` and returns how many direct
    /// children were removed.
    fn despawn_children(&mut self, parent: Self::Node) -> Result<usize, CloudFieldError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub position: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub shadows: ShadowSettings,
}

impl SceneNode {
    fn root(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            parent: None,
            position: Vector3::zeros(),
            scale: Vector3::repeat(1.0),
            rotation: UnitQuaternion::identity(),
            shadows: ShadowSettings::default(),
        }
    }
}

/// Scene graph kept entirely in memory. Templates are plain names.
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: BTreeMap<NodeId, SceneNode>,
    next_id: u32,
    node_limit: Option<usize>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene that refuses to hold more than `limit` nodes, roots included.
    pub fn with_node_limit(limit: usize) -> Self {
        Self {
            node_limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn create_root(&mut self, name: &str) -> NodeId {
        self.insert(SceneNode::root(name))
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = (NodeId, &SceneNode)> + '_ {
        self.nodes
            .iter()
            .filter(move |(_, node)| node.parent == Some(parent))
            .map(|(&id, node)| (id, node))
    }

    pub fn child_count(&self, parent: NodeId) -> usize {
        self.children(parent).count()
    }

    /// Children of `parent` in a canonical order, for comparing two scenes
    /// as multisets of transforms.
    pub fn transforms_under(&self, parent: NodeId) -> Vec<SceneNode> {
        let mut nodes: Vec<SceneNode> = self.children(parent).map(|(_, node)| node.clone()).collect();
        nodes.sort_by(|a, b| {
            a.position.x
                .total_cmp(&b.position.x)
                .then(a.position.z.total_cmp(&b.position.z))
                .then(a.position.y.total_cmp(&b.position.y))
        });
        nodes
    }

    fn insert(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let children: Vec<NodeId> = self.children(id).map(|(child, _)| child).collect();
        for child in children {
            self.remove_subtree(child);
        }
        self.nodes.remove(&id);
    }
}

impl CloudHost for MemoryScene {
    type Node = NodeId;
    type Template = String;

    fn spawn_cloud(
        &mut self,
        template: &String,
        parent: NodeId,
        cloud: &PlacedCloud,
        shadows: ShadowSettings,
    ) -> Result<NodeId, CloudFieldError> {
        if !self.nodes.contains_key(&parent) {
            return Err(CloudFieldError::UnknownParent(parent.to_string()));
        }
        if let Some(limit) = self.node_limit {
            if self.nodes.len() >= limit {
                return Err(CloudFieldError::Host(format!("scene is full ({} nodes)", limit)));
            }
        }

        Ok(self.insert(SceneNode {
            name: template.clone(),
            parent: Some(parent),
            position: cloud.position,
            scale: cloud.scale,
            rotation: cloud.rotation(),
            shadows,
        }))
    }

    fn despawn_children(&mut self, parent: NodeId) -> Result<usize, CloudFieldError> {
        if !self.nodes.contains_key(&parent) {
            return Err(CloudFieldError::UnknownParent(parent.to_string()));
        }
        let children: Vec<NodeId> = self.children(parent).map(|(child, _)| child).collect();
        for &child in &children {
            self.remove_subtree(child);
        }
        Ok(children.len())
    }
}
