use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};

use super::body::BodyID;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeID(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    Root,
    /// The central star: a mesh at the origin, not attached to a pivot.
    Sun(BodyID),
    PointLight {
        color: [f32; 3],
        intensity: f32,
        range: f32,
    },
    /// Invisible anchor whose rotation carries its children around the origin.
    Pivot(BodyID),
    BodyMesh(BodyID),
    RingMesh(BodyID),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    parent: Option<NodeID>,
    children: Vec<NodeID>,
    translation: Translation3<f32>,
    rotation: UnitQuaternion<f32>,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeID>) -> Self {
        Node {
            kind,
            parent,
            children: vec![],
            translation: Translation3::identity(),
            rotation: UnitQuaternion::identity(),
        }
    }

    pub fn parent(&self) -> Option<NodeID> {
        self.parent
    }

    pub fn children(&self) -> &[NodeID] {
        &self.children
    }

    pub fn translation(&self) -> Vector3<f32> {
        self.translation.vector
    }

    pub fn rotation(&self) -> UnitQuaternion<f32> {
        self.rotation
    }

    /// Transform from this node's space into its parent's.
    pub fn local_transform(&self) -> Isometry3<f32> {
        Isometry3::from_parts(self.translation, self.rotation)
    }
}

/// A minimal transform hierarchy. Nodes are never removed, so a `NodeID` stays
/// valid for the lifetime of the graph.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    // Invariant: nodes[0] is the root, and parents always precede their children
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        SceneGraph {
            nodes: vec![Node::new(NodeKind::Root, None)],
        }
    }

    pub fn root(&self) -> NodeID {
        NodeID(0)
    }

    pub fn add_node(&mut self, parent: NodeID, kind: NodeKind) -> NodeID {
        let id = NodeID(self.nodes.len());
        self.nodes.push(Node::new(kind, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: NodeID) -> &Node {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeID) -> &[NodeID] {
        self.get(id).children()
    }

    /// All nodes, parents before children.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeID, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeID(i), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn set_translation(&mut self, id: NodeID, translation: Vector3<f32>) {
        self.nodes[id.0].translation = Translation3::from(translation);
    }

    pub fn set_rotation(&mut self, id: NodeID, rotation: UnitQuaternion<f32>) {
        self.nodes[id.0].rotation = rotation;
    }

    pub fn world_transform(&self, id: NodeID) -> Isometry3<f32> {
        let node = self.get(id);
        match node.parent {
            None => node.local_transform(),
            Some(parent) => self.world_transform(parent) * node.local_transform(),
        }
    }

    pub fn world_position(&self, id: NodeID) -> Point3<f32> {
        self.world_transform(id) * Point3::origin()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
