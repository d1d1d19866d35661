//! Scene Graph
//!
//! Hierarchical scene representation with:
//! - Transform parenting
//! - Per-node triangle mesh geometry
//! - World-space bounding queries
//! - Subtree detachment (the sanitizer's removal primitive)

use std::collections::HashMap;

use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;

use crate::math::Aabb;

/// Transform component for scene nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Local position
    pub position: Vec3,
    /// Local rotation
    pub rotation: Quat,
    /// Local scale
    pub scale: Vec3,
}

impl Transform {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a new transform with the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Create a new transform from all components
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Get the local transformation matrix
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Handle to a node in the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw index of the handle
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// Triangle mesh geometry attached to a scene node
#[derive(Debug, Clone, Default)]
pub struct MeshGeometry {
    /// Vertex positions in local space; may be empty for malformed imports
    pub positions: Vec<Vec3>,
    /// Triangle indices into `positions`
    pub indices: Vec<u32>,
}

impl MeshGeometry {
    /// Create geometry from positions and indices
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Local-space bounding box, or `None` when there are no positions
    pub fn local_aabb(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().copied())
    }
}

/// Scene graph node
#[derive(Debug, Clone)]
pub struct Node {
    /// Node name for identification
    pub name: String,
    /// Local transform
    pub local_transform: Transform,
    /// Cached world matrix
    world_matrix: Mat4,
    /// Parent node
    pub parent: Option<NodeId>,
    /// Child nodes
    pub children: SmallVec<[NodeId; 8]>,
    /// Whether this node is visible
    pub visible: bool,
    /// Whether this node casts shadows
    pub cast_shadows: bool,
    /// Whether this node receives shadows
    pub receive_shadows: bool,
    /// Attached mesh geometry, if any
    pub mesh: Option<MeshGeometry>,
}

impl Node {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local_transform: Transform::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            parent: None,
            children: SmallVec::new(),
            visible: true,
            cast_shadows: false,
            receive_shadows: false,
            mesh: None,
        }
    }

    /// Get the cached world matrix (valid after `SceneGraph::update_transforms`)
    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }
}

/// Scene graph managing the node hierarchy
#[derive(Debug)]
pub struct SceneGraph {
    nodes: HashMap<NodeId, Node>,
    roots: Vec<NodeId>,
    next_id: u32,
}

impl SceneGraph {
    /// Create a new empty scene graph
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            next_id: 0,
        }
    }

    /// Add a new empty node to the scene as a root
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(name));
        self.roots.push(id);
        id
    }

    /// Add a new node carrying mesh geometry
    pub fn add_mesh(&mut self, name: impl Into<String>, mesh: MeshGeometry) -> NodeId {
        let id = self.add_node(name);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.mesh = Some(mesh);
        }
        id
    }

    /// Get a node by id
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get a mutable node by id
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Set the parent of a node; `None` makes it a root
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) {
        if let Some(child_node) = self.nodes.get(&child) {
            if let Some(old_parent) = child_node.parent {
                if let Some(old_parent_node) = self.nodes.get_mut(&old_parent) {
                    old_parent_node.children.retain(|c| *c != child);
                }
            }
        }

        match parent {
            Some(parent_id) => {
                if let Some(parent_node) = self.nodes.get_mut(&parent_id) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.parent = parent;
        }
    }

    /// Detach a node and its whole subtree from the graph, releasing ownership
    pub fn detach(&mut self, id: NodeId) {
        let mut stack = vec![id];
        // Unlink from parent first so the subtree walk never re-enters the graph
        if let Some(node) = self.nodes.get(&id) {
            if let Some(parent) = node.parent {
                if let Some(parent_node) = self.nodes.get_mut(&parent) {
                    parent_node.children.retain(|c| *c != id);
                }
            }
        }
        self.roots.retain(|&r| r != id);

        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children);
            }
        }
    }

    /// Root node ids
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of nodes in the scene
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the scene is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether a node is still present in the graph
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Ids of all nodes carrying mesh geometry, in stable order
    pub fn mesh_nodes(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.mesh.is_some())
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// Update cached world matrices for the whole hierarchy
    pub fn update_transforms(&mut self) {
        let roots = self.roots.clone();
        for root in roots {
            self.update_transform_recursive(root, Mat4::IDENTITY);
        }
    }

    fn update_transform_recursive(&mut self, id: NodeId, parent_world: Mat4) {
        let (world, children) = {
            let node = match self.nodes.get_mut(&id) {
                Some(n) => n,
                None => return,
            };
            let world = parent_world * node.local_transform.local_matrix();
            node.world_matrix = world;
            (world, node.children.clone())
        };

        for child in children {
            self.update_transform_recursive(child, world);
        }
    }

    /// World-space bounding box of a node's mesh, or `None` when the node has
    /// no mesh or its geometry carries no positions
    pub fn world_aabb(&self, id: NodeId) -> Option<Aabb> {
        let node = self.nodes.get(&id)?;
        let local = node.mesh.as_ref()?.local_aabb()?;
        Some(local.transform(node.world_matrix))
    }

    /// Bounding box of the whole model over all mesh leaves
    pub fn model_aabb(&self) -> Aabb {
        let mut aabb = Aabb::EMPTY;
        for id in self.mesh_nodes() {
            if let Some(mesh_aabb) = self.world_aabb(id) {
                aabb = aabb.merge(&mesh_aabb);
            }
        }
        aabb
    }

    /// Find a node by name
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        let mut ids: Vec<_> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.name == name)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids.first().copied()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> MeshGeometry {
        let positions = vec![
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
        ];
        let indices = vec![
            0, 1, 2, 0, 2, 3, 4, 6, 5, 4, 7, 6, 0, 4, 5, 0, 5, 1, 3, 2, 6, 3, 6, 7, 0, 3, 7, 0,
            7, 4, 1, 5, 6, 1, 6, 2,
        ];
        MeshGeometry::new(positions, indices)
    }

    #[test]
    fn test_mesh_geometry_counts() {
        let cube = unit_cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.triangle_count(), 12);
        let aabb = cube.local_aabb().unwrap();
        assert_eq!(aabb.size(), Vec3::ONE);
    }

    #[test]
    fn test_empty_geometry_has_no_bounds() {
        let empty = MeshGeometry::default();
        assert!(empty.local_aabb().is_none());
    }

    #[test]
    fn test_add_and_find() {
        let mut sg = SceneGraph::new();
        let id = sg.add_node("Pillar");
        assert_eq!(sg.node_count(), 1);
        assert_eq!(sg.find_by_name("Pillar"), Some(id));
        assert_eq!(sg.find_by_name("Missing"), None);
    }

    #[test]
    fn test_parenting_and_world_transforms() {
        let mut sg = SceneGraph::new();
        let parent = sg.add_node("Parent");
        let child = sg.add_mesh("Child", unit_cube());

        sg.get_mut(parent).unwrap().local_transform =
            Transform::from_position(Vec3::new(10.0, 0.0, 0.0));
        sg.get_mut(child).unwrap().local_transform =
            Transform::from_position(Vec3::new(5.0, 0.0, 0.0));
        sg.set_parent(child, Some(parent));
        sg.update_transforms();

        assert!(!sg.roots().contains(&child));
        let aabb = sg.world_aabb(child).unwrap();
        assert!((aabb.center() - Vec3::new(15.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_detach_removes_subtree() {
        let mut sg = SceneGraph::new();
        let root = sg.add_node("Root");
        let branch = sg.add_node("Branch");
        let leaf = sg.add_mesh("Leaf", unit_cube());
        sg.set_parent(branch, Some(root));
        sg.set_parent(leaf, Some(branch));

        sg.detach(branch);

        assert!(sg.contains(root));
        assert!(!sg.contains(branch));
        assert!(!sg.contains(leaf));
        assert!(sg.get(root).unwrap().children.is_empty());
    }

    #[test]
    fn test_model_aabb_over_leaves() {
        let mut sg = SceneGraph::new();
        let a = sg.add_mesh("A", unit_cube());
        let b = sg.add_mesh("B", unit_cube());
        sg.get_mut(a).unwrap().local_transform =
            Transform::from_position(Vec3::new(-2.0, 0.0, 0.0));
        sg.get_mut(b).unwrap().local_transform = Transform::from_position(Vec3::new(2.0, 0.0, 0.0));
        sg.update_transforms();

        let model = sg.model_aabb();
        assert!((model.size().x - 5.0).abs() < 1e-4);
        assert_eq!(sg.mesh_nodes().len(), 2);
    }

    #[test]
    fn test_scaled_mesh_world_bounds() {
        let mut sg = SceneGraph::new();
        let id = sg.add_mesh("Scaled", unit_cube());
        sg.get_mut(id).unwrap().local_transform =
            Transform::new(Vec3::ZERO, Quat::IDENTITY, Vec3::splat(4.0));
        sg.update_transforms();

        let aabb = sg.world_aabb(id).unwrap();
        assert!((aabb.max_dimension() - 4.0).abs() < 1e-4);
    }
}
