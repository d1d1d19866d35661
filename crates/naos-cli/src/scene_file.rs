//! Scene file format
//!
//! JSON interchange for scene graphs: a flat list of named meshes with
//! positions, triangle indices, and an optional placement. Enough to feed
//! imported models through the sanitizer and write the survivors back out.

use std::path::Path;

use glam::{Quat, Vec3};
use naos_core::{MeshGeometry, SceneGraph, Transform};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scene file load/build failures
#[derive(Debug, Error)]
pub enum SceneFileError {
    /// File could not be read or written
    #[error("scene file io: {0}")]
    Io(#[from] std::io::Error),
    /// JSON was malformed
    #[error("scene file parse: {0}")]
    Parse(#[from] serde_json::Error),
    /// A triangle index referenced a vertex that does not exist
    #[error("mesh '{mesh}' index {index} out of range ({vertex_count} vertices)")]
    InvalidIndex {
        /// Offending mesh name
        mesh: String,
        /// Out-of-range index
        index: u32,
        /// Vertex count of the mesh
        vertex_count: usize,
    },
}

/// Top-level scene document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    /// Mesh entries in document order
    pub meshes: Vec<MeshEntry>,
}

/// One mesh with its placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshEntry {
    /// Mesh name
    pub name: String,
    /// Vertex positions; may be empty for malformed exports
    #[serde(default)]
    pub positions: Vec<[f32; 3]>,
    /// Triangle indices
    #[serde(default)]
    pub indices: Vec<u32>,
    /// World translation
    #[serde(default)]
    pub translation: [f32; 3],
    /// Uniform scale
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

/// Build a scene graph from a parsed document
pub fn build_scene(file: &SceneFile) -> Result<SceneGraph, SceneFileError> {
    let mut scene = SceneGraph::new();
    for entry in &file.meshes {
        for &index in &entry.indices {
            if index as usize >= entry.positions.len() {
                return Err(SceneFileError::InvalidIndex {
                    mesh: entry.name.clone(),
                    index,
                    vertex_count: entry.positions.len(),
                });
            }
        }
        let positions = entry.positions.iter().map(|p| Vec3::from_array(*p)).collect();
        let id = scene.add_mesh(
            entry.name.as_str(),
            MeshGeometry::new(positions, entry.indices.clone()),
        );
        if let Some(node) = scene.get_mut(id) {
            node.local_transform = Transform::new(
                Vec3::from_array(entry.translation),
                Quat::IDENTITY,
                Vec3::splat(entry.scale),
            );
        }
    }
    scene.update_transforms();
    Ok(scene)
}

/// Load and build a scene graph from a JSON file
pub fn load_scene(path: &Path) -> Result<SceneGraph, SceneFileError> {
    let text = std::fs::read_to_string(path)?;
    let file: SceneFile = serde_json::from_str(&text)?;
    build_scene(&file)
}

/// Export the mesh leaves of a scene graph back into a document
pub fn export_scene(scene: &SceneGraph) -> SceneFile {
    let mut file = SceneFile::default();
    for id in scene.mesh_nodes() {
        let Some(node) = scene.get(id) else { continue };
        let Some(mesh) = &node.mesh else { continue };
        file.meshes.push(MeshEntry {
            name: node.name.clone(),
            positions: mesh.positions.iter().map(|p| p.to_array()).collect(),
            indices: mesh.indices.clone(),
            translation: node.local_transform.position.to_array(),
            scale: node.local_transform.scale.x,
        });
    }
    file
}

/// Write a scene graph to a JSON file
pub fn save_scene(path: &Path, scene: &SceneGraph) -> Result<(), SceneFileError> {
    let file = export_scene(scene);
    let text = serde_json::to_string_pretty(&file)?;
    std::fs::write(path, text)?;
    Ok(())
}
