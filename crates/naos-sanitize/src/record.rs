//! Mesh records
//!
//! Per-mesh measurements driving the cleanup rules. Records are computed
//! fresh at each cleanup invocation from the live scene graph and are never
//! persisted; any geometry change invalidates them.

use glam::Vec3;
use naos_core::{NodeId, SceneGraph};
use rayon::prelude::*;

/// Measurements for one mesh leaf
#[derive(Debug, Clone)]
pub struct MeshRecord {
    /// Node carrying the mesh
    pub node: NodeId,
    /// World-space bounding-box center
    pub center: Vec3,
    /// World-space bounding-box extents
    pub extents: Vec3,
    /// Largest extent
    pub max_dimension: f32,
    /// Product of the extents
    pub volume: f32,
    /// Distance from this mesh's center to the centroid of all mesh centers
    pub centroid_distance: f32,
    /// Vertex count
    pub vertex_count: usize,
    /// Triangle count
    pub triangle_count: usize,
}

/// Whole-model statistics shared by every rule evaluation
#[derive(Debug, Clone)]
pub struct ModelStats {
    /// Maximum dimension of the model, from the scale hint when supplied
    pub model_max_dimension: f32,
    /// Centroid of all mesh centers
    pub centroid: Vec3,
    /// Mean centroid distance over all records
    pub mean_distance: f32,
    /// Standard deviation of centroid distances
    pub stddev_distance: f32,
}

/// Collect records for every evaluable mesh leaf in the scene.
///
/// Meshes without position data cannot be measured and are skipped; they are
/// neither evaluated nor removed. Returns the records together with the
/// number of skipped meshes. World matrices must be up to date.
pub fn collect_records(scene: &SceneGraph) -> (Vec<MeshRecord>, usize) {
    let ids = scene.mesh_nodes();
    let mut records: Vec<MeshRecord> = ids
        .par_iter()
        .filter_map(|&id| {
            let node = scene.get(id)?;
            let mesh = node.mesh.as_ref()?;
            let aabb = scene.world_aabb(id)?;
            let extents = aabb.size();
            Some(MeshRecord {
                node: id,
                center: aabb.center(),
                extents,
                max_dimension: extents.x.max(extents.y).max(extents.z),
                volume: extents.x * extents.y * extents.z,
                centroid_distance: 0.0,
                vertex_count: mesh.vertex_count(),
                triangle_count: mesh.triangle_count(),
            })
        })
        .collect();

    if !records.is_empty() {
        let centroid =
            records.iter().map(|r| r.center).sum::<Vec3>() / records.len() as f32;
        for record in &mut records {
            record.centroid_distance = record.center.distance(centroid);
        }
    }

    let skipped = ids.len() - records.len();
    (records, skipped)
}

impl ModelStats {
    /// Compute whole-model statistics for a set of records.
    ///
    /// `scale_hint`, when positive and finite, is the authoritative model
    /// size; otherwise the size is derived from the scene bounds. A
    /// degenerate model falls back to a unit dimension so ratio thresholds
    /// never divide by zero.
    pub fn compute(scene: &SceneGraph, records: &[MeshRecord], scale_hint: f32) -> Self {
        let model_max_dimension = if scale_hint.is_finite() && scale_hint > 0.0 {
            scale_hint
        } else {
            let bounds = scene.model_aabb();
            let derived = if bounds.is_empty() { 0.0 } else { bounds.max_dimension() };
            if derived > 0.0 { derived } else { 1.0 }
        };

        let count = records.len() as f32;
        let (centroid, mean_distance, stddev_distance) = if records.is_empty() {
            (Vec3::ZERO, 0.0, 0.0)
        } else {
            let centroid = records.iter().map(|r| r.center).sum::<Vec3>() / count;
            let mean = records.iter().map(|r| r.centroid_distance).sum::<f32>() / count;
            let variance = records
                .iter()
                .map(|r| {
                    let dev = r.centroid_distance - mean;
                    dev * dev
                })
                .sum::<f32>()
                / count;
            (centroid, mean, variance.sqrt())
        };

        Self {
            model_max_dimension,
            centroid,
            mean_distance,
            stddev_distance,
        }
    }
}
