//! Sanitizer configuration
//!
//! All thresholds are relative to the whole-model maximum dimension (volumes
//! to its cube), so the same configuration works for models loaded at any
//! world scale. Tunable per model without code changes.

use serde::{Deserialize, Serialize};

/// Thresholds driving the cleanup rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeConfig {
    /// Max-dimension ratio below which a mesh counts as tiny
    pub tiny_size_ratio: f32,
    /// Looser max-dimension ratio used by the far/low-poly/pattern gates
    pub small_size_ratio: f32,
    /// Ratio below which a distant mesh is still removed in the final sweep
    pub distant_size_ratio: f32,
    /// Volume ratio (relative to model max dimension cubed) for the tiny rule
    pub tiny_volume_ratio: f32,
    /// Looser volume ratio for the small gate
    pub small_volume_ratio: f32,
    /// Centroid-distance multiple of the model max dimension that counts as far
    pub far_distance_ratio: f32,
    /// Cluster radius for the pattern rule, as a ratio of the model max dimension
    pub pattern_distance_ratio: f32,
    /// Vertex count below which a mesh counts as low-poly
    pub low_poly_vertices: usize,
    /// Triangle count below which a mesh counts as low-poly
    pub low_poly_triangles: usize,
    /// Minimum cluster membership before a pattern is removed whole
    pub min_pattern_size: usize,
    /// Standard-deviation multiple for the statistical outlier pass
    pub outlier_std_devs: f32,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            tiny_size_ratio: 0.01,
            small_size_ratio: 0.03,
            distant_size_ratio: 0.1,
            tiny_volume_ratio: 1e-6,
            small_volume_ratio: 2e-5,
            far_distance_ratio: 1.5,
            pattern_distance_ratio: 0.05,
            low_poly_vertices: 8,
            low_poly_triangles: 4,
            min_pattern_size: 4,
            outlier_std_devs: 2.0,
        }
    }
}
