//! Removal rules
//!
//! Each rule is a pure predicate over a mesh record, whole-model statistics,
//! and the configuration. The sanitizer ORs them; a mesh is removed when any
//! rule fires. Keeping them free functions keeps each rule independently
//! testable.

use std::fmt;

use crate::config::SanitizeConfig;
use crate::record::{MeshRecord, ModelStats};

/// Which rule flagged a mesh for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovalRule {
    /// Statistical centroid-distance outlier
    Outlier,
    /// Tiny in both size and volume
    Tiny,
    /// Far from the centroid and implausibly small
    FarAndTiny,
    /// Degenerate low-poly leftover below the small gate
    LowPoly,
    /// Member of a repeated small-fragment cluster
    PatternCluster,
    /// Distant with relative size below the loose final-sweep gate
    Distant,
}

impl fmt::Display for RemovalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RemovalRule::Outlier => "outlier",
            RemovalRule::Tiny => "tiny",
            RemovalRule::FarAndTiny => "far-and-tiny",
            RemovalRule::LowPoly => "low-poly",
            RemovalRule::PatternCluster => "pattern-cluster",
            RemovalRule::Distant => "distant",
        };
        f.write_str(name)
    }
}

fn size_ratio(record: &MeshRecord, stats: &ModelStats) -> f32 {
    record.max_dimension / stats.model_max_dimension
}

fn volume_ratio(record: &MeshRecord, stats: &ModelStats) -> f32 {
    record.volume / stats.model_max_dimension.powi(3)
}

/// Centroid distance beyond the configured multiple of the model size
pub fn is_far(record: &MeshRecord, stats: &ModelStats, config: &SanitizeConfig) -> bool {
    record.centroid_distance > config.far_distance_ratio * stats.model_max_dimension
}

/// Small-size gate (size ratio only)
pub fn is_small_sized(record: &MeshRecord, stats: &ModelStats, config: &SanitizeConfig) -> bool {
    size_ratio(record, stats) < config.small_size_ratio
}

/// Looser small gate requiring both size and volume.
///
/// The volume gate keeps long thin but intentional elements (wires, trim)
/// from being misclassified on size alone.
pub fn small_gate(record: &MeshRecord, stats: &ModelStats, config: &SanitizeConfig) -> bool {
    is_small_sized(record, stats, config) && volume_ratio(record, stats) < config.small_volume_ratio
}

/// Rule 1: tiny in both size and volume
pub fn is_tiny(record: &MeshRecord, stats: &ModelStats, config: &SanitizeConfig) -> bool {
    size_ratio(record, stats) < config.tiny_size_ratio
        && volume_ratio(record, stats) < config.tiny_volume_ratio
}

/// Rule 2: isolated fragment, far from the centroid and implausibly small
pub fn is_far_and_tiny(record: &MeshRecord, stats: &ModelStats, config: &SanitizeConfig) -> bool {
    is_far(record, stats, config) && small_gate(record, stats, config)
}

/// Rule 3: degenerate decimation leftover below the small gate
pub fn is_low_poly_and_small(
    record: &MeshRecord,
    stats: &ModelStats,
    config: &SanitizeConfig,
) -> bool {
    (record.vertex_count < config.low_poly_vertices
        || record.triangle_count < config.low_poly_triangles)
        && small_gate(record, stats, config)
}

/// Candidate gate for the pattern-cluster pass: small-sized and distant.
///
/// Deliberately ignores the volume gate so repeated fragments that
/// individually evade rule 2 are still grouped.
pub fn is_pattern_candidate(
    record: &MeshRecord,
    stats: &ModelStats,
    config: &SanitizeConfig,
) -> bool {
    is_far(record, stats, config) && is_small_sized(record, stats, config)
}

/// Final sweep: distant with relative size below the loose distant gate
pub fn is_distant_but_not_tiny(
    record: &MeshRecord,
    stats: &ModelStats,
    config: &SanitizeConfig,
) -> bool {
    is_far(record, stats, config) && size_ratio(record, stats) < config.distant_size_ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use naos_core::{NodeId, SceneGraph};

    fn stats(model_max: f32) -> ModelStats {
        ModelStats {
            model_max_dimension: model_max,
            centroid: Vec3::ZERO,
            mean_distance: 0.0,
            stddev_distance: 0.0,
        }
    }

    fn record(max_dim: f32, volume: f32, distance: f32, verts: usize, tris: usize) -> MeshRecord {
        // NodeId is opaque; borrow one from a throwaway graph
        let mut scene = SceneGraph::new();
        let node: NodeId = scene.add_node("r");
        MeshRecord {
            node,
            center: Vec3::ZERO,
            extents: Vec3::splat(max_dim),
            max_dimension: max_dim,
            volume,
            centroid_distance: distance,
            vertex_count: verts,
            triangle_count: tris,
        }
    }

    #[test]
    fn test_tiny_boundary() {
        let cfg = SanitizeConfig::default();
        let st = stats(100.0);
        // Just below both gates
        let below = record(0.9, 0.729, 0.0, 8, 12);
        assert!(is_tiny(&below, &st, &cfg));
        // Size just above the gate
        let above_size = record(1.1, 0.729, 0.0, 8, 12);
        assert!(!is_tiny(&above_size, &st, &cfg));
        // Volume just above the gate (1e-6 * 100^3 = 1.0)
        let above_volume = record(0.9, 1.5, 0.0, 8, 12);
        assert!(!is_tiny(&above_volume, &st, &cfg));
    }

    #[test]
    fn test_thin_intentional_element_survives_tiny() {
        let cfg = SanitizeConfig::default();
        let st = stats(100.0);
        // A wire: long in one axis, so the size ratio alone would not flag it,
        // and a trim plate: small max dimension but substantial volume
        let trim = record(0.9, 2.0, 0.0, 128, 200);
        assert!(!is_tiny(&trim, &st, &cfg));
    }

    #[test]
    fn test_far_and_tiny_requires_both() {
        let cfg = SanitizeConfig::default();
        let st = stats(100.0);
        let far_small = record(1.0, 1.0, 200.0, 8, 12);
        assert!(is_far_and_tiny(&far_small, &st, &cfg));
        // Legitimate outbuilding: far but sizeable
        let outbuilding = record(20.0, 8000.0, 200.0, 500, 900);
        assert!(!is_far_and_tiny(&outbuilding, &st, &cfg));
        // Small but close by
        let near_small = record(1.0, 1.0, 10.0, 8, 12);
        assert!(!is_far_and_tiny(&near_small, &st, &cfg));
    }

    #[test]
    fn test_low_poly_rule() {
        let cfg = SanitizeConfig::default();
        let st = stats(100.0);
        // Single triangle leftover
        let sliver = record(1.0, 0.001, 0.0, 3, 1);
        assert!(is_low_poly_and_small(&sliver, &st, &cfg));
        // Low-poly but large: an intentional billboard
        let billboard = record(30.0, 10.0, 0.0, 4, 2);
        assert!(!is_low_poly_and_small(&billboard, &st, &cfg));
        // Dense small mesh
        let detail = record(1.0, 0.5, 0.0, 400, 700);
        assert!(!is_low_poly_and_small(&detail, &st, &cfg));
    }

    #[test]
    fn test_distant_sweep_is_looser_than_small() {
        let cfg = SanitizeConfig::default();
        let st = stats(100.0);
        // Too big for the small gate, still below the distant gate
        let fragment = record(8.0, 500.0, 200.0, 60, 100);
        assert!(!is_far_and_tiny(&fragment, &st, &cfg));
        assert!(is_distant_but_not_tiny(&fragment, &st, &cfg));
        // Above the distant gate survives
        let wing = record(15.0, 3000.0, 200.0, 800, 1500);
        assert!(!is_distant_but_not_tiny(&wing, &st, &cfg));
    }

    #[test]
    fn test_pattern_candidate_ignores_volume() {
        let cfg = SanitizeConfig::default();
        let st = stats(100.0);
        // Volume above the small gate, so rule 2 passes on it, but it still
        // qualifies as a pattern candidate
        let fragment = record(2.8, 21.9, 400.0, 8, 12);
        assert!(!is_far_and_tiny(&fragment, &st, &cfg));
        assert!(is_pattern_candidate(&fragment, &st, &cfg));
    }
}
