//! Pattern clustering
//!
//! Import glitches often appear as repeated small artifacts in a line or
//! grid: individually below no single-mesh threshold, but detectable as a
//! group. Candidates (small and distant) are clustered by mutual proximity
//! with a fixed-radius single-link transitive closure; any cluster reaching
//! the configured membership is removed whole.

use ahash::AHashMap;
use naos_core::NodeId;

use crate::config::SanitizeConfig;
use crate::record::{MeshRecord, ModelStats};
use crate::rules::is_pattern_candidate;

/// Union-find over candidate indices
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut current = i;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

/// Clusters of small distant fragments large enough to be removed whole.
///
/// Link radius is `pattern_distance_ratio` of the model max dimension;
/// linking is transitive, so a long chain counts as one cluster.
pub fn pattern_clusters(
    records: &[MeshRecord],
    stats: &ModelStats,
    config: &SanitizeConfig,
) -> Vec<Vec<NodeId>> {
    let candidates: Vec<&MeshRecord> = records
        .iter()
        .filter(|r| is_pattern_candidate(r, stats, config))
        .collect();
    if candidates.len() < config.min_pattern_size {
        return Vec::new();
    }

    let radius = config.pattern_distance_ratio * stats.model_max_dimension;
    let radius_sq = radius * radius;
    let mut sets = DisjointSet::new(candidates.len());
    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            if candidates[i].center.distance_squared(candidates[j].center) <= radius_sq {
                sets.union(i, j);
            }
        }
    }

    let mut clusters: AHashMap<usize, Vec<NodeId>> = AHashMap::new();
    for (i, candidate) in candidates.iter().enumerate() {
        clusters.entry(sets.find(i)).or_default().push(candidate.node);
    }

    let mut flagged: Vec<Vec<NodeId>> = clusters
        .into_values()
        .filter(|members| members.len() >= config.min_pattern_size)
        .collect();
    flagged.sort_by_key(|members| members.first().copied());
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use naos_core::SceneGraph;

    fn fragment_at(scene: &mut SceneGraph, center: Vec3) -> MeshRecord {
        MeshRecord {
            node: scene.add_node("fragment"),
            center,
            extents: Vec3::splat(1.0),
            max_dimension: 1.0,
            volume: 1.0,
            centroid_distance: center.length(),
            vertex_count: 8,
            triangle_count: 12,
        }
    }

    fn stats() -> ModelStats {
        ModelStats {
            model_max_dimension: 100.0,
            centroid: Vec3::ZERO,
            mean_distance: 0.0,
            stddev_distance: 0.0,
        }
    }

    fn grid(scene: &mut SceneGraph, count: usize, spacing: f32) -> Vec<MeshRecord> {
        (0..count)
            .map(|i| fragment_at(scene, Vec3::new(400.0 + i as f32 * spacing, 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn test_grid_at_min_size_is_flagged_whole() {
        let cfg = SanitizeConfig::default();
        let mut scene = SceneGraph::new();
        // Radius is 0.05 * 100 = 5; spacing 3 links the line transitively
        let records = grid(&mut scene, cfg.min_pattern_size, 3.0);
        let clusters = pattern_clusters(&records, &stats(), &cfg);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), cfg.min_pattern_size);
    }

    #[test]
    fn test_grid_below_min_size_is_retained() {
        let cfg = SanitizeConfig::default();
        let mut scene = SceneGraph::new();
        let records = grid(&mut scene, cfg.min_pattern_size - 1, 3.0);
        assert!(pattern_clusters(&records, &stats(), &cfg).is_empty());
    }

    #[test]
    fn test_spread_fragments_do_not_link() {
        let cfg = SanitizeConfig::default();
        let mut scene = SceneGraph::new();
        // Spacing beyond the 5-unit radius: six singleton clusters, none flagged
        let records = grid(&mut scene, 6, 20.0);
        assert!(pattern_clusters(&records, &stats(), &cfg).is_empty());
    }

    #[test]
    fn test_near_model_fragments_are_not_candidates() {
        let cfg = SanitizeConfig::default();
        let mut scene = SceneGraph::new();
        // Dense line but close to the centroid: fails the distant gate
        let records: Vec<_> = (0..6)
            .map(|i| fragment_at(&mut scene, Vec3::new(10.0 + i as f32 * 3.0, 0.0, 0.0)))
            .collect();
        assert!(pattern_clusters(&records, &stats(), &cfg).is_empty());
    }

    #[test]
    fn test_two_separate_grids() {
        let cfg = SanitizeConfig::default();
        let mut scene = SceneGraph::new();
        let mut records = grid(&mut scene, 5, 3.0);
        records.extend(
            (0..5).map(|i| fragment_at(&mut scene, Vec3::new(0.0, 0.0, 400.0 + i as f32 * 3.0))),
        );
        let clusters = pattern_clusters(&records, &stats(), &cfg);
        assert_eq!(clusters.len(), 2);
        for cluster in clusters {
            assert_eq!(cluster.len(), 5);
        }
    }
}
