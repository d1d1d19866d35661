//! Cleanup pipeline
//!
//! Orchestrates the passes over a live scene graph:
//! 1. statistical outlier removal,
//! 2. tiny / far-and-tiny / low-poly rules,
//! 3. pattern clusters,
//! 4. distant-but-not-tiny sweep,
//! 5. shadow marking for survivors.
//!
//! Records are recomputed between passes so every stage sees the then-current
//! graph. The call is synchronous and may be repeated after later edits.

use naos_core::{NodeId, SceneGraph};

use crate::config::SanitizeConfig;
use crate::outlier::distance_outliers;
use crate::pattern::pattern_clusters;
use crate::record::{MeshRecord, ModelStats, collect_records};
use crate::rules::{self, RemovalRule};

/// Per-rule removal counts for one cleanup invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Removed by the statistical outlier pass
    pub outliers: usize,
    /// Removed by the tiny rule
    pub tiny: usize,
    /// Removed by the far-and-tiny rule
    pub far_and_tiny: usize,
    /// Removed by the low-poly rule
    pub low_poly: usize,
    /// Removed as pattern-cluster members
    pub pattern: usize,
    /// Removed by the final distant sweep
    pub distant: usize,
    /// Meshes skipped as unevaluable (no position data)
    pub skipped: usize,
    /// Meshes surviving the pass
    pub survivors: usize,
}

impl CleanupReport {
    /// Total meshes detached across all passes
    pub fn total_removed(&self) -> usize {
        self.outliers + self.tiny + self.far_and_tiny + self.low_poly + self.pattern + self.distant
    }
}

fn detach_flagged(scene: &mut SceneGraph, nodes: &[NodeId], rule: RemovalRule) -> usize {
    for &node in nodes {
        if let Some(n) = scene.get(node) {
            log::debug!("removing '{}' ({rule})", n.name);
        }
        scene.detach(node);
    }
    nodes.len()
}

fn measure(
    scene: &mut SceneGraph,
    scale_hint: f32,
) -> (Vec<MeshRecord>, ModelStats, usize) {
    scene.update_transforms();
    let (records, skipped) = collect_records(scene);
    let stats = ModelStats::compute(scene, &records, scale_hint);
    (records, stats, skipped)
}

/// Clean import artifacts out of the scene graph in place.
///
/// `scale_hint`, when positive, fixes the reference model size for the
/// relative thresholds; pass `0.0` to derive it from the scene bounds. A
/// scene with no evaluable meshes is a no-op.
pub fn cleanup(scene: &mut SceneGraph, scale_hint: f32, config: &SanitizeConfig) -> CleanupReport {
    let mut report = CleanupReport::default();

    let (records, stats, skipped) = measure(scene, scale_hint);
    report.skipped = skipped;
    if records.is_empty() {
        log::info!("cleanup: no evaluable meshes, nothing to do");
        return report;
    }

    // Coarse statistical pass first, independent of the configured constants
    let flagged = distance_outliers(&records, &stats, config);
    report.outliers = detach_flagged(scene, &flagged, RemovalRule::Outlier);

    // Threshold rules, OR'd; first matching rule takes the attribution
    let (records, stats, _) = measure(scene, scale_hint);
    let mut tiny = Vec::new();
    let mut far_and_tiny = Vec::new();
    let mut low_poly = Vec::new();
    for record in &records {
        if rules::is_tiny(record, &stats, config) {
            tiny.push(record.node);
        } else if rules::is_far_and_tiny(record, &stats, config) {
            far_and_tiny.push(record.node);
        } else if rules::is_low_poly_and_small(record, &stats, config) {
            low_poly.push(record.node);
        }
    }
    report.tiny = detach_flagged(scene, &tiny, RemovalRule::Tiny);
    report.far_and_tiny = detach_flagged(scene, &far_and_tiny, RemovalRule::FarAndTiny);
    report.low_poly = detach_flagged(scene, &low_poly, RemovalRule::LowPoly);

    // Repeated small distant fragments, removed as whole clusters
    let (records, stats, _) = measure(scene, scale_hint);
    for cluster in pattern_clusters(&records, &stats, config) {
        report.pattern += detach_flagged(scene, &cluster, RemovalRule::PatternCluster);
    }

    // Final sweep over whatever is still attached
    let (records, stats, _) = measure(scene, scale_hint);
    let distant: Vec<NodeId> = records
        .iter()
        .filter(|r| rules::is_distant_but_not_tiny(r, &stats, config))
        .map(|r| r.node)
        .collect();
    report.distant = detach_flagged(scene, &distant, RemovalRule::Distant);

    // Survivors take part in shadowing
    let survivors = scene.mesh_nodes();
    report.survivors = survivors.len();
    for id in survivors {
        if let Some(node) = scene.get_mut(id) {
            node.cast_shadows = true;
            node.receive_shadows = true;
        }
    }

    log::info!(
        "cleanup: removed {} of {} meshes ({} outlier, {} tiny, {} far, {} low-poly, {} pattern, {} distant), skipped {}",
        report.total_removed(),
        report.total_removed() + report.survivors,
        report.outliers,
        report.tiny,
        report.far_and_tiny,
        report.low_poly,
        report.pattern,
        report.distant,
        report.skipped,
    );
    report
}
