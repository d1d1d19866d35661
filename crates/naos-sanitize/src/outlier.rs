//! Statistical outlier pass
//!
//! Coarse filter run before the threshold rules: meshes whose centroid
//! distance exceeds `mean + k * stddev` are removed regardless of the
//! configured absolute thresholds. Catches anomalies the constants miss.

use naos_core::NodeId;

use crate::config::SanitizeConfig;
use crate::record::{MeshRecord, ModelStats};

/// Minimum population for the distance distribution to be meaningful
const MIN_SAMPLE_SIZE: usize = 3;

/// Nodes whose centroid distance exceeds the statistical threshold.
///
/// A no-op for very small populations or a degenerate (zero-spread)
/// distribution, where every mesh would sit at the threshold.
pub fn distance_outliers(
    records: &[MeshRecord],
    stats: &ModelStats,
    config: &SanitizeConfig,
) -> Vec<NodeId> {
    if records.len() < MIN_SAMPLE_SIZE || stats.stddev_distance <= f32::EPSILON {
        return Vec::new();
    }

    let threshold = stats.mean_distance + config.outlier_std_devs * stats.stddev_distance;
    records
        .iter()
        .filter(|r| r.centroid_distance > threshold)
        .map(|r| r.node)
        .collect()
}
