//! # Naos Sanitize
//!
//! Statistical cleanup of imported scene graphs. Interchange-format imports of
//! large architectural models routinely carry artifacts: degenerate slivers,
//! far-flung stray fragments, and repeated noise patterns. This crate flags
//! them with independent, threshold-relative rules and detaches them from the
//! graph, without a manual per-mesh blocklist.
//!
//! ## Passes
//! - Statistical distance-outlier removal (mean + k·stddev)
//! - Tiny, far-and-tiny, and low-poly rules (pure predicates, OR'd)
//! - Pattern clustering of repeated small distant fragments
//! - Final distant-but-not-tiny sweep

pub mod config;
pub mod outlier;
pub mod pattern;
pub mod record;
pub mod rules;
pub mod sanitizer;

pub use config::SanitizeConfig;
pub use record::{MeshRecord, ModelStats, collect_records};
pub use rules::RemovalRule;
pub use sanitizer::{CleanupReport, cleanup};
