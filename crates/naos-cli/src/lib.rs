//! # Naos CLI
//!
//! Command-line interface for the naos scene toolkit.
//!
//! ## Commands
//! - `sanitize` - Clean import artifacts out of a scene file
//! - `preview` - Simulate a camera choreography and dump sampled poses

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec3;

use naos_camera::{BasicControls, BasicRig, CameraRig, Choreographer, ChoreographyOptions};
use naos_sanitize::SanitizeConfig;

pub mod scene_file;

/// Naos scene toolkit CLI
#[derive(Parser)]
#[command(name = "naos")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Choreography variant for previews
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewMode {
    /// Continuous wobbling orbit
    Orbit,
    /// Discrete jump-cut shots
    Shots,
}

/// CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Clean import artifacts out of a scene file
    Sanitize {
        /// Scene JSON to clean
        #[arg(short, long)]
        scene: PathBuf,

        /// Threshold configuration JSON (defaults used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Reference model size; derived from the scene bounds when zero
        #[arg(long, default_value = "0.0")]
        scale_hint: f32,

        /// Write the surviving scene here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Simulate a camera choreography and dump sampled poses
    Preview {
        /// Choreography variant
        #[arg(short, long, value_enum, default_value = "orbit")]
        mode: PreviewMode,

        /// Seconds of simulated playback
        #[arg(short, long, default_value = "30.0")]
        duration: f32,

        /// Seconds between samples
        #[arg(long, default_value = "1.0")]
        step: f32,

        /// Model extent the choreography is framed around
        #[arg(long, default_value = "10.0")]
        size: f32,
    },
}

/// Execute the CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match cli.command {
        Commands::Sanitize {
            scene,
            config,
            scale_hint,
            output,
        } => {
            let thresholds = match config {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading config {}", path.display()))?;
                    serde_json::from_str(&text)
                        .with_context(|| format!("parsing config {}", path.display()))?
                }
                None => SanitizeConfig::default(),
            };

            log::info!("Sanitizing {}...", scene.display());
            let mut graph = scene_file::load_scene(&scene)
                .with_context(|| format!("loading scene {}", scene.display()))?;
            let before = graph.mesh_nodes().len();
            let report = naos_sanitize::cleanup(&mut graph, scale_hint, &thresholds);
            log::info!(
                "  {} of {} meshes removed, {} kept",
                report.total_removed(),
                before,
                report.survivors
            );

            if let Some(path) = output {
                scene_file::save_scene(&path, &graph)
                    .with_context(|| format!("writing scene {}", path.display()))?;
                log::info!("  Wrote {}", path.display());
            }
        }

        Commands::Preview {
            mode,
            duration,
            step,
            size,
        } => {
            let mut controls = BasicControls::new();
            let mut rig = BasicRig::default();
            let options = ChoreographyOptions {
                auto_start: true,
                ..Default::default()
            };
            let bounds = Vec3::splat(size.max(0.0));
            let mut choreo = match mode {
                PreviewMode::Orbit => {
                    Choreographer::orbit_around(Vec3::ZERO, bounds, None, options, &mut controls)
                }
                PreviewMode::Shots => {
                    Choreographer::shots_around(Vec3::ZERO, bounds, None, options, &mut controls)
                }
            };

            log::info!("Previewing {mode:?} choreography for {duration}s...");
            let step = step.max(1e-3);
            let mut elapsed = 0.0;
            while elapsed <= duration {
                choreo.advance(step, &mut rig, &mut controls);
                elapsed += step;
                let pose = rig.pose();
                log::info!(
                    "  t={elapsed:6.2}  pos=({:8.2}, {:8.2}, {:8.2})  look=({:7.2}, {:7.2}, {:7.2})",
                    pose.position.x,
                    pose.position.y,
                    pose.position.z,
                    pose.target.x,
                    pose.target.y,
                    pose.target.z,
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_sanitize() {
        let cli = Cli::parse_from(["naos", "sanitize", "-s", "scene.json"]);
        assert!(matches!(cli.command, Commands::Sanitize { .. }));
    }

    #[test]
    fn test_sanitize_args() {
        let cli = Cli::parse_from([
            "naos",
            "sanitize",
            "-s",
            "temple.json",
            "--scale-hint",
            "120",
            "-o",
            "clean.json",
        ]);
        if let Commands::Sanitize {
            scene,
            scale_hint,
            output,
            ..
        } = cli.command
        {
            assert_eq!(scene, PathBuf::from("temple.json"));
            assert_eq!(scale_hint, 120.0);
            assert_eq!(output, Some(PathBuf::from("clean.json")));
        } else {
            panic!("Expected Sanitize command");
        }
    }

    #[test]
    fn test_preview_defaults() {
        let cli = Cli::parse_from(["naos", "preview"]);
        if let Commands::Preview {
            mode,
            duration,
            step,
            size,
        } = cli.command
        {
            assert_eq!(mode, PreviewMode::Orbit);
            assert_eq!(duration, 30.0);
            assert_eq!(step, 1.0);
            assert_eq!(size, 10.0);
        } else {
            panic!("Expected Preview command");
        }
    }

    #[test]
    fn test_preview_mode_parse() {
        let cli = Cli::parse_from(["naos", "preview", "-m", "shots"]);
        if let Commands::Preview { mode, .. } = cli.command {
            assert_eq!(mode, PreviewMode::Shots);
        } else {
            panic!("Expected Preview command");
        }
    }
}
