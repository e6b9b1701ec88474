//! Command line arguments for the demo binaries
//!
//! ```ignore
//! let args = Args::parse();
//! let config = args.load_config()?;
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use orbit::DemoConfig;

/// Bloom Orbit: emissive spheres on a circle with a live bloom panel
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "bloom-orbit")]
#[command(about = "Rotating emissive spheres with bloom post-processing")]
pub struct Args {
    /// Debug mode: run N frames after startup, save final frame to output/exit_frame.png
    /// Default is 1 frame when --debug is specified without a value
    #[arg(long, num_args = 0..=1, default_missing_value = "1", value_name = "FRAMES")]
    pub debug: Option<u32>,

    /// Load demo configuration from a RON file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the number of orbiting spheres
    #[arg(long, value_name = "N")]
    pub bodies: Option<usize>,
}

impl Args {
    /// Resolve the configuration: file (or defaults) plus command line overrides
    pub fn load_config(&self) -> anyhow::Result<DemoConfig> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => DemoConfig::default(),
        };

        if let Some(count) = self.bodies {
            config.orbit.count = count;
        }

        Ok(config)
    }

    pub fn is_debug(&self) -> bool {
        self.debug.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args() {
        let args = Args::parse_from(["bloom-orbit"]);
        assert!(args.debug.is_none());
        assert!(args.config.is_none());
        assert!(args.bodies.is_none());
        assert!(!args.is_debug());
    }

    #[test]
    fn test_debug_without_value_defaults_to_one() {
        let args = Args::parse_from(["bloom-orbit", "--debug"]);
        assert_eq!(args.debug, Some(1));
    }

    #[test]
    fn test_debug_with_value() {
        let args = Args::parse_from(["bloom-orbit", "--debug", "30"]);
        assert_eq!(args.debug, Some(30));
        assert!(args.is_debug());
    }

    #[test]
    fn test_config_short_arg() {
        let args = Args::parse_from(["bloom-orbit", "-c", "demo.ron"]);
        assert_eq!(args.config, Some(PathBuf::from("demo.ron")));
    }

    #[test]
    fn test_bodies_override() {
        let args = Args::parse_from(["bloom-orbit", "--bodies", "7"]);
        let config = args.load_config().unwrap();
        assert_eq!(config.orbit.count, 7);
        assert_eq!(config.orbit.radius, 5.0);
    }

    #[test]
    fn test_missing_config_file_fails() {
        let args = Args::parse_from(["bloom-orbit", "--config", "/no/such/demo.ron"]);
        let err = args.load_config().unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/demo.ron"));
    }
}
