//! Bloom Orbit on Bevy
//!
//! Hosts the `orbit` core inside a Bevy app: the HDR camera's `Bloom`
//! component is the glow pass, sphere `Transform`s are the scene graph and
//! `RequestRedraw` schedules the next frame.
//!
//! ## Debug Mode
//!
//! Use `--debug N` to enable debug mode:
//! - Enables debug logging
//! - Runs N frames after the render warmup
//! - Saves last rendered frame to `output/exit_frame.png`
//!
//! Example: `cargo run --bin bloom-orbit -- --debug 5`

pub mod camera;
pub mod cli;
pub mod debug;
pub mod frame;
pub mod panel;
pub mod scene;

use bevy::prelude::*;
use orbit::{DemoConfig, Extent, FrameDriver, OrbitBodies, ParamPanel, param_channel};

pub use camera::{OrbitCamera, OrbitCameraPlugin};
pub use cli::Args;
pub use debug::{DebugCapturePlugin, DebugMode};
pub use frame::{BackingSize, FrameDriverPlugin, OrbitDriver};
pub use panel::{ControlPanel, ParamPanelPlugin};
pub use scene::DemoSettings;

/// Everything the demo needs on top of `DefaultPlugins`
///
/// Holds the validated orbit arena; the parameter channel, frame driver and
/// panel model are created when the plugin is built.
pub struct BloomOrbitPlugin {
    config: DemoConfig,
    bodies: OrbitBodies,
}

impl BloomOrbitPlugin {
    /// Fails when the configured orbit layout is invalid
    pub fn new(config: DemoConfig) -> orbit::Result<Self> {
        let bodies = OrbitBodies::from_layout(&config.orbit.layout())?;
        Ok(Self { config, bodies })
    }
}

impl Plugin for BloomOrbitPlugin {
    fn build(&self, app: &mut App) {
        let (sender, inbox) = param_channel(self.config.panel.queue_capacity);
        let params = self.config.params;
        let driver = FrameDriver::new(self.bodies.clone(), params, inbox);
        let panel = ParamPanel::standard(params, sender);

        let window = &self.config.window;
        app.insert_resource(ClearColor(Color::BLACK))
            .insert_resource(BackingSize(Extent::new(window.width, window.height)))
            .insert_resource(DemoSettings(self.config.clone()))
            .insert_resource(ControlPanel(panel))
            .insert_non_send_resource(OrbitDriver(driver))
            .add_plugins((FrameDriverPlugin, OrbitCameraPlugin, ParamPanelPlugin))
            .add_systems(Startup, scene::setup_scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_orbit() {
        let mut config = DemoConfig::default();
        config.orbit.count = 0;
        assert!(BloomOrbitPlugin::new(config).is_err());
    }

    #[test]
    fn test_keeps_configured_arena() {
        let mut config = DemoConfig::default();
        config.orbit.count = 6;
        let plugin = BloomOrbitPlugin::new(config).unwrap();
        assert_eq!(plugin.bodies.len(), 6);
    }
}
