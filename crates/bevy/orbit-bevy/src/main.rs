//! Bloom Orbit: rotating emissive spheres with bloom and a live parameter panel
//!
//! Example: `cargo run --bin bloom-orbit -- --config config/demo.ron --bodies 6`

use anyhow::Context;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::winit::WinitSettings;
use clap::Parser;
use orbit_bevy::{Args, BloomOrbitPlugin, DebugCapturePlugin};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;

    // Validate before any window exists
    let orbit = BloomOrbitPlugin::new(config.clone()).context("building orbit layout")?;

    // Configure logging based on debug mode
    let log_level = if args.is_debug() {
        bevy::log::Level::DEBUG
    } else {
        bevy::log::Level::INFO
    };

    let default_plugins = DefaultPlugins
        .set(LogPlugin {
            level: log_level,
            filter: "wgpu=error,naga=warn".to_string(),
            ..default()
        })
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: config.window.title.clone(),
                resolution: (config.window.width, config.window.height).into(),
                ..default()
            }),
            ..default()
        });

    App::new()
        // Frames are requested by the driver through RequestRedraw
        .insert_resource(WinitSettings::desktop_app())
        .add_plugins(default_plugins)
        .add_plugins((orbit, DebugCapturePlugin { frames: args.debug }))
        .run();

    Ok(())
}
