//! Demo configuration loaded from RON
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```ron
//! (
//!     orbit: (count: 6, radius: 7.0),
//!     params: (rotation_speed: 1.0),
//! )
//! ```

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::body::{OrbitLayout, Rgb};
use crate::channel::DEFAULT_QUEUE_CAPACITY;
use crate::error::{Error, Result};
use crate::params::AnimationParams;

/// Top-level demo configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub params: AnimationParams,
    pub panel: PanelConfig,
}

impl DemoConfig {
    /// Load from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&content)?;
        tracing::info!("Loaded demo config from {}", path.display());
        Ok(config)
    }

    pub fn from_ron_str(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }
}

/// Window created by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Bloom Orbit".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Perspective camera placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    /// Point the orbit controller circles around
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 10.0, 15.0),
            target: Vec3::new(0.0, 5.0, 0.0),
        }
    }
}

/// Orbiting spheres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub count: usize,
    pub radius: f32,
    pub height: f32,
    /// Radius of each sphere mesh
    pub sphere_radius: f32,
    /// Multiplier applied to the body color for the emissive channel
    pub emissive_intensity: f32,
    pub colors: Vec<Rgb>,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        let layout = OrbitLayout::default();
        Self {
            count: layout.count,
            radius: layout.radius,
            height: layout.height,
            sphere_radius: 0.8,
            emissive_intensity: 4.0,
            colors: layout.colors,
        }
    }
}

impl OrbitConfig {
    pub fn layout(&self) -> OrbitLayout {
        OrbitLayout {
            count: self.count,
            radius: self.radius,
            height: self.height,
            colors: self.colors.clone(),
        }
    }
}

/// Parameter panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Pending changes allowed between two frames
    pub queue_capacity: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}
