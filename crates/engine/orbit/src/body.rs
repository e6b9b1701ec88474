//! Orbiting bodies and the fixed-size arena that owns them
//!
//! The arena is allocated once from an [`OrbitLayout`] and never grows or
//! shrinks. Bodies are addressed by [`BodyId`], which is simply their index.

use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animator::{orbit_angle, orbit_position};
use crate::error::{Error, Result};

/// Upper bound on the number of bodies an arena may hold
pub const MAX_BODIES: usize = 64;

/// Linear RGB color in `[0, 1]` per channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array, handy for engine color constructors
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Index of a body inside its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A sphere moving on a fixed horizontal circle
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitBody {
    id: BodyId,
    base_angle: f32,
    radius: f32,
    height: f32,
    color: Rgb,
    /// Last position written by the animator
    pub position: Vec3,
}

impl OrbitBody {
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Angle at elapsed time zero, `index * 2π / N`
    pub fn base_angle(&self) -> f32 {
        self.base_angle
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Position on the circle for the given time and angular speed
    pub fn position_at(&self, elapsed: f32, rotation_speed: f32) -> Vec3 {
        let angle = orbit_angle(self.base_angle, elapsed, rotation_speed);
        orbit_position(self.radius, self.height, angle)
    }
}

/// Shape of the orbit arrangement
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitLayout {
    /// Number of bodies, evenly spaced around the circle
    pub count: usize,
    /// Horizontal distance from the orbit center
    pub radius: f32,
    /// Constant Y coordinate of every body
    pub height: f32,
    /// Body colors, cycled when shorter than `count`
    pub colors: Vec<Rgb>,
}

impl Default for OrbitLayout {
    fn default() -> Self {
        Self {
            count: 4,
            radius: 5.0,
            height: 5.0,
            colors: vec![
                Rgb::new(1.0, 0.2, 0.2),
                Rgb::new(0.2, 1.0, 0.3),
                Rgb::new(0.2, 0.4, 1.0),
                Rgb::new(1.0, 0.8, 0.1),
            ],
        }
    }
}

impl OrbitLayout {
    fn color_for(&self, index: usize) -> Rgb {
        if self.colors.is_empty() {
            Rgb::WHITE
        } else {
            self.colors[index % self.colors.len()]
        }
    }
}

/// Fixed-capacity arena of orbiting bodies
#[derive(Debug, Clone)]
pub struct OrbitBodies {
    bodies: Box<[OrbitBody]>,
}

impl OrbitBodies {
    /// Allocate every body described by `layout`, placed at their base angle
    pub fn from_layout(layout: &OrbitLayout) -> Result<Self> {
        if layout.count == 0 || layout.count > MAX_BODIES {
            return Err(Error::InvalidLayout(format!(
                "body count {} outside 1..={MAX_BODIES}",
                layout.count
            )));
        }
        if !layout.radius.is_finite() || !layout.height.is_finite() {
            return Err(Error::InvalidLayout(
                "radius and height must be finite".to_string(),
            ));
        }

        let step = TAU / layout.count as f32;
        let bodies: Box<[OrbitBody]> = (0..layout.count)
            .map(|index| {
                let base_angle = index as f32 * step;
                OrbitBody {
                    id: BodyId(index),
                    base_angle,
                    radius: layout.radius,
                    height: layout.height,
                    color: layout.color_for(index),
                    position: orbit_position(layout.radius, layout.height, base_angle),
                }
            })
            .collect();

        tracing::info!(
            "Orbit arena ready: {} bodies, radius {}, height {}",
            bodies.len(),
            layout.radius,
            layout.height
        );

        Ok(Self { bodies })
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, id: BodyId) -> Option<&OrbitBody> {
        self.bodies.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrbitBody> {
        self.bodies.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut OrbitBody> {
        self.bodies.iter_mut()
    }
}
