//! Circular orbit animation
//!
//! Positions are recomputed from scratch each frame:
//! `θ = base_angle + elapsed * speed`, `p = (r cos θ, height, r sin θ)`.
//! Nothing is integrated, so there is no drift and no per-frame state.

use glam::Vec3;

use crate::body::OrbitBodies;
use crate::host::SceneGraph;

/// Angle of a body at `elapsed` seconds
#[inline]
pub fn orbit_angle(base_angle: f32, elapsed: f32, rotation_speed: f32) -> f32 {
    base_angle + elapsed * rotation_speed
}

/// Point on a horizontal circle centered on the Y axis
#[inline]
pub fn orbit_position(radius: f32, height: f32, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(radius * cos, height, radius * sin)
}

/// Writes every body's position for the current time
#[derive(Debug, Default, Clone, Copy)]
pub struct OrbitAnimator;

impl OrbitAnimator {
    /// Update the arena and push the new positions into the scene
    pub fn animate<S: SceneGraph + ?Sized>(
        &self,
        bodies: &mut OrbitBodies,
        elapsed: f32,
        rotation_speed: f32,
        scene: &mut S,
    ) {
        for body in bodies.iter_mut() {
            let position = body.position_at(elapsed, rotation_speed);
            body.position = position;
            scene.set_body_position(body.id(), position);
        }
    }
}
