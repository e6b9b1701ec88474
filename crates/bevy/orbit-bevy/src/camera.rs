use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::panel::PanelFocus;

/// Radians of orbit per pixel of drag
const DRAG_SENSITIVITY: f32 = 0.005;
/// Pitch limit to keep the camera off the poles
const MAX_PITCH: f32 = 1.4;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 100.0;

/// Orbit camera controller: circles `target` at `distance`
#[derive(Component, Debug, Clone)]
pub struct OrbitCamera {
    /// Point the camera orbits around
    pub target: Vec3,
    /// Distance from target
    pub distance: f32,
    /// Rotation around vertical axis (yaw)
    pub yaw: f32,
    /// Rotation around horizontal axis (pitch)
    pub pitch: f32,
}

impl OrbitCamera {
    /// Controller whose current view matches a camera placed at `eye`
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(MIN_DISTANCE);
        let horizontal = Vec2::new(offset.x, offset.z).length();
        Self {
            target,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: offset.y.atan2(horizontal).clamp(-MAX_PITCH, MAX_PITCH),
        }
    }

    /// Calculate transform from current orbit parameters
    pub fn calculate_transform(&self) -> Transform {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();

        let position = self.target + Vec3::new(x, y, z);
        Transform::from_translation(position).looking_at(self.target, Vec3::Y)
    }

    /// Write the controller state into the camera transform
    pub fn update(&self, transform: &mut Transform) {
        *transform = self.calculate_transform();
    }

    pub fn rotate(&mut self, drag: Vec2) {
        self.yaw -= drag.x * DRAG_SENSITIVITY;
        self.pitch = (self.pitch + drag.y * DRAG_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * (1.0 - scroll * 0.1)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

/// System that handles camera orbit via left-click drag
pub fn orbit_camera(
    mut camera_query: Query<(&mut OrbitCamera, &mut Transform)>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_events: MessageReader<MouseMotion>,
    focus: Res<PanelFocus>,
) {
    if focus.0 || !mouse_buttons.pressed(MouseButton::Left) {
        motion_events.clear();
        return;
    }

    let delta: Vec2 = motion_events.read().map(|e| e.delta).sum();
    if delta.length_squared() < 0.001 {
        return;
    }

    for (mut orbit, mut transform) in camera_query.iter_mut() {
        orbit.rotate(delta);
        orbit.update(&mut transform);
    }
}

/// System that handles camera zoom via scroll wheel
pub fn zoom_camera(
    mut camera_query: Query<(&mut OrbitCamera, &mut Transform)>,
    mut scroll_events: MessageReader<MouseWheel>,
    focus: Res<PanelFocus>,
) {
    if focus.0 {
        scroll_events.clear();
        return;
    }

    let scroll_delta: f32 = scroll_events.read().map(|e| e.y).sum();
    if scroll_delta.abs() < 0.01 {
        return;
    }

    for (mut orbit, mut transform) in camera_query.iter_mut() {
        orbit.zoom(scroll_delta);
        orbit.update(&mut transform);
    }
}

/// Plugin for camera controls
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PanelFocus>()
            .add_systems(Update, (orbit_camera, zoom_camera));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looking_from_reproduces_eye() {
        let eye = Vec3::new(0.0, 10.0, 15.0);
        let target = Vec3::new(0.0, 5.0, 0.0);
        let orbit = OrbitCamera::looking_from(eye, target);

        let transform = orbit.calculate_transform();
        assert!((transform.translation - eye).length() < 1e-4);
        assert!((orbit.distance - (eye - target).length()).abs() < 1e-5);
    }

    #[test]
    fn test_camera_faces_target() {
        let orbit = OrbitCamera::looking_from(Vec3::new(8.0, 3.0, -4.0), Vec3::ZERO);
        let transform = orbit.calculate_transform();
        let to_target = (Vec3::ZERO - transform.translation).normalize();
        assert!(transform.forward().dot(to_target) > 0.999);
    }

    #[test]
    fn test_rotate_keeps_distance_and_clamps_pitch() {
        let target = Vec3::new(0.0, 5.0, 0.0);
        let mut orbit = OrbitCamera::looking_from(Vec3::new(0.0, 10.0, 15.0), target);
        let distance = orbit.distance;

        orbit.rotate(Vec2::new(120.0, 10_000.0));

        assert_eq!(orbit.pitch, MAX_PITCH);
        let position = orbit.calculate_transform().translation;
        assert!(((position - target).length() - distance).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_limits() {
        let mut orbit = OrbitCamera::looking_from(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        orbit.zoom(100.0);
        assert_eq!(orbit.distance, MIN_DISTANCE);
        for _ in 0..100 {
            orbit.zoom(-5.0);
        }
        assert_eq!(orbit.distance, MAX_DISTANCE);
    }
}
