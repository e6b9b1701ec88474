//! Contracts consumed from the rendering engine
//!
//! The frame driver only talks to the engine through these traits. The Bevy
//! crate implements them over ECS components; tests implement them with
//! plain recorders.

use glam::Vec3;

use crate::body::BodyId;

/// Size of a surface in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero (minimized window, detached canvas)
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Surface the frame is drawn into
pub trait RenderTarget {
    /// Size currently shown on screen
    fn display_size(&self) -> Extent;

    /// Size the backing buffer was last configured with
    fn backing_size(&self) -> Extent;

    /// Reconfigure the backing buffer
    fn set_backing_size(&mut self, size: Extent);
}

/// Perspective camera whose aspect follows the render target
pub trait CameraProjection {
    fn aspect(&self) -> f32;

    fn set_aspect(&mut self, aspect: f32);

    /// Mark the projection matrix for recomputation; must follow `set_aspect`
    fn update_projection(&mut self);
}

/// Live parameters of the glow pass
pub trait BloomPass {
    fn threshold(&self) -> f32;
    fn set_threshold(&mut self, value: f32);

    fn strength(&self) -> f32;
    fn set_strength(&mut self, value: f32);

    fn radius(&self) -> f32;
    fn set_radius(&mut self, value: f32);
}

/// Ordered chain of image-space passes (scene, bloom, output)
pub trait PostProcess {
    type Bloom: BloomPass + ?Sized;

    /// Resize every intermediate buffer
    fn set_size(&mut self, size: Extent);

    /// Run all passes for the current frame
    fn render(&mut self);

    fn bloom_mut(&mut self) -> &mut Self::Bloom;
}

/// Owner of the renderable objects
pub trait SceneGraph {
    fn set_body_position(&mut self, id: BodyId, position: Vec3);
}

/// Host facility that calls the frame driver again on the next refresh
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_aspect() {
        assert!((Extent::new(800, 600).aspect() - 1.3333).abs() < 1e-3);
        assert!((Extent::new(1920, 1080).aspect() - 1.7778).abs() < 1e-3);
    }

    #[test]
    fn test_extent_degenerate() {
        assert!(Extent::new(0, 600).is_degenerate());
        assert!(Extent::new(800, 0).is_degenerate());
        assert!(!Extent::new(1, 1).is_degenerate());
    }
}
