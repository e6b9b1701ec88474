//! Per-frame orchestration
//!
//! One call to [`FrameDriver::step`] is one frame:
//!
//! 1. apply queued parameter changes
//! 2. follow display size changes (backing buffer, pipeline buffers, camera aspect)
//! 3. read the clock and move the orbiting bodies
//! 4. render through the post-processing pipeline
//! 5. ask the host for the next frame

use crate::animator::OrbitAnimator;
use crate::binding::apply_change;
use crate::body::OrbitBodies;
use crate::channel::ParamInbox;
use crate::clock::Clock;
use crate::host::{
    BloomPass, CameraProjection, Extent, FrameScheduler, PostProcess, RenderTarget, SceneGraph,
};
use crate::params::AnimationParams;

/// Where the driver is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameState {
    /// Between frames, waiting for the host to call `step`
    #[default]
    Idle,
    /// Inside `step`
    Rendering,
}

/// Collaborators borrowed for the duration of one frame
pub struct FrameContext<'a, T, C, P, S, R, K>
where
    T: ?Sized,
    C: ?Sized,
    P: ?Sized,
    S: ?Sized,
    R: ?Sized,
    K: ?Sized,
{
    pub target: &'a mut T,
    pub camera: &'a mut C,
    pub pipeline: &'a mut P,
    pub scene: &'a mut S,
    pub scheduler: &'a mut R,
    pub clock: &'a K,
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// 1-based frame number
    pub frame: u64,
    /// Clock reading used for the animation
    pub elapsed: f32,
    /// New size if the render target was reconfigured
    pub resized: Option<Extent>,
    /// Number of parameter changes applied before animating
    pub changes_applied: usize,
}

/// Bring the backing buffer, pipeline buffers and camera aspect in line with
/// the displayed size. Returns the new size when anything changed.
///
/// Calling this again with an unchanged display size does nothing.
pub fn sync_size<T, C, P>(target: &mut T, camera: &mut C, pipeline: &mut P) -> Option<Extent>
where
    T: RenderTarget + ?Sized,
    C: CameraProjection + ?Sized,
    P: PostProcess + ?Sized,
{
    let size = target.display_size();
    if size == target.backing_size() {
        return None;
    }
    if size.is_degenerate() {
        tracing::warn!("Ignoring degenerate display size {}x{}", size.width, size.height);
        return None;
    }

    target.set_backing_size(size);
    pipeline.set_size(size);
    camera.set_aspect(size.aspect());
    camera.update_projection();

    tracing::debug!(
        "Resized to {}x{} (aspect {:.3})",
        size.width,
        size.height,
        size.aspect()
    );
    Some(size)
}

/// Owns the animation state and runs one frame at a time
#[derive(Debug)]
pub struct FrameDriver {
    params: AnimationParams,
    bodies: OrbitBodies,
    inbox: ParamInbox,
    animator: OrbitAnimator,
    state: FrameState,
    frame: u64,
}

impl FrameDriver {
    pub fn new(bodies: OrbitBodies, params: AnimationParams, inbox: ParamInbox) -> Self {
        Self {
            params,
            bodies,
            inbox,
            animator: OrbitAnimator,
            state: FrameState::Idle,
            frame: 0,
        }
    }

    pub fn params(&self) -> &AnimationParams {
        &self.params
    }

    pub fn bodies(&self) -> &OrbitBodies {
        &self.bodies
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Frames completed so far
    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Run one frame against the given collaborators
    pub fn step<T, C, P, S, R, K>(
        &mut self,
        ctx: &mut FrameContext<'_, T, C, P, S, R, K>,
    ) -> FrameReport
    where
        T: RenderTarget + ?Sized,
        C: CameraProjection + ?Sized,
        P: PostProcess + ?Sized,
        S: SceneGraph + ?Sized,
        R: FrameScheduler + ?Sized,
        K: Clock + ?Sized,
    {
        self.state = FrameState::Rendering;

        let changes_applied = self.apply_pending(ctx.pipeline.bloom_mut());
        let resized = sync_size(&mut *ctx.target, &mut *ctx.camera, &mut *ctx.pipeline);

        let elapsed = ctx.clock.elapsed_seconds();
        self.animator.animate(
            &mut self.bodies,
            elapsed,
            self.params.rotation_speed,
            &mut *ctx.scene,
        );

        ctx.pipeline.render();
        ctx.scheduler.request_frame();

        self.frame += 1;
        self.state = FrameState::Idle;

        let report = FrameReport {
            frame: self.frame,
            elapsed,
            resized,
            changes_applied,
        };
        tracing::trace!("{report:?}");
        report
    }

    fn apply_pending<B: BloomPass + ?Sized>(&mut self, bloom: &mut B) -> usize {
        let changes = self.inbox.drain();
        for change in &changes {
            apply_change(*change, &mut self.params, bloom);
        }
        changes.len()
    }
}
