//! Frame driver hosted by Bevy
//!
//! Bevy owns the window, the render graph and the bloom node. This module
//! wraps the ECS pieces in the `orbit::host` traits and runs
//! [`FrameDriver::step`] once per `Update`.

use std::ops::DerefMut;

use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, RequestRedraw};
use orbit::{
    BloomPass, BodyId, CameraProjection, Clock, Extent, FrameContext, FrameDriver, FrameScheduler,
    PostProcess, RenderTarget, SceneGraph,
};

/// The demo camera (projection + bloom live here)
#[derive(Component, Debug, Default)]
pub struct DemoCamera;

/// Marks an orbiting sphere with its arena index
#[derive(Component, Debug, Clone, Copy)]
pub struct OrbitSphere(pub BodyId);

/// Sphere entities indexed by [`BodyId`]
#[derive(Resource, Debug, Default)]
pub struct BodyEntities(pub Vec<Entity>);

/// Size the render surface was last configured with
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct BackingSize(pub Extent);

/// Bookkeeping for the post-processing chain
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PipelineStats {
    /// Buffer size of the intermediate passes
    pub size: Extent,
    pub resizes: u64,
    pub frames_rendered: u64,
}

/// Main-thread resource: the driver owns the (non-`Sync`) parameter inbox
#[derive(Deref, DerefMut)]
pub struct OrbitDriver(pub FrameDriver);

/// Bevy's real-time clock, which starts with the app
pub struct RealClock<'a>(pub &'a Time<Real>);

impl Clock for RealClock<'_> {
    fn elapsed_seconds(&self) -> f32 {
        self.0.elapsed_secs()
    }
}

/// Primary window as a render target
pub struct WindowTarget<'w> {
    pub display: Extent,
    pub backing: ResMut<'w, BackingSize>,
}

impl RenderTarget for WindowTarget<'_> {
    fn display_size(&self) -> Extent {
        self.display
    }

    fn backing_size(&self) -> Extent {
        self.backing.0
    }

    fn set_backing_size(&mut self, size: Extent) {
        // The surface itself is reconfigured by bevy_render from the window size
        self.backing.0 = size;
    }
}

/// Perspective projection component
pub struct ProjectionAdapter<P>(pub P);

impl<P: DerefMut<Target = Projection>> CameraProjection for ProjectionAdapter<P> {
    fn aspect(&self) -> f32 {
        match &*self.0 {
            Projection::Perspective(perspective) => perspective.aspect_ratio,
            _ => 1.0,
        }
    }

    fn set_aspect(&mut self, aspect: f32) {
        if let Projection::Perspective(perspective) = &mut *self.0 {
            perspective.aspect_ratio = aspect;
        }
    }

    fn update_projection(&mut self) {
        // Nothing to do: `set_aspect` wrote through `DerefMut`, which marks the
        // component changed, and Bevy's camera system rebuilds the
        // clip-from-view matrix for changed projections.
    }
}

/// Bloom component as the glow pass
pub struct BloomAdapter<B>(pub B);

impl<B: DerefMut<Target = Bloom>> BloomPass for BloomAdapter<B> {
    fn threshold(&self) -> f32 {
        self.0.prefilter.threshold
    }

    fn set_threshold(&mut self, value: f32) {
        self.0.prefilter.threshold = value;
    }

    fn strength(&self) -> f32 {
        self.0.intensity
    }

    fn set_strength(&mut self, value: f32) {
        self.0.intensity = value;
    }

    fn radius(&self) -> f32 {
        self.0.high_pass_frequency
    }

    fn set_radius(&mut self, value: f32) {
        self.0.high_pass_frequency = value;
    }
}

/// HDR camera + bloom + tonemapping chain
pub struct BloomPipeline<'w, B> {
    pub bloom: BloomAdapter<B>,
    pub stats: ResMut<'w, PipelineStats>,
}

impl<B: DerefMut<Target = Bloom>> PostProcess for BloomPipeline<'_, B> {
    type Bloom = BloomAdapter<B>;

    fn set_size(&mut self, size: Extent) {
        // Bloom mip chains are sized per view by bevy; track what was requested
        self.stats.size = size;
        self.stats.resizes += 1;
    }

    fn render(&mut self) {
        // Drawing happens in the render sub-app right after this Update
        self.stats.frames_rendered += 1;
    }

    fn bloom_mut(&mut self) -> &mut Self::Bloom {
        &mut self.bloom
    }
}

/// Sphere transforms reached through [`BodyEntities`]
pub struct SphereTransforms<'a, 'w, 's> {
    pub query: &'a mut Query<'w, 's, &'static mut Transform, With<OrbitSphere>>,
    pub entities: &'a BodyEntities,
}

impl SceneGraph for SphereTransforms<'_, '_, '_> {
    fn set_body_position(&mut self, id: BodyId, position: Vec3) {
        let Some(&entity) = self.entities.0.get(id.index()) else {
            return;
        };
        if let Ok(mut transform) = self.query.get_mut(entity) {
            transform.translation = position;
        }
    }
}

/// Requests another update from the winit loop
pub struct RedrawScheduler<'a, 'w> {
    pub writer: &'a mut MessageWriter<'w, RequestRedraw>,
}

impl FrameScheduler for RedrawScheduler<'_, '_> {
    fn request_frame(&mut self) {
        self.writer.write(RequestRedraw);
    }
}

/// One frame of the demo
#[allow(clippy::too_many_arguments)]
pub fn drive_frame(
    mut driver: NonSendMut<OrbitDriver>,
    time: Res<Time<Real>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    backing: ResMut<BackingSize>,
    stats: ResMut<PipelineStats>,
    mut cameras: Query<(&mut Projection, &mut Bloom), With<DemoCamera>>,
    mut spheres: Query<&'static mut Transform, With<OrbitSphere>>,
    entities: Res<BodyEntities>,
    mut redraw: MessageWriter<RequestRedraw>,
) -> Result {
    let window = windows.single()?;
    let (projection, bloom) = cameras.single_mut()?;

    let mut target = WindowTarget {
        display: Extent::new(window.physical_width(), window.physical_height()),
        backing,
    };
    let mut camera = ProjectionAdapter(projection);
    let mut pipeline = BloomPipeline {
        bloom: BloomAdapter(bloom),
        stats,
    };
    let mut scene = SphereTransforms {
        query: &mut spheres,
        entities: &entities,
    };
    let mut scheduler = RedrawScheduler {
        writer: &mut redraw,
    };
    let clock = RealClock(&time);

    let mut ctx = FrameContext {
        target: &mut target,
        camera: &mut camera,
        pipeline: &mut pipeline,
        scene: &mut scene,
        scheduler: &mut scheduler,
        clock: &clock,
    };
    let report = driver.step(&mut ctx);

    if let Some(size) = report.resized {
        info!("Render target resized to {}x{}", size.width, size.height);
    }
    Ok(())
}

/// Runs the frame driver every update
pub struct FrameDriverPlugin;

impl Plugin for FrameDriverPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BackingSize>()
            .init_resource::<PipelineStats>()
            .init_resource::<BodyEntities>()
            .add_systems(Update, drive_frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;
    use bevy::ecs::system::RunSystemOnce;
    use orbit::{AnimationParams, OrbitBodies, OrbitLayout, param_channel, sync_bloom};

    #[test]
    fn test_bloom_adapter_writes_component_fields() {
        let mut bloom = Bloom::default();
        let mut pass = BloomAdapter(&mut bloom);

        pass.set_threshold(0.35);
        pass.set_strength(2.2);
        pass.set_radius(0.15);

        assert_eq!(pass.threshold(), 0.35);
        assert_eq!(pass.strength(), 2.2);
        assert_eq!(pass.radius(), 0.15);
        assert_eq!(bloom.prefilter.threshold, 0.35);
        assert_eq!(bloom.intensity, 2.2);
        assert_eq!(bloom.high_pass_frequency, 0.15);
    }

    #[test]
    fn test_sync_bloom_from_params() {
        let mut bloom = Bloom::default();
        let params = AnimationParams::default();
        sync_bloom(&params, &mut BloomAdapter(&mut bloom));
        assert_eq!(bloom.intensity, params.bloom_strength);
        assert_eq!(bloom.prefilter.threshold, params.bloom_threshold);
        assert_eq!(bloom.high_pass_frequency, params.bloom_radius);
    }

    #[test]
    fn test_projection_adapter_sets_perspective_aspect() {
        let mut projection = Projection::Perspective(PerspectiveProjection::default());
        let mut camera = ProjectionAdapter(&mut projection);

        camera.set_aspect(1920.0 / 1080.0);
        camera.update_projection();

        assert!((camera.aspect() - 1.7778).abs() < 1e-3);
    }

    fn spawn_world(backing: Extent) -> World {
        let mut world = World::new();
        world.init_resource::<Messages<RequestRedraw>>();
        world.insert_resource(Time::<Real>::default());
        world.insert_resource(BackingSize(backing));
        world.init_resource::<PipelineStats>();

        world.spawn((Window::default(), PrimaryWindow));
        world.spawn((
            DemoCamera,
            Projection::Perspective(PerspectiveProjection {
                aspect_ratio: backing.aspect(),
                ..default()
            }),
            Bloom::default(),
        ));

        let bodies = OrbitBodies::from_layout(&OrbitLayout::default()).unwrap();
        let entities = bodies
            .iter()
            .map(|body| world.spawn((OrbitSphere(body.id()), Transform::default())).id())
            .collect();
        world.insert_resource(BodyEntities(entities));

        let (_sender, inbox) = param_channel(8);
        let driver = FrameDriver::new(bodies, AnimationParams::default(), inbox);
        world.insert_non_send_resource(OrbitDriver(driver));
        world
    }

    #[test]
    fn test_drive_frame_follows_window_and_moves_spheres() {
        // Window::default() is 1280x720 at scale factor 1
        let mut world = spawn_world(Extent::new(800, 600));

        world.run_system_once::<_, Result, _>(drive_frame).unwrap().unwrap();

        assert_eq!(world.resource::<BackingSize>().0, Extent::new(1280, 720));
        let stats = *world.resource::<PipelineStats>();
        assert_eq!(stats.size, Extent::new(1280, 720));
        assert_eq!(stats.resizes, 1);
        assert_eq!(stats.frames_rendered, 1);
        assert_eq!(world.resource::<Messages<RequestRedraw>>().len(), 1);

        let mut projections = world.query::<&Projection>();
        let Projection::Perspective(perspective) = projections.single(&world).unwrap() else {
            panic!("expected perspective projection");
        };
        assert!((perspective.aspect_ratio - 1280.0 / 720.0).abs() < 1e-4);

        let mut spheres = world.query::<(&OrbitSphere, &Transform)>();
        for (sphere, transform) in spheres.iter(&world) {
            let p = transform.translation;
            assert_eq!(p.y, 5.0, "sphere {:?}", sphere.0);
            assert!((Vec2::new(p.x, p.z).length() - 5.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_drive_frame_second_run_does_not_resize() {
        let mut world = spawn_world(Extent::new(1280, 720));

        world.run_system_once::<_, Result, _>(drive_frame).unwrap().unwrap();
        world.run_system_once::<_, Result, _>(drive_frame).unwrap().unwrap();

        let stats = *world.resource::<PipelineStats>();
        assert_eq!(stats.resizes, 0);
        assert_eq!(stats.frames_rendered, 2);
    }
}
