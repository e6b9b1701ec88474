//! Startup scene: HDR bloom camera, lights and the emissive spheres

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::post_process::bloom::{Bloom, BloomCompositeMode};
use bevy::prelude::*;
use bevy::render::view::Hdr;
use orbit::{AnimationParams, DemoConfig, sync_bloom};

use crate::camera::OrbitCamera;
use crate::frame::{BloomAdapter, BodyEntities, DemoCamera, OrbitDriver, OrbitSphere};

/// Resolved demo configuration
#[derive(Resource, Debug, Clone, Default, Deref)]
pub struct DemoSettings(pub DemoConfig);

/// Bloom seeded from the parameter record
///
/// Strength goes above 1, so the glow is added on top of the scene rather
/// than blended against it.
pub fn demo_bloom(params: &AnimationParams) -> Bloom {
    let mut bloom = Bloom {
        composite_mode: BloomCompositeMode::Additive,
        ..Bloom::NATURAL
    };
    sync_bloom(params, &mut BloomAdapter(&mut bloom));
    bloom
}

/// Spawns the camera, lights and one sphere per orbit body
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<DemoSettings>,
    driver: NonSend<OrbitDriver>,
    mut entities: ResMut<BodyEntities>,
) {
    let params = *driver.params();
    let camera = &settings.camera;
    let window = &settings.window;

    let eye = camera.position;
    let target = camera.target;
    commands.spawn((
        Camera3d::default(),
        Hdr,
        Tonemapping::TonyMcMapface,
        demo_bloom(&params),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            near: camera.near,
            far: camera.far,
            aspect_ratio: window.width as f32 / window.height.max(1) as f32,
        }),
        OrbitCamera::looking_from(eye, target),
        Transform::from_translation(eye).looking_at(target, Vec3::Y),
        DemoCamera,
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 80.0,
        ..default()
    });
    commands.spawn((
        PointLight {
            intensity: 200_000.0,
            range: 50.0,
            ..default()
        },
        Transform::from_xyz(0.0, settings.orbit.height, 0.0),
    ));

    let sphere_mesh = meshes.add(Sphere::new(settings.orbit.sphere_radius).mesh().uv(32, 18));
    let intensity = settings.orbit.emissive_intensity;

    entities.0.clear();
    for body in driver.bodies().iter() {
        let [r, g, b] = body.color().to_array();
        let material = materials.add(StandardMaterial {
            base_color: Color::srgb(r, g, b),
            emissive: LinearRgba::rgb(r, g, b) * intensity,
            ..default()
        });

        let entity = commands
            .spawn((
                Mesh3d(sphere_mesh.clone()),
                MeshMaterial3d(material),
                Transform::from_translation(body.position_at(0.0, params.rotation_speed)),
                OrbitSphere(body.id()),
            ))
            .id();
        entities.0.push(entity);
    }

    info!(
        "Scene ready: {} sphere(s), bloom strength {:.2}",
        entities.0.len(),
        params.bloom_strength
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use orbit::{FrameDriver, OrbitBodies, ParamField, param_channel};

    #[test]
    fn test_demo_bloom_is_additive_for_strength_above_one() {
        let mut params = AnimationParams::default();
        params.set(ParamField::BloomStrength, 2.5);

        let bloom = demo_bloom(&params);

        assert_eq!(bloom.composite_mode, BloomCompositeMode::Additive);
        assert_eq!(bloom.intensity, 2.5);
        assert_eq!(bloom.high_pass_frequency, params.bloom_radius);
    }

    #[test]
    fn test_setup_scene_spawns_one_sphere_per_body() {
        let config = DemoConfig::default();
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        world.init_resource::<BodyEntities>();
        world.insert_resource(DemoSettings(config.clone()));

        let bodies = OrbitBodies::from_layout(&config.orbit.layout()).unwrap();
        let (_sender, inbox) = param_channel(4);
        let driver = FrameDriver::new(bodies, AnimationParams::default(), inbox);
        world.insert_non_send_resource(OrbitDriver(driver));

        world.run_system_once(setup_scene).unwrap();

        let entities = world.resource::<BodyEntities>().0.clone();
        assert_eq!(entities.len(), config.orbit.count);
        for (index, entity) in entities.iter().enumerate() {
            let sphere = world.get::<OrbitSphere>(*entity).unwrap();
            assert_eq!(sphere.0.index(), index);
            let position = world.get::<Transform>(*entity).unwrap().translation;
            assert_eq!(position.y, config.orbit.height);
        }

        let mut cameras = world.query_filtered::<&Bloom, With<DemoCamera>>();
        let bloom = cameras.single(&world).unwrap();
        assert_eq!(bloom.intensity, config.params.bloom_strength);
        assert_eq!(bloom.prefilter.threshold, config.params.bloom_threshold);
        assert_eq!(bloom.composite_mode, BloomCompositeMode::Additive);
    }
}
