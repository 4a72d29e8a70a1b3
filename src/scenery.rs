//! Background scenery for the viewer.
//!
//! A black clear color and a sparse starfield of small unlit spheres on a
//! far shell. Purely cosmetic.

use bevy::prelude::*;
use rand::Rng;

/// Radius of the shell the stars sit on. Inside the camera far plane so the
/// stars stay visible at maximum zoom-out.
const STARFIELD_RADIUS: f32 = 800.0;

/// Number of background stars.
const STAR_COUNT: usize = 400;

/// Plugin providing background visual elements.
pub struct SceneryPlugin;

impl Plugin for SceneryPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, spawn_starfield);
    }
}

/// Scatter small unlit spheres uniformly over a far shell around the scene.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    let star_mesh = meshes.add(Sphere::new(0.5));

    let mut rng = rand::thread_rng();
    for _ in 0..STAR_COUNT {
        // Uniform direction on the sphere: uniform longitude, sin(latitude)
        // uniform in [-1, 1].
        let yaw = rng.gen_range(0.0..std::f32::consts::TAU);
        let pitch = rng.gen_range(-1.0f32..1.0).asin();
        let direction = Vec3::new(
            pitch.cos() * yaw.sin(),
            pitch.sin(),
            pitch.cos() * yaw.cos(),
        );
        let scale = rng.gen_range(0.5..1.5);

        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(star_material.clone()),
            Transform::from_translation(direction * STARFIELD_RADIUS)
                .with_scale(Vec3::splat(scale)),
        ));
    }

    info!("Spawned {STAR_COUNT} background stars");
}
