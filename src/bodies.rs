//! Static placement of the Sun and planets.
//!
//! Bodies are flat-shaded spheres at fixed display distances along the +X
//! axis. The layout is a size/distance sketch, not an orbital model: every
//! planet sits on the same ray from the Sun.

use bevy::prelude::*;

/// Sun sphere radius (display units).
pub const SUN_RADIUS: f32 = 3.17;

/// Sun color, flat yellow-gold.
pub const SUN_COLOR: Color = Color::srgb(1.0, 0.867, 0.0);

/// Fixed display parameters for one planet.
#[derive(Clone, Copy, Debug)]
pub struct BodyDescriptor {
    pub name: &'static str,
    /// Distance from the Sun along +X (display units).
    pub distance: f32,
    /// Sphere radius (display units).
    pub radius: f32,
    pub color: Color,
}

/// The nine planets, Mercury through Pluto.
///
/// Distances and radii are display units on unrelated scales; they are kept
/// exactly as tuned for the on-screen composition.
pub const PLANETS: [BodyDescriptor; 9] = [
    BodyDescriptor { name: "Mercury", distance: 5.79, radius: 0.4879, color: Color::srgb(0.667, 0.667, 0.667) },
    BodyDescriptor { name: "Venus", distance: 10.82, radius: 1.2104, color: Color::srgb(1.0, 0.824, 0.498) },
    BodyDescriptor { name: "Earth", distance: 14.96, radius: 1.2756, color: Color::srgb(0.173, 0.475, 0.69) },
    BodyDescriptor { name: "Mars", distance: 22.80, radius: 0.6792, color: Color::srgb(1.0, 0.341, 0.2) },
    BodyDescriptor { name: "Jupiter", distance: 77.85, radius: 1.42984, color: Color::srgb(0.851, 0.702, 0.549) },
    BodyDescriptor { name: "Saturn", distance: 143.20, radius: 1.20536, color: Color::srgb(0.957, 0.89, 0.761) },
    BodyDescriptor { name: "Uranus", distance: 286.70, radius: 5.1118, color: Color::srgb(0.498, 1.0, 0.831) },
    BodyDescriptor { name: "Neptune", distance: 451.50, radius: 4.9528, color: Color::srgb(0.294, 0.439, 0.867) },
    BodyDescriptor { name: "Pluto", distance: 590.64, radius: 2.376, color: Color::srgb(0.749, 0.655, 0.478) },
];

/// Marker component for the Sun entity.
#[derive(Component)]
pub struct Sun {
    /// Sphere radius baked into the mesh (display units).
    pub radius: f32,
}

/// Marker component for a planet entity.
#[derive(Component)]
pub struct Planet {
    pub name: &'static str,
    /// Sphere radius baked into the mesh (display units).
    pub radius: f32,
}

/// Translation for a planet descriptor. All planets sit on the +X axis.
pub const fn planet_translation(descriptor: &BodyDescriptor) -> Vec3 {
    Vec3::new(descriptor.distance, 0.0, 0.0)
}

/// Plugin providing static body placement.
pub struct StaticBodiesPlugin;

impl Plugin for StaticBodiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_static_bodies);
    }
}

/// Flat-shaded material: bodies render in their plain color, unaffected by
/// scene lighting.
fn flat_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    }
}

/// Insert the Sun at the scene origin.
///
/// Not idempotent: calling this twice duplicates the body.
pub fn spawn_sun(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(SUN_RADIUS))),
            MeshMaterial3d(materials.add(flat_material(SUN_COLOR))),
            Transform::from_translation(Vec3::ZERO),
            Sun { radius: SUN_RADIUS },
        ))
        .id()
}

/// Insert one sphere per planet descriptor at (distance, 0, 0).
pub fn spawn_planets(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    for descriptor in &PLANETS {
        commands.spawn((
            Mesh3d(meshes.add(Sphere::new(descriptor.radius))),
            MeshMaterial3d(materials.add(flat_material(descriptor.color))),
            Transform::from_translation(planet_translation(descriptor)),
            Planet {
                name: descriptor.name,
                radius: descriptor.radius,
            },
        ));
    }
}

/// Startup system placing the Sun and all planets exactly once.
fn spawn_static_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_sun(&mut commands, &mut meshes, &mut materials);
    spawn_planets(&mut commands, &mut meshes, &mut materials);

    info!("Placed the Sun and {} planets", PLANETS.len());
}
