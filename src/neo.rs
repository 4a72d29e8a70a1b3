//! Placement of fetched near-Earth objects into the scene.
//!
//! Each record becomes one flat-shaded red sphere on a circle around the
//! origin: radius from the object's estimated diameter, circle radius from
//! its miss distance, angle drawn uniformly at random. Markers are appended
//! once and never updated.

use std::f32::consts::TAU;
use std::sync::mpsc::TryRecvError;

use bevy::prelude::*;
use rand::Rng;

use crate::feed::{FeedError, FeedState, FeedTask, MIN_DISPLAY_RADIUS, NeoRecord};

/// Marker color: flat red.
pub const NEO_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

/// Marker component for a placed near-Earth object.
#[derive(Component, Clone, Debug)]
pub struct NeoMarker {
    pub name: String,
    /// Sphere radius baked into the mesh (display units).
    pub radius: f32,
}

/// Translation for a marker at the given circle radius and angle. Markers
/// share the Y = 0 plane with the planets.
pub fn neo_translation(display_distance: f32, angle: f32) -> Vec3 {
    Vec3::new(
        display_distance * angle.cos(),
        0.0,
        display_distance * angle.sin(),
    )
}

/// Spawn one marker per record at an independently random angle, logging a
/// diagnostic line per object. Returns the number placed.
///
/// The angle source is injected so tests can seed it.
pub fn spawn_neo_markers(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    rng: &mut impl Rng,
    records: &[NeoRecord],
) -> usize {
    for record in records {
        let radius = record.display_radius();
        let distance = record.display_distance();

        if record.diameter_km <= 0.0 || record.diameter_km.is_nan() {
            warn!(
                "NEO {} reports no usable diameter, rendering at minimum size",
                record.name
            );
        }
        debug_assert!(radius >= MIN_DISPLAY_RADIUS);

        let angle = rng.gen_range(0.0..TAU);
        let translation = neo_translation(distance, angle);
        debug_assert!(translation.is_finite());

        commands.spawn((
            Mesh3d(meshes.add(Sphere::new(radius))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: NEO_COLOR,
                unlit: true,
                ..default()
            })),
            Transform::from_translation(translation),
            NeoMarker {
                name: record.name.clone(),
                radius,
            },
        ));

        info!(
            "Added NEO: {} (size {:.3}, distance {:.3})",
            record.name, radius, distance
        );
    }

    records.len()
}

/// Poll the background fetch and place markers when the result lands.
///
/// Until the fetch resolves this is a no-op, so markers pop in on whatever
/// frame the response arrives; static bodies and the camera never wait.
pub fn place_fetched_neos(
    mut commands: Commands,
    task: Option<Res<FeedTask>>,
    mut state: ResMut<FeedState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(task) = task else {
        return;
    };

    let outcome = match task.0.lock().unwrap().try_recv() {
        Ok(outcome) => outcome,
        Err(TryRecvError::Empty) => return,
        Err(TryRecvError::Disconnected) => Err(FeedError::WorkerGone),
    };

    commands.remove_resource::<FeedTask>();

    match outcome {
        Ok(records) => {
            let mut rng = rand::thread_rng();
            let placed =
                spawn_neo_markers(&mut commands, &mut meshes, &mut materials, &mut rng, &records);
            *state = FeedState::Loaded;
            info!("NEO feed ingestion complete: {placed} objects placed");
        }
        Err(error) => {
            *state = FeedState::Failed;
            error!("Failed to fetch NEO data: {error}");
        }
    }
}
