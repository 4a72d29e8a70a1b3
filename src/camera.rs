//! Camera system for the solar system viewer.
//!
//! Provides a damped orbit controller: mouse drag orbits around the scene
//! origin, the scroll wheel zooms, and motion eases out over a few frames
//! instead of snapping.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
    window::{PrimaryWindow, WindowResized},
};

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 75.0;

/// Near clip plane distance (display units).
pub const NEAR_PLANE: f32 = 0.1;

/// Far clip plane distance (display units).
pub const FAR_PLANE: f32 = 1000.0;

/// Initial camera position (display units).
pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 10.0, 20.0);

/// Fraction of the remaining distance to the target state covered per frame.
pub const DAMPING_FACTOR: f32 = 0.05;

/// Radians of orbit per pixel of mouse drag.
pub const ORBIT_SENSITIVITY: f32 = 0.005;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Closest allowed orbit radius.
pub const MIN_RADIUS: f32 = 1.0;

/// Furthest allowed orbit radius. Stays inside the far clip plane so the
/// static bodies never vanish while zooming out.
pub const MAX_RADIUS: f32 = 900.0;

/// Pitch limit in radians, just short of the poles where yaw degenerates.
const PITCH_LIMIT: f32 = 1.54;

/// Aspect ratio used when no primary window exists (headless tests).
const FALLBACK_ASPECT: f32 = 16.0 / 9.0;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Damped orbit state around the scene origin.
///
/// Input systems write the `target_*` fields; `apply_damping` moves the
/// smoothed fields toward them once per frame and rebuilds the camera
/// transform from the result.
#[derive(Component, Clone, Debug)]
pub struct OrbitController {
    /// Smoothed rotation around the Y axis (radians).
    pub yaw: f32,
    /// Smoothed elevation above the XZ plane (radians).
    pub pitch: f32,
    /// Smoothed distance from the origin.
    pub radius: f32,
    /// Where drag input wants the yaw to end up.
    pub target_yaw: f32,
    /// Where drag input wants the pitch to end up.
    pub target_pitch: f32,
    /// Where scroll input wants the radius to end up.
    pub target_radius: f32,
    /// Whether scroll wheel zoom is active.
    pub zoom_enabled: bool,
}

impl OrbitController {
    /// Build a controller whose smoothed and target states both match the
    /// given camera position, so the first frame renders exactly there.
    pub fn from_position(position: Vec3) -> Self {
        let radius = position.length().clamp(MIN_RADIUS, MAX_RADIUS);
        let pitch = (position.y / radius).clamp(-1.0, 1.0).asin();
        let yaw = position.x.atan2(position.z);
        Self {
            yaw,
            pitch,
            radius,
            target_yaw: yaw,
            target_pitch: pitch,
            target_radius: radius,
            zoom_enabled: true,
        }
    }

    /// Camera position for the current smoothed state.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.pitch.cos() * self.yaw.sin(),
            self.radius * self.pitch.sin(),
            self.radius * self.pitch.cos() * self.yaw.cos(),
        )
    }

    /// Advance the smoothed state one damping step toward the target.
    pub fn step(&mut self) {
        self.yaw += (self.target_yaw - self.yaw) * DAMPING_FACTOR;
        self.pitch += (self.target_pitch - self.pitch) * DAMPING_FACTOR;
        self.radius += (self.target_radius - self.radius) * DAMPING_FACTOR;
    }
}

/// Plugin providing camera functionality.
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera).add_systems(
            Update,
            ((orbit_input, apply_damping).chain(), handle_resize),
        );
    }
}

/// Spawn the main camera with a perspective projection and a synchronized
/// orbit controller.
fn setup_camera(mut commands: Commands, window: Query<&Window, With<PrimaryWindow>>) {
    let aspect = window
        .single()
        .map(|window| window.width() / window.height())
        .unwrap_or(FALLBACK_ASPECT);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            aspect_ratio: aspect,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        Transform::from_translation(INITIAL_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitController::from_position(INITIAL_POSITION),
        MainCamera,
    ));
}

/// Feed mouse drag and scroll into the controller's target state.
fn orbit_input(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut controllers: Query<&mut OrbitController, With<MainCamera>>,
) {
    let Ok(mut controller) = controllers.single_mut() else {
        return;
    };

    if mouse_buttons.pressed(MouseButton::Left) && mouse_motion.delta != Vec2::ZERO {
        controller.target_yaw -= mouse_motion.delta.x * ORBIT_SENSITIVITY;
        controller.target_pitch = (controller.target_pitch
            + mouse_motion.delta.y * ORBIT_SENSITIVITY)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    if controller.zoom_enabled && mouse_scroll.delta.y != 0.0 {
        // Logarithmic zoom: multiply radius by factor based on scroll direction
        let zoom_factor = 1.0 - mouse_scroll.delta.y * ZOOM_SPEED;
        controller.target_radius =
            (controller.target_radius * zoom_factor).clamp(MIN_RADIUS, MAX_RADIUS);
    }
}

/// Advance the controller's damping state and rebuild the camera transform.
///
/// Runs in `Update`, so the smoothed state is advanced strictly before the
/// frame it affects is drawn.
fn apply_damping(
    mut cameras: Query<(&mut OrbitController, &mut Transform), With<MainCamera>>,
) {
    let Ok((mut controller, mut transform)) = cameras.single_mut() else {
        return;
    };

    controller.step();
    *transform =
        Transform::from_translation(controller.position()).looking_at(Vec3::ZERO, Vec3::Y);
}

/// React to viewport size changes by recomputing the projection aspect ratio.
///
/// Resizing the render surface itself is handled by the windowing backend.
fn handle_resize(
    mut resize_events: EventReader<WindowResized>,
    mut projections: Query<&mut Projection, With<MainCamera>>,
) {
    let Some(resized) = resize_events.read().last() else {
        return;
    };

    let Ok(mut projection) = projections.single_mut() else {
        return;
    };

    let Projection::Perspective(ref mut perspective) = *projection else {
        return;
    };

    if resized.height > 0.0 {
        perspective.aspect_ratio = resized.width / resized.height;
    }
}
