//! Common utilities for headless integration tests.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy::window::WindowResized;

/// Create a minimal Bevy app for testing without windowing or GPU.
///
/// Provides the asset stores, input state, and resize event the viewer's
/// systems expect from `DefaultPlugins`.
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(Assets::<Mesh>::default());
    app.insert_resource(Assets::<StandardMaterial>::default());
    app.init_resource::<ButtonInput<MouseButton>>();
    app.init_resource::<AccumulatedMouseMotion>();
    app.init_resource::<AccumulatedMouseScroll>();
    app.add_event::<WindowResized>();
    app
}
