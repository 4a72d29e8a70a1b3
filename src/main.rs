//! Neoscope - Solar System & Near-Earth Object Viewer
//!
//! A desktop application that renders a simplified solar system and
//! overlays markers for near-Earth objects fetched from a remote feed.

use bevy::prelude::*;

mod bodies;
mod camera;
mod feed;
mod neo;
mod scenery;

use bodies::StaticBodiesPlugin;
use camera::OrbitCameraPlugin;
use feed::{FeedConfig, NeoFeedPlugin};
use scenery::SceneryPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        // Insert resources before plugins that depend on them
        .insert_resource(FeedConfig::default())
        // Add viewer plugins
        .add_plugins((
            OrbitCameraPlugin,
            SceneryPlugin,
            StaticBodiesPlugin,
            NeoFeedPlugin,
        ))
        .run();
}
