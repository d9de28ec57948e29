//! Procedural city-layout generation.
//!
//! - Weighted block classification per scenario
//! - Building, park, mixed-use, and tree placement
//! - Street grid emission and intersection graph
//! - Vehicle placement with precomputed waypoint paths

use bevy::prelude::*;

pub mod buildings;
pub mod classifier;
pub mod layout;
pub mod mixed_use;
pub mod parks;
pub mod streets;
pub mod trees;
pub mod vehicles;

pub struct ProcgenPlugin;

impl Plugin for ProcgenPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(streets::StreetsPlugin)
            .add_plugins(layout::LayoutPlugin);
    }
}
