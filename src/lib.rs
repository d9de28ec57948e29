//! Scenario-driven procedural city scene.
//!
//! Turns a small [`scenario::ScenarioConfig`] into a deterministic
//! [`procgen::layout::CityLayout`] snapshot and animates its vehicles and
//! traffic signals frame over frame. Rendering is an external consumer: it
//! reads the layout plus the per-tick transform/phase outputs and owns no
//! generation logic.

use bevy::prelude::*;

pub mod procgen;
pub mod scenario;
pub mod simulation;

/// Everything the scene core needs: config resource, generation, simulation.
pub struct CityScenePlugin;

impl Plugin for CityScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(scenario::ScenarioPlugin)
            .add_plugins(procgen::ProcgenPlugin)
            .add_plugins(simulation::SimulationPlugin);
    }
}
