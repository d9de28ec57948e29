//! Per-tick simulation: vehicle motion and traffic signal cycling.
//!
//! Both simulators run once per frame with an explicit delta time. They
//! mutate only their own transient state (a vehicle's path parameter, a
//! light's phase clock) and publish read-only output resources for the
//! renderer; layout geometry is never touched after generation.

use bevy::prelude::*;

pub mod motion;
pub mod signals;

use self::signals::LightPhase;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationSpeed>()
            .init_resource::<VehicleTransforms>()
            .init_resource::<SignalPhases>()
            .add_plugins(motion::MotionPlugin)
            .add_plugins(signals::SignalPlugin);
    }
}

/// Controls simulation tick speed.
#[derive(Resource)]
pub struct SimulationSpeed {
    /// True if simulation is paused (time doesn't advance).
    pub paused: bool,
    /// Speed multiplier: 1.0 = normal, 2.0 = fast, 0.5 = slow.
    pub speed: f32,
}

impl Default for SimulationSpeed {
    fn default() -> Self {
        Self {
            paused: false,
            speed: 1.0,
        }
    }
}

/// A vehicle's renderer-facing transform for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleTransform {
    pub position: Vec3,
    /// Heading as `atan2(dir.x, dir.z)`.
    pub yaw: f32,
}

/// Per-tick vehicle transforms, indexed by vehicle index in the layout.
/// Rebuilt every frame; read-only for consumers.
#[derive(Resource, Default)]
pub struct VehicleTransforms(pub Vec<VehicleTransform>);

/// Per-tick signal phases, indexed by light id. Rebuilt every frame.
#[derive(Resource, Default)]
pub struct SignalPhases(pub Vec<LightPhase>);
