//! Traffic signal phase cycling.
//!
//! Each light is an independent finite state machine cycling
//! green -> yellow -> red -> green, transitioning when its elapsed time
//! reaches the scenario's interval and resetting the clock to zero. The
//! fixed set of lights is spawned once at startup and lives for the whole
//! session; regeneration only re-sites them at the new grid's central
//! intersections, preserving phase state.

use bevy::prelude::*;

use crate::procgen::layout::regenerate_layout;
use crate::procgen::streets::StreetGraph;
use crate::scenario::ScenarioConfig;
use crate::simulation::{SignalPhases, SimulationSpeed};

/// Number of signal controllers in the scene.
pub const LIGHT_COUNT: usize = 4;

/// Traffic light phase.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LightPhase {
    #[default]
    Green,
    Yellow,
    Red,
}

impl LightPhase {
    /// The cyclic successor: green -> yellow -> red -> green.
    pub fn next(self) -> Self {
        match self {
            LightPhase::Green => LightPhase::Yellow,
            LightPhase::Yellow => LightPhase::Red,
            LightPhase::Red => LightPhase::Green,
        }
    }
}

/// State machine for one traffic light.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct TrafficLightController {
    /// Stable index into the [`SignalPhases`] output.
    pub id: usize,
    pub position: Vec2,
    pub phase: LightPhase,
    /// Seconds spent in the current phase.
    pub elapsed: f32,
    /// Seconds per phase, from the scenario.
    pub interval: f32,
}

pub struct SignalPlugin;

impl Plugin for SignalPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_signals).add_systems(
            Update,
            (
                site_signals
                    .run_if(resource_changed::<ScenarioConfig>)
                    .after(regenerate_layout),
                advance_signal_phases,
                sync_signal_phases,
            )
                .chain(),
        );
    }
}

/// Spawn the fixed light set with staggered phases and clocks so the
/// lights never all change at once.
fn spawn_signals(mut commands: Commands, config: Res<ScenarioConfig>) {
    let interval = config.scenario.signal_interval();

    for id in 0..LIGHT_COUNT {
        let phase = match id % 3 {
            0 => LightPhase::Green,
            1 => LightPhase::Yellow,
            _ => LightPhase::Red,
        };
        commands.spawn(TrafficLightController {
            id,
            position: Vec2::ZERO,
            phase,
            elapsed: interval * 0.25 * id as f32,
            interval,
        });
    }
}

/// Move the lights to the new grid's most central intersections and adopt
/// the new scenario interval. Phase state is deliberately preserved.
fn site_signals(
    config: Res<ScenarioConfig>,
    streets: Res<StreetGraph>,
    mut lights: Query<&mut TrafficLightController>,
) {
    let central = streets.central_intersections(LIGHT_COUNT);
    let interval = config.scenario.signal_interval();

    for mut light in lights.iter_mut() {
        light.position = central.get(light.id).copied().unwrap_or(Vec2::ZERO);
        light.interval = interval;
    }
}

fn advance_signal_phases(
    time: Res<Time>,
    speed: Res<SimulationSpeed>,
    mut lights: Query<&mut TrafficLightController>,
) {
    if speed.paused {
        return;
    }
    let dt = time.delta_secs() * speed.speed;

    for mut light in lights.iter_mut() {
        advance_signal(&mut light, dt);
    }
}

fn sync_signal_phases(lights: Query<&TrafficLightController>, mut phases: ResMut<SignalPhases>) {
    phases.0.clear();
    phases.0.resize(LIGHT_COUNT, LightPhase::default());
    for light in lights.iter() {
        if let Some(slot) = phases.0.get_mut(light.id) {
            *slot = light.phase;
        }
    }
}

/// Advance one light by `dt` seconds. Returns true if a phase transition
/// fired this tick; the elapsed clock resets to zero on transition.
pub fn advance_signal(light: &mut TrafficLightController, dt: f32) -> bool {
    if !dt.is_finite() || dt < 0.0 || light.interval <= 0.0 {
        return false;
    }

    light.elapsed += dt;
    if light.elapsed >= light.interval {
        light.elapsed = 0.0;
        light.phase = light.phase.next();
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_light(interval: f32) -> TrafficLightController {
        TrafficLightController {
            id: 0,
            position: Vec2::ZERO,
            phase: LightPhase::Green,
            elapsed: 0.0,
            interval,
        }
    }

    #[test]
    fn n_full_intervals_fire_exactly_n_transitions() {
        let mut light = test_light(5.0);
        let mut transitions = 0;

        for _ in 0..12 {
            if advance_signal(&mut light, 5.0) {
                transitions += 1;
            }
        }

        assert_eq!(transitions, 12);
    }

    #[test]
    fn phases_cycle_in_order() {
        let mut light = test_light(3.0);
        let mut observed = vec![light.phase];

        for _ in 0..6 {
            advance_signal(&mut light, 3.0);
            observed.push(light.phase);
        }

        assert_eq!(
            observed,
            vec![
                LightPhase::Green,
                LightPhase::Yellow,
                LightPhase::Red,
                LightPhase::Green,
                LightPhase::Yellow,
                LightPhase::Red,
                LightPhase::Green,
            ]
        );
    }

    #[test]
    fn elapsed_resets_to_zero_on_transition() {
        let mut light = test_light(5.0);
        assert!(!advance_signal(&mut light, 4.0));
        assert!(advance_signal(&mut light, 1.0));
        assert_eq!(light.elapsed, 0.0);
        assert_eq!(light.phase, LightPhase::Yellow);
    }

    #[test]
    fn sub_interval_ticks_accumulate() {
        let mut light = test_light(3.0);
        let mut transitions = 0;

        // 90 ticks of 0.1s = 9s = 3 intervals.
        for _ in 0..90 {
            if advance_signal(&mut light, 0.1) {
                transitions += 1;
            }
        }

        // Float accumulation may land one tick early or late, never further.
        assert!((2..=3).contains(&transitions));
    }

    #[test]
    fn degenerate_delta_time_is_ignored() {
        let mut light = test_light(5.0);
        assert!(!advance_signal(&mut light, f32::NAN));
        assert!(!advance_signal(&mut light, -1.0));
        assert_eq!(light.elapsed, 0.0);
        assert_eq!(light.phase, LightPhase::Green);
    }
}
