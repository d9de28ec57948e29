//! Scenario configuration and per-scenario tuning tables.
//!
//! A scenario is a named policy bundle that parameterizes every weighted
//! table in the generator (block classification, building mix, vehicle mix)
//! and the simulation timings. All scenario-dependent constants live here so
//! the placers stay table-driven.

use bevy::prelude::*;

pub struct ScenarioPlugin;

impl Plugin for ScenarioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScenarioConfig>();
    }
}

/// The four planning scenarios the dashboard can request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Scenario {
    #[default]
    Baseline,
    Optimized,
    Sustainable,
    Future,
}

impl Scenario {
    /// Parse a scenario name coming from the dashboard layer.
    ///
    /// Unknown names fall back to [`Scenario::Baseline`] rather than erroring,
    /// so a stale or mistyped request still produces a valid scene.
    pub fn from_name(name: &str) -> Self {
        match name {
            "baseline" => Scenario::Baseline,
            "optimized" => Scenario::Optimized,
            "sustainable" => Scenario::Sustainable,
            "future" => Scenario::Future,
            other => {
                warn!("Unknown scenario '{}', falling back to baseline", other);
                Scenario::Baseline
            }
        }
    }

    /// Probability that a road segment spawns vehicles at all.
    /// Sparse scenarios stay visually sparse by skipping emission entirely.
    pub fn vehicle_density(self) -> f32 {
        match self {
            Scenario::Baseline => 0.3,
            Scenario::Optimized => 0.2,
            Scenario::Sustainable => 0.15,
            Scenario::Future => 0.1,
        }
    }

    /// Upper bound on the random component of building heights.
    pub fn height_cap(self) -> f32 {
        match self {
            Scenario::Baseline => 5.0,
            Scenario::Optimized => 8.0,
            Scenario::Sustainable => 6.0,
            Scenario::Future => 12.0,
        }
    }

    /// Seconds a traffic light holds each phase before cycling.
    pub fn signal_interval(self) -> f32 {
        match self {
            Scenario::Optimized | Scenario::Future => 3.0,
            Scenario::Baseline | Scenario::Sustainable => 5.0,
        }
    }

    /// Inclusive tree-count range for a park block.
    pub fn park_tree_range(self) -> (u32, u32) {
        match self {
            Scenario::Baseline => (8, 11),
            Scenario::Optimized => (8, 12),
            Scenario::Sustainable => (11, 15),
            Scenario::Future => (10, 14),
        }
    }

    /// Whether building blocks in this scenario get street greenery.
    pub fn plants_block_trees(self) -> bool {
        matches!(self, Scenario::Sustainable | Scenario::Future)
    }
}

/// Input configuration for one generation pass.
///
/// Replacing this resource triggers a whole-layout regeneration; the layout
/// is never patched in place.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ScenarioConfig {
    pub scenario: Scenario,
    /// Number of blocks along each axis of the square grid.
    pub grid_size: u32,
    /// Development density in [0, 1]; out-of-range values are clamped.
    pub density: f32,
    /// Seed for the generator PRNG. Same config + seed gives an identical layout.
    pub seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::Baseline,
            grid_size: 6,
            density: 0.5,
            seed: 20177,
        }
    }
}

impl ScenarioConfig {
    /// Clamp degenerate inputs to valid ranges. Never errors: a NaN density
    /// becomes 0.0, out-of-range densities are clamped to [0, 1].
    pub fn sanitized(mut self) -> Self {
        self.density = if self.density.is_finite() {
            self.density.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scenario_name_falls_back_to_baseline() {
        assert_eq!(Scenario::from_name("baseline"), Scenario::Baseline);
        assert_eq!(Scenario::from_name("future"), Scenario::Future);
        assert_eq!(Scenario::from_name("utopian"), Scenario::Baseline);
        assert_eq!(Scenario::from_name(""), Scenario::Baseline);
    }

    #[test]
    fn density_is_clamped_to_unit_range() {
        let config = ScenarioConfig {
            density: 1.7,
            ..Default::default()
        };
        assert_eq!(config.sanitized().density, 1.0);

        let config = ScenarioConfig {
            density: -0.3,
            ..Default::default()
        };
        assert_eq!(config.sanitized().density, 0.0);

        let config = ScenarioConfig {
            density: f32::NAN,
            ..Default::default()
        };
        assert_eq!(config.sanitized().density, 0.0);
    }

    #[test]
    fn signal_intervals_match_scenario_policy() {
        assert_eq!(Scenario::Optimized.signal_interval(), 3.0);
        assert_eq!(Scenario::Future.signal_interval(), 3.0);
        assert_eq!(Scenario::Baseline.signal_interval(), 5.0);
        assert_eq!(Scenario::Sustainable.signal_interval(), 5.0);
    }
}
