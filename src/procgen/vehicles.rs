//! Vehicle placement on road segments.
//!
//! Each spawned vehicle gets a precomputed waypoint path that runs along its
//! road's travel direction and spans the visible grid extent plus a margin,
//! so the motion simulator can wrap it modulo the path length without the
//! vehicle ever teleporting inside the visible area.

use bevy::prelude::*;
use rand::Rng;
use smallvec::SmallVec;

use crate::procgen::layout::{RoadOrientation, RoadSpec, VehicleKind, VehicleSpec};
use crate::scenario::Scenario;

/// Waypoint spacing in world units (one grid cell).
pub const WAYPOINT_SPACING: f32 = 12.0;

/// Speed variation around the per-kind base, same spread for every kind.
const SPEED_VARIATION: f32 = 0.15;

/// Vehicles per gated road segment.
const MIN_PER_ROAD: u32 = 1;
const MAX_PER_ROAD: u32 = 3;

/// Kind weights for a scenario, in cumulative-walk order.
/// Future is the only scenario fielding autonomous vehicles.
pub fn kind_weights(scenario: Scenario) -> &'static [(VehicleKind, f32)] {
    match scenario {
        Scenario::Baseline => &[
            (VehicleKind::Car, 0.7),
            (VehicleKind::Truck, 0.2),
            (VehicleKind::Bus, 0.1),
        ],
        Scenario::Optimized => &[
            (VehicleKind::Car, 0.6),
            (VehicleKind::Truck, 0.2),
            (VehicleKind::Bus, 0.2),
        ],
        Scenario::Sustainable => &[
            (VehicleKind::Car, 0.5),
            (VehicleKind::Bus, 0.3),
            (VehicleKind::Truck, 0.2),
        ],
        Scenario::Future => &[
            (VehicleKind::Car, 0.4),
            (VehicleKind::Autonomous, 0.3),
            (VehicleKind::Bus, 0.2),
            (VehicleKind::Truck, 0.1),
        ],
    }
}

/// Draw a vehicle kind from the scenario's weight table.
pub fn pick_kind(scenario: Scenario, rng: &mut impl Rng) -> VehicleKind {
    let roll = rng.gen::<f32>();
    let mut cumulative = 0.0;

    for &(kind, weight) in kind_weights(scenario) {
        cumulative += weight;
        if roll < cumulative {
            return kind;
        }
    }

    VehicleKind::Car
}

/// Cruising speed per kind, world units per second.
pub fn base_speed(kind: VehicleKind) -> f32 {
    match kind {
        VehicleKind::Car => 8.0,
        VehicleKind::Bus => 6.0,
        VehicleKind::Truck => 5.0,
        VehicleKind::Autonomous => 10.0,
    }
}

/// Build the straight waypoint path for a vehicle spawned at `start`
/// heading in `dir`, long enough to cover `extent` before wrapping.
fn build_path(start: Vec2, dir: Vec2, extent: f32) -> SmallVec<[Vec2; 8]> {
    let length = extent + 2.0 * WAYPOINT_SPACING;
    let waypoints = (length / WAYPOINT_SPACING).ceil() as usize + 1;

    (0..waypoints.max(2))
        .map(|i| start + dir * (i as f32 * WAYPOINT_SPACING))
        .collect()
}

fn path_length(path: &[Vec2]) -> f32 {
    path.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Spawn 1..=3 vehicles on a road segment. The gate (scenario vehicle
/// density) has already been rolled by the caller.
pub fn place_vehicles(
    out: &mut Vec<VehicleSpec>,
    road: &RoadSpec,
    road_index: usize,
    scenario: Scenario,
    extent: f32,
    rng: &mut impl Rng,
) {
    let count = rng.gen_range(MIN_PER_ROAD..=MAX_PER_ROAD);

    for _ in 0..count {
        let heading = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let (dir, lane_normal) = match road.orientation {
            RoadOrientation::Horizontal => (Vec2::X * heading, Vec2::Y),
            RoadOrientation::Vertical => (Vec2::Y * heading, Vec2::X),
        };

        // Right-hand lane offset keeps opposing traffic visually separated.
        let lane = lane_normal * road.width * 0.25 * heading;
        let along = rng.gen_range(-road.length * 0.5..road.length * 0.5);
        let start = road.position + dir * along + lane;

        let path = build_path(start, dir, extent);
        let path_len = path_length(&path);

        let kind = pick_kind(scenario, rng);
        let speed =
            base_speed(kind) * (1.0 + rng.gen_range(-SPEED_VARIATION..SPEED_VARIATION));

        out.push(VehicleSpec {
            path,
            path_len,
            path_param: 0.0,
            speed: speed.max(0.1),
            kind,
            orientation: dir.x.atan2(dir.y),
            road: road_index,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SCENARIOS: [Scenario; 4] = [
        Scenario::Baseline,
        Scenario::Optimized,
        Scenario::Sustainable,
        Scenario::Future,
    ];

    fn test_road() -> RoadSpec {
        RoadSpec {
            position: Vec2::new(0.0, -6.0),
            width: 2.0,
            length: 12.0,
            orientation: RoadOrientation::Horizontal,
        }
    }

    #[test]
    fn kind_weight_tables_sum_to_one() {
        for scenario in SCENARIOS {
            let total: f32 = kind_weights(scenario).iter().map(|(_, w)| w).sum();
            assert!((total - 1.0).abs() < 1e-9, "{scenario:?} sums to {total}");
        }
    }

    #[test]
    fn autonomous_vehicles_only_appear_in_future() {
        let mut rng = StdRng::seed_from_u64(1);
        for scenario in [Scenario::Baseline, Scenario::Optimized, Scenario::Sustainable] {
            for _ in 0..500 {
                assert_ne!(pick_kind(scenario, &mut rng), VehicleKind::Autonomous);
            }
        }

        let autonomous = (0..2_000)
            .filter(|_| pick_kind(Scenario::Future, &mut rng) == VehicleKind::Autonomous)
            .count();
        assert!(autonomous > 0);
    }

    #[test]
    fn paths_cover_the_grid_extent() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut vehicles = Vec::new();
        let extent = 72.0;

        place_vehicles(&mut vehicles, &test_road(), 0, Scenario::Baseline, extent, &mut rng);

        for v in &vehicles {
            assert!(v.path_len > extent);
            assert!(v.path.len() >= 2);
            assert_eq!(v.road, 0);
        }
    }

    #[test]
    fn spawn_count_is_between_one_and_three() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let mut vehicles = Vec::new();
            place_vehicles(&mut vehicles, &test_road(), 4, Scenario::Future, 48.0, &mut rng);
            assert!((1..=3).contains(&vehicles.len()));
        }
    }

    #[test]
    fn spawned_speeds_are_strictly_positive() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut vehicles = Vec::new();
        for _ in 0..50 {
            place_vehicles(&mut vehicles, &test_road(), 0, Scenario::Sustainable, 48.0, &mut rng);
        }
        assert!(vehicles.iter().all(|v| v.speed > 0.0));
    }
}
