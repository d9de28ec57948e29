//! Building placement for plain building blocks.
//!
//! Buildings are laid out in slots along the block so footprints scale with
//! the building count. Kind is drawn from a scenario-weighted table; color
//! and efficiency are pure functions of `(kind, scenario)` so the dashboard
//! can rely on e.g. future buildings always outperforming baseline ones.

use bevy::prelude::*;
use rand::Rng;

use crate::procgen::layout::{Block, BuildingKind, BuildingSpec, CityLayout};
use crate::procgen::trees::{scatter_trees, Aabb, TreeSampler};
use crate::scenario::Scenario;

/// Kind weights for a scenario, in cumulative-walk order.
///
/// Future deliberately favors a balanced residential/commercial mix.
pub fn kind_weights(scenario: Scenario) -> [(BuildingKind, f32); 4] {
    match scenario {
        Scenario::Baseline => [
            (BuildingKind::Residential, 0.5),
            (BuildingKind::Commercial, 0.3),
            (BuildingKind::Industrial, 0.15),
            (BuildingKind::Government, 0.05),
        ],
        Scenario::Optimized => [
            (BuildingKind::Residential, 0.45),
            (BuildingKind::Commercial, 0.35),
            (BuildingKind::Industrial, 0.1),
            (BuildingKind::Government, 0.1),
        ],
        Scenario::Sustainable => [
            (BuildingKind::Residential, 0.55),
            (BuildingKind::Commercial, 0.25),
            (BuildingKind::Industrial, 0.1),
            (BuildingKind::Government, 0.1),
        ],
        Scenario::Future => [
            (BuildingKind::Residential, 0.4),
            (BuildingKind::Commercial, 0.4),
            (BuildingKind::Industrial, 0.1),
            (BuildingKind::Government, 0.1),
        ],
    }
}

/// Draw a building kind from the scenario's weight table.
pub fn pick_kind(scenario: Scenario, rng: &mut impl Rng) -> BuildingKind {
    let roll = rng.gen::<f32>();
    let mut cumulative = 0.0;

    for (kind, weight) in kind_weights(scenario) {
        cumulative += weight;
        if roll < cumulative {
            return kind;
        }
    }

    BuildingKind::Residential
}

/// Efficiency rating for a building kind under a scenario, in 0..100.
///
/// Deterministic: no random component, so identical buildings in the same
/// scenario always report the same rating, and every kind improves
/// monotonically from baseline through future.
pub fn efficiency(kind: BuildingKind, scenario: Scenario) -> f32 {
    let base = match kind {
        BuildingKind::Residential => 55.0,
        BuildingKind::Commercial => 50.0,
        BuildingKind::Industrial => 40.0,
        BuildingKind::Government => 60.0,
    };
    let bonus = match scenario {
        Scenario::Baseline => 0.0,
        Scenario::Optimized => 15.0,
        Scenario::Sustainable => 20.0,
        Scenario::Future => 30.0,
    };
    base + bonus
}

/// Facade color for a building kind under a scenario. Deterministic,
/// same as efficiency: greener scenarios get cooler, cleaner palettes.
pub fn kind_color(kind: BuildingKind, scenario: Scenario) -> Color {
    let (r, g, b): (f32, f32, f32) = match kind {
        BuildingKind::Residential => (0.65, 0.55, 0.45),
        BuildingKind::Commercial => (0.45, 0.55, 0.7),
        BuildingKind::Industrial => (0.5, 0.5, 0.48),
        BuildingKind::Government => (0.75, 0.72, 0.65),
    };
    let tint = match scenario {
        Scenario::Baseline => (1.0, 1.0, 1.0),
        Scenario::Optimized => (0.95, 1.0, 1.05),
        Scenario::Sustainable => (0.9, 1.1, 0.95),
        Scenario::Future => (0.85, 0.95, 1.15),
    };
    Color::srgb(
        (r * tint.0).clamp(0.0, 1.0),
        (g * tint.1).clamp(0.0, 1.0),
        (b * tint.2).clamp(0.0, 1.0),
    )
}

/// Random building height bounded by the scenario cap.
fn pick_height(scenario: Scenario, rng: &mut impl Rng) -> f32 {
    2.0 + rng.gen::<f32>() * scenario.height_cap()
}

/// Fill a building block with 1..N buildings and, in green scenarios,
/// scatter trees around them.
///
/// The `max(1, ...)` floor guarantees a classified building block is never
/// empty, even at density 0.
pub fn place_buildings(
    layout: &mut CityLayout,
    block: &Block,
    scenario: Scenario,
    density: f32,
    sampler: &TreeSampler,
    rng: &mut impl Rng,
) {
    let count = ((rng.gen::<f32>() * 4.0 * density).floor() as usize).max(1);
    let slot = block.size / count as f32;
    let mut footprints = Vec::with_capacity(count);

    for i in 0..count {
        let width = slot * rng.gen_range(0.5..0.85);
        let depth = slot * rng.gen_range(0.5..0.85);

        // Slot centers run along x; z jitters within the block interior.
        let slot_x = block.center.x - block.size * 0.5 + slot * (i as f32 + 0.5);
        let jitter = (block.size - depth) * 0.5;
        let position = Vec2::new(slot_x, block.center.y + rng.gen_range(-jitter..jitter));

        let kind = pick_kind(scenario, rng);
        footprints.push(Aabb::from_center_size(position, Vec2::new(width, depth)));

        layout.buildings.push(BuildingSpec {
            position,
            width,
            depth,
            height: pick_height(scenario, rng),
            kind,
            color: kind_color(kind, scenario),
            efficiency: efficiency(kind, scenario),
            mixed_use: false,
        });
    }

    if scenario.plants_block_trees() && rng.gen_bool(0.7) {
        let count = rng.gen_range(3..=5);
        scatter_trees(
            &mut layout.trees,
            sampler,
            rng,
            block.center,
            block.size * 0.5,
            count,
            &footprints,
        );
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

    const KINDS: [BuildingKind; 4] = [
        BuildingKind::Residential,
        BuildingKind::Commercial,
        BuildingKind::Industrial,
        BuildingKind::Government,
    ];

    fn test_block() -> Block {
        Block {
            center: Vec2::ZERO,
            size: 10.0,
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
    fn future_outperforms_baseline_for_every_kind() {
        for kind in KINDS {
            assert!(efficiency(kind, Scenario::Future) > efficiency(kind, Scenario::Baseline));
        }
    }

    #[test]
    fn efficiency_stays_in_rating_range() {
        for scenario in SCENARIOS {
            for kind in KINDS {
                let e = efficiency(kind, scenario);
                assert!((0.0..=100.0).contains(&e), "{kind:?}/{scenario:?}: {e}");
            }
        }
    }

    #[test]
    fn zero_density_still_places_one_building() {
        let mut layout = CityLayout::default();
        let sampler = TreeSampler::new(0);
        let mut rng = StdRng::seed_from_u64(5);

        place_buildings(
            &mut layout,
            &test_block(),
            Scenario::Baseline,
            0.0,
            &sampler,
            &mut rng,
        );

        assert_eq!(layout.buildings.len(), 1);
    }

    #[test]
    fn footprints_stay_inside_the_block() {
        let mut layout = CityLayout::default();
        let sampler = TreeSampler::new(0);
        let mut rng = StdRng::seed_from_u64(6);
        let block = test_block();

        for _ in 0..50 {
            place_buildings(
                &mut layout,
                &block,
                Scenario::Optimized,
                1.0,
                &sampler,
                &mut rng,
            );
        }

        let half = block.size * 0.5;
        for b in &layout.buildings {
            assert!((b.position.x - block.center.x).abs() + b.width * 0.5 <= half + 1e-4);
            assert!((b.position.y - block.center.y).abs() + b.depth * 0.5 <= half + 1e-4);
        }
    }

    #[test]
    fn block_trees_only_appear_in_green_scenarios() {
        let sampler = TreeSampler::new(0);

        let mut baseline = CityLayout::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..30 {
            place_buildings(
                &mut baseline,
                &test_block(),
                Scenario::Baseline,
                0.8,
                &sampler,
                &mut rng,
            );
        }
        assert!(baseline.trees.is_empty());

        let mut future = CityLayout::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..30 {
            place_buildings(
                &mut future,
                &test_block(),
                Scenario::Future,
                0.8,
                &sampler,
                &mut rng,
            );
        }
        assert!(!future.trees.is_empty());
    }
}
