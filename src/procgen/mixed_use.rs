//! Mixed-use block placement.
//!
//! Mixed-use blocks read as deliberately planned: four buildings at fixed
//! quadrant offsets instead of random slots, a binary residential/commercial
//! split, and an efficiency bonus over a plain building of the same kind.
//! Remaining space gets the usual rejection-sampled tree scatter.

use bevy::prelude::*;
use rand::Rng;

use crate::procgen::buildings::{efficiency, kind_color};
use crate::procgen::layout::{Block, BuildingKind, BuildingSpec, CityLayout};
use crate::procgen::trees::{scatter_trees, Aabb, TreeSampler};
use crate::scenario::Scenario;

/// Mixed-use efficiency premium over a plain building of the same kind.
pub const MIXED_USE_BONUS: f32 = 10.0;

/// Chance a quadrant building is residential rather than commercial.
const RESIDENTIAL_SPLIT: f64 = 0.7;

/// Mixed-use efficiency: always at least the plain-building rating for the
/// same kind and scenario.
pub fn mixed_use_efficiency(kind: BuildingKind, scenario: Scenario) -> f32 {
    (efficiency(kind, scenario) + MIXED_USE_BONUS).min(100.0)
}

/// Fill a mixed-use block: four quadrant buildings plus trees.
pub fn place_mixed_use(
    layout: &mut CityLayout,
    block: &Block,
    scenario: Scenario,
    sampler: &TreeSampler,
    rng: &mut impl Rng,
) {
    let quarter = block.size * 0.25;
    let quadrants = [
        Vec2::new(-quarter, -quarter),
        Vec2::new(quarter, -quarter),
        Vec2::new(-quarter, quarter),
        Vec2::new(quarter, quarter),
    ];

    let mut footprints = Vec::with_capacity(quadrants.len());

    for offset in quadrants {
        let position = block.center + offset;
        let width = block.size * rng.gen_range(0.25..0.35);
        let depth = block.size * rng.gen_range(0.25..0.35);
        let kind = if rng.gen_bool(RESIDENTIAL_SPLIT) {
            BuildingKind::Residential
        } else {
            BuildingKind::Commercial
        };

        footprints.push(Aabb::from_center_size(position, Vec2::new(width, depth)));
        layout.buildings.push(BuildingSpec {
            position,
            width,
            depth,
            height: 2.0 + rng.gen::<f32>() * scenario.height_cap(),
            kind,
            color: kind_color(kind, scenario),
            efficiency: mixed_use_efficiency(kind, scenario),
            mixed_use: true,
        });
    }

    let count = rng.gen_range(2..=4);
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
