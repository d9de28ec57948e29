//! Park placement.
//!
//! A park block is a full-block green footprint with a dense tree scatter
//! and, occasionally, a small pavilion. The pavilion is a real building so
//! downstream efficiency aggregation sees it, but it rates low and trees
//! reject against its footprint like any other building.

use bevy::prelude::*;
use rand::Rng;

use crate::procgen::layout::{Block, BuildingKind, BuildingSpec, CityLayout, ParkSpec};
use crate::procgen::trees::{scatter_trees, Aabb, TreeSampler};
use crate::scenario::Scenario;

/// Chance a park hosts a pavilion.
const PAVILION_CHANCE: f64 = 0.3;
const PAVILION_SIZE: f32 = 2.0;
const PAVILION_HEIGHT: f32 = 2.5;
const PAVILION_EFFICIENCY: f32 = 25.0;

/// Fill a park block: footprint, trees, maybe a pavilion.
pub fn place_park(
    layout: &mut CityLayout,
    block: &Block,
    scenario: Scenario,
    sampler: &TreeSampler,
    rng: &mut impl Rng,
) {
    layout.parks.push(ParkSpec {
        position: block.center,
        size: block.size,
    });

    let mut obstacles = Vec::new();

    if rng.gen_bool(PAVILION_CHANCE) {
        let quarter = block.size * 0.25;
        let position = block.center
            + Vec2::new(
                rng.gen_range(-quarter..quarter),
                rng.gen_range(-quarter..quarter),
            );

        obstacles.push(Aabb::from_center_size(position, Vec2::splat(PAVILION_SIZE)));
        layout.buildings.push(BuildingSpec {
            position,
            width: PAVILION_SIZE,
            depth: PAVILION_SIZE,
            height: PAVILION_HEIGHT,
            kind: BuildingKind::Government,
            color: Color::srgb(0.55, 0.5, 0.4),
            efficiency: PAVILION_EFFICIENCY,
            mixed_use: false,
        });
    }

    let (min, max) = scenario.park_tree_range();
    let count = rng.gen_range(min..=max);
    scatter_trees(
        &mut layout.trees,
        sampler,
        rng,
        block.center,
        block.size * 0.5,
        count,
        &obstacles,
    );
}
