//! Tree scatter with collision avoidance.
//!
//! Trees are rejection-sampled against the building footprints already
//! placed in their block, with a bounded retry count so an over-dense block
//! degrades to fewer trees instead of looping forever. A seeded Perlin field
//! gives spatially coherent species and height variation across the map.

use bevy::prelude::*;
use noise::{NoiseFn, Perlin};
use rand::Rng;

use crate::procgen::layout::{TreeKind, TreeSpec};

/// Attempts per tree before giving up on the placement.
pub const MAX_TREE_ATTEMPTS: usize = 16;

/// Axis-aligned footprint used for building/tree overlap checks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Seeded noise field for tree species and height variation.
///
/// Keyed on world position so repeated generation with the same seed
/// reproduces every tree exactly.
pub struct TreeSampler {
    perlin: Perlin,
    min_height: f32,
    max_height: f32,
}

impl TreeSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            perlin: Perlin::new(seed as u32),
            min_height: 1.5,
            max_height: 3.5,
        }
    }

    fn noise_at(&self, position: Vec2) -> f32 {
        let value = self
            .perlin
            .get([position.x as f64 * 0.15, position.y as f64 * 0.15]);
        (((value as f32) + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Build a tree spec at a world position.
    pub fn tree_at(&self, position: Vec2) -> TreeSpec {
        let n = self.noise_at(position);
        let kind = if n < 0.5 {
            TreeKind::Deciduous
        } else {
            TreeKind::Coniferous
        };
        let height = self.min_height + n * (self.max_height - self.min_height);

        TreeSpec {
            position,
            height,
            kind,
        }
    }
}

/// Scatter `count` trees inside a square half-extent around `center`,
/// rejecting positions inside any obstacle footprint.
///
/// Trees that cannot find a free spot within [`MAX_TREE_ATTEMPTS`] draws are
/// skipped, so the result may hold fewer than `count` trees.
pub fn scatter_trees(
    out: &mut Vec<TreeSpec>,
    sampler: &TreeSampler,
    rng: &mut impl Rng,
    center: Vec2,
    half_extent: f32,
    count: u32,
    obstacles: &[Aabb],
) {
    let mut skipped = 0;

    for _ in 0..count {
        let mut placed = false;

        for _ in 0..MAX_TREE_ATTEMPTS {
            let offset = Vec2::new(
                rng.gen_range(-half_extent..half_extent),
                rng.gen_range(-half_extent..half_extent),
            );
            let position = center + offset;

            if obstacles.iter().any(|aabb| aabb.contains(position)) {
                continue;
            }

            out.push(sampler.tree_at(position));
            placed = true;
            break;
        }

        if !placed {
            skipped += 1;
        }
    }

    if skipped > 0 {
        warn!("Skipped {} trees: no free space in block", skipped);
    }
}
