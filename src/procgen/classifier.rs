//! Weighted block classification.
//!
//! Each grid block is assigned a type by walking a scenario-specific
//! cumulative weight table with a single uniform draw. The weights for every
//! scenario are mutually exclusive and sum to 1.0 — `weights()` is the one
//! source of truth and the invariant is unit-tested.

use rand::Rng;

use crate::scenario::Scenario;

/// What a grid block is filled with.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BlockType {
    Building,
    Park,
    MixedUse,
}

/// Classification weights for a scenario, in cumulative-walk order.
pub fn weights(scenario: Scenario) -> [(BlockType, f32); 3] {
    match scenario {
        Scenario::Baseline => [
            (BlockType::Building, 1.0),
            (BlockType::Park, 0.0),
            (BlockType::MixedUse, 0.0),
        ],
        Scenario::Optimized => [
            (BlockType::Building, 0.8),
            (BlockType::Park, 0.0),
            (BlockType::MixedUse, 0.2),
        ],
        Scenario::Sustainable => [
            (BlockType::Building, 0.7),
            (BlockType::Park, 0.3),
            (BlockType::MixedUse, 0.0),
        ],
        Scenario::Future => [
            (BlockType::Building, 0.6),
            (BlockType::Park, 0.4),
            (BlockType::MixedUse, 0.0),
        ],
    }
}

/// Draw a block type from the scenario's weight table.
pub fn classify(scenario: Scenario, rng: &mut impl Rng) -> BlockType {
    let roll = rng.gen::<f32>();
    let mut cumulative = 0.0;

    for (block_type, weight) in weights(scenario) {
        cumulative += weight;
        if roll < cumulative {
            return block_type;
        }
    }

    // Float rounding on the last bucket; the table sums to 1.0.
    BlockType::Building
}
