//! City layout data model and whole-layout generation.
//!
//! [`generate`] walks the block grid, emits the street grid, classifies each
//! block, and dispatches to the placers. The result is one immutable
//! [`CityLayout`] snapshot: regeneration always replaces the resource
//! wholesale, never patches it, so consumers can never observe a
//! half-updated scene. All collections are flat arenas; cross references
//! (vehicle -> road) are plain indices.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::procgen::buildings::place_buildings;
use crate::procgen::classifier::{classify, BlockType};
use crate::procgen::mixed_use::place_mixed_use;
use crate::procgen::parks::place_park;
use crate::procgen::streets::StreetGraph;
use crate::procgen::trees::TreeSampler;
use crate::procgen::vehicles::place_vehicles;
use crate::scenario::ScenarioConfig;

/// Side length of one block, world units.
pub const BLOCK_SIZE: f32 = 10.0;
/// Width of a road strip between blocks.
pub const ROAD_WIDTH: f32 = 2.0;

/// One grid cell: a road strip plus a block.
pub fn cell_size() -> f32 {
    BLOCK_SIZE + ROAD_WIDTH
}

/// Building classification.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BuildingKind {
    Residential,
    Commercial,
    Industrial,
    Government,
}

/// Tree species, for the renderer's canopy shapes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TreeKind {
    Deciduous,
    Coniferous,
}

/// Vehicle classification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VehicleKind {
    Car,
    Bus,
    Truck,
    Autonomous,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoadOrientation {
    Horizontal,
    Vertical,
}

/// A placed building. Immutable once generated.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildingSpec {
    /// Footprint center on the ground plane (x, z).
    pub position: Vec2,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub kind: BuildingKind,
    pub color: Color,
    /// Energy-efficiency rating in 0..100, derived from (kind, scenario).
    pub efficiency: f32,
    pub mixed_use: bool,
}

/// A road segment. Two per block, forming a continuous street grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoadSpec {
    pub position: Vec2,
    pub width: f32,
    pub length: f32,
    pub orientation: RoadOrientation,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParkSpec {
    pub position: Vec2,
    pub size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeSpec {
    pub position: Vec2,
    pub height: f32,
    pub kind: TreeKind,
}

/// A vehicle with its precomputed waypoint path.
///
/// `path_param` is the only field the motion simulator mutates; everything
/// else is fixed at placement time.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleSpec {
    pub path: SmallVec<[Vec2; 8]>,
    /// Total arc length of `path`, precomputed.
    pub path_len: f32,
    /// Distance traveled along the path, wraps modulo `path_len`.
    pub path_param: f32,
    pub speed: f32,
    pub kind: VehicleKind,
    /// Heading at placement time; per-tick heading lives in the transform output.
    pub orientation: f32,
    /// Index of the road segment this vehicle spawned on.
    pub road: usize,
}

/// One immutable city snapshot.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct CityLayout {
    pub buildings: Vec<BuildingSpec>,
    pub roads: Vec<RoadSpec>,
    pub parks: Vec<ParkSpec>,
    pub trees: Vec<TreeSpec>,
    pub vehicles: Vec<VehicleSpec>,
}

/// A block's position and extent, handed to the placers.
#[derive(Clone, Copy, Debug)]
pub struct Block {
    pub center: Vec2,
    pub size: f32,
}

pub struct LayoutPlugin;

impl Plugin for LayoutPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CityLayout>().add_systems(
            Update,
            regenerate_layout.run_if(resource_changed::<ScenarioConfig>),
        );
    }
}

/// Regenerate the layout and street graph whenever the config changes.
/// The assignment is an atomic resource swap between ticks.
pub fn regenerate_layout(
    config: Res<ScenarioConfig>,
    mut layout: ResMut<CityLayout>,
    mut streets: ResMut<StreetGraph>,
) {
    let mut rng = StdRng::seed_from_u64(config.seed);
    *layout = generate(&config, &mut rng);
    *streets = StreetGraph::build(config.grid_size);
}

/// Generate one full layout from a config. Synchronous and pure given the
/// RNG: the same config and seed produce an identical snapshot.
pub fn generate(config: &ScenarioConfig, rng: &mut StdRng) -> CityLayout {
    let config = config.sanitized();
    let scenario = config.scenario;
    let sampler = TreeSampler::new(config.seed);

    let mut layout = CityLayout::default();
    let cell = cell_size();
    let extent = config.grid_size as f32 * cell;
    let half = extent * 0.5;

    for x in 0..config.grid_size {
        for z in 0..config.grid_size {
            let origin = Vec2::new(x as f32 * cell - half, z as f32 * cell - half);

            // Two roads bound each block: one along its west edge, one
            // along its south edge. Together they form the street grid.
            let vertical = RoadSpec {
                position: Vec2::new(origin.x + ROAD_WIDTH * 0.5, origin.y + cell * 0.5),
                width: ROAD_WIDTH,
                length: cell,
                orientation: RoadOrientation::Vertical,
            };
            let horizontal = RoadSpec {
                position: Vec2::new(origin.x + cell * 0.5, origin.y + ROAD_WIDTH * 0.5),
                width: ROAD_WIDTH,
                length: cell,
                orientation: RoadOrientation::Horizontal,
            };
            let vertical_index = layout.roads.len();
            layout.roads.push(vertical);
            let horizontal_index = layout.roads.len();
            layout.roads.push(horizontal);

            let block = Block {
                center: origin + Vec2::splat(ROAD_WIDTH + BLOCK_SIZE * 0.5),
                size: BLOCK_SIZE,
            };

            match classify(scenario, rng) {
                BlockType::Building => {
                    place_buildings(&mut layout, &block, scenario, config.density, &sampler, rng)
                }
                BlockType::Park => place_park(&mut layout, &block, scenario, &sampler, rng),
                BlockType::MixedUse => {
                    place_mixed_use(&mut layout, &block, scenario, &sampler, rng)
                }
            }

            // Vehicles gate independently per road orientation so sparse
            // scenarios skip emission entirely.
            for road_index in [vertical_index, horizontal_index] {
                if rng.gen::<f32>() < scenario.vehicle_density() {
                    let road = layout.roads[road_index];
                    place_vehicles(&mut layout.vehicles, &road, road_index, scenario, extent, rng);
                }
            }
        }
    }

    info!(
        "Generated {:?} layout: {} buildings, {} roads, {} parks, {} trees, {} vehicles",
        scenario,
        layout.buildings.len(),
        layout.roads.len(),
        layout.parks.len(),
        layout.trees.len(),
        layout.vehicles.len()
    );

    layout
}
