//! Intersection graph of the generated street grid.
//!
//! Uses petgraph for the underlying graph structure. The graph is rebuilt
//! alongside every layout regeneration and answers the queries the
//! simulator needs: which crossings exist, and which are most central
//! (signal controllers are sited there).

use bevy::prelude::*;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::procgen::layout::{cell_size, ROAD_WIDTH};

pub struct StreetsPlugin;

impl Plugin for StreetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StreetGraph>();
    }
}

/// A street crossing.
#[derive(Clone, Debug)]
pub struct Intersection {
    pub position: Vec2,
}

/// A street segment between two crossings.
#[derive(Clone, Debug)]
pub struct Street {
    pub length: f32,
}

/// The street network graph resource.
#[derive(Resource, Default)]
pub struct StreetGraph {
    pub graph: UnGraph<Intersection, Street>,
}

impl StreetGraph {
    /// Build the intersection graph for a `grid_size` x `grid_size` layout.
    ///
    /// Crossings sit on road centerlines: one vertical and one horizontal
    /// road per block row/column, so the graph has `grid_size`^2 nodes.
    pub fn build(grid_size: u32) -> Self {
        let mut graph = UnGraph::new_undirected();
        let cell = cell_size();
        let half = grid_size as f32 * cell * 0.5;

        let centerline = |i: u32| i as f32 * cell - half + ROAD_WIDTH * 0.5;

        let mut indices = Vec::with_capacity((grid_size * grid_size) as usize);
        for x in 0..grid_size {
            for z in 0..grid_size {
                let position = Vec2::new(centerline(x), centerline(z));
                indices.push(graph.add_node(Intersection { position }));
            }
        }

        let index_of = |x: u32, z: u32| indices[(x * grid_size + z) as usize];
        for x in 0..grid_size {
            for z in 0..grid_size {
                if x + 1 < grid_size {
                    graph.add_edge(index_of(x, z), index_of(x + 1, z), Street { length: cell });
                }
                if z + 1 < grid_size {
                    graph.add_edge(index_of(x, z), index_of(x, z + 1), Street { length: cell });
                }
            }
        }

        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All crossings with their indices.
    pub fn intersections(&self) -> impl Iterator<Item = (NodeIndex, &Intersection)> {
        self.graph.node_indices().map(|i| (i, &self.graph[i]))
    }

    /// The `count` crossings closest to the grid center, nearest first.
    /// Returns fewer on small grids.
    pub fn central_intersections(&self, count: usize) -> Vec<Vec2> {
        let mut positions: Vec<Vec2> = self
            .intersections()
            .map(|(_, node)| node.position)
            .collect();
        positions.sort_by(|a, b| a.length_squared().total_cmp(&b.length_squared()));
        positions.truncate(count);
        positions
    }
}
