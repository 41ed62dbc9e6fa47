//! Maze traversal graph assembled from a textual grid.

use std::collections::HashMap;

use maze_muncher_core::{Direction, PixelPoint, TileCoord, TileMetrics, Vector2};

use crate::level::{classify, CellRole, Level};

/// Opaque identifier of a node within one [`MazeGraph`].
///
/// Identifiers are only meaningful within the graph that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct GraphNode {
    position: Vector2,
    neighbors: [Option<NodeId>; Direction::NEIGHBOR_SLOTS],
}

/// Graph of connection points an actor travels between.
///
/// Nodes sit at pixel positions derived from their tile, and each node keeps
/// one neighbor slot per travel direction plus one portal slot. Corridor
/// links are always reciprocal.
#[derive(Debug)]
pub struct MazeGraph {
    nodes: Vec<GraphNode>,
    lookup: HashMap<PixelPoint, NodeId>,
    metrics: TileMetrics,
}

impl MazeGraph {
    /// Builds the graph for a parsed level.
    ///
    /// Nodes are inserted in row-major scan order, then corridors are linked
    /// with one horizontal sweep per row and one vertical sweep per column.
    /// Two nodes connect when every cell between them continues a corridor;
    /// any other symbol breaks the run.
    #[must_use]
    pub fn from_level(level: &Level, metrics: TileMetrics) -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            lookup: HashMap::new(),
            metrics,
        };

        for (tile, symbol) in level.tiles() {
            if classify(symbol) == CellRole::Node {
                let key = metrics.pixel_point(tile);
                let id = NodeId(graph.nodes.len() as u32);
                graph.nodes.push(GraphNode {
                    position: Vector2::from(key),
                    neighbors: [None; Direction::NEIGHBOR_SLOTS],
                });
                let _ = graph.lookup.insert(key, id);
            }
        }

        for row in 0..level.rows() {
            let mut run = None;
            for column in 0..level.columns() {
                run = graph.extend_run(level, TileCoord::new(column, row), run, Direction::Right);
            }
        }
        for column in 0..level.columns() {
            let mut run = None;
            for row in 0..level.rows() {
                run = graph.extend_run(level, TileCoord::new(column, row), run, Direction::Down);
            }
        }

        graph
    }

    /// Advances one corridor scan step, linking the running node to the next
    /// node encountered. Returns the node carried into the following cell.
    fn extend_run(
        &mut self,
        level: &Level,
        tile: TileCoord,
        run: Option<NodeId>,
        forward: Direction,
    ) -> Option<NodeId> {
        let Some(symbol) = level.symbol(tile) else {
            return None;
        };
        match classify(symbol) {
            CellRole::Node => {
                let Some(current) = self.node_at_pixel(self.metrics.pixel_point(tile)) else {
                    return None;
                };
                if let Some(previous) = run {
                    self.link(previous, forward, current);
                }
                Some(current)
            }
            CellRole::Path => run,
            CellRole::Wall => None,
        }
    }

    fn link(&mut self, from: NodeId, forward: Direction, to: NodeId) {
        self.set_neighbor(from, forward, to);
        self.set_neighbor(to, forward.opposite(), from);
    }

    fn set_neighbor(&mut self, node: NodeId, direction: Direction, neighbor: NodeId) {
        if let Some(slot) = direction.neighbor_slot() {
            self.nodes[node.index()].neighbors[slot] = Some(neighbor);
        }
    }

    /// Looks up the node whose position matches the pixel point exactly.
    #[must_use]
    pub fn node_at_pixel(&self, point: PixelPoint) -> Option<NodeId> {
        self.lookup.get(&point).copied()
    }

    /// Looks up the node sitting on the provided tile.
    #[must_use]
    pub fn node_at_tile(&self, tile: TileCoord) -> Option<NodeId> {
        self.node_at_pixel(self.metrics.pixel_point(tile))
    }

    /// First node inserted during the row-major scan, used as the actor's
    /// start. `None` when the level defined no nodes.
    #[must_use]
    pub fn start_node(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(0))
        }
    }

    /// Pixel position of a node.
    #[must_use]
    pub fn position(&self, node: NodeId) -> Vector2 {
        self.nodes[node.index()].position
    }

    /// Neighbor reachable from `node` along `direction`, if any.
    #[must_use]
    pub fn neighbor(&self, node: NodeId, direction: Direction) -> Option<NodeId> {
        direction
            .neighbor_slot()
            .and_then(|slot| self.nodes[node.index()].neighbors[slot])
    }

    /// Wires the portal slots of the nodes on the two tiles to each other.
    ///
    /// Returns `false` without changing the graph when either tile holds no
    /// node.
    pub fn set_portal_pair(&mut self, a: TileCoord, b: TileCoord) -> bool {
        let (Some(first), Some(second)) = (self.node_at_tile(a), self.node_at_tile(b)) else {
            return false;
        };
        self.set_neighbor(first, Direction::Portal, second);
        self.set_neighbor(second, Direction::Portal, first);
        true
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Visits every node in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Tile metrics the graph was built with.
    #[must_use]
    pub const fn metrics(&self) -> TileMetrics {
        self.metrics
    }
}
