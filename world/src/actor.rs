//! The player-controlled actor that travels the maze graph.

use maze_muncher_core::{Direction, TileMetrics, Vector2};

use crate::collectibles::Collectible;
use crate::graph::{MazeGraph, NodeId};

/// Travel speed against the reference tile width, in pixels per second.
const BASE_SPEED: f64 = 100.0;
/// Radius used when drawing the actor, in pixels.
const DRAW_RADIUS: f64 = 10.0;
/// Radius used when testing for consumption, in pixels.
const COLLIDE_RADIUS: f64 = 5.0;

/// Continuously positioned entity constrained to the maze graph.
///
/// While moving, the position lies on the segment between the current and
/// target nodes. At rest both nodes coincide and the position equals the node
/// position exactly; arrival always snaps to the node position rather than
/// keeping the integrated overshoot.
#[derive(Clone, Debug)]
pub struct Actor {
    position: Vector2,
    current: NodeId,
    target: NodeId,
    direction: Direction,
    speed: f64,
    radius: f64,
    collide_radius: f64,
}

impl Actor {
    /// Places a new actor at rest on `start`.
    #[must_use]
    pub fn new(graph: &MazeGraph, start: NodeId, metrics: &TileMetrics) -> Self {
        Self {
            position: graph.position(start),
            current: start,
            target: start,
            direction: Direction::Stop,
            speed: BASE_SPEED * metrics.width_scale(),
            radius: DRAW_RADIUS,
            collide_radius: COLLIDE_RADIUS,
        }
    }

    /// Pixel position of the actor's center.
    #[must_use]
    pub const fn position(&self) -> Vector2 {
        self.position
    }

    /// Node the actor most recently departed from, or rests on.
    #[must_use]
    pub const fn current_node(&self) -> NodeId {
        self.current
    }

    /// Node the actor is traveling toward. Equals the current node at rest.
    #[must_use]
    pub const fn target_node(&self) -> NodeId {
        self.target
    }

    /// Direction of travel, or [`Direction::Stop`] at rest.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Radius used when drawing the actor.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Radius used when testing for consumption.
    #[must_use]
    pub const fn collide_radius(&self) -> f64 {
        self.collide_radius
    }

    /// Advances the actor by one frame.
    ///
    /// Integration comes first, then arrival handling. On arrival the actor
    /// hops through a portal if the reached node carries one, picks its next
    /// target preferring `requested` over the existing travel direction, and
    /// snaps onto the node position. Between nodes the only accepted input is
    /// the exact reverse of travel, which swaps current and target without
    /// moving the actor.
    pub fn advance(&mut self, graph: &MazeGraph, dt_seconds: f64, requested: Direction) {
        self.position += self.direction.unit_vector() * (self.speed * dt_seconds);

        if self.overshot_target(graph) {
            self.current = self.target;
            if let Some(across) = graph.neighbor(self.current, Direction::Portal) {
                self.current = across;
            }
            self.target = self.next_target(graph, requested);
            if self.target == self.current {
                self.target = self.next_target(graph, self.direction);
            } else {
                self.direction = requested;
            }
            if self.target == self.current {
                self.direction = Direction::Stop;
            }
            self.position = graph.position(self.current);
        } else if self.is_reverse_of_travel(requested) {
            self.reverse();
        }
    }

    /// True iff `direction` leads to a live neighbor of the current node.
    #[must_use]
    pub fn valid_direction(&self, graph: &MazeGraph, direction: Direction) -> bool {
        direction != Direction::Stop && graph.neighbor(self.current, direction).is_some()
    }

    /// Finds the first collectible whose circle overlaps the actor's.
    ///
    /// Touching counts as overlapping, so the comparison is non-strict.
    /// Returns the index within `collectibles`, or `None` when clear.
    #[must_use]
    pub fn find_collision(&self, collectibles: &[Collectible]) -> Option<usize> {
        collectibles.iter().position(|collectible| {
            let offset = self.position - collectible.position();
            let reach = collectible.collide_radius() + self.collide_radius;
            offset.magnitude_squared() <= reach * reach
        })
    }

    /// True once travel from the current node has covered at least the
    /// distance to the target. At rest both distances are zero, so a resting
    /// actor re-evaluates its exits every frame.
    fn overshot_target(&self, graph: &MazeGraph) -> bool {
        let origin = graph.position(self.current);
        let to_target = (graph.position(self.target) - origin).magnitude_squared();
        let traveled = (self.position - origin).magnitude_squared();
        traveled >= to_target
    }

    fn next_target(&self, graph: &MazeGraph, direction: Direction) -> NodeId {
        if self.valid_direction(graph, direction) {
            graph.neighbor(self.current, direction).unwrap_or(self.current)
        } else {
            self.current
        }
    }

    fn is_reverse_of_travel(&self, requested: Direction) -> bool {
        requested != Direction::Stop && requested == self.direction.opposite()
    }

    fn reverse(&mut self) {
        self.direction = self.direction.opposite();
        std::mem::swap(&mut self.current, &mut self.target);
    }
}
