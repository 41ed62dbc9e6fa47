#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Muncher game.
//!
//! This crate defines the message surface that connects adapters and the
//! authoritative world. Adapters submit [`Command`] values describing desired
//! mutations, the world executes those commands via its `apply` entry point,
//! and then broadcasts [`Event`] values describing what actually happened.
//! The geometry vocabulary (vectors, tile and pixel coordinates, tile
//! metrics) also lives here so every crate agrees on how maze positions are
//! expressed.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Canonical banner emitted when the game boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Muncher.";

/// Per-axis tolerance applied when comparing vector components.
///
/// Positions accumulate floating-point drift over many small per-frame
/// increments, so equality is tolerance-based rather than bitwise.
const COMPONENT_TOLERANCE: f64 = 1e-6;

/// 2D vector measured in pixel units.
///
/// Operations return new values; none of them mutate their operands apart
/// from the compound-assignment operators. Equality compares each axis
/// against a `1e-6` tolerance.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Vector2 {
    /// Horizontal component, growing rightward.
    pub x: f64,
    /// Vertical component, growing downward in screen space.
    pub y: f64,
}

impl Vector2 {
    /// Vector with both components set to zero.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared length of the vector, avoiding the square root.
    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Length of the vector.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }
}

impl PartialEq for Vector2 {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < COMPONENT_TOLERANCE
            && (self.y - other.y).abs() < COMPONENT_TOLERANCE
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl From<PixelPoint> for Vector2 {
    fn from(point: PixelPoint) -> Self {
        Self::new(f64::from(point.x()), f64::from(point.y()))
    }
}

/// Travel direction of an actor, or the lack of one.
///
/// `Portal` is a non-spatial teleport edge between two distant nodes rather
/// than a geometric direction; `Stop` is the absence of motion and owns no
/// neighbor slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// No motion requested or possible.
    Stop,
    /// Upward travel (negative `y` in screen space).
    Up,
    /// Downward travel (positive `y` in screen space).
    Down,
    /// Leftward travel (negative `x`).
    Left,
    /// Rightward travel (positive `x`).
    Right,
    /// Teleport edge linking two portal endpoints.
    Portal,
}

impl Direction {
    /// Number of neighbor slots a graph node reserves; `Stop` has none.
    pub const NEIGHBOR_SLOTS: usize = 5;

    /// Returns the reverse of this direction.
    ///
    /// Spatial directions swap with their mirror, while `Stop` and `Portal`
    /// map to themselves so the function stays total.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Stop => Self::Stop,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Portal => Self::Portal,
        }
    }

    /// Index of this direction within a node's neighbor array.
    ///
    /// Returns `None` for `Stop`, which never appears as a neighbor link.
    #[must_use]
    pub const fn neighbor_slot(self) -> Option<usize> {
        match self {
            Self::Stop => None,
            Self::Up => Some(0),
            Self::Down => Some(1),
            Self::Left => Some(2),
            Self::Right => Some(3),
            Self::Portal => Some(4),
        }
    }

    /// Unit displacement for one pixel of travel along this direction.
    ///
    /// `Stop` and `Portal` contribute no displacement.
    #[must_use]
    pub const fn unit_vector(self) -> Vector2 {
        match self {
            Self::Stop | Self::Portal => Vector2::ZERO,
            Self::Up => Vector2::new(0.0, -1.0),
            Self::Down => Vector2::new(0.0, 1.0),
            Self::Left => Vector2::new(-1.0, 0.0),
            Self::Right => Vector2::new(1.0, 0.0),
        }
    }
}

/// Column/row address of a cell within the maze grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    column: u32,
    row: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate from zero-based column and row indices.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Exact pixel address used as the unique key for graph nodes.
///
/// Node keys must match exactly, so the key space is integral rather than
/// floating point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PixelPoint {
    x: u32,
    y: u32,
}

impl PixelPoint {
    /// Creates a new pixel point from its coordinates.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Horizontal pixel coordinate.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Vertical pixel coordinate.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

/// Immutable tile geometry shared by the graph, the collectible field and
/// the actor.
///
/// The mapping `pixel = tile_index * tile_size` is exact and invertible for
/// every node position. Tile dimensions are expected to be positive; loaders
/// validate this before constructing a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileMetrics {
    tile_width: u32,
    tile_height: u32,
}

impl TileMetrics {
    /// Reference tile width the actor and collectible dimensions are drawn
    /// against.
    pub const DEFAULT_TILE_WIDTH: u32 = 16;

    /// Reference tile height.
    pub const DEFAULT_TILE_HEIGHT: u32 = 16;

    /// Creates metrics from explicit tile dimensions in pixels.
    #[must_use]
    pub const fn new(tile_width: u32, tile_height: u32) -> Self {
        Self {
            tile_width,
            tile_height,
        }
    }

    /// Width of one tile in pixels.
    #[must_use]
    pub const fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Height of one tile in pixels.
    #[must_use]
    pub const fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Exact pixel key for a tile coordinate.
    #[must_use]
    pub const fn pixel_point(&self, tile: TileCoord) -> PixelPoint {
        PixelPoint::new(tile.column() * self.tile_width, tile.row() * self.tile_height)
    }

    /// Continuous position of a tile's pixel key.
    #[must_use]
    pub fn position(&self, tile: TileCoord) -> Vector2 {
        Vector2::from(self.pixel_point(tile))
    }

    /// Ratio of the configured tile width to the reference tile width.
    ///
    /// Speeds expressed against the reference art scale by this factor.
    #[must_use]
    pub fn width_scale(&self) -> f64 {
        f64::from(self.tile_width) / f64::from(Self::DEFAULT_TILE_WIDTH)
    }
}

impl Default for TileMetrics {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TILE_WIDTH, Self::DEFAULT_TILE_HEIGHT)
    }
}

/// Variant tag distinguishing regular pellets from flashing power pellets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Standard pellet worth the base score.
    Pellet,
    /// Larger pellet that flashes and yields a higher score.
    PowerPellet,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by one frame step.
    Advance {
        /// Seconds of simulated time elapsed since the previous frame.
        dt_seconds: f64,
        /// Direction the player is requesting this frame.
        requested: Direction,
    },
    /// Requests reciprocal portal wiring between two tile coordinates.
    WirePortals {
        /// Tile coordinate of the first portal endpoint.
        a: TileCoord,
        /// Tile coordinate of the second portal endpoint.
        b: TileCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the actor consumed a collectible this frame.
    CollectibleConsumed {
        /// Kind of collectible that was consumed.
        kind: CollectibleKind,
        /// Score awarded for the consumption.
        points: u32,
        /// Number of collectibles left in the field after removal.
        remaining: usize,
    },
    /// Announces that the last collectible was consumed.
    LevelCleared,
    /// Reports that a portal wiring request named a tile without a node.
    PortalsRejected {
        /// Tile coordinate of the first requested endpoint.
        a: TileCoord,
        /// Tile coordinate of the second requested endpoint.
        b: TileCoord,
    },
}

#[cfg(test)]
mod tests {
    use super::{
        CollectibleKind, Direction, PixelPoint, TileCoord, TileMetrics, Vector2,
        COMPONENT_TOLERANCE,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn vector_arithmetic_produces_new_values() {
        let a = Vector2::new(1.5, -2.0);
        let b = Vector2::new(0.5, 4.0);

        assert_eq!(a + b, Vector2::new(2.0, 2.0));
        assert_eq!(a - b, Vector2::new(1.0, -6.0));
        assert_eq!(-a, Vector2::new(-1.5, 2.0));
        assert_eq!(a * 2.0, Vector2::new(3.0, -4.0));
    }

    #[test]
    fn vector_add_assign_accumulates() {
        let mut position = Vector2::new(10.0, 20.0);
        position += Vector2::new(0.25, -0.5);
        assert_eq!(position, Vector2::new(10.25, 19.5));
    }

    #[test]
    fn vector_equality_tolerates_sub_threshold_drift() {
        let base = Vector2::new(100.0, 200.0);
        let drifted = Vector2::new(100.0 + COMPONENT_TOLERANCE * 0.5, 200.0);
        assert_eq!(base, drifted);
    }

    #[test]
    fn vector_equality_rejects_differences_at_the_threshold() {
        let base = Vector2::new(0.0, 0.0);
        let off_x = Vector2::new(COMPONENT_TOLERANCE, 0.0);
        let off_y = Vector2::new(0.0, COMPONENT_TOLERANCE);

        assert_ne!(base, off_x);
        assert_ne!(base, off_y);
    }

    #[test]
    fn vector_magnitude_matches_euclidean_length() {
        let vector = Vector2::new(3.0, 4.0);
        assert!((vector.magnitude_squared() - 25.0).abs() < f64::EPSILON);
        assert!((vector.magnitude() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn opposite_is_total_and_involutive() {
        let all = [
            Direction::Stop,
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
            Direction::Portal,
        ];

        for direction in all {
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Stop.opposite(), Direction::Stop);
        assert_eq!(Direction::Portal.opposite(), Direction::Portal);
    }

    #[test]
    fn neighbor_slots_cover_every_link_direction_once() {
        assert_eq!(Direction::Stop.neighbor_slot(), None);

        let mut seen = [false; Direction::NEIGHBOR_SLOTS];
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
            Direction::Portal,
        ] {
            let slot = direction.neighbor_slot().expect("link direction has slot");
            assert!(!seen[slot], "slot {slot} assigned twice");
            seen[slot] = true;
        }
        assert!(seen.iter().all(|taken| *taken));
    }

    #[test]
    fn unit_vectors_follow_screen_axes() {
        assert_eq!(Direction::Up.unit_vector(), Vector2::new(0.0, -1.0));
        assert_eq!(Direction::Down.unit_vector(), Vector2::new(0.0, 1.0));
        assert_eq!(Direction::Left.unit_vector(), Vector2::new(-1.0, 0.0));
        assert_eq!(Direction::Right.unit_vector(), Vector2::new(1.0, 0.0));
        assert_eq!(Direction::Stop.unit_vector(), Vector2::ZERO);
        assert_eq!(Direction::Portal.unit_vector(), Vector2::ZERO);
    }

    #[test]
    fn tile_to_pixel_mapping_is_exact() {
        let metrics = TileMetrics::default();
        let pixel = metrics.pixel_point(TileCoord::new(27, 17));

        assert_eq!(pixel, PixelPoint::new(432, 272));
        assert_eq!(
            metrics.position(TileCoord::new(27, 17)),
            Vector2::new(432.0, 272.0)
        );
    }

    #[test]
    fn width_scale_tracks_reference_tile() {
        assert!((TileMetrics::default().width_scale() - 1.0).abs() < f64::EPSILON);
        assert!((TileMetrics::new(32, 32).width_scale() - 2.0).abs() < f64::EPSILON);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn tile_coord_round_trips_through_bincode() {
        assert_round_trip(&TileCoord::new(27, 17));
    }

    #[test]
    fn pixel_point_round_trips_through_bincode() {
        assert_round_trip(&PixelPoint::new(432, 272));
    }

    #[test]
    fn tile_metrics_round_trip_through_bincode() {
        assert_round_trip(&TileMetrics::new(16, 16));
    }

    #[test]
    fn direction_round_trips_through_bincode() {
        assert_round_trip(&Direction::Portal);
    }

    #[test]
    fn collectible_kind_round_trips_through_bincode() {
        assert_round_trip(&CollectibleKind::PowerPellet);
    }

    #[test]
    fn vector_round_trips_through_bincode() {
        assert_round_trip(&Vector2::new(432.0, 272.0));
    }
}
