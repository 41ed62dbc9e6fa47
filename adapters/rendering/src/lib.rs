#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Muncher adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_muncher_core::Direction;
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Travel direction requested by the player on this frame.
    pub requested_direction: Direction,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            requested_direction: Direction::Stop,
        }
    }
}

/// Describes the fixed maze geometry that frames every scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MazePresentation {
    /// Number of columns contained in the maze grid.
    pub columns: u32,
    /// Number of rows contained in the maze grid.
    pub rows: u32,
    /// Width of a single tile expressed in world units.
    pub tile_width: f32,
    /// Height of a single tile expressed in world units.
    pub tile_height: f32,
    /// Color used when drawing corridor segments.
    pub corridor_color: Color,
    /// Stroke thickness of corridor segments in world units.
    pub corridor_thickness: f32,
    /// Color used when drawing node markers.
    pub node_color: Color,
    /// Radius of node markers in world units.
    pub node_radius: f32,
}

impl MazePresentation {
    /// Default stroke thickness of corridor segments.
    pub const DEFAULT_CORRIDOR_THICKNESS: f32 = 4.0;

    /// Default radius of node markers.
    pub const DEFAULT_NODE_RADIUS: f32 = 12.0;

    /// Creates a new maze descriptor with the default stroke thickness and
    /// marker radius.
    ///
    /// Returns an error when the grid has no area or a tile dimension is not
    /// positive.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_width: f32,
        tile_height: f32,
        corridor_color: Color,
        node_color: Color,
    ) -> std::result::Result<Self, RenderingError> {
        if columns == 0 || rows == 0 {
            return Err(RenderingError::EmptyMaze { columns, rows });
        }
        if tile_width <= 0.0 || tile_height <= 0.0 {
            return Err(RenderingError::InvalidTileSize {
                tile_width,
                tile_height,
            });
        }

        Ok(Self {
            columns,
            rows,
            tile_width,
            tile_height,
            corridor_color,
            corridor_thickness: Self::DEFAULT_CORRIDOR_THICKNESS,
            node_color,
            node_radius: Self::DEFAULT_NODE_RADIUS,
        })
    }

    /// Calculates the total width of the maze.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_width
    }

    /// Calculates the total height of the maze.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.tile_height
    }
}

/// World-space line segment describing one walkable corridor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorridorSegment {
    /// Start of the segment in world units.
    pub from: Vec2,
    /// End of the segment in world units.
    pub to: Vec2,
}

impl CorridorSegment {
    /// Creates a new corridor segment descriptor.
    #[must_use]
    pub const fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }
}

/// Collectible rendered as a filled circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollectibleSprite {
    /// Center of the collectible in world units.
    pub position: Vec2,
    /// Radius of the collectible in world units.
    pub radius: f32,
    /// Whether the collectible should be drawn this frame.
    pub visible: bool,
    /// Fill color of the collectible.
    pub color: Color,
}

impl CollectibleSprite {
    /// Creates a new collectible sprite descriptor.
    #[must_use]
    pub const fn new(position: Vec2, radius: f32, visible: bool, color: Color) -> Self {
        Self {
            position,
            radius,
            visible,
            color,
        }
    }
}

/// Player actor rendered as a filled circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorSprite {
    /// Center of the actor in world units.
    pub position: Vec2,
    /// Radius of the actor in world units.
    pub radius: f32,
    /// Fill color of the actor.
    pub color: Color,
}

impl ActorSprite {
    /// Creates a new actor sprite descriptor.
    #[must_use]
    pub const fn new(position: Vec2, radius: f32, color: Color) -> Self {
        Self {
            position,
            radius,
            color,
        }
    }
}

/// Score readout displayed alongside the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScoreboardPresentation {
    /// Total score accumulated so far.
    pub score: u32,
    /// Number of collectibles consumed so far.
    pub eaten: u32,
    /// Number of collectibles still waiting in the maze.
    pub remaining: usize,
    /// Whether every collectible has been consumed.
    pub cleared: bool,
}

impl ScoreboardPresentation {
    /// Creates a new scoreboard descriptor.
    #[must_use]
    pub const fn new(score: u32, eaten: u32, remaining: usize, cleared: bool) -> Self {
        Self {
            score,
            eaten,
            remaining,
            cleared,
        }
    }
}

/// Scene description combining the maze geometry and its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Fixed maze descriptor framing the play area.
    pub maze: MazePresentation,
    /// Walkable corridor segments, positioned in world units.
    pub corridors: Vec<CorridorSegment>,
    /// Node marker positions, in world units.
    pub node_markers: Vec<Vec2>,
    /// Collectibles currently present in the maze.
    pub collectibles: Vec<CollectibleSprite>,
    /// The player actor.
    pub actor: ActorSprite,
    /// Score readout for the current frame.
    pub scoreboard: ScoreboardPresentation,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        maze: MazePresentation,
        corridors: Vec<CorridorSegment>,
        node_markers: Vec<Vec2>,
        collectibles: Vec<CollectibleSprite>,
        actor: ActorSprite,
        scoreboard: ScoreboardPresentation,
    ) -> Self {
        Self {
            maze,
            corridors,
            node_markers,
            collectibles,
            actor,
            scoreboard,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maze Muncher scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta,
    /// per-frame input captured by the adapter, and may mutate the scene before
    /// it is rendered, allowing adapters to animate world snapshots
    /// deterministically.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Maze dimensions must both be positive to produce a drawable area.
    EmptyMaze {
        /// Provided column count.
        columns: u32,
        /// Provided row count.
        rows: u32,
    },
    /// Tile dimensions must both be positive to place scene content.
    InvalidTileSize {
        /// Provided tile width.
        tile_width: f32,
        /// Provided tile height.
        tile_height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMaze { columns, rows } => {
                write!(
                    f,
                    "maze dimensions must be positive (received {columns}x{rows})"
                )
            }
            Self::InvalidTileSize {
                tile_width,
                tile_height,
            } => {
                write!(
                    f,
                    "tile dimensions must be positive (received {tile_width}x{tile_height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
