#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Muncher.
//!
//! The world owns the maze graph, the collectible field and the actor, and
//! mutates them exclusively through [`apply`], one command at a time. Every
//! `Advance` command is one atomic frame: integrate the actor, tick the
//! collectible animations, then resolve at most one consumption. Read access
//! flows through the [`query`] module.

use maze_muncher_core::{Command, Event, TileMetrics, WELCOME_BANNER};

mod actor;
mod collectibles;
mod graph;
mod level;

pub use actor::Actor;
pub use collectibles::{Collectible, CollectibleField};
pub use graph::{MazeGraph, NodeId};
pub use level::{Level, LevelError};

/// Represents the authoritative Maze Muncher world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    graph: MazeGraph,
    field: CollectibleField,
    actor: Actor,
    score: u32,
}

impl World {
    /// Builds a world from a parsed level.
    ///
    /// Fails with [`LevelError::NoNodes`] when the grid defines no node
    /// symbols, since the actor needs a start node.
    pub fn new(level: &Level, metrics: TileMetrics) -> Result<Self, LevelError> {
        let graph = MazeGraph::from_level(level, metrics);
        let start = graph.start_node().ok_or(LevelError::NoNodes)?;
        let actor = Actor::new(&graph, start, &metrics);
        let field = CollectibleField::from_level(level, metrics);
        Ok(Self {
            banner: WELCOME_BANNER,
            graph,
            field,
            actor,
            score: 0,
        })
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Advance {
            dt_seconds,
            requested,
        } => {
            world.actor.advance(&world.graph, dt_seconds, requested);
            world.field.advance(dt_seconds);
            if let Some(index) = world.actor.find_collision(world.field.collectibles()) {
                let consumed = world.field.consume(index);
                world.score += consumed.points();
                out_events.push(Event::CollectibleConsumed {
                    kind: consumed.kind(),
                    points: consumed.points(),
                    remaining: world.field.len(),
                });
                if world.field.is_empty() {
                    out_events.push(Event::LevelCleared);
                }
            }
        }
        Command::WirePortals { a, b } => {
            if !world.graph.set_portal_pair(a, b) {
                out_events.push(Event::PortalsRejected { a, b });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Actor, CollectibleField, MazeGraph, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the maze graph the actor travels.
    #[must_use]
    pub fn maze(world: &World) -> &MazeGraph {
        &world.graph
    }

    /// Provides read-only access to the collectibles remaining in the maze.
    #[must_use]
    pub fn collectibles(world: &World) -> &CollectibleField {
        &world.field
    }

    /// Provides read-only access to the player-controlled actor.
    #[must_use]
    pub fn actor(world: &World) -> &Actor {
        &world.actor
    }

    /// Total score accumulated from consumed collectibles.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Number of collectibles consumed since the level began.
    #[must_use]
    pub fn collectibles_eaten(world: &World) -> u32 {
        world.field.eaten()
    }

    /// True once every collectible has been consumed.
    #[must_use]
    pub fn level_clear(world: &World) -> bool {
        world.field.is_empty()
    }
}
