#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Muncher experience.
//!
//! Loads a level manifest, builds the world, and hands a scene description to
//! the macroquad backend. Each rendered frame applies one `Advance` command
//! carrying the frame delta and the player's requested direction, then copies
//! the fresh world snapshot back into the scene.

mod level_manifest;

use std::path::PathBuf;

use anyhow::Result as AnyResult;
use clap::Parser;
use glam::Vec2;
use maze_muncher_core::{Command, Direction, Event, Vector2};
use maze_muncher_rendering::{
    ActorSprite, CollectibleSprite, Color, CorridorSegment, MazePresentation, Presentation,
    RenderingBackend, Scene, ScoreboardPresentation,
};
use maze_muncher_rendering_macroquad::MacroquadBackend;
use maze_muncher_world::{self as world, query, MazeGraph, World};

use crate::level_manifest::{load_level, LoadedLevel};

const CLEAR_COLOR: Color = Color::from_rgb_u8(0, 0, 0);
const CORRIDOR_COLOR: Color = Color::from_rgb_u8(255, 255, 255);
const NODE_COLOR: Color = Color::from_rgb_u8(255, 0, 0);
const COLLECTIBLE_COLOR: Color = Color::from_rgb_u8(255, 255, 255);
const ACTOR_COLOR: Color = Color::from_rgb_u8(255, 255, 0);

/// Command-line options for the Maze Muncher binary.
#[derive(Parser, Debug)]
#[command(name = "maze-muncher")]
#[command(about = "Maze traversal arcade game")]
struct Args {
    /// Level manifest to load.
    #[arg(long, default_value = "assets/maze1.toml")]
    level: PathBuf,
    /// Print frame timing metrics to stdout once per second.
    #[arg(long)]
    show_fps: bool,
    /// Disable vertical sync and render as fast as possible.
    #[arg(long)]
    no_vsync: bool,
}

fn main() -> AnyResult<()> {
    let args = Args::parse();
    let loaded = load_level(&args.level)?;

    let mut world = World::new(&loaded.level, loaded.metrics)?;
    println!("{}", query::welcome_banner(&world));

    let mut events = Vec::new();
    for portal in &loaded.manifest.portals {
        world::apply(
            &mut world,
            Command::WirePortals {
                a: portal.a,
                b: portal.b,
            },
            &mut events,
        );
    }
    for event in events.drain(..) {
        if let Event::PortalsRejected { a, b } = event {
            eprintln!(
                "warning: ignoring portal pair ({}, {}) <-> ({}, {}); both endpoints must be junctions",
                a.column(),
                a.row(),
                b.column(),
                b.row()
            );
        }
    }

    let scene = build_scene(&world, &loaded)?;
    let presentation = Presentation::new(
        format!("Maze Muncher - {}", loaded.manifest.title),
        CLEAR_COLOR,
        scene,
    );
    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps);

    backend.run(presentation, move |frame_dt, frame_input, scene| {
        world::apply(
            &mut world,
            Command::Advance {
                dt_seconds: frame_dt.as_secs_f64(),
                requested: frame_input.requested_direction,
            },
            &mut events,
        );
        for event in events.drain(..) {
            if let Event::LevelCleared = event {
                println!("Level clear with {} points.", query::score(&world));
            }
        }
        populate_scene(&world, scene);
    })
}

/// Builds the initial scene description from the freshly constructed world.
fn build_scene(world: &World, loaded: &LoadedLevel) -> AnyResult<Scene> {
    let maze = MazePresentation::new(
        loaded.level.columns(),
        loaded.level.rows(),
        loaded.metrics.tile_width() as f32,
        loaded.metrics.tile_height() as f32,
        CORRIDOR_COLOR,
        NODE_COLOR,
    )?;
    let graph = query::maze(world);
    let node_markers = graph
        .nodes()
        .map(|node| to_screen_vec(graph.position(node)))
        .collect();
    let actor = query::actor(world);
    let actor_sprite = ActorSprite::new(
        to_screen_vec(actor.position()),
        actor.radius() as f32,
        ACTOR_COLOR,
    );

    let mut scene = Scene::new(
        maze,
        corridor_segments(graph),
        node_markers,
        Vec::new(),
        actor_sprite,
        ScoreboardPresentation::default(),
    );
    populate_scene(world, &mut scene);
    Ok(scene)
}

/// Copies the per-frame world snapshot into the mutable scene parts.
fn populate_scene(world: &World, scene: &mut Scene) {
    scene.collectibles = collectible_sprites(world);
    scene.actor.position = to_screen_vec(query::actor(world).position());
    scene.scoreboard = ScoreboardPresentation::new(
        query::score(world),
        query::collectibles_eaten(world),
        query::collectibles(world).len(),
        query::level_clear(world),
    );
}

/// Collects every corridor as a line segment between linked junctions.
///
/// Scanning only rightward and downward neighbors lists each corridor once,
/// since every link is reciprocal. Portal links are intentionally skipped;
/// they have no spatial corridor to draw.
fn corridor_segments(graph: &MazeGraph) -> Vec<CorridorSegment> {
    let mut segments = Vec::new();
    for node in graph.nodes() {
        for direction in [Direction::Right, Direction::Down] {
            if let Some(neighbor) = graph.neighbor(node, direction) {
                segments.push(CorridorSegment::new(
                    to_screen_vec(graph.position(node)),
                    to_screen_vec(graph.position(neighbor)),
                ));
            }
        }
    }
    segments
}

fn collectible_sprites(world: &World) -> Vec<CollectibleSprite> {
    query::collectibles(world)
        .collectibles()
        .iter()
        .map(|collectible| {
            CollectibleSprite::new(
                to_screen_vec(collectible.position()),
                collectible.radius() as f32,
                collectible.is_visible(),
                COLLECTIBLE_COLOR,
            )
        })
        .collect()
}

fn to_screen_vec(position: Vector2) -> Vec2 {
    Vec2::new(position.x as f32, position.y as f32)
}
