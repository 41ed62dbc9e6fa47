//! Checks that the bundled level assets stay loadable.

use std::{fs, path::PathBuf};

use maze_muncher_core::{Command, Direction, TileCoord, TileMetrics};
use maze_muncher_world::{self as world, query, Level, World};

#[test]
fn bundled_grid_parses_with_expected_census() {
    let level = bundled_level();
    assert_eq!(level.columns(), 28);
    assert_eq!(level.rows(), 36);

    let world = World::new(&level, TileMetrics::default()).expect("bundled level should build");
    assert_eq!(query::maze(&world).node_count(), 22);
    assert_eq!(query::collectibles(&world).len(), 246);
    assert_eq!(query::collectibles(&world).power_collectibles().count(), 4);
}

#[test]
fn bundled_portals_end_on_junctions() {
    let level = bundled_level();
    let mut world = World::new(&level, TileMetrics::default()).expect("bundled level should build");

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::WirePortals {
            a: TileCoord::new(0, 17),
            b: TileCoord::new(27, 17),
        },
        &mut events,
    );

    assert!(
        events.is_empty(),
        "portal wiring should not be rejected: {events:?}"
    );
    let maze = query::maze(&world);
    let left = maze
        .node_at_tile(TileCoord::new(0, 17))
        .expect("left portal tile should hold a junction");
    let right = maze
        .node_at_tile(TileCoord::new(27, 17))
        .expect("right portal tile should hold a junction");
    assert_eq!(maze.neighbor(left, Direction::Portal), Some(right));
    assert_eq!(maze.neighbor(right, Direction::Portal), Some(left));
}

#[test]
fn bundled_manifest_references_the_grid() {
    let text = fs::read_to_string(asset_path("maze1.toml")).expect("manifest should be readable");

    let manifest: toml::Value = toml::from_str(&text).expect("manifest should be valid TOML");

    assert_eq!(manifest["version"].as_integer(), Some(1));
    assert_eq!(manifest["grid"].as_str(), Some("maze1.txt"));
    assert_eq!(manifest["tiles"]["width"].as_integer(), Some(16));
    assert_eq!(manifest["tiles"]["height"].as_integer(), Some(16));
}

fn bundled_level() -> Level {
    let grid = fs::read_to_string(asset_path("maze1.txt")).expect("grid should be readable");
    Level::parse(&grid).expect("grid should parse")
}

fn asset_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../assets")
        .join(name)
}
