use maze_muncher_core::{Command, Direction, Event, TileCoord, TileMetrics, Vector2};
use maze_muncher_world::{self as world, query, Level, World};

#[test]
fn actor_sweeps_a_corridor_clean() {
    let mut world = world_from("+...+");

    let mut cleared = false;
    for _ in 0..400 {
        let events = advance(&mut world, 0.05, Direction::Right);
        if events.contains(&Event::LevelCleared) {
            cleared = true;
        }
        if cleared && query::actor(&world).direction() == Direction::Stop {
            break;
        }
    }

    assert!(cleared, "corridor should be swept clean");
    assert_eq!(query::score(&world), 50);
    assert_eq!(query::collectibles_eaten(&world), 5);
    assert!(query::level_clear(&world));
    assert_eq!(query::actor(&world).position(), Vector2::new(64.0, 0.0));
}

#[test]
fn consumption_reports_count_down_to_zero() {
    let mut world = world_from("+...+");

    let mut remaining_counts = Vec::new();
    for _ in 0..400 {
        for event in advance(&mut world, 0.05, Direction::Right) {
            if let Event::CollectibleConsumed { remaining, .. } = event {
                remaining_counts.push(remaining);
            }
        }
        if query::level_clear(&world) {
            break;
        }
    }

    assert_eq!(remaining_counts, vec![4, 3, 2, 1, 0]);
}

#[test]
fn portal_exit_continues_travel_on_the_far_side() {
    let mut world = world_from("+.nXn.+");
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::WirePortals {
            a: TileCoord::new(2, 0),
            b: TileCoord::new(4, 0),
        },
        &mut events,
    );
    assert!(events.is_empty());

    let far_side = query::maze(&world)
        .node_at_tile(TileCoord::new(4, 0))
        .expect("tile should hold a node");
    let mut hopped = false;
    for _ in 0..400 {
        let _ = advance(&mut world, 0.05, Direction::Right);
        if !hopped && query::actor(&world).current_node() == far_side {
            hopped = true;
            assert_eq!(query::actor(&world).position().x, 64.0);
        }
        if query::actor(&world).direction() == Direction::Stop
            && query::actor(&world).position().x > 0.0
        {
            break;
        }
    }

    assert!(hopped, "actor should hop through the portal");
    assert_eq!(query::actor(&world).position().x, 96.0);
    assert!(query::level_clear(&world));
    assert_eq!(query::score(&world), 40);
}

#[test]
fn long_runs_end_exactly_on_node_positions() {
    let mut world = world_from("+.+.+.+.+.+");

    for _ in 0..10_000 {
        let _ = advance(&mut world, 0.013, Direction::Right);
        if query::actor(&world).direction() == Direction::Stop
            && query::actor(&world).position().x > 0.0
        {
            break;
        }
    }

    assert_eq!(query::actor(&world).position().x, 160.0);
    assert_eq!(query::actor(&world).position().y, 0.0);
}

#[test]
fn reversal_mid_segment_returns_to_departed_node() {
    let mut world = world_from("+....+");
    let _ = advance(&mut world, 0.0, Direction::Right);
    let _ = advance(&mut world, 0.3, Direction::Right);
    assert_eq!(query::actor(&world).position().x, 30.0);

    let _ = advance(&mut world, 0.0, Direction::Left);
    assert_eq!(query::actor(&world).position().x, 30.0);
    assert_eq!(query::actor(&world).direction(), Direction::Left);

    for _ in 0..100 {
        let _ = advance(&mut world, 0.05, Direction::Left);
        if query::actor(&world).direction() == Direction::Stop {
            break;
        }
    }

    let start = query::maze(&world)
        .node_at_tile(TileCoord::new(0, 0))
        .expect("tile should hold a node");
    assert_eq!(query::actor(&world).current_node(), start);
    assert_eq!(query::actor(&world).position().x, 0.0);
}

fn world_from(grid: &str) -> World {
    let level = Level::parse(grid).expect("grid should parse");
    World::new(&level, TileMetrics::default()).expect("world should build")
}

fn advance(world: &mut World, dt_seconds: f64, requested: Direction) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::Advance {
            dt_seconds,
            requested,
        },
        &mut events,
    );
    events
}
