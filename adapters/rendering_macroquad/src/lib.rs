#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Muncher.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Consumers that need sound playback can opt back
//! in by enabling `macroquad/audio` in their own `Cargo.toml` dependency
//! specification.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use maze_muncher_core::Direction;
use maze_muncher_rendering::{
    ActorSprite, CollectibleSprite, CorridorSegment, FrameInput, MazePresentation, Presentation,
    RenderingBackend, Scene, ScoreboardPresentation,
};
use std::{collections::VecDeque, time::Duration};

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);

        Self { quit_requested }
    }
}

/// Maps held arrow keys to a travel request, preferring the vertical axis.
///
/// The first held key in the order up, down, left, right wins, so opposing
/// keys held together resolve deterministically.
const fn direction_from_key_states(up: bool, down: bool, left: bool, right: bool) -> Direction {
    if up {
        Direction::Up
    } else if down {
        Direction::Down
    } else if left {
        Direction::Left
    } else if right {
        Direction::Right
    } else {
        Direction::Stop
    }
}

fn poll_requested_direction() -> Direction {
    direction_from_key_states(
        is_key_down(KeyCode::Up),
        is_key_down(KeyCode::Down),
        is_key_down(KeyCode::Left),
        is_key_down(KeyCode::Right),
    )
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing
    /// ten-second averages once one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        if seconds <= f32::EPSILON {
            self.elapsed = Duration::ZERO;
            self.frames = 0;
            return None;
        }

        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.maze.width().round() as i32,
            window_height: scene.maze.height().round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = FrameInput {
                    requested_direction: poll_requested_direction(),
                };

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);

                draw_corridors(&scene.corridors, &scene.maze, &metrics);
                draw_node_markers(&scene.node_markers, &scene.maze, &metrics);
                draw_collectibles(&scene.collectibles, &metrics);
                draw_actor(&scene.actor, &metrics);
                draw_scoreboard(&scene.scoreboard, screen_width, screen_height);

                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                    }) = fps_counter.record_frame(frame_dt)
                    {
                        println!("FPS: {per_second:.2} (10s avg: {trailing_ten_seconds:.2})");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Uniform scale and centering offsets that map world units onto the screen.
#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let world_width = scene.maze.width();
        let world_height = scene.maze.height();
        let scale = if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / world_width).min(screen_height / world_height)
        };

        let offset_x = (screen_width - world_width * scale) * 0.5;
        let offset_y = (screen_height - world_height * scale) * 0.5;

        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    fn screen_point(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + position.x * self.scale,
            self.offset_y + position.y * self.scale,
        )
    }
}

fn draw_corridors(corridors: &[CorridorSegment], maze: &MazePresentation, metrics: &SceneMetrics) {
    if metrics.scale <= f32::EPSILON {
        return;
    }

    let color = to_macroquad_color(maze.corridor_color);
    let thickness = (maze.corridor_thickness * metrics.scale).max(1.0);
    for segment in corridors {
        let start = metrics.screen_point(segment.from);
        let end = metrics.screen_point(segment.to);
        macroquad::shapes::draw_line(start.x, start.y, end.x, end.y, thickness, color);
    }
}

fn draw_node_markers(node_markers: &[Vec2], maze: &MazePresentation, metrics: &SceneMetrics) {
    if metrics.scale <= f32::EPSILON {
        return;
    }

    let color = to_macroquad_color(maze.node_color);
    let radius = (maze.node_radius * metrics.scale).max(1.0);
    for marker in node_markers {
        let center = metrics.screen_point(*marker);
        macroquad::shapes::draw_circle(center.x, center.y, radius, color);
    }
}

fn draw_collectibles(collectibles: &[CollectibleSprite], metrics: &SceneMetrics) {
    if metrics.scale <= f32::EPSILON {
        return;
    }

    for sprite in collectibles {
        if !sprite.visible {
            continue;
        }
        let center = metrics.screen_point(sprite.position);
        let radius = (sprite.radius * metrics.scale).max(1.0);
        macroquad::shapes::draw_circle(
            center.x,
            center.y,
            radius,
            to_macroquad_color(sprite.color),
        );
    }
}

fn draw_actor(actor: &ActorSprite, metrics: &SceneMetrics) {
    if metrics.scale <= f32::EPSILON {
        return;
    }

    let center = metrics.screen_point(actor.position);
    let radius = (actor.radius * metrics.scale).max(1.0);
    macroquad::shapes::draw_circle(center.x, center.y, radius, to_macroquad_color(actor.color));
}

fn draw_scoreboard(scoreboard: &ScoreboardPresentation, screen_width: f32, screen_height: f32) {
    let text_color = macroquad::color::WHITE;
    let font_size = 24.0;
    let line = format!(
        "Score: {}  Eaten: {}  Remaining: {}",
        scoreboard.score, scoreboard.eaten, scoreboard.remaining
    );
    macroquad::text::draw_text(&line, 8.0, font_size, font_size, text_color);

    if scoreboard.cleared {
        let banner = "LEVEL CLEAR";
        let banner_size = 48.0;
        let dimensions = macroquad::text::measure_text(banner, None, banner_size as u16, 1.0);
        macroquad::text::draw_text(
            banner,
            (screen_width - dimensions.width) * 0.5,
            screen_height * 0.5,
            banner_size,
            text_color,
        );
    }
}

fn to_macroquad_color(color: maze_muncher_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
