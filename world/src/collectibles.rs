//! Pellets and power pellets scattered across the maze.

use maze_muncher_core::{CollectibleKind, TileMetrics, Vector2};

use crate::level::{collectible_kind, Level};

/// Score awarded for a standard pellet.
pub(crate) const PELLET_POINTS: u32 = 10;
/// Score awarded for a power pellet.
pub(crate) const POWER_PELLET_POINTS: u32 = 50;
/// Seconds between visibility toggles of a power pellet.
pub(crate) const FLASH_PERIOD_SECONDS: f64 = 0.2;

const PELLET_RADIUS_UNITS: u32 = 4;
const POWER_PELLET_RADIUS_UNITS: u32 = 8;

/// Scales a radius drawn against the reference tile width, truncating to
/// whole pixels the way the original artwork does.
fn scaled_radius(units: u32, metrics: &TileMetrics) -> f64 {
    f64::from(units * metrics.tile_width() / TileMetrics::DEFAULT_TILE_WIDTH)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FlashState {
    period: f64,
    elapsed: f64,
}

/// A consumable item fixed at one grid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Collectible {
    position: Vector2,
    radius: f64,
    collide_radius: f64,
    points: u32,
    visible: bool,
    kind: CollectibleKind,
    flash: Option<FlashState>,
}

impl Collectible {
    /// Creates a standard pellet at the provided position.
    #[must_use]
    pub fn pellet(position: Vector2, metrics: &TileMetrics) -> Self {
        let radius = scaled_radius(PELLET_RADIUS_UNITS, metrics);
        Self {
            position,
            radius,
            collide_radius: radius,
            points: PELLET_POINTS,
            visible: true,
            kind: CollectibleKind::Pellet,
            flash: None,
        }
    }

    /// Creates a flashing power pellet at the provided position.
    #[must_use]
    pub fn power_pellet(position: Vector2, metrics: &TileMetrics) -> Self {
        Self {
            position,
            radius: scaled_radius(POWER_PELLET_RADIUS_UNITS, metrics),
            collide_radius: scaled_radius(PELLET_RADIUS_UNITS, metrics),
            points: POWER_PELLET_POINTS,
            visible: true,
            kind: CollectibleKind::PowerPellet,
            flash: Some(FlashState {
                period: FLASH_PERIOD_SECONDS,
                elapsed: 0.0,
            }),
        }
    }

    /// Pixel position of the collectible's center.
    #[must_use]
    pub const fn position(&self) -> Vector2 {
        self.position
    }

    /// Radius used when drawing the collectible.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Radius used when testing for consumption.
    #[must_use]
    pub const fn collide_radius(&self) -> f64 {
        self.collide_radius
    }

    /// Score awarded when the collectible is consumed.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Whether the collectible should currently be drawn. Collision ignores
    /// visibility.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Which kind of collectible this is.
    #[must_use]
    pub const fn kind(&self) -> CollectibleKind {
        self.kind
    }

    fn advance(&mut self, dt_seconds: f64) {
        if let Some(flash) = &mut self.flash {
            flash.elapsed += dt_seconds;
            if flash.elapsed >= flash.period {
                self.visible = !self.visible;
                flash.elapsed = 0.0;
            }
        }
    }
}

/// Every collectible remaining in one maze, in grid scan order.
#[derive(Clone, Debug)]
pub struct CollectibleField {
    collectibles: Vec<Collectible>,
    eaten: u32,
}

impl CollectibleField {
    /// Scans a level for collectible symbols, placing one item per marked
    /// cell in row-major order.
    #[must_use]
    pub fn from_level(level: &Level, metrics: TileMetrics) -> Self {
        let mut collectibles = Vec::new();
        for (tile, symbol) in level.tiles() {
            match collectible_kind(symbol) {
                Some(CollectibleKind::Pellet) => {
                    collectibles.push(Collectible::pellet(metrics.position(tile), &metrics));
                }
                Some(CollectibleKind::PowerPellet) => {
                    collectibles.push(Collectible::power_pellet(metrics.position(tile), &metrics));
                }
                None => {}
            }
        }
        Self {
            collectibles,
            eaten: 0,
        }
    }

    /// Advances every flash animation by `dt_seconds`. A power pellet toggles
    /// visibility each time its timer reaches the flash period, then restarts
    /// the timer from zero.
    pub fn advance(&mut self, dt_seconds: f64) {
        for collectible in &mut self.collectibles {
            collectible.advance(dt_seconds);
        }
    }

    /// Collectibles still present, in their original scan order.
    #[must_use]
    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    /// Power pellets still present.
    pub fn power_collectibles(&self) -> impl Iterator<Item = &Collectible> {
        self.collectibles
            .iter()
            .filter(|collectible| collectible.kind() == CollectibleKind::PowerPellet)
    }

    /// Removes and returns the collectible at `index`, counting it as eaten.
    /// Later indices shift down by one, so a collision index is only valid
    /// against the contents it was computed from.
    pub fn consume(&mut self, index: usize) -> Collectible {
        self.eaten += 1;
        self.collectibles.remove(index)
    }

    /// Number of collectibles remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collectibles.len()
    }

    /// True once every collectible has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collectibles.is_empty()
    }

    /// Number of collectibles consumed since the field was built.
    #[must_use]
    pub const fn eaten(&self) -> u32 {
        self.eaten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_muncher_core::TileCoord;

    fn field_from(text: &str) -> CollectibleField {
        let level = Level::parse(text).expect("grid should parse");
        CollectibleField::from_level(&level, TileMetrics::default())
    }

    #[test]
    fn field_census_matches_symbols() {
        let field = field_from("+.P\np-n");

        assert_eq!(field.len(), 4);
        assert_eq!(field.power_collectibles().count(), 2);
        assert_eq!(field.eaten(), 0);
    }

    #[test]
    fn collectibles_keep_scan_order() {
        let level = Level::parse("..").expect("grid should parse");
        let metrics = TileMetrics::default();
        let field = CollectibleField::from_level(&level, metrics);

        assert_eq!(
            field.collectibles()[0].position(),
            metrics.position(TileCoord::new(0, 0))
        );
        assert_eq!(
            field.collectibles()[1].position(),
            metrics.position(TileCoord::new(1, 0))
        );
    }

    #[test]
    fn pellets_never_flash() {
        let mut field = field_from("...");

        for _ in 0..50 {
            field.advance(0.5);
        }
        assert!(field.collectibles().iter().all(Collectible::is_visible));
    }

    #[test]
    fn power_pellet_toggles_at_full_period() {
        let metrics = TileMetrics::default();
        let mut pellet = Collectible::power_pellet(Vector2::ZERO, &metrics);

        pellet.advance(FLASH_PERIOD_SECONDS);
        assert!(!pellet.is_visible());
        pellet.advance(FLASH_PERIOD_SECONDS);
        assert!(pellet.is_visible());
    }

    #[test]
    fn power_pellet_accumulates_partial_frames() {
        let metrics = TileMetrics::default();
        let mut pellet = Collectible::power_pellet(Vector2::ZERO, &metrics);

        pellet.advance(0.1);
        assert!(pellet.is_visible());
        pellet.advance(0.1);
        assert!(!pellet.is_visible());
    }

    #[test]
    fn flash_parity_depends_only_on_toggle_count() {
        let metrics = TileMetrics::default();
        let mut pellet = Collectible::power_pellet(Vector2::ZERO, &metrics);

        for _ in 0..4 {
            pellet.advance(FLASH_PERIOD_SECONDS);
        }
        assert!(pellet.is_visible());
        pellet.advance(FLASH_PERIOD_SECONDS);
        assert!(!pellet.is_visible());
    }

    #[test]
    fn consume_removes_exactly_one() {
        let mut field = field_from("..");
        let second_position = field.collectibles()[1].position();

        let consumed = field.consume(0);

        assert_eq!(consumed.points(), PELLET_POINTS);
        assert_eq!(field.len(), 1);
        assert_eq!(field.eaten(), 1);
        assert_eq!(field.collectibles()[0].position(), second_position);
    }

    #[test]
    fn radii_scale_with_tile_width() {
        let doubled = TileMetrics::new(32, 32);
        let pellet = Collectible::pellet(Vector2::ZERO, &doubled);
        let power = Collectible::power_pellet(Vector2::ZERO, &doubled);

        assert_eq!(pellet.radius(), 8.0);
        assert_eq!(pellet.collide_radius(), 8.0);
        assert_eq!(power.radius(), 16.0);
        assert_eq!(power.collide_radius(), 8.0);
        assert_eq!(power.points(), POWER_PELLET_POINTS);
    }

    #[test]
    fn radius_scaling_truncates_to_whole_pixels() {
        let odd = TileMetrics::new(18, 18);
        let pellet = Collectible::pellet(Vector2::ZERO, &odd);

        assert_eq!(pellet.radius(), 4.0);
    }
}
