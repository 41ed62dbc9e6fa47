//! Loads the TOML manifests that describe which maze grid to boot.

use std::{error::Error, fmt, fs, path::Path};

use anyhow::{Context, Result as AnyResult};
use maze_muncher_core::{TileCoord, TileMetrics};
use maze_muncher_world::Level;
use serde::Deserialize;

/// Manifest format revision understood by this build.
pub(crate) const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Parsed contents of a level manifest file.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct LevelManifest {
    /// Manifest format revision the file was written against.
    pub(crate) version: u32,
    /// Human-readable level name shown in the window title.
    pub(crate) title: String,
    /// Maze grid file, relative to the manifest location.
    pub(crate) grid: String,
    /// Tile dimensions used to scale the maze into pixels.
    pub(crate) tiles: TileSize,
    /// Portal pairs wired into the maze graph after construction.
    #[serde(default)]
    pub(crate) portals: Vec<PortalPair>,
}

/// Tile dimensions declared by a manifest.
#[derive(Clone, Copy, Debug, Deserialize)]
pub(crate) struct TileSize {
    /// Tile width in pixels.
    pub(crate) width: u32,
    /// Tile height in pixels.
    pub(crate) height: u32,
}

/// Two maze tiles that teleport travellers between each other.
#[derive(Clone, Copy, Debug, Deserialize)]
pub(crate) struct PortalPair {
    /// First portal endpoint.
    pub(crate) a: TileCoord,
    /// Second portal endpoint.
    pub(crate) b: TileCoord,
}

impl LevelManifest {
    /// Parses manifest text and validates the fields this build relies on.
    pub(crate) fn parse(text: &str) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(text).map_err(ManifestError::Malformed)?;
        if manifest.version != SUPPORTED_MANIFEST_VERSION {
            return Err(ManifestError::UnsupportedVersion {
                found: manifest.version,
            });
        }
        if manifest.tiles.width == 0 || manifest.tiles.height == 0 {
            return Err(ManifestError::InvalidTileSize {
                width: manifest.tiles.width,
                height: manifest.tiles.height,
            });
        }
        Ok(manifest)
    }
}

/// Manifest together with the maze grid it references, ready to boot.
pub(crate) struct LoadedLevel {
    /// Validated manifest contents.
    pub(crate) manifest: LevelManifest,
    /// Parsed maze grid.
    pub(crate) level: Level,
    /// Tile metrics derived from the manifest.
    pub(crate) metrics: TileMetrics,
}

/// Reads a manifest from disk along with the maze grid it points at.
pub(crate) fn load_level(manifest_path: &Path) -> AnyResult<LoadedLevel> {
    let manifest_text = fs::read_to_string(manifest_path)
        .with_context(|| format!("failed to read level manifest {}", manifest_path.display()))?;
    let manifest = LevelManifest::parse(&manifest_text)
        .with_context(|| format!("failed to parse level manifest {}", manifest_path.display()))?;
    let grid_path = manifest_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(&manifest.grid);
    let grid_text = fs::read_to_string(&grid_path)
        .with_context(|| format!("failed to read maze grid {}", grid_path.display()))?;
    let level = Level::parse(&grid_text)
        .with_context(|| format!("failed to parse maze grid {}", grid_path.display()))?;
    let metrics = TileMetrics::new(manifest.tiles.width, manifest.tiles.height);
    Ok(LoadedLevel {
        manifest,
        level,
        metrics,
    })
}

/// Errors surfaced while parsing a level manifest.
#[derive(Debug)]
pub(crate) enum ManifestError {
    /// Manifest text was not valid TOML or misses required fields.
    Malformed(toml::de::Error),
    /// Manifest was written against a format revision this build cannot read.
    UnsupportedVersion {
        /// Version number found in the manifest.
        found: u32,
    },
    /// Manifest declared a tile dimension of zero pixels.
    InvalidTileSize {
        /// Declared tile width in pixels.
        width: u32,
        /// Declared tile height in pixels.
        height: u32,
    },
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(_) => write!(f, "manifest is not valid TOML"),
            Self::UnsupportedVersion { found } => write!(
                f,
                "manifest version {} is not supported (expected {})",
                found, SUPPORTED_MANIFEST_VERSION
            ),
            Self::InvalidTileSize { width, height } => write!(
                f,
                "manifest declares {}x{} pixel tiles; both dimensions must be non-zero",
                width, height
            ),
        }
    }
}

impl Error for ManifestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(source) => Some(source),
            Self::UnsupportedVersion { .. } | Self::InvalidTileSize { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
version = 1
title = "Test Maze"
grid = "maze.txt"

[tiles]
width = 16
height = 16

[[portals]]
a = { column = 0, row = 17 }
b = { column = 27, row = 17 }
"#;

    #[test]
    fn parse_reads_every_field() {
        let manifest = LevelManifest::parse(MANIFEST).expect("manifest should parse");

        assert_eq!(manifest.version, 1);
        assert_eq!(manifest.title, "Test Maze");
        assert_eq!(manifest.grid, "maze.txt");
        assert_eq!(manifest.tiles.width, 16);
        assert_eq!(manifest.tiles.height, 16);
        assert_eq!(manifest.portals.len(), 1);
        assert_eq!(manifest.portals[0].a, TileCoord::new(0, 17));
        assert_eq!(manifest.portals[0].b, TileCoord::new(27, 17));
    }

    #[test]
    fn parse_defaults_to_no_portals() {
        let text = "version = 1\ntitle = \"Bare\"\ngrid = \"maze.txt\"\n\n[tiles]\nwidth = 8\nheight = 8\n";

        let manifest = LevelManifest::parse(text).expect("manifest should parse");

        assert!(manifest.portals.is_empty());
    }

    #[test]
    fn parse_rejects_unknown_versions() {
        let text = MANIFEST.replace("version = 1", "version = 2");

        let error = LevelManifest::parse(&text).expect_err("version 2 should be rejected");

        assert!(matches!(
            error,
            ManifestError::UnsupportedVersion { found: 2 }
        ));
    }

    #[test]
    fn parse_rejects_zero_tile_dimensions() {
        let text = MANIFEST.replace("width = 16", "width = 0");

        let error = LevelManifest::parse(&text).expect_err("zero width should be rejected");

        assert!(matches!(
            error,
            ManifestError::InvalidTileSize {
                width: 0,
                height: 16
            }
        ));
    }

    #[test]
    fn parse_rejects_malformed_toml() {
        let error = LevelManifest::parse("version = ").expect_err("garbage should be rejected");

        assert!(matches!(error, ManifestError::Malformed(_)));
    }
}
