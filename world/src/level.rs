//! Textual maze grids and the meaning of their symbols.

use std::{error::Error, fmt};

use maze_muncher_core::{CollectibleKind, TileCoord};

/// Role a grid symbol plays during graph construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CellRole {
    /// The cell marks a graph vertex.
    Node,
    /// The cell continues a corridor between vertices.
    Path,
    /// The cell blocks connectivity.
    Wall,
}

/// Classifies a grid symbol for corridor scanning.
pub(crate) const fn classify(symbol: char) -> CellRole {
    match symbol {
        '+' | 'P' | 'n' => CellRole::Node,
        '.' | '-' | '|' | 'p' => CellRole::Path,
        _ => CellRole::Wall,
    }
}

/// Collectible spawned by a grid symbol, if any.
pub(crate) const fn collectible_kind(symbol: char) -> Option<CollectibleKind> {
    match symbol {
        '.' | '+' => Some(CollectibleKind::Pellet),
        'P' | 'p' => Some(CollectibleKind::PowerPellet),
        _ => None,
    }
}

/// Rectangular character grid describing one maze.
///
/// Symbols are interpreted by position: `+`, `P` and `n` mark graph nodes,
/// `.`, `-`, `|` and `p` continue corridors, and every other character is a
/// wall. `.` and `+` cells additionally hold a pellet, `P` and `p` cells a
/// power pellet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    rows: Vec<Vec<char>>,
    columns: u32,
}

impl Level {
    /// Parses a maze grid from text, one line per row and one character per
    /// cell. Blank lines are skipped; every remaining row must match the
    /// width of the first.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut rows: Vec<Vec<char>> = Vec::new();
        let mut expected = 0;
        for (index, line) in text.lines().enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                continue;
            }
            let cells: Vec<char> = line.chars().collect();
            if rows.is_empty() {
                expected = cells.len();
            } else if cells.len() != expected {
                return Err(LevelError::RaggedRow {
                    row: index,
                    expected,
                    found: cells.len(),
                });
            }
            rows.push(cells);
        }
        if rows.is_empty() || expected == 0 {
            return Err(LevelError::EmptyGrid);
        }
        Ok(Self {
            rows,
            columns: expected as u32,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Symbol stored at the provided tile, or `None` outside the grid.
    #[must_use]
    pub fn symbol(&self, tile: TileCoord) -> Option<char> {
        self.rows
            .get(tile.row() as usize)
            .and_then(|row| row.get(tile.column() as usize))
            .copied()
    }

    /// Visits every cell in row-major order.
    pub(crate) fn tiles(&self) -> impl Iterator<Item = (TileCoord, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().map(move |(column, &symbol)| {
                (TileCoord::new(column as u32, row as u32), symbol)
            })
        })
    }
}

/// Errors raised while parsing a maze grid.
#[derive(Debug, PartialEq, Eq)]
pub enum LevelError {
    /// The grid contained no rows or no columns.
    EmptyGrid,
    /// A row's width differed from the width of the first row.
    RaggedRow {
        /// Zero-based line index of the offending row.
        row: usize,
        /// Width of the first row in cells.
        expected: usize,
        /// Width of the offending row in cells.
        found: usize,
    },
    /// The grid contained no node symbols, leaving the actor nowhere to start.
    NoNodes,
}

impl fmt::Display for LevelError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(formatter, "maze grid contains no cells"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                formatter,
                "maze row {row} is {found} cells wide, expected {expected}"
            ),
            Self::NoNodes => write!(formatter, "maze grid contains no node symbols"),
        }
    }
}

impl Error for LevelError {}
