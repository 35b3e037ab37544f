/// Level files: one text grid per level, `levelNN.txt` in a levels directory.
///
/// The first line of a file is the top row of the board. Glyphs:
///
/// | glyph      | cell                |
/// |------------|---------------------|
/// | ` ` or `.` | empty               |
/// | `@`        | player start        |
/// | `L` / `R`  | Kong facing left / right |
/// | `#`        | floor               |
/// | `H`        | ladder              |
/// | `b`        | bonfire             |
/// | `f`        | fireball            |
/// | `k`        | koopa               |
/// | `e`        | extra-life goodie   |
/// | `g`        | garlic goodie       |

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::entities::{Position, BOARD_HEIGHT, BOARD_WIDTH};

/// Highest level index the loader will look for.
pub const MAX_LEVELS: u32 = 99;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Player,
    KongLeft,
    KongRight,
    Floor,
    Ladder,
    Bonfire,
    Fireball,
    Koopa,
    ExtraLife,
    Garlic,
}

impl Cell {
    pub fn from_glyph(glyph: char) -> Option<Self> {
        let cell = match glyph {
            ' ' | '.' => Cell::Empty,
            '@' => Cell::Player,
            'L' => Cell::KongLeft,
            'R' => Cell::KongRight,
            '#' => Cell::Floor,
            'H' => Cell::Ladder,
            'b' => Cell::Bonfire,
            'f' => Cell::Fireball,
            'k' => Cell::Koopa,
            'e' => Cell::ExtraLife,
            'g' => Cell::Garlic,
            _ => return None,
        };
        Some(cell)
    }
}

// ── Errors ───────────────────────────────────────────────────────────────────

/// Why a level file could not be turned into a board.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} is {len} cells wide, the board is {max}")]
    RowTooWide { row: usize, len: usize, max: usize },
    #[error("unknown glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph { row: usize, column: usize, glyph: char },
    #[error("expected exactly one player start, found {0}")]
    PlayerStarts(usize),
    #[error("unreadable: {0}")]
    Unreadable(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum LevelError {
    /// No such level: there is nothing left to play.
    #[error("level file {} not found", path.display())]
    NotFound { path: PathBuf },
    /// The level exists but cannot be played.
    #[error("level file {} is malformed", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

// ── Level map ────────────────────────────────────────────────────────────────

/// Parsed level contents, indexed by board position.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelMap {
    /// Row-major from the bottom row up.
    cells: Vec<Cell>,
    player_start: Position,
}

impl LevelMap {
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let width = BOARD_WIDTH as usize;
        let height = BOARD_HEIGHT as usize;

        let mut rows: Vec<&str> = text
            .lines()
            .map(|row| row.trim_end_matches('\r'))
            .collect();
        while rows.last().is_some_and(|row| row.trim().is_empty()) && rows.len() > height {
            let _ = rows.pop();
        }
        if rows.len() != height {
            return Err(FormatError::RowCount {
                expected: height,
                found: rows.len(),
            });
        }

        let mut cells = vec![Cell::Empty; width * height];
        let mut starts = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len > width {
                return Err(FormatError::RowTooWide {
                    row,
                    len,
                    max: width,
                });
            }
            let y = height - 1 - row;
            for (column, glyph) in line.chars().enumerate() {
                let cell = Cell::from_glyph(glyph).ok_or(FormatError::UnknownGlyph {
                    row,
                    column,
                    glyph,
                })?;
                if cell == Cell::Player {
                    starts.push(Position::new(column as i32, y as i32));
                }
                cells[y * width + column] = cell;
            }
        }

        match starts.as_slice() {
            [start] => Ok(Self {
                cells,
                player_start: *start,
            }),
            _ => Err(FormatError::PlayerStarts(starts.len())),
        }
    }

    pub fn player_start(&self) -> Position {
        self.player_start
    }

    pub fn contents_of(&self, pos: Position) -> Cell {
        if !pos.in_bounds() {
            return Cell::Empty;
        }
        self.cells[pos.y as usize * BOARD_WIDTH as usize + pos.x as usize]
    }

    /// Every cell, column by column from the left, bottom to top within a
    /// column.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        (0..BOARD_WIDTH).flat_map(move |x| {
            (0..BOARD_HEIGHT).map(move |y| {
                let pos = Position::new(x, y);
                (pos, self.contents_of(pos))
            })
        })
    }
}

// ── Loading ──────────────────────────────────────────────────────────────────

pub fn level_file_name(index: u32) -> String {
    format!("level{index:02}.txt")
}

/// Load level `index` from `dir`.
pub fn load_level(dir: &Path, index: u32) -> Result<LevelMap, LevelError> {
    let path = dir.join(level_file_name(index));
    if index > MAX_LEVELS {
        return Err(LevelError::NotFound { path });
    }

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no more levels");
            return Err(LevelError::NotFound { path });
        }
        Err(err) => {
            return Err(LevelError::Malformed {
                path,
                source: err.into(),
            })
        }
    };

    match LevelMap::parse(&text) {
        Ok(map) => {
            info!(level = index, path = %path.display(), "level loaded");
            Ok(map)
        }
        Err(source) => {
            warn!(path = %path.display(), error = %source, "malformed level");
            Err(LevelError::Malformed { path, source })
        }
    }
}
