//! Sliding-tile board and moves.
//!
//! A board is a rectangular grid of numbered tiles with a single blank,
//! stored row-major with `0` standing for the blank.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SolveError};
use crate::state::SearchState;

/// A single move, named after the direction the tile next to the blank
/// slides into the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// The tile below the blank slides up.
    #[serde(rename = "u")]
    Up,
    /// The tile above the blank slides down.
    #[serde(rename = "d")]
    Down,
    /// The tile right of the blank slides left.
    #[serde(rename = "l")]
    Left,
    /// The tile left of the blank slides right.
    #[serde(rename = "r")]
    Right,
}

impl Move {
    /// All moves in the order they are enumerated from a board.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Single-letter name of the move.
    pub fn as_char(self) -> char {
        match self {
            Move::Up => 'u',
            Move::Down => 'd',
            Move::Left => 'l',
            Move::Right => 'r',
        }
    }

    /// The move that undoes this one.
    pub fn opposite(self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Row and column offset of the blank when this move is applied.
    fn blank_offset(self) -> (isize, isize) {
        match self {
            Move::Up => (1, 0),
            Move::Down => (-1, 0),
            Move::Left => (0, 1),
            Move::Right => (0, -1),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Move {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "u" | "up" => Ok(Move::Up),
            "d" | "down" => Ok(Move::Down),
            "l" | "left" => Ok(Move::Left),
            "r" | "right" => Ok(Move::Right),
            other => Err(SolveError::InvalidBoard(format!("unknown move '{}'", other))),
        }
    }
}

/// A sliding-tile puzzle configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    tiles: Vec<u8>,
    blank: usize,
}

impl Board {
    /// Create a board from row-major tiles, validating that they form a
    /// permutation of `0..rows * cols`.
    pub fn new(rows: usize, cols: usize, tiles: Vec<u8>) -> Result<Self> {
        let cells = Self::cell_count(rows, cols)?;
        if tiles.len() != cells {
            return Err(SolveError::InvalidBoard(format!(
                "expected {} tiles for a {}x{} board, got {}",
                cells,
                rows,
                cols,
                tiles.len()
            )));
        }

        let mut seen = vec![false; cells];
        for &tile in &tiles {
            let idx = tile as usize;
            if idx >= cells {
                return Err(SolveError::InvalidBoard(format!(
                    "tile {} out of range for {} cells",
                    tile, cells
                )));
            }
            if seen[idx] {
                return Err(SolveError::InvalidBoard(format!("tile {} appears twice", tile)));
            }
            seen[idx] = true;
        }

        let blank = tiles
            .iter()
            .position(|&t| t == 0)
            .ok_or_else(|| SolveError::InvalidBoard("board has no blank".to_string()))?;

        Ok(Self {
            rows,
            cols,
            tiles,
            blank,
        })
    }

    /// Number of cells for a board shape, rejecting shapes too small or too
    /// large for `u8` tiles.
    fn cell_count(rows: usize, cols: usize) -> Result<usize> {
        if rows < 2 || cols < 2 {
            return Err(SolveError::InvalidBoard(format!(
                "board must be at least 2x2, got {}x{}",
                rows, cols
            )));
        }
        match rows.checked_mul(cols) {
            Some(cells) if cells <= u8::MAX as usize + 1 => Ok(cells),
            _ => Err(SolveError::InvalidBoard(format!(
                "board of {}x{} has too many cells",
                rows, cols
            ))),
        }
    }

    /// The solved board: tiles in ascending order with the blank last.
    pub fn solved(rows: usize, cols: usize) -> Result<Self> {
        let cells = Self::cell_count(rows, cols)?;
        let tiles = (1..cells)
            .chain(std::iter::once(0))
            .map(|t| u8::try_from(t).unwrap_or(u8::MAX))
            .collect();
        Self::new(rows, cols, tiles)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major tiles, `0` being the blank.
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Tile at the given row and column.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.rows && col < self.cols {
            Some(self.tiles[row * self.cols + col])
        } else {
            None
        }
    }

    /// Row and column of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.cols, self.blank % self.cols)
    }

    /// Returns true if both boards have the same shape.
    pub fn same_shape(&self, other: &Board) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Legal moves from this board, in [`Move::ALL`] order.
    pub fn legal_moves(&self) -> Vec<Move> {
        Move::ALL
            .into_iter()
            .filter(|&mv| self.target_of(mv).is_some())
            .collect()
    }

    /// Index the blank moves to under `mv`, if it stays on the board.
    fn target_of(&self, mv: Move) -> Option<usize> {
        let (row, col) = self.blank_position();
        let (dr, dc) = mv.blank_offset();
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    fn slide(&self, mv: Move) -> Option<Board> {
        let target = self.target_of(mv)?;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Some(Board {
            rows: self.rows,
            cols: self.cols,
            tiles,
            blank: target,
        })
    }

    /// Apply a move, failing if it would slide a tile off the board.
    pub fn try_apply(&self, mv: Move) -> Result<Board> {
        self.slide(mv).ok_or_else(|| SolveError::IllegalMove {
            action: mv.to_string(),
            state: self.to_string(),
        })
    }

    /// Apply a sequence of moves in order.
    pub fn apply_all(&self, moves: &[Move]) -> Result<Board> {
        moves
            .iter()
            .try_fold(self.clone(), |board, &mv| board.try_apply(mv))
    }

    /// Position of every tile value on this board.
    fn positions(&self) -> Vec<usize> {
        let mut positions = vec![0; self.tiles.len()];
        for (idx, &tile) in self.tiles.iter().enumerate() {
            positions[tile as usize] = idx;
        }
        positions
    }

    fn grid_distance(&self, a: usize, b: usize) -> u32 {
        let (ar, ac) = (a / self.cols, a % self.cols);
        let (br, bc) = (b / self.cols, b % self.cols);
        (ar.abs_diff(br) + ac.abs_diff(bc)) as u32
    }

    /// Sum over all tiles (blank excluded) of the grid distance to their
    /// position on `goal`.
    pub fn manhattan_distance(&self, goal: &Board) -> u32 {
        let targets = goal.positions();
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != 0)
            .filter_map(|(idx, &tile)| {
                targets
                    .get(tile as usize)
                    .map(|&target| self.grid_distance(idx, target))
            })
            .sum()
    }

    /// Number of tiles (blank excluded) not on their `goal` position.
    pub fn misplaced_tiles(&self, goal: &Board) -> u32 {
        self.tiles
            .iter()
            .zip(goal.tiles.iter())
            .filter(|&(&tile, &expected)| tile != 0 && tile != expected)
            .count() as u32
    }

    /// Whether `goal` can be reached from this board.
    ///
    /// Every move is a transposition that also shifts the blank by one cell,
    /// so the goal is reachable exactly when the permutation parity between
    /// the boards matches the parity of the blank's displacement.
    pub fn is_solvable_to(&self, goal: &Board) -> Result<bool> {
        if !self.same_shape(goal) {
            return Err(SolveError::DimensionMismatch {
                start: format!("{}x{}", self.rows, self.cols),
                goal: format!("{}x{}", goal.rows, goal.cols),
            });
        }

        let targets = goal.positions();
        let permutation: Vec<usize> = self
            .tiles
            .iter()
            .map(|&tile| targets[tile as usize])
            .collect();

        let mut visited = vec![false; permutation.len()];
        let mut cycles = 0;
        for start in 0..permutation.len() {
            if visited[start] {
                continue;
            }
            cycles += 1;
            let mut idx = start;
            while !visited[idx] {
                visited[idx] = true;
                idx = permutation[idx];
            }
        }
        let transpositions = permutation.len() - cycles;
        let blank_distance = self.grid_distance(self.blank, goal.blank) as usize;

        Ok(transpositions % 2 == blank_distance % 2)
    }

    /// Random walk of `moves` legal moves from this board, never directly
    /// undoing the previous move. Returns the final board and the walk.
    pub fn scramble<R: Rng + ?Sized>(&self, moves: usize, rng: &mut R) -> (Board, Vec<Move>) {
        let mut board = self.clone();
        let mut walk: Vec<Move> = Vec::new();

        for _ in 0..moves {
            let last = walk.last().copied();
            let candidates: Vec<Move> = board
                .legal_moves()
                .into_iter()
                .filter(|&mv| Some(mv.opposite()) != last)
                .collect();
            let Some(&mv) = candidates.choose(rng) else {
                break;
            };
            if let Some(next) = board.slide(mv) {
                board = next;
                walk.push(mv);
            }
        }

        (board, walk)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.tiles.chunks(self.cols).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, tile) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", tile)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = SolveError;

    /// Parse rows separated by newlines or `/`, cells by whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let mut rows: Vec<Vec<u8>> = Vec::new();
        for line in s.split(['\n', '/']) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|token| {
                    token
                        .parse::<u8>()
                        .map_err(|_| SolveError::InvalidBoard(format!("bad tile '{}'", token)))
                })
                .collect::<Result<Vec<u8>>>()?;
            rows.push(row);
        }

        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(ragged) = rows.iter().find(|row| row.len() != cols) {
            return Err(SolveError::InvalidBoard(format!(
                "row has {} cells, expected {}",
                ragged.len(),
                cols
            )));
        }

        Board::new(rows.len(), cols, rows.concat())
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl SearchState for Board {
    type Action = Move;
    type Key = Box<[u8]>;

    fn key(&self) -> Self::Key {
        self.tiles.clone().into_boxed_slice()
    }

    fn actions(&self) -> Vec<Move> {
        self.legal_moves()
    }

    fn apply(&self, action: Move) -> Option<Self> {
        self.slide(action)
    }
}
