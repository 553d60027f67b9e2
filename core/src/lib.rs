#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the micromouse maze crates.
//!
//! This crate defines the value types that connect the maze store, the
//! persistence adapters and any solver driving the robot. The maze crate owns
//! wall and cell state and answers queries with the [`WallState`], [`Cell`]
//! and [`Position`] values defined here, reporting rejected requests through
//! [`MazeError`]. Coordinate validity is decided in one place by
//! [`GridBounds`], so every crate agrees on which indices are addressable and
//! which are safe to advance into.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of rows in the default board, the classic 16 × 16 competition maze.
pub const DEFAULT_ROWS: usize = 16;

/// Number of columns in the default board.
pub const DEFAULT_COLS: usize = 16;

/// Flood-fill distance assigned to the start cell.
pub const START_DISTANCE: i32 = 0;

/// Flood-fill distance of a cell that has not been assigned a value yet.
pub const UNREACHED: i32 = -1;

/// Knowledge about a single edge between two cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallState {
    /// The edge is open and can be crossed.
    Empty,
    /// The edge is blocked by a wall.
    Present,
    /// The edge has not been observed yet.
    Unknown,
}

impl WallState {
    /// Symbol used for this state in the persisted maze format.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Present => '#',
            Self::Unknown => '?',
        }
    }

    /// Parses a persisted symbol back into a wall state.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Empty),
            '#' => Some(Self::Present),
            '?' => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Reports whether the edge has been observed.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Whether all four walls around a cell have been determined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellStatus {
    /// At least one surrounding wall is still unknown.
    #[default]
    Unsearched,
    /// Every surrounding wall is known.
    Searched,
}

/// Per-cell record tracked by the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Flood-fill distance, [`UNREACHED`] until a solver assigns one.
    pub distance: i32,
    /// Search status derived from the surrounding walls.
    pub status: CellStatus,
    /// The robot currently occupies this cell.
    pub is_mouse: bool,
    /// The cell is the goal of the run.
    pub is_goal: bool,
    /// The cell is where the run starts.
    pub is_start: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            distance: UNREACHED,
            status: CellStatus::Unsearched,
            is_mouse: false,
            is_goal: false,
            is_start: false,
        }
    }
}

/// Axis-aligned movement directions on the maze grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing row indices.
    RowPlus,
    /// Movement toward increasing column indices.
    ColPlus,
    /// Movement toward decreasing row indices.
    RowMinus,
    /// Movement toward decreasing column indices.
    ColMinus,
}

impl Direction {
    /// All directions in clockwise order starting at [`Direction::RowPlus`].
    pub const ALL: [Direction; 4] = [
        Direction::RowPlus,
        Direction::ColPlus,
        Direction::RowMinus,
        Direction::ColMinus,
    ];

    /// Direction pointing the other way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::RowPlus => Self::RowMinus,
            Self::ColPlus => Self::ColMinus,
            Self::RowMinus => Self::RowPlus,
            Self::ColMinus => Self::ColPlus,
        }
    }

    /// Direction after a quarter turn clockwise.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::RowPlus => Self::ColPlus,
            Self::ColPlus => Self::RowMinus,
            Self::RowMinus => Self::ColMinus,
            Self::ColMinus => Self::RowPlus,
        }
    }

    /// Direction after a quarter turn counter-clockwise.
    #[must_use]
    pub const fn counter_clockwise(self) -> Self {
        match self {
            Self::RowPlus => Self::ColMinus,
            Self::ColPlus => Self::RowPlus,
            Self::RowMinus => Self::ColPlus,
            Self::ColMinus => Self::RowMinus,
        }
    }

    /// Unit offset travelled by a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> Position {
        match self {
            Self::RowPlus => Position::new(1, 0),
            Self::ColPlus => Position::new(0, 1),
            Self::RowMinus => Position::new(-1, 0),
            Self::ColMinus => Position::new(0, -1),
        }
    }

    /// Reports whether stepping in this direction changes the row index.
    #[must_use]
    pub const fn is_row_axis(self) -> bool {
        matches!(self, Self::RowPlus | Self::RowMinus)
    }

    /// Short textual form: `R`/`r` for the row axis, `C`/`c` for the column axis.
    ///
    /// Upper case denotes the increasing direction.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::RowPlus => 'R',
            Self::ColPlus => 'C',
            Self::RowMinus => 'r',
            Self::ColMinus => 'c',
        }
    }

    /// Parses the short textual form produced by [`Direction::symbol`].
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'R' => Some(Self::RowPlus),
            'C' => Some(Self::ColPlus),
            'r' => Some(Self::RowMinus),
            'c' => Some(Self::ColMinus),
            _ => None,
        }
    }
}

/// Location on the maze grid expressed as row and column indices.
///
/// A position may lie outside any grid. Bounds are enforced by the maze
/// accessors, not by this type, and arithmetic wraps at the `i32` limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row index (the y axis).
    pub row: i32,
    /// Column index (the x axis).
    pub col: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Position reached by a single step in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let offset = direction.offset();
        Self::new(
            self.row.wrapping_add(offset.row),
            self.col.wrapping_add(offset.col),
        )
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col))
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.row.wrapping_sub(rhs.row), self.col.wrapping_sub(rhs.col))
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.row.wrapping_add(rhs.row), self.col.wrapping_add(rhs.col))
    }
}

/// Coordinate predicates for a `ROWS` × `COLS` grid.
///
/// An index is *addressable* when it lies in `0..size`. It is *safe to move
/// into* only when it is strictly interior, so movement logic never steps onto
/// or through the boundary ring.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridBounds<const ROWS: usize, const COLS: usize>;

impl<const ROWS: usize, const COLS: usize> GridBounds<ROWS, COLS> {
    /// Number of rows as a signed index.
    pub const ROW_COUNT: i32 = signed_size(ROWS);
    /// Number of columns as a signed index.
    pub const COL_COUNT: i32 = signed_size(COLS);

    /// Row lies outside `0..ROWS`.
    #[must_use]
    pub const fn is_row_out_of_bounds(row: i32) -> bool {
        row >= Self::ROW_COUNT || row < 0
    }

    /// Column lies outside `0..COLS`.
    #[must_use]
    pub const fn is_col_out_of_bounds(col: i32) -> bool {
        col >= Self::COL_COUNT || col < 0
    }

    /// Either coordinate lies outside the grid.
    #[must_use]
    pub const fn is_out_of_bounds(row: i32, col: i32) -> bool {
        Self::is_row_out_of_bounds(row) || Self::is_col_out_of_bounds(col)
    }

    /// Row is below the last row.
    #[must_use]
    pub const fn is_row_safe_forward(row: i32) -> bool {
        row < Self::ROW_COUNT - 1
    }

    /// Row is above the first row.
    #[must_use]
    pub const fn is_row_safe_backward(row: i32) -> bool {
        row > 0
    }

    /// Row is strictly interior.
    #[must_use]
    pub const fn is_row_safe_to_move(row: i32) -> bool {
        Self::is_row_safe_forward(row) && Self::is_row_safe_backward(row)
    }

    /// Column is left of the last column.
    #[must_use]
    pub const fn is_col_safe_forward(col: i32) -> bool {
        col < Self::COL_COUNT - 1
    }

    /// Column is right of the first column.
    #[must_use]
    pub const fn is_col_safe_backward(col: i32) -> bool {
        col > 0
    }

    /// Column is strictly interior.
    #[must_use]
    pub const fn is_col_safe_to_move(col: i32) -> bool {
        Self::is_col_safe_forward(col) && Self::is_col_safe_backward(col)
    }

    /// Both coordinates are strictly interior.
    #[must_use]
    pub const fn is_safe_to_move(row: i32, col: i32) -> bool {
        Self::is_row_safe_to_move(row) && Self::is_col_safe_to_move(col)
    }

    /// Position form of [`GridBounds::is_out_of_bounds`].
    #[must_use]
    pub const fn contains(position: Position) -> bool {
        !Self::is_out_of_bounds(position.row, position.col)
    }
}

const fn signed_size(size: usize) -> i32 {
    if size > i32::MAX as usize {
        i32::MAX
    } else {
        size as i32
    }
}

/// Reasons a maze request may be rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    /// The cell coordinates lie outside the grid.
    #[error("cell ({row}, {col}) is outside the maze")]
    CoordinateOutOfBounds {
        /// Requested row.
        row: i32,
        /// Requested column.
        col: i32,
    },
    /// The wall index derived from a cell and direction is invalid.
    #[error("no wall on the {direction:?} side of cell ({row}, {col})")]
    EdgeIndexOutOfBounds {
        /// Requested row.
        row: i32,
        /// Requested column.
        col: i32,
        /// Side of the cell that was addressed.
        direction: Direction,
    },
    /// The edge belongs to the outer enclosure, which always stays a wall.
    #[error("the {direction:?} wall of cell ({row}, {col}) encloses the maze and cannot be opened")]
    BoundaryWall {
        /// Requested row.
        row: i32,
        /// Requested column.
        col: i32,
        /// Side of the cell that was addressed.
        direction: Direction,
    },
    /// Persisted maze text could not be parsed.
    #[error("malformed maze file at line {line}: {reason}")]
    MalformedFile {
        /// One-based line number where parsing stopped.
        line: usize,
        /// Description of what was expected.
        reason: String,
    },
}
