//! Dense wall storage used by the maze.

use micromouse_core::WallState;

/// Row-major grid of edge states for one wall orientation.
///
/// Row walls are stored as `(ROWS + 1) × COLS`, column walls as
/// `ROWS × (COLS + 1)`. Every read and write goes through [`WallGrid::index`],
/// which is the only place edge coordinates are validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct WallGrid {
    rows: usize,
    cols: usize,
    states: Vec<WallState>,
}

impl WallGrid {
    /// Creates a grid with every edge set to `fill`.
    pub(crate) fn new(rows: usize, cols: usize, fill: WallState) -> Self {
        Self {
            rows,
            cols,
            states: vec![fill; rows * cols],
        }
    }

    /// Number of edge rows.
    #[must_use]
    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    /// Number of edges per row.
    #[must_use]
    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the state of the edge, or `None` when the index is invalid.
    #[must_use]
    pub(crate) fn get(&self, row: i32, col: i32) -> Option<WallState> {
        self.index(row, col)
            .and_then(|index| self.states.get(index).copied())
    }

    /// Writes the state of the edge, returning `false` when the index is invalid.
    pub(crate) fn set(&mut self, row: i32, col: i32, state: WallState) -> bool {
        match self.index(row, col) {
            Some(index) => {
                self.states[index] = state;
                true
            }
            None => false,
        }
    }

    /// Resets every edge to `fill`.
    pub(crate) fn fill(&mut self, fill: WallState) {
        self.states.fill(fill);
    }

    /// Edge rows in storage order.
    pub(crate) fn iter_rows(&self) -> impl Iterator<Item = &[WallState]> {
        // `chunks` panics on zero; an empty grid simply yields nothing.
        self.states.chunks(self.cols.max(1))
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }
}
