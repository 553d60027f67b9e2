#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative wall and cell state for a micromouse maze.
//!
//! [`Maze`] owns every edge and cell of a `ROWS` × `COLS` board. Solvers query
//! it through bounds-checked accessors and mutate it only through its own
//! methods; a rejected request is logged and reported as a [`MazeError`]
//! without touching any state. The maze never computes distances itself, it
//! only stores and validates the values a flood-fill solver assigns.

mod file;
mod render;
mod text;
mod walls;

pub use file::FileError;
pub use micromouse_core::{
    Cell, CellStatus, Direction, GridBounds, MazeError, Position, WallState, DEFAULT_COLS,
    DEFAULT_ROWS, START_DISTANCE, UNREACHED,
};

use tracing::warn;

use self::walls::WallGrid;

/// Maze with the board dimensions used in competition.
pub type ClassicMaze = Maze<DEFAULT_ROWS, DEFAULT_COLS>;

/// Wall, cell and endpoint state of a `ROWS` × `COLS` maze.
///
/// Both dimensions must be at least one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze<const ROWS: usize = DEFAULT_ROWS, const COLS: usize = DEFAULT_COLS> {
    row_walls: WallGrid,
    col_walls: WallGrid,
    cells: Vec<Cell>,
    start: Position,
    goal: Position,
    mouse: Option<Position>,
    load_failure: Option<MazeError>,
}

/// Orientation of the wall array an edge lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Row,
    Col,
}

/// Resolved location of a single physical edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Edge {
    axis: Axis,
    row: i32,
    col: i32,
}

impl<const ROWS: usize, const COLS: usize> Maze<ROWS, COLS> {
    /// Capacity of a full text rendering: `2 * ROWS + 1` lines of
    /// `3 * COLS + 2` bytes each, line terminator included.
    pub const RENDER_CAPACITY: usize = (2 * ROWS + 1) * (3 * COLS + 2);

    const ROW_COUNT: i32 = GridBounds::<ROWS, COLS>::ROW_COUNT;
    const COL_COUNT: i32 = GridBounds::<ROWS, COLS>::COL_COUNT;

    /// Creates an unexplored maze starting in the corner cell `(0, 0)` with the
    /// goal at the centre of the board.
    #[must_use]
    pub fn new() -> Self {
        let start = Position::new(0, 0);
        let goal = Position::new(Self::ROW_COUNT / 2, Self::COL_COUNT / 2);
        let mut maze = Self {
            row_walls: WallGrid::new(ROWS + 1, COLS, WallState::Unknown),
            col_walls: WallGrid::new(ROWS, COLS + 1, WallState::Unknown),
            cells: vec![Cell::default(); ROWS * COLS],
            start,
            goal,
            mouse: None,
            load_failure: None,
        };
        maze.reset();
        maze
    }

    /// Creates an unexplored maze with explicit start and goal cells.
    pub fn with_endpoints(start: Position, goal: Position) -> Result<Self, MazeError> {
        let mut maze = Self::new();
        let _ = maze.cell_index(start.row, start.col)?;
        let _ = maze.cell_index(goal.row, goal.col)?;
        maze.start = start;
        maze.goal = goal;
        maze.restore_endpoint_flags();
        Ok(maze)
    }

    /// Cell where the run starts.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Cell the mouse is trying to reach.
    #[must_use]
    pub const fn goal(&self) -> Position {
        self.goal
    }

    /// Returns the state of the wall on the `direction` side of the cell.
    pub fn wall(&self, row: i32, col: i32, direction: Direction) -> Result<WallState, MazeError> {
        let edge = self.locate(row, col, direction)?;
        // `locate` only yields edges of an in-bounds cell, which always exist.
        self.grid(edge.axis)
            .get(edge.row, edge.col)
            .ok_or_else(|| edge_out_of_bounds(row, col, direction))
    }

    /// Records the state of the wall on the `direction` side of the cell.
    ///
    /// Both neighbouring cells share the edge, so the write is visible from
    /// either side. Boundary edges can only ever be [`WallState::Present`].
    pub fn set_wall(
        &mut self,
        row: i32,
        col: i32,
        direction: Direction,
        state: WallState,
    ) -> Result<(), MazeError> {
        let edge = self.locate(row, col, direction)?;
        if state != WallState::Present && Self::is_boundary(edge) {
            warn!(row, col, ?direction, ?state, "refusing to open a boundary wall");
            return Err(MazeError::BoundaryWall {
                row,
                col,
                direction,
            });
        }
        // Same guarantee as in `wall`.
        if self.grid_mut(edge.axis).set(edge.row, edge.col, state) {
            Ok(())
        } else {
            Err(edge_out_of_bounds(row, col, direction))
        }
    }

    /// Returns a copy of the cell record.
    pub fn cell(&self, row: i32, col: i32) -> Result<Cell, MazeError> {
        let index = self.cell_index(row, col)?;
        Ok(self.cells[index])
    }

    /// Flood-fill distance stored for the cell.
    pub fn distance(&self, row: i32, col: i32) -> Result<i32, MazeError> {
        let index = self.cell_index(row, col)?;
        Ok(self.cells[index].distance)
    }

    /// Stores a flood-fill distance for the cell.
    pub fn set_distance(&mut self, row: i32, col: i32, distance: i32) -> Result<(), MazeError> {
        let index = self.cell_index(row, col)?;
        self.cells[index].distance = distance;
        Ok(())
    }

    /// Marks every cell as [`UNREACHED`], ready for a fresh flood fill.
    pub fn reset_distances(&mut self) {
        for cell in &mut self.cells {
            cell.distance = UNREACHED;
        }
    }

    /// Marks the mouse as occupying the cell.
    ///
    /// The flag is cleared on the previously occupied cell so at most one cell
    /// ever carries it.
    pub fn set_mouse(&mut self, row: i32, col: i32) -> Result<(), MazeError> {
        let index = self.cell_index(row, col)?;
        if let Some(previous) = self.mouse.take() {
            if let Some(previous_index) = self.index_of(previous) {
                self.cells[previous_index].is_mouse = false;
            }
        }
        self.cells[index].is_mouse = true;
        self.mouse = Some(Position::new(row, col));
        Ok(())
    }

    /// Clears the mouse flag on the cell.
    pub fn reset_mouse(&mut self, row: i32, col: i32) -> Result<(), MazeError> {
        let index = self.cell_index(row, col)?;
        self.cells[index].is_mouse = false;
        if self.mouse == Some(Position::new(row, col)) {
            self.mouse = None;
        }
        Ok(())
    }

    /// Cell currently flagged as occupied by the mouse.
    #[must_use]
    pub const fn mouse(&self) -> Option<Position> {
        self.mouse
    }

    /// Re-derives the search status of the cell from its four walls.
    pub fn update_cell(&mut self, row: i32, col: i32) -> Result<(), MazeError> {
        let index = self.cell_index(row, col)?;
        let status = self.derive_status(row, col);
        self.cells[index].status = status;
        Ok(())
    }

    /// Re-derives the search status of every cell.
    pub fn update_cells(&mut self) {
        for (index, position) in Self::positions().enumerate() {
            let status = self.derive_status(position.row, position.col);
            self.cells[index].status = status;
        }
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        Self::positions().zip(self.cells.iter())
    }

    /// Checks the invariants a solver relies on.
    ///
    /// The last load must have completed, the start and goal must lie inside
    /// the grid and every boundary edge must be a wall. Run this after loading
    /// a maze from untrusted input.
    pub fn validate(&self) -> Result<(), MazeError> {
        if let Some(error) = &self.load_failure {
            warn!(%error, "maze holds a partial load");
            return Err(error.clone());
        }
        for endpoint in [self.start, self.goal] {
            let _ = self.cell_index(endpoint.row, endpoint.col)?;
        }

        let last_row = Self::ROW_COUNT - 1;
        let last_col = Self::COL_COUNT - 1;
        let perimeter = (0..Self::COL_COUNT)
            .flat_map(|col| {
                [
                    (0, col, Direction::RowMinus),
                    (last_row, col, Direction::RowPlus),
                ]
            })
            .chain((0..Self::ROW_COUNT).flat_map(|row| {
                [
                    (row, 0, Direction::ColMinus),
                    (row, last_col, Direction::ColPlus),
                ]
            }));

        for (row, col, direction) in perimeter {
            if self.wall(row, col, direction)? != WallState::Present {
                warn!(row, col, ?direction, "maze boundary is not enclosed");
                return Err(MazeError::BoundaryWall {
                    row,
                    col,
                    direction,
                });
            }
        }
        Ok(())
    }

    /// Restores the freshly constructed state while keeping start and goal.
    fn reset(&mut self) {
        self.row_walls.fill(WallState::Unknown);
        self.col_walls.fill(WallState::Unknown);
        for col in 0..Self::COL_COUNT {
            let _ = self.row_walls.set(0, col, WallState::Present);
            let _ = self.row_walls.set(Self::ROW_COUNT, col, WallState::Present);
        }
        for row in 0..Self::ROW_COUNT {
            let _ = self.col_walls.set(row, 0, WallState::Present);
            let _ = self.col_walls.set(row, Self::COL_COUNT, WallState::Present);
        }
        self.cells.fill(Cell::default());
        self.mouse = None;
        self.load_failure = None;
        self.restore_endpoint_flags();
    }

    fn restore_endpoint_flags(&mut self) {
        for cell in &mut self.cells {
            cell.is_start = false;
            cell.is_goal = false;
        }
        if let Some(index) = self.index_of(self.start) {
            self.cells[index].is_start = true;
        }
        if let Some(index) = self.index_of(self.goal) {
            self.cells[index].is_goal = true;
        }
    }

    fn derive_status(&self, row: i32, col: i32) -> CellStatus {
        let all_known = Direction::ALL.into_iter().all(|direction| {
            self.wall(row, col, direction)
                .map_or(false, WallState::is_known)
        });
        if all_known {
            CellStatus::Searched
        } else {
            CellStatus::Unsearched
        }
    }

    fn positions() -> impl Iterator<Item = Position> {
        (0..Self::ROW_COUNT).flat_map(|row| {
            (0..Self::COL_COUNT).map(move |col| Position::new(row, col))
        })
    }

    fn locate(&self, row: i32, col: i32, direction: Direction) -> Result<Edge, MazeError> {
        let _ = self.cell_index(row, col)?;
        let edge = match direction {
            Direction::RowPlus => Edge {
                axis: Axis::Row,
                row: row + 1,
                col,
            },
            Direction::RowMinus => Edge {
                axis: Axis::Row,
                row,
                col,
            },
            Direction::ColPlus => Edge {
                axis: Axis::Col,
                row,
                col: col + 1,
            },
            Direction::ColMinus => Edge {
                axis: Axis::Col,
                row,
                col,
            },
        };
        Ok(edge)
    }

    fn is_boundary(edge: Edge) -> bool {
        match edge.axis {
            Axis::Row => edge.row == 0 || edge.row == Self::ROW_COUNT,
            Axis::Col => edge.col == 0 || edge.col == Self::COL_COUNT,
        }
    }

    fn grid(&self, axis: Axis) -> &WallGrid {
        match axis {
            Axis::Row => &self.row_walls,
            Axis::Col => &self.col_walls,
        }
    }

    fn grid_mut(&mut self, axis: Axis) -> &mut WallGrid {
        match axis {
            Axis::Row => &mut self.row_walls,
            Axis::Col => &mut self.col_walls,
        }
    }

    fn cell_index(&self, row: i32, col: i32) -> Result<usize, MazeError> {
        self.index_of(Position::new(row, col)).ok_or_else(|| {
            warn!(row, col, "invalid cell");
            MazeError::CoordinateOutOfBounds { row, col }
        })
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        if GridBounds::<ROWS, COLS>::contains(position) {
            let row = usize::try_from(position.row).ok()?;
            let col = usize::try_from(position.col).ok()?;
            Some(row * COLS + col)
        } else {
            None
        }
    }
}

impl<const ROWS: usize, const COLS: usize> Default for Maze<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}

fn edge_out_of_bounds(row: i32, col: i32, direction: Direction) -> MazeError {
    warn!(row, col, ?direction, "invalid wall index");
    MazeError::EdgeIndexOutOfBounds {
        row,
        col,
        direction,
    }
}
