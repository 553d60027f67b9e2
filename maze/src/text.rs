//! Line-oriented text form of a maze's wall topology.
//!
//! ```text
//! micromouse:v1
//! size:<ROWS>x<COLS>
//! start:<row>,<col>
//! goal:<row>,<col>
//! row-walls:
//! <ROWS + 1 lines of COLS symbols>
//! col-walls:
//! <ROWS lines of COLS + 1 symbols>
//! ```
//!
//! Wall symbols are `#` for a wall, `.` for an opening and `?` for an edge that
//! has not been observed. Blank lines and trailing whitespace are ignored.

use std::fmt::Write as _;

use micromouse_core::{MazeError, Position, WallState};
use tracing::debug;

use crate::{walls::WallGrid, Maze};

/// First line of every persisted maze.
const HEADER: &str = "micromouse:v1";
const FIELD_DELIMITER: char = ':';
const SIZE_KEY: &str = "size";
const START_KEY: &str = "start";
const GOAL_KEY: &str = "goal";
const ROW_WALLS_KEY: &str = "row-walls";
const COL_WALLS_KEY: &str = "col-walls";

impl<const ROWS: usize, const COLS: usize> Maze<ROWS, COLS> {
    /// Encodes the wall topology and endpoints into the persisted text form.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(
            HEADER.len() + 64 + (ROWS + 1) * (COLS + 1) + ROWS * (COLS + 2),
        );
        // Writing into a `String` cannot fail.
        let _ = writeln!(out, "{HEADER}");
        let _ = writeln!(out, "{SIZE_KEY}{FIELD_DELIMITER}{ROWS}x{COLS}");
        let _ = writeln!(out, "{START_KEY}{FIELD_DELIMITER}{}", format_position(self.start));
        let _ = writeln!(out, "{GOAL_KEY}{FIELD_DELIMITER}{}", format_position(self.goal));
        for (key, grid) in [
            (ROW_WALLS_KEY, &self.row_walls),
            (COL_WALLS_KEY, &self.col_walls),
        ] {
            let _ = writeln!(out, "{key}{FIELD_DELIMITER}");
            for edges in grid.iter_rows() {
                out.extend(edges.iter().map(|state| state.symbol()));
                out.push('\n');
            }
        }
        out
    }

    /// Builds a maze from its persisted text form.
    pub fn from_text(text: &str) -> Result<Self, MazeError> {
        let mut maze = Self::new();
        maze.load_text(text)?;
        Ok(maze)
    }

    /// Replaces this maze with the one described by `text`.
    ///
    /// The maze is reset first. Parsing stops at the first malformed line and
    /// leaves the maze partially populated; [`Maze::validate`] keeps reporting
    /// that error until the next successful load. Cell distances, statuses and
    /// the mouse flag are left at their defaults.
    pub fn load_text(&mut self, text: &str) -> Result<(), MazeError> {
        self.reset();
        self.parse_text(text).map_err(|error| {
            self.load_failure = Some(error.clone());
            error
        })
    }

    fn parse_text(&mut self, text: &str) -> Result<(), MazeError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim_end()))
            .filter(|(_, line)| !line.is_empty());

        let (line, header) = next_line(&mut lines, "the format header")?;
        if header != HEADER {
            return Err(malformed(line, format!("expected header '{HEADER}', found '{header}'")));
        }

        let (line, dimensions) = next_field(&mut lines, SIZE_KEY)?;
        let (rows, cols) = parse_dimensions(line, dimensions)?;
        if rows != ROWS || cols != COLS {
            return Err(malformed(
                line,
                format!("maze is {rows}x{cols} but this build expects {ROWS}x{COLS}"),
            ));
        }

        let (line, start) = next_field(&mut lines, START_KEY)?;
        let start = self.parse_endpoint(line, start)?;
        let (line, goal) = next_field(&mut lines, GOAL_KEY)?;
        let goal = self.parse_endpoint(line, goal)?;
        self.start = start;
        self.goal = goal;
        self.restore_endpoint_flags();

        let (line, rest) = next_field(&mut lines, ROW_WALLS_KEY)?;
        expect_empty(line, rest)?;
        read_walls(&mut lines, &mut self.row_walls, is_row_boundary::<ROWS>)?;

        let (line, rest) = next_field(&mut lines, COL_WALLS_KEY)?;
        expect_empty(line, rest)?;
        read_walls(&mut lines, &mut self.col_walls, is_col_boundary::<COLS>)?;

        if let Some((line, extra)) = lines.next() {
            return Err(malformed(line, format!("unexpected trailing content '{extra}'")));
        }

        debug!(rows = ROWS, cols = COLS, "loaded maze topology");
        Ok(())
    }

    fn parse_endpoint(&self, line: usize, value: &str) -> Result<Position, MazeError> {
        let position = parse_position(value)
            .ok_or_else(|| malformed(line, format!("could not parse position '{value}'")))?;
        if self.index_of(position).is_none() {
            return Err(malformed(
                line,
                format!("position '{value}' is outside the maze"),
            ));
        }
        Ok(position)
    }
}

/// Formats a position as `row,col`.
#[must_use]
pub(crate) fn format_position(position: Position) -> String {
    format!("{},{}", position.row, position.col)
}

/// Parses a position written as `row,col`.
#[must_use]
pub(crate) fn parse_position(value: &str) -> Option<Position> {
    let (row, col) = value.split_once(',')?;
    let row = row.trim().parse::<i32>().ok()?;
    let col = col.trim().parse::<i32>().ok()?;
    Some(Position::new(row, col))
}

fn next_line<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    expected: &str,
) -> Result<(usize, &'a str), MazeError> {
    lines.next().ok_or_else(|| MazeError::MalformedFile {
        line: 0,
        reason: format!("file ended before {expected}"),
    })
}

fn next_field<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    key: &str,
) -> Result<(usize, &'a str), MazeError> {
    let (line, content) = next_line(lines, &format!("the '{key}' field"))?;
    match content.split_once(FIELD_DELIMITER) {
        Some((found, value)) if found == key => Ok((line, value.trim())),
        _ => Err(malformed(line, format!("expected '{key}{FIELD_DELIMITER}', found '{content}'"))),
    }
}

fn expect_empty(line: usize, rest: &str) -> Result<(), MazeError> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(malformed(line, format!("unexpected value '{rest}' after section marker")))
    }
}

fn parse_dimensions(line: usize, dimensions: &str) -> Result<(usize, usize), MazeError> {
    let invalid = || malformed(line, format!("could not parse grid dimensions '{dimensions}'"));
    let (rows, cols) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;
    let rows = rows.trim().parse::<usize>().map_err(|_| invalid())?;
    let cols = cols.trim().parse::<usize>().map_err(|_| invalid())?;
    if rows == 0 || cols == 0 {
        return Err(invalid());
    }
    Ok((rows, cols))
}

fn read_walls<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    grid: &mut WallGrid,
    is_boundary: fn(usize, usize) -> bool,
) -> Result<(), MazeError> {
    for row in 0..grid.rows() {
        let (line, symbols) = next_line(lines, "all wall rows were read")?;
        let count = symbols.chars().count();
        if count != grid.cols() {
            return Err(malformed(
                line,
                format!("expected {} wall symbols, found {count}", grid.cols()),
            ));
        }
        for (col, symbol) in symbols.chars().enumerate() {
            let state = WallState::from_symbol(symbol)
                .ok_or_else(|| malformed(line, format!("unknown wall symbol '{symbol}'")))?;
            if state != WallState::Present && is_boundary(row, col) {
                return Err(malformed(
                    line,
                    format!("boundary wall at column {col} must be '{}'", WallState::Present.symbol()),
                ));
            }
            let _ = grid.set(to_index(row), to_index(col), state);
        }
    }
    Ok(())
}

fn is_row_boundary<const ROWS: usize>(row: usize, _col: usize) -> bool {
    row == 0 || row == ROWS
}

fn is_col_boundary<const COLS: usize>(_row: usize, col: usize) -> bool {
    col == 0 || col == COLS
}

fn to_index(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn malformed(line: usize, reason: String) -> MazeError {
    MazeError::MalformedFile { line, reason }
}
