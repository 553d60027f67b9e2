//! Fixed-width ASCII rendering of a maze.
//!
//! Each maze row becomes two text lines and each maze column three characters,
//! so a full rendering is exactly [`Maze::RENDER_CAPACITY`] bytes. The highest
//! row is printed first, which puts [`Direction::RowPlus`] at the top of the
//! screen.
//!
//! [`Direction::RowPlus`]: micromouse_core::Direction::RowPlus

use std::io::{self, Write};

use micromouse_core::{Position, WallState};

use crate::Maze;

const CORNER: char = '+';

impl<const ROWS: usize, const COLS: usize> Maze<ROWS, COLS> {
    /// Renders the maze, marking the mouse cell when `show_mouse` is set.
    #[must_use]
    pub fn render(&self, show_mouse: bool) -> String {
        let mut buffer = String::with_capacity(Self::RENDER_CAPACITY);
        self.render_into(&mut buffer, self.mouse.filter(|_| show_mouse));
        buffer
    }

    /// Renders the maze into `buffer`, replacing its contents.
    ///
    /// The mouse marker is drawn at `mouse` rather than at the cell flagged in
    /// the maze, which lets presentation layers keep their own notion of where
    /// the robot is. The buffer never needs more than
    /// [`Maze::RENDER_CAPACITY`] bytes.
    pub fn render_into(&self, buffer: &mut String, mouse: Option<Position>) {
        buffer.clear();
        self.push_wall_line(buffer, ROWS);
        for row in (0..ROWS).rev() {
            self.push_cell_line(buffer, row, mouse);
            self.push_wall_line(buffer, row);
        }
        debug_assert_eq!(buffer.len(), Self::RENDER_CAPACITY);
    }

    /// Writes the rendering to `out`.
    pub fn print_maze(&self, out: &mut impl Write, show_mouse: bool) -> io::Result<()> {
        out.write_all(self.render(show_mouse).as_bytes())?;
        out.flush()
    }

    fn push_wall_line(&self, buffer: &mut String, wall_row: usize) {
        for col in 0..COLS {
            buffer.push(CORNER);
            let state = self.row_walls.get(index(wall_row), index(col));
            buffer.push_str(match state {
                Some(WallState::Present) => "--",
                Some(WallState::Empty) => "  ",
                Some(WallState::Unknown) | None => "..",
            });
        }
        buffer.push(CORNER);
        buffer.push('\n');
    }

    fn push_cell_line(&self, buffer: &mut String, row: usize, mouse: Option<Position>) {
        for col in 0..=COLS {
            buffer.push(vertical_symbol(self.col_walls.get(index(row), index(col))));
            if col == COLS {
                break;
            }
            let position = Position::new(index(row), index(col));
            let cell = self.cells[row * COLS + col];
            buffer.push_str(if mouse == Some(position) {
                " M"
            } else if cell.is_start {
                " S"
            } else if cell.is_goal {
                " G"
            } else {
                "  "
            });
        }
        buffer.push('\n');
    }
}

fn vertical_symbol(state: Option<WallState>) -> char {
    match state {
        Some(WallState::Present) => '|',
        Some(WallState::Empty) => ' ',
        Some(WallState::Unknown) | None => ':',
    }
}

fn index(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
