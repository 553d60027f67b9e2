#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Persistence and display adapter for micromouse mazes.
//!
//! [`MazeIo`] translates between an in-memory [`Maze`] and its textual forms:
//! the persisted file format and the ASCII printout. All bytes flow through
//! the [`IoInterface`] seam, so the storage medium and the display can be
//! swapped without touching the maze. The adapter never holds on to a maze
//! between calls; whoever drives the robot keeps exclusive ownership.

mod sink;

use std::io;

use micromouse_core::{MazeError, Position, DEFAULT_COLS, DEFAULT_ROWS};
use micromouse_maze::Maze;
use thiserror::Error;
use tracing::debug;

pub use sink::{ConsoleIo, FileIo, IoInterface, MemoryIo};

/// Destination name handed to the print sink.
pub const DISPLAY_NAME: &str = "display";

/// Errors raised while moving a maze through an [`IoInterface`].
#[derive(Debug, Error)]
pub enum MazeIoError {
    /// The named resource could not be accessed.
    #[error("could not access '{name}': {source}")]
    Io {
        /// Resource that was being accessed.
        name: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The sink cannot perform the requested operation.
    #[error("the {sink} sink cannot read '{name}'")]
    Unsupported {
        /// Kind of sink that refused the request.
        sink: &'static str,
        /// Resource that was requested.
        name: String,
    },
    /// The resource does not hold a valid maze.
    #[error(transparent)]
    Maze(#[from] MazeError),
}

/// Moves a `ROWS` × `COLS` maze between memory, storage and display.
///
/// `F` stores maze files and `P` receives printouts. The mouse position kept
/// here is a presentation cache only; callers keep it in step with the maze's
/// own mouse flag.
#[derive(Debug)]
pub struct MazeIo<F, P, const ROWS: usize = DEFAULT_ROWS, const COLS: usize = DEFAULT_COLS> {
    file_io: F,
    print_io: P,
    mouse_position: Position,
    show_mouse: bool,
    buffer: String,
}

impl<F, P, const ROWS: usize, const COLS: usize> MazeIo<F, P, ROWS, COLS>
where
    F: IoInterface,
    P: IoInterface,
{
    /// Creates an adapter that stores files through `file_io` and prints through
    /// `print_io`.
    #[must_use]
    pub fn new(file_io: F, print_io: P) -> Self {
        Self {
            file_io,
            print_io,
            mouse_position: Position::new(0, 0),
            show_mouse: true,
            buffer: String::with_capacity(Maze::<ROWS, COLS>::RENDER_CAPACITY),
        }
    }

    /// Where the printout draws the mouse.
    #[must_use]
    pub const fn mouse_position(&self) -> Position {
        self.mouse_position
    }

    /// Moves the mouse marker used by [`MazeIo::print_maze`].
    pub fn set_mouse_position(&mut self, position: Position) {
        self.mouse_position = position;
    }

    /// Whether printouts include the mouse marker.
    #[must_use]
    pub const fn show_mouse(&self) -> bool {
        self.show_mouse
    }

    /// Enables or disables the mouse marker in printouts.
    pub fn set_show_mouse(&mut self, show_mouse: bool) {
        self.show_mouse = show_mouse;
    }

    /// Replaces `maze` with the topology stored under `name`.
    ///
    /// On malformed input the maze is left partially populated and the error
    /// is returned. [`Maze::validate`] reports the same error until the maze is
    /// loaded successfully, so callers check it before running a solver.
    pub fn load_maze(&mut self, maze: &mut Maze<ROWS, COLS>, name: &str) -> Result<(), MazeIoError> {
        let lines = self.file_io.read_lines(name)?;
        maze.load_text(&lines.join("\n"))?;
        debug!(name, "loaded maze");
        Ok(())
    }

    /// Stores the wall topology and endpoints of `maze` under `name`.
    pub fn save_maze(&mut self, maze: &Maze<ROWS, COLS>, name: &str) -> Result<(), MazeIoError> {
        self.file_io.write(name, maze.to_text().as_bytes())?;
        debug!(name, "saved maze");
        Ok(())
    }

    /// Renders `maze` and drains the rendering to the print sink.
    pub fn print_maze(&mut self, maze: &Maze<ROWS, COLS>) -> Result<(), MazeIoError> {
        let mouse = self.show_mouse.then_some(self.mouse_position);
        maze.render_into(&mut self.buffer, mouse);
        self.print_io.write(DISPLAY_NAME, self.buffer.as_bytes())?;
        debug!(bytes = self.buffer.len(), "printed maze");
        Ok(())
    }

    /// Sink used for maze files.
    #[must_use]
    pub fn file_io(&self) -> &F {
        &self.file_io
    }

    /// Sink used for printouts.
    #[must_use]
    pub fn print_io(&self) -> &P {
        &self.print_io
    }

    /// Consumes the adapter, yielding both sinks.
    #[must_use]
    pub fn into_parts(self) -> (F, P) {
        (self.file_io, self.print_io)
    }

    /// Capacity reserved for a printout.
    #[must_use]
    pub fn buffer_capacity(&self) -> usize {
        self.buffer.capacity()
    }
}
