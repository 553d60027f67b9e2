//! Convenience wrappers that persist a maze directly on the local file system.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use micromouse_core::MazeError;
use thiserror::Error;
use tracing::debug;

use crate::Maze;

/// Errors raised while reading or writing a maze file.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be read or written.
    #[error("could not access maze file {}: {source}", path.display())]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file contents do not describe a maze of this size.
    #[error(transparent)]
    Maze(#[from] MazeError),
}

impl<const ROWS: usize, const COLS: usize> Maze<ROWS, COLS> {
    /// Loads a maze from the file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FileError> {
        let mut maze = Self::new();
        maze.read_maze_from_file(path)?;
        Ok(maze)
    }

    /// Replaces this maze with the topology stored in the file at `path`.
    ///
    /// See [`Maze::load_text`] for the state left behind on malformed input.
    pub fn read_maze_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), FileError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| FileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_text(&text)?;
        debug!(path = %path.display(), "read maze file");
        Ok(())
    }

    /// Writes the wall topology and endpoints to the file at `path`.
    pub fn save_maze_file(&self, path: impl AsRef<Path>) -> Result<(), FileError> {
        let path = path.as_ref();
        fs::write(path, self.to_text()).map_err(|source| FileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "saved maze file");
        Ok(())
    }
}
