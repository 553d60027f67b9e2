//! Byte sinks and line sources that [`MazeIo`](crate::MazeIo) persists through.

use std::{
    collections::BTreeMap,
    fs,
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use crate::MazeIoError;

/// Capability to write bytes to a named destination and read lines back.
///
/// The maze adapters never touch a file system, terminal or socket directly;
/// every implementation of this trait decides what a name refers to.
pub trait IoInterface {
    /// Writes `contents` to `destination`, replacing anything stored there.
    fn write(&mut self, destination: &str, contents: &[u8]) -> Result<(), MazeIoError>;

    /// Reads every line of `source`, without line terminators.
    fn read_lines(&mut self, source: &str) -> Result<Vec<String>, MazeIoError>;
}

/// Files below a root directory.
#[derive(Clone, Debug)]
pub struct FileIo {
    root: PathBuf,
}

impl FileIo {
    /// Resolves names relative to `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves names relative to the current working directory.
    #[must_use]
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    /// Directory names are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl IoInterface for FileIo {
    fn write(&mut self, destination: &str, contents: &[u8]) -> Result<(), MazeIoError> {
        fs::write(self.resolve(destination), contents).map_err(|source| io_error(destination, source))
    }

    fn read_lines(&mut self, source: &str) -> Result<Vec<String>, MazeIoError> {
        let file = fs::File::open(self.resolve(source)).map_err(|error| io_error(source, error))?;
        BufReader::new(file)
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .map_err(|error| io_error(source, error))
    }
}

/// Display sink that writes everything to a terminal-like stream.
///
/// Destination names are ignored. Reading is not supported.
#[derive(Debug)]
pub struct ConsoleIo<W> {
    out: W,
}

impl ConsoleIo<io::Stdout> {
    /// Writes to the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleIo<W> {
    /// Wraps an arbitrary writer.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the sink, yielding the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> IoInterface for ConsoleIo<W> {
    fn write(&mut self, destination: &str, contents: &[u8]) -> Result<(), MazeIoError> {
        self.out
            .write_all(contents)
            .and_then(|()| self.out.flush())
            .map_err(|source| io_error(destination, source))
    }

    fn read_lines(&mut self, source: &str) -> Result<Vec<String>, MazeIoError> {
        Err(MazeIoError::Unsupported {
            sink: "console",
            name: source.to_owned(),
        })
    }
}

/// In-memory named buffers, for embedding and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryIo {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryIo {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `contents` under `name`.
    pub fn insert(&mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) {
        let _ = self.entries.insert(name.into(), contents.into());
    }

    /// Contents stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }
}

impl IoInterface for MemoryIo {
    fn write(&mut self, destination: &str, contents: &[u8]) -> Result<(), MazeIoError> {
        self.insert(destination, contents);
        Ok(())
    }

    fn read_lines(&mut self, source: &str) -> Result<Vec<String>, MazeIoError> {
        let contents = self.entries.get(source).ok_or_else(|| {
            io_error(
                source,
                io::Error::new(io::ErrorKind::NotFound, "no such entry"),
            )
        })?;
        Ok(String::from_utf8_lossy(contents)
            .lines()
            .map(str::to_owned)
            .collect())
    }
}

fn io_error(name: &str, source: io::Error) -> MazeIoError {
    MazeIoError::Io {
        name: name.to_owned(),
        source,
    }
}
