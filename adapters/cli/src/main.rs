#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for creating, inspecting and editing maze files.

mod config;

use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use micromouse_core::{CellStatus, Direction, Position, WallState};
use micromouse_io::{ConsoleIo, FileIo, MazeIo};
use micromouse_maze::ClassicMaze;
use tracing::info;
use tracing_subscriber::EnvFilter;

use self::config::Config;

/// Create, inspect and edit micromouse maze files.
#[derive(Debug, Parser)]
#[command(name = "micromouse", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Writes a fresh, unexplored maze.
    New {
        /// Maze file to create.
        file: PathBuf,
        /// Start cell as `row,col`.
        #[arg(long, value_parser = parse_position)]
        start: Option<Position>,
        /// Goal cell as `row,col`.
        #[arg(long, value_parser = parse_position)]
        goal: Option<Position>,
    },
    /// Prints a maze file as ASCII art.
    Print {
        /// Maze file to print.
        file: PathBuf,
        /// Cell to draw the mouse in, as `row,col`. Defaults to the start cell.
        #[arg(long, value_parser = parse_position)]
        mouse: Option<Position>,
        /// Leaves the mouse out of the printout.
        #[arg(long)]
        no_mouse: bool,
    },
    /// Validates a maze file and reports how much of it has been searched.
    Check {
        /// Maze file to check.
        file: PathBuf,
    },
    /// Records the state of one wall and saves the maze.
    SetWall {
        /// Maze file to edit.
        file: PathBuf,
        /// Cell as `row,col`.
        #[arg(value_parser = parse_position)]
        cell: Position,
        /// Side of the cell: `R`, `C`, `r`, `c` or `row-plus`, `col-plus`, `row-minus`, `col-minus`.
        #[arg(value_parser = parse_direction)]
        direction: Direction,
        /// New state: `present`, `empty` or `unknown`.
        #[arg(value_parser = parse_wall_state)]
        state: WallState,
    },
}

/// Entry point for the micromouse command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config.log.filter)?;

    match cli.command {
        CliCommand::New { file, start, goal } => create(&config, &file, start, goal),
        CliCommand::Print {
            file,
            mouse,
            no_mouse,
        } => print(&config, &file, mouse, no_mouse),
        CliCommand::Check { file } => check(&file),
        CliCommand::SetWall {
            file,
            cell,
            direction,
            state,
        } => set_wall(&file, cell, direction, state),
    }
}

fn init_logging(default_filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("invalid log filter '{default_filter}'"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow!(error))
        .context("failed to install the log subscriber")
}

type CliMazeIo = MazeIo<FileIo, ConsoleIo<io::Stdout>>;

fn maze_io() -> CliMazeIo {
    MazeIo::new(FileIo::current_dir(), ConsoleIo::stdout())
}

fn file_name(file: &Path) -> Result<&str> {
    file.to_str()
        .with_context(|| format!("maze path {} is not valid UTF-8", file.display()))
}

fn load(maze_io: &mut CliMazeIo, file: &Path) -> Result<ClassicMaze> {
    let name = file_name(file)?;
    let mut maze = ClassicMaze::new();
    maze_io
        .load_maze(&mut maze, name)
        .with_context(|| format!("failed to load maze from {}", file.display()))?;
    maze.validate()
        .with_context(|| format!("maze in {} is not usable", file.display()))?;
    Ok(maze)
}

fn create(
    config: &Config,
    file: &Path,
    start: Option<Position>,
    goal: Option<Position>,
) -> Result<()> {
    let defaults = ClassicMaze::new();
    let start = start
        .or_else(|| config.maze.start())
        .unwrap_or_else(|| defaults.start());
    let goal = goal
        .or_else(|| config.maze.goal())
        .unwrap_or_else(|| defaults.goal());
    let maze = ClassicMaze::with_endpoints(start, goal).context("invalid maze endpoints")?;

    let mut maze_io = maze_io();
    maze_io
        .save_maze(&maze, file_name(file)?)
        .with_context(|| format!("failed to write maze to {}", file.display()))?;
    info!(path = %file.display(), ?start, ?goal, "created maze");
    Ok(())
}

fn print(
    config: &Config,
    file: &Path,
    mouse: Option<Position>,
    no_mouse: bool,
) -> Result<()> {
    let mut maze_io = maze_io();
    let maze = load(&mut maze_io, file)?;
    maze_io.set_show_mouse(config.render.show_mouse && !no_mouse);
    maze_io.set_mouse_position(mouse.unwrap_or_else(|| maze.start()));
    maze_io.print_maze(&maze).context("failed to print maze")
}

fn check(file: &Path) -> Result<()> {
    let mut maze_io = maze_io();
    let mut maze = load(&mut maze_io, file)?;
    maze.update_cells();
    let total = maze.cells().count();
    let searched = maze
        .cells()
        .filter(|(_, cell)| cell.status == CellStatus::Searched)
        .count();
    info!(path = %file.display(), searched, total, "checked maze");
    println!(
        "{}: ok, {searched}/{total} cells searched, start {:?}, goal {:?}",
        file.display(),
        maze.start(),
        maze.goal()
    );
    Ok(())
}

fn set_wall(
    file: &Path,
    cell: Position,
    direction: Direction,
    state: WallState,
) -> Result<()> {
    let mut maze_io = maze_io();
    let mut maze = load(&mut maze_io, file)?;
    maze.set_wall(cell.row, cell.col, direction, state)
        .with_context(|| format!("cannot update the {direction:?} wall of {cell:?}"))?;
    maze_io
        .save_maze(&maze, file_name(file)?)
        .with_context(|| format!("failed to write maze to {}", file.display()))?;
    info!(path = %file.display(), ?cell, ?direction, ?state, "updated wall");
    Ok(())
}

fn parse_position(value: &str) -> Result<Position, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `row,col`, found '{value}'"))?;
    let row = row
        .trim()
        .parse::<i32>()
        .map_err(|error| format!("invalid row '{row}': {error}"))?;
    let col = col
        .trim()
        .parse::<i32>()
        .map_err(|error| format!("invalid column '{col}': {error}"))?;
    Ok(Position::new(row, col))
}

fn parse_direction(value: &str) -> Result<Direction, String> {
    let mut symbols = value.chars();
    if let (Some(symbol), None) = (symbols.next(), symbols.next()) {
        if let Some(direction) = Direction::from_symbol(symbol) {
            return Ok(direction);
        }
    }
    match value.to_ascii_lowercase().as_str() {
        "row-plus" => Ok(Direction::RowPlus),
        "col-plus" => Ok(Direction::ColPlus),
        "row-minus" => Ok(Direction::RowMinus),
        "col-minus" => Ok(Direction::ColMinus),
        _ => Err(format!("unknown direction '{value}'")),
    }
}

fn parse_wall_state(value: &str) -> Result<WallState, String> {
    match value.to_ascii_lowercase().as_str() {
        "present" | "wall" | "#" => Ok(WallState::Present),
        "empty" | "open" | "." => Ok(WallState::Empty),
        "unknown" | "?" => Ok(WallState::Unknown),
        _ => Err(format!("unknown wall state '{value}'")),
    }
}
