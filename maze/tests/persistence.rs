use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use micromouse_maze::{ClassicMaze, Direction, FileError, Maze, MazeError, Position, WallState};

fn next_random(state: u64) -> u64 {
    state
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1_442_695_040_888_963_407)
}

fn scratch_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("micromouse-{name}-{}-{nanos}.maze", std::process::id()))
}

fn random_classic_maze(seed: u64) -> ClassicMaze {
    let mut maze = ClassicMaze::with_endpoints(Position::new(0, 15), Position::new(7, 8))
        .expect("endpoints inside the board");
    let mut state = seed;
    for row in 0..16 {
        for col in 0..16 {
            for direction in Direction::ALL {
                state = next_random(state);
                let wall = match (state >> 40) % 3 {
                    0 => WallState::Empty,
                    1 => WallState::Present,
                    _ => WallState::Unknown,
                };
                let _ = maze.set_wall(row, col, direction, wall);
            }
        }
    }
    maze
}

#[test]
fn text_round_trip_preserves_topology_and_endpoints() {
    for seed in [1, 42, 0xdead_beef] {
        let maze = random_classic_maze(seed);
        let restored = ClassicMaze::from_text(&maze.to_text()).expect("round trip");
        assert_eq!(restored.to_text(), maze.to_text());
        for row in 0..16 {
            for col in 0..16 {
                for direction in Direction::ALL {
                    assert_eq!(
                        restored.wall(row, col, direction),
                        maze.wall(row, col, direction)
                    );
                }
            }
        }
        assert_eq!(restored.start(), maze.start());
        assert_eq!(restored.goal(), maze.goal());
    }
}

#[test]
fn loading_resets_cell_state() {
    let mut maze = random_classic_maze(5);
    let text = maze.to_text();
    maze.set_distance(3, 3, 12).expect("in bounds");
    maze.set_mouse(3, 3).expect("in bounds");
    maze.update_cells();

    maze.load_text(&text).expect("valid text");
    let cell = maze.cell(3, 3).expect("in bounds");
    assert_eq!(cell.distance, micromouse_maze::UNREACHED);
    assert!(!cell.is_mouse);
    assert_eq!(maze.mouse(), None);
    assert!(maze.cell(0, 15).expect("in bounds").is_start);
}

#[test]
fn file_round_trip() {
    let path = scratch_path("round-trip");
    let maze = random_classic_maze(77);
    maze.save_maze_file(&path).expect("save maze");

    let restored = ClassicMaze::from_file(&path).expect("load maze");
    fs::remove_file(&path).expect("clean up scratch file");

    assert_eq!(restored.to_text(), maze.to_text());
    assert_eq!(restored.validate(), Ok(()));
}

#[test]
fn missing_file_reports_the_path() {
    let path = scratch_path("missing");
    let error = ClassicMaze::from_file(&path).expect_err("file does not exist");
    match error {
        FileError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn file_for_another_board_size_is_malformed() {
    let path = scratch_path("small-board");
    Maze::<4, 4>::new().save_maze_file(&path).expect("save maze");

    let error = ClassicMaze::from_file(&path).expect_err("size mismatch");
    fs::remove_file(&path).expect("clean up scratch file");

    assert!(matches!(
        error,
        FileError::Maze(MazeError::MalformedFile { line: 2, .. })
    ));
}
