use micromouse_maze::{
    CellStatus, Direction, Maze, MazeError, Position, WallState, START_DISTANCE, UNREACHED,
};

type Board = Maze<6, 5>;

const OUT_OF_BOUNDS: [(i32, i32); 6] = [(-1, 0), (0, -1), (6, 0), (0, 5), (6, 5), (-3, 9)];

fn next_random(state: u64) -> u64 {
    state
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1_442_695_040_888_963_407)
}

fn random_interior_walls(seed: u64) -> Board {
    let mut maze = Board::new();
    let mut state = seed;
    for row in 0..6 {
        for col in 0..5 {
            for direction in [Direction::RowPlus, Direction::ColPlus] {
                state = next_random(state);
                let wall = match (state >> 33) % 3 {
                    0 => WallState::Empty,
                    1 => WallState::Present,
                    _ => WallState::Unknown,
                };
                // Boundary edges reject anything but a wall; that is fine here.
                let _ = maze.set_wall(row, col, direction, wall);
            }
        }
    }
    maze
}

#[test]
fn accessors_reject_out_of_bounds_cells_without_mutation() {
    let mut maze = random_interior_walls(7);
    let before = maze.clone();

    for (row, col) in OUT_OF_BOUNDS {
        let expected = MazeError::CoordinateOutOfBounds { row, col };
        for direction in Direction::ALL {
            assert_eq!(maze.wall(row, col, direction), Err(expected.clone()));
            assert_eq!(
                maze.set_wall(row, col, direction, WallState::Empty),
                Err(expected.clone())
            );
        }
        assert_eq!(maze.cell(row, col), Err(expected.clone()));
        assert_eq!(maze.distance(row, col), Err(expected.clone()));
        assert_eq!(maze.set_distance(row, col, 3), Err(expected.clone()));
        assert_eq!(maze.update_cell(row, col), Err(expected.clone()));
        assert_eq!(maze.set_mouse(row, col), Err(expected.clone()));
        assert_eq!(maze.reset_mouse(row, col), Err(expected));
    }

    assert_eq!(maze, before, "rejected requests must not change the maze");
}

#[test]
fn perimeter_is_enclosed_after_construction() {
    let maze = Board::new();
    for col in 0..5 {
        assert_eq!(maze.wall(0, col, Direction::RowMinus), Ok(WallState::Present));
        assert_eq!(maze.wall(5, col, Direction::RowPlus), Ok(WallState::Present));
    }
    for row in 0..6 {
        assert_eq!(maze.wall(row, 0, Direction::ColMinus), Ok(WallState::Present));
        assert_eq!(maze.wall(row, 4, Direction::ColPlus), Ok(WallState::Present));
    }
}

#[test]
fn shared_edges_read_the_same_from_both_cells() {
    let mut maze = Board::new();
    maze.set_wall(2, 1, Direction::ColPlus, WallState::Present)
        .expect("interior edge");
    assert_eq!(maze.wall(2, 2, Direction::ColMinus), Ok(WallState::Present));

    maze.set_wall(3, 3, Direction::RowMinus, WallState::Empty)
        .expect("interior edge");
    assert_eq!(maze.wall(2, 3, Direction::RowPlus), Ok(WallState::Empty));

    let maze = random_interior_walls(99);
    for row in 0..6 {
        for col in 0..5 {
            for direction in Direction::ALL {
                let neighbour = Position::new(row, col).step(direction);
                let Ok(other) = maze.wall(neighbour.row, neighbour.col, direction.opposite())
                else {
                    continue;
                };
                assert_eq!(maze.wall(row, col, direction), Ok(other));
            }
        }
    }
}

#[test]
fn status_becomes_searched_once_all_walls_are_known() {
    let mut maze = Board::new();
    maze.update_cell(2, 2).expect("in bounds");
    assert_eq!(maze.cell(2, 2).expect("in bounds").status, CellStatus::Unsearched);

    maze.set_wall(2, 2, Direction::RowPlus, WallState::Present)
        .expect("interior edge");
    maze.set_wall(2, 2, Direction::ColPlus, WallState::Empty)
        .expect("interior edge");
    maze.set_wall(2, 2, Direction::RowMinus, WallState::Empty)
        .expect("interior edge");
    maze.update_cell(2, 2).expect("in bounds");
    assert_eq!(
        maze.cell(2, 2).expect("in bounds").status,
        CellStatus::Unsearched,
        "one wall is still unknown"
    );

    maze.set_wall(2, 2, Direction::ColMinus, WallState::Present)
        .expect("interior edge");
    maze.update_cell(2, 2).expect("in bounds");
    assert_eq!(maze.cell(2, 2).expect("in bounds").status, CellStatus::Searched);
}

#[test]
fn update_cells_derives_status_across_the_grid() {
    let mut maze = random_interior_walls(1234);
    maze.update_cells();
    for (position, cell) in maze.cells() {
        let all_known = Direction::ALL.into_iter().all(|direction| {
            maze.wall(position.row, position.col, direction)
                .expect("in bounds")
                .is_known()
        });
        let expected = if all_known {
            CellStatus::Searched
        } else {
            CellStatus::Unsearched
        };
        assert_eq!(cell.status, expected, "cell {position:?}");
    }
}

#[test]
fn corner_cell_only_needs_its_two_interior_walls() {
    let mut maze = Board::new();
    maze.set_wall(0, 0, Direction::RowPlus, WallState::Empty)
        .expect("interior edge");
    maze.set_wall(0, 0, Direction::ColPlus, WallState::Present)
        .expect("interior edge");
    maze.update_cells();
    assert_eq!(maze.cell(0, 0).expect("in bounds").status, CellStatus::Searched);
    assert_eq!(maze.cell(0, 1).expect("in bounds").status, CellStatus::Unsearched);
}

#[test]
fn mouse_flag_stays_on_a_single_cell() {
    let mut maze = Board::new();
    let moves = [(0, 0), (0, 1), (1, 1), (5, 4), (2, 3)];
    for (row, col) in moves {
        if let Some(previous) = maze.mouse() {
            maze.reset_mouse(previous.row, previous.col).expect("in bounds");
        }
        maze.set_mouse(row, col).expect("in bounds");
        assert_eq!(maze.cells().filter(|(_, cell)| cell.is_mouse).count(), 1);
    }

    // Setting without resetting first still leaves a single marked cell.
    maze.set_mouse(4, 4).expect("in bounds");
    maze.set_mouse(1, 0).expect("in bounds");
    let marked: Vec<Position> = maze
        .cells()
        .filter(|(_, cell)| cell.is_mouse)
        .map(|(position, _)| position)
        .collect();
    assert_eq!(marked, vec![Position::new(1, 0)]);

    // Resetting a cell the mouse is not on leaves the flag alone.
    maze.reset_mouse(3, 3).expect("in bounds");
    assert_eq!(maze.mouse(), Some(Position::new(1, 0)));
}

#[test]
fn two_by_two_scenario() {
    let mut maze = Maze::<2, 2>::new();
    for (row, col, direction) in [
        (0, 0, Direction::RowPlus),
        (0, 0, Direction::ColPlus),
        (1, 1, Direction::RowMinus),
        (1, 1, Direction::ColMinus),
    ] {
        maze.set_wall(row, col, direction, WallState::Empty)
            .expect("interior edge");
    }

    assert_eq!(
        maze.wall(0, 0, Direction::RowPlus),
        maze.wall(1, 0, Direction::RowMinus)
    );
    assert_eq!(maze.wall(0, 0, Direction::RowPlus), Ok(WallState::Empty));

    maze.set_distance(0, 0, START_DISTANCE).expect("in bounds");
    assert_eq!(maze.distance(0, 0), Ok(0));
    assert_eq!(maze.distance(1, 1), Ok(UNREACHED));

    maze.update_cells();
    assert!(maze
        .cells()
        .all(|(_, cell)| cell.status == CellStatus::Searched));
    assert_eq!(maze.validate(), Ok(()));
}

#[test]
fn with_endpoints_flags_start_and_goal() {
    let maze = Board::with_endpoints(Position::new(5, 0), Position::new(2, 2)).expect("in bounds");
    assert_eq!(maze.start(), Position::new(5, 0));
    assert_eq!(maze.goal(), Position::new(2, 2));
    let starts: Vec<Position> = maze
        .cells()
        .filter(|(_, cell)| cell.is_start)
        .map(|(position, _)| position)
        .collect();
    let goals: Vec<Position> = maze
        .cells()
        .filter(|(_, cell)| cell.is_goal)
        .map(|(position, _)| position)
        .collect();
    assert_eq!(starts, vec![Position::new(5, 0)]);
    assert_eq!(goals, vec![Position::new(2, 2)]);
}
