use light_em_all_core::{
    CellCoord, Command, Connectors, Direction, Event, PlayState, StationMoveError,
};
use light_em_all_world::{self as world, query, Board, World};

fn connectors(directions: &[Direction]) -> Connectors {
    Connectors::from_directions(directions)
}

fn powered_cells(world: &World) -> Vec<CellCoord> {
    query::board_view(world)
        .iter()
        .filter(|piece| piece.powered)
        .map(|piece| piece.cell)
        .collect()
}

fn apply_all(world: &mut World, commands: &[Command]) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, *command, &mut events);
    }
    events
}

#[test]
fn lone_station_is_lit_and_won_immediately() {
    let board = Board::from_connectors(
        1,
        1,
        vec![connectors(&[Direction::Left])],
        CellCoord::new(0, 0),
    )
    .expect("valid board");
    let world = World::from_board(board);

    assert_eq!(powered_cells(&world), vec![CellCoord::new(0, 0)]);
    assert_eq!(query::play_state(&world), PlayState::Won);
}

#[test]
fn partial_component_does_not_win_until_every_piece_is_lit() {
    let board = Board::from_connectors(
        2,
        2,
        vec![
            connectors(&[Direction::Right]),
            connectors(&[Direction::Left]),
            connectors(&[Direction::Right]),
            connectors(&[Direction::Right]),
        ],
        CellCoord::new(0, 0),
    )
    .expect("valid board");
    let mut world = World::from_board(board);

    assert_eq!(
        powered_cells(&world),
        vec![CellCoord::new(0, 0), CellCoord::new(1, 0)]
    );
    assert_eq!(query::play_state(&world), PlayState::Playing);

    // Turn (0, 1) to face up. The station has no down stub, so nothing joins.
    let events = apply_all(
        &mut world,
        &[
            Command::RotatePiece {
                cell: CellCoord::new(0, 1),
            },
            Command::RotatePiece {
                cell: CellCoord::new(0, 1),
            },
            Command::RotatePiece {
                cell: CellCoord::new(0, 1),
            },
        ],
    );
    assert!(!events.contains(&Event::GameWon));
    assert_eq!(query::powered_count(&world), 2);
}

#[test]
fn fully_joined_two_by_two_wins() {
    let board = Board::from_connectors(
        2,
        2,
        vec![
            connectors(&[Direction::Right, Direction::Down]),
            connectors(&[Direction::Left]),
            connectors(&[Direction::Up, Direction::Right]),
            // Faces down; one rotation brings it to face left.
            connectors(&[Direction::Down]),
        ],
        CellCoord::new(0, 0),
    )
    .expect("valid board");
    let mut world = World::from_board(board);
    assert_eq!(query::powered_count(&world), 3);
    assert_eq!(query::play_state(&world), PlayState::Playing);

    let events = apply_all(
        &mut world,
        &[Command::RotatePiece {
            cell: CellCoord::new(1, 1),
        }],
    );

    assert_eq!(query::powered_count(&world), 4);
    assert_eq!(query::play_state(&world), PlayState::Won);
    assert_eq!(events.last(), Some(&Event::GameWon));
}

#[test]
fn illegal_move_up_from_top_row_is_a_full_no_op() {
    let board = Board::from_connectors(
        2,
        2,
        vec![
            connectors(&[Direction::Up, Direction::Right]),
            connectors(&[Direction::Left]),
            Connectors::NONE,
            Connectors::NONE,
        ],
        CellCoord::new(0, 0),
    )
    .expect("valid board");
    let mut world = World::from_board(board);
    let before = query::board_view(&world);

    let events = apply_all(
        &mut world,
        &[Command::MoveStation {
            direction: Direction::Up,
        }],
    );

    assert_eq!(
        events,
        vec![Event::StationMoveRejected {
            from: CellCoord::new(0, 0),
            direction: Direction::Up,
            reason: StationMoveError::OutOfBounds,
        }]
    );
    assert_eq!(query::board_view(&world), before);
}

#[test]
fn move_legality_checks_the_direction_specific_pair() {
    let cases = [
        (Direction::Down, CellCoord::new(1, 1), CellCoord::new(1, 2)),
        (Direction::Up, CellCoord::new(1, 1), CellCoord::new(1, 0)),
        (Direction::Right, CellCoord::new(1, 1), CellCoord::new(2, 1)),
        (Direction::Left, CellCoord::new(1, 1), CellCoord::new(0, 1)),
    ];

    for (direction, origin, destination) in cases {
        let layout = |facing: bool| {
            let mut cells = vec![Connectors::NONE; 9];
            cells[4] = connectors(&[direction]);
            let index = (destination.row() * 3 + destination.column()) as usize;
            cells[index] = if facing {
                connectors(&[direction.opposite()])
            } else {
                // Wired, but facing away from the origin.
                connectors(&[direction])
            };
            cells
        };

        let mut blocked = World::from_board(
            Board::from_connectors(3, 3, layout(false), origin).expect("valid board"),
        );
        let events = apply_all(&mut blocked, &[Command::MoveStation { direction }]);
        assert_eq!(
            events,
            vec![Event::StationMoveRejected {
                from: origin,
                direction,
                reason: StationMoveError::Disconnected,
            }],
            "{direction:?} without facing stub"
        );

        let mut open = World::from_board(
            Board::from_connectors(3, 3, layout(true), origin).expect("valid board"),
        );
        let events = apply_all(&mut open, &[Command::MoveStation { direction }]);
        assert_eq!(
            events.first(),
            Some(&Event::StationMoved {
                from: origin,
                to: destination,
            }),
            "{direction:?} with facing stub"
        );
        assert_eq!(query::station(&open), destination);
    }
}

#[test]
fn breaking_the_only_link_darkens_everything_behind_it() {
    let board = Board::from_connectors(
        5,
        1,
        vec![
            connectors(&[Direction::Right]),
            Connectors::HORIZONTAL,
            Connectors::HORIZONTAL,
            Connectors::HORIZONTAL,
            Connectors::NONE,
        ],
        CellCoord::new(0, 0),
    )
    .expect("valid board");
    let mut world = World::from_board(board);
    assert_eq!(query::powered_count(&world), 4);

    let events = apply_all(
        &mut world,
        &[Command::RotatePiece {
            cell: CellCoord::new(1, 0),
        }],
    );

    assert_eq!(
        events,
        vec![
            Event::PieceRotated {
                cell: CellCoord::new(1, 0),
                connectors: Connectors::VERTICAL,
            },
            Event::PowerPropagated {
                powered: 1,
                total: 5
            },
        ]
    );
    assert_eq!(powered_cells(&world), vec![CellCoord::new(0, 0)]);
}

#[test]
fn turning_every_comb_tooth_vertical_solves_the_default_layout() {
    let board = Board::new(5, 4).expect("valid board");
    let station_row = board.station().row();
    let mut world = World::from_board(board);
    assert_eq!(query::powered_count(&world), 5);

    let mut events = Vec::new();
    for row in 0..4 {
        if row == station_row {
            continue;
        }
        for column in 0..5 {
            world::apply(
                &mut world,
                Command::RotatePiece {
                    cell: CellCoord::new(column, row),
                },
                &mut events,
            );
        }
    }

    assert_eq!(query::play_state(&world), PlayState::Won);
    assert_eq!(
        events.iter().filter(|event| **event == Event::GameWon).count(),
        1
    );
    assert_eq!(events.last(), Some(&Event::GameWon));
}

#[test]
fn win_is_monotonic_under_further_input() {
    let mut world = World::from_board(
        Board::from_connectors(
            2,
            1,
            vec![connectors(&[Direction::Right]), connectors(&[Direction::Down])],
            CellCoord::new(0, 0),
        )
        .expect("valid board"),
    );
    let _ = apply_all(
        &mut world,
        &[Command::RotatePiece {
            cell: CellCoord::new(1, 0),
        }],
    );
    assert_eq!(query::play_state(&world), PlayState::Won);
    let frozen = query::board_view(&world);

    let events = apply_all(
        &mut world,
        &[
            Command::RotatePiece {
                cell: CellCoord::new(0, 0),
            },
            Command::MoveStation {
                direction: Direction::Right,
            },
        ],
    );

    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|event| matches!(
        event,
        Event::RotationRejected { .. } | Event::StationMoveRejected { .. }
    )));
    assert_eq!(query::board_view(&world), frozen);
    assert_eq!(query::play_state(&world), PlayState::Won);
}
