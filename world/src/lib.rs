#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Light 'Em All.
//!
//! The world owns the [`Board`], the station position and the play state.
//! Adapters mutate it only through [`apply`], which handles one
//! [`Command`] to completion (mutation, full power propagation, win check)
//! and reports the outcome as [`Event`] values. Reads go through [`query`].

pub mod board;
pub mod piece;
mod power;

pub use board::{Board, BoardError};
pub use piece::Piece;

use light_em_all_core::{
    CellCoord, Command, Direction, Event, PlayState, RotationError, StationMoveError,
    WELCOME_BANNER,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Represents the authoritative Light 'Em All world state.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    board: Board,
    play_state: PlayState,
}

impl World {
    /// Creates a scrambled comb board whose rotations are drawn from a
    /// generator seeded with `seed`.
    pub fn new(columns: u32, rows: u32, seed: u64) -> Result<Self, BoardError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::with_rng(columns, rows, &mut rng)
    }

    /// Creates a scrambled comb board using a caller-supplied generator.
    pub fn with_rng<R>(columns: u32, rows: u32, rng: &mut R) -> Result<Self, BoardError>
    where
        R: Rng + ?Sized,
    {
        let mut board = Board::new(columns, rows)?;
        board.random_rotate(rng);
        Ok(Self::from_board(board))
    }

    /// Wraps an explicitly constructed board.
    ///
    /// Power is propagated once so the first frame shows the lit component;
    /// a board that is already fully lit starts out won.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        let mut world = Self {
            banner: WELCOME_BANNER,
            board,
            play_state: PlayState::Playing,
        };
        let mut events = Vec::new();
        world.settle(&mut events);
        world
    }

    fn settle(&mut self, out_events: &mut Vec<Event>) {
        let powered = power::propagate(&mut self.board);
        out_events.push(Event::PowerPropagated {
            powered: saturating_u32(powered),
            total: saturating_u32(self.board.pieces().len()),
        });

        if self.play_state == PlayState::Playing && self.board.is_fully_powered() {
            self.play_state = PlayState::Won;
            out_events.push(Event::GameWon);
        }
    }

    fn rotate_piece(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        if self.play_state.is_won() {
            out_events.push(Event::RotationRejected {
                cell,
                reason: RotationError::GameWon,
            });
            return;
        }

        let Some(piece) = self.board.piece_mut(cell) else {
            out_events.push(Event::RotationRejected {
                cell,
                reason: RotationError::OutOfBounds,
            });
            return;
        };

        piece.rotate();
        out_events.push(Event::PieceRotated {
            cell,
            connectors: piece.connectors(),
        });
        self.settle(out_events);
    }

    fn move_station(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let from = self.board.station();
        let rejection = |reason| Event::StationMoveRejected {
            from,
            direction,
            reason,
        };

        if self.play_state.is_won() {
            out_events.push(rejection(StationMoveError::GameWon));
            return;
        }

        let Some(to) = self.board.neighbor(from, direction) else {
            out_events.push(rejection(StationMoveError::OutOfBounds));
            return;
        };

        if self.board.joined(from, direction) != Some(to) {
            out_events.push(rejection(StationMoveError::Disconnected));
            return;
        }

        self.board.relocate_station(to);
        out_events.push(Event::StationMoved { from, to });
        self.settle(out_events);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Illegal commands are not errors: they leave the world untouched and are
/// reported as rejection events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::RotatePiece { cell } => world.rotate_piece(cell, out_events),
        Command::MoveStation { direction } => world.move_station(direction, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use light_em_all_core::{BoardView, CellCoord, PlayState};

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Captures a read-only snapshot of every piece for renderers.
    #[must_use]
    pub fn board_view(world: &World) -> BoardView {
        world.board.view(world.play_state)
    }

    /// Cell currently holding the power station.
    #[must_use]
    pub fn station(world: &World) -> CellCoord {
        world.board.station()
    }

    /// Whether the session is still playing or already won.
    #[must_use]
    pub fn play_state(world: &World) -> PlayState {
        world.play_state
    }

    /// Number of pieces reached by the most recent propagation.
    #[must_use]
    pub fn powered_count(world: &World) -> usize {
        world.board.powered_count()
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
