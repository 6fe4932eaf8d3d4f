#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure controls system that turns player input into world commands.

use light_em_all_core::{CellCoord, Command, Direction, Event, PlayState};

/// Maps a key name to the station move it requests.
///
/// Only `"up"`, `"down"`, `"left"` and `"right"` are recognised; every other
/// key is ignored.
#[must_use]
pub fn direction_from_key(key: &str) -> Option<Direction> {
    match key {
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// Station move requested by a key press on this frame.
    pub key: Option<Direction>,
    /// Cell selected by a primary click on this frame.
    pub rotate: Option<CellCoord>,
}

impl ControlInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(key: Option<Direction>, rotate: Option<CellCoord>) -> Self {
        Self { key, rotate }
    }
}

/// Controls system that forwards input as commands while the game is playing.
#[derive(Debug, Clone)]
pub struct Controls {
    play_state: PlayState,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

impl Controls {
    /// Creates a new controls system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            play_state: PlayState::Playing,
        }
    }

    /// Creates a controls system that starts from a known play state.
    ///
    /// Hosts use this when the world was already won before the first frame.
    #[must_use]
    pub const fn with_play_state(play_state: PlayState) -> Self {
        Self { play_state }
    }

    /// Play state as last observed in the event stream.
    #[must_use]
    pub const fn play_state(&self) -> PlayState {
        self.play_state
    }

    /// Consumes world events and adapter-derived input to emit commands.
    ///
    /// The station move is emitted before the rotation when both arrive on the
    /// same frame. Nothing is emitted once a `GameWon` event has been seen.
    pub fn handle(&mut self, events: &[Event], input: ControlInput, out: &mut Vec<Command>) {
        if events.iter().any(|event| matches!(event, Event::GameWon)) {
            self.play_state = PlayState::Won;
        }

        if self.play_state.is_won() {
            return;
        }

        if let Some(direction) = input.key {
            out.push(Command::MoveStation { direction });
        }

        if let Some(cell) = input.rotate {
            out.push(Command::RotatePiece { cell });
        }
    }
}
