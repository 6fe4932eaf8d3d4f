#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Light 'Em All engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! happened. Renderers never touch world state directly; they read a
//! [`BoardView`] snapshot once per frame.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Light 'Em All: connect every wire to the power station.";

/// Describes whether the session still accepts gameplay input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayState {
    /// The puzzle is unsolved and commands mutate the board.
    Playing,
    /// Every piece is powered. Terminal for the session.
    Won,
}

impl PlayState {
    /// Reports whether the session reached the terminal state.
    #[must_use]
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Rotates the piece at the provided cell one step clockwise.
    RotatePiece {
        /// Cell holding the piece to rotate.
        cell: CellCoord,
    },
    /// Moves the power station one cell in the provided direction.
    MoveStation {
        /// Direction of travel for the attempted move.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that a piece was rotated in place.
    PieceRotated {
        /// Cell holding the rotated piece.
        cell: CellCoord,
        /// Connector layout after the rotation.
        connectors: Connectors,
    },
    /// Reports that a rotation request was ignored.
    RotationRejected {
        /// Cell named by the request.
        cell: CellCoord,
        /// Specific reason the rotation was ignored.
        reason: RotationError,
    },
    /// Confirms that the power station moved between two cells.
    StationMoved {
        /// Cell the station occupied before moving.
        from: CellCoord,
        /// Cell the station occupies after the move.
        to: CellCoord,
    },
    /// Reports that a station move request was ignored.
    StationMoveRejected {
        /// Cell the station occupied when the request arrived.
        from: CellCoord,
        /// Direction named by the request.
        direction: Direction,
        /// Specific reason the move was ignored.
        reason: StationMoveError,
    },
    /// Announces the result of a full power propagation pass.
    PowerPropagated {
        /// Number of pieces reachable from the station.
        powered: u32,
        /// Number of pieces on the board.
        total: u32,
    },
    /// Announces that every piece is powered. Emitted once per session.
    GameWon,
}

/// Reasons a rotation request may be ignored by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationError {
    /// The session is already won, so the board is frozen.
    GameWon,
    /// The requested cell lies outside the board.
    OutOfBounds,
}

/// Reasons a station move request may be ignored by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationMoveError {
    /// The session is already won, so the board is frozen.
    GameWon,
    /// The destination lies outside the board.
    OutOfBounds,
    /// The facing connectors of the current and destination pieces do not meet.
    Disconnected,
}

/// Cardinal directions used both for connectors and station moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    Up,
    /// Toward increasing row indices.
    Down,
    /// Toward decreasing column indices.
    Left,
    /// Toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in the order propagation visits neighbours.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Direction pointing back toward the origin of a step.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Location of a single board cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new board cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Steps one cell in `direction`, staying within a `columns` x `rows` grid.
    ///
    /// Returns `None` when the step would leave the grid.
    #[must_use]
    pub fn step(self, direction: Direction, columns: u32, rows: u32) -> Option<CellCoord> {
        let (column, row) = match direction {
            Direction::Up => (Some(self.column), self.row.checked_sub(1)),
            Direction::Down => (Some(self.column), self.row.checked_add(1)),
            Direction::Left => (self.column.checked_sub(1), Some(self.row)),
            Direction::Right => (self.column.checked_add(1), Some(self.row)),
        };
        let (column, row) = (column?, row?);

        if column < columns && row < rows {
            Some(CellCoord::new(column, row))
        } else {
            None
        }
    }
}

/// Wire stubs leaving a piece toward each of its four sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connectors {
    /// Stub toward the piece above.
    pub up: bool,
    /// Stub toward the piece below.
    pub down: bool,
    /// Stub toward the piece on the left.
    pub left: bool,
    /// Stub toward the piece on the right.
    pub right: bool,
}

impl Connectors {
    /// No stubs at all.
    pub const NONE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Stubs on every side.
    pub const ALL: Self = Self {
        up: true,
        down: true,
        left: true,
        right: true,
    };

    /// Straight horizontal run.
    pub const HORIZONTAL: Self = Self {
        up: false,
        down: false,
        left: true,
        right: true,
    };

    /// Straight vertical run.
    pub const VERTICAL: Self = Self {
        up: true,
        down: true,
        left: false,
        right: false,
    };

    /// Builds a connector set with a stub for every listed direction.
    #[must_use]
    pub fn from_directions(directions: &[Direction]) -> Self {
        directions
            .iter()
            .fold(Self::NONE, |connectors, direction| connectors.with(*direction))
    }

    /// Reports whether a stub faces `direction`.
    #[must_use]
    pub const fn has(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Returns a copy with a stub added toward `direction`.
    #[must_use]
    pub const fn with(mut self, direction: Direction) -> Self {
        match direction {
            Direction::Up => self.up = true,
            Direction::Down => self.down = true,
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
        }
        self
    }

    /// Returns the layout turned a quarter turn clockwise.
    ///
    /// The stub that faced left now faces up, up moves to right, right moves
    /// to down and down moves to left.
    #[must_use]
    pub const fn rotated_clockwise(self) -> Self {
        Self {
            up: self.left,
            right: self.up,
            down: self.right,
            left: self.down,
        }
    }

    /// Number of stubs present.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.up as u32 + self.down as u32 + self.left as u32 + self.right as u32
    }
}

/// Immutable representation of a single piece used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    /// Cell the piece occupies.
    pub cell: CellCoord,
    /// Connector layout of the piece.
    pub connectors: Connectors,
    /// Whether the piece is reachable from the station.
    pub powered: bool,
    /// Whether the piece is the power station.
    pub station: bool,
}

/// Read-only snapshot of the whole board consumed once per frame by renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    columns: u32,
    rows: u32,
    station: CellCoord,
    play_state: PlayState,
    snapshots: Vec<PieceSnapshot>,
}

impl BoardView {
    /// Creates a new board view from row-major piece snapshots.
    #[must_use]
    pub fn from_snapshots(
        columns: u32,
        rows: u32,
        station: CellCoord,
        play_state: PlayState,
        mut snapshots: Vec<PieceSnapshot>,
    ) -> Self {
        snapshots.sort_by_key(|snapshot| (snapshot.cell.row(), snapshot.cell.column()));
        Self {
            columns,
            rows,
            station,
            play_state,
            snapshots,
        }
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Cell occupied by the power station.
    #[must_use]
    pub const fn station(&self) -> CellCoord {
        self.station
    }

    /// Play state at the time the view was captured.
    #[must_use]
    pub const fn play_state(&self) -> PlayState {
        self.play_state
    }

    /// Snapshot of the piece at `cell`, if it lies on the board.
    #[must_use]
    pub fn piece(&self, cell: CellCoord) -> Option<&PieceSnapshot> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        self.snapshots.get(row * width + column)
    }

    /// Number of powered pieces in the view.
    #[must_use]
    pub fn powered_count(&self) -> usize {
        self.snapshots.iter().filter(|snapshot| snapshot.powered).count()
    }

    /// Iterator over the captured snapshots in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &PieceSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PieceSnapshot> {
        self.snapshots
    }
}
