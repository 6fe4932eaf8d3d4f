//! Rectangular arena of pieces plus the adjacency rule used by the controller.

use light_em_all_core::{BoardView, CellCoord, Connectors, Direction, PlayState};
use rand::Rng;

use crate::piece::Piece;

/// Errors that can occur when constructing a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Boards need at least one cell so the station has somewhere to live.
    #[error("board must have at least one column and one row (received {columns}x{rows})")]
    EmptyGrid {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
    /// The explicit layout does not cover the board exactly.
    #[error("expected {expected} connector layouts, received {actual}")]
    PieceCountMismatch {
        /// Number of cells on the requested board.
        expected: usize,
        /// Number of connector layouts supplied.
        actual: usize,
    },
    /// The explicit station cell lies outside the board.
    #[error("station cell ({column}, {row}) lies outside the board")]
    StationOutOfBounds {
        /// Column of the rejected station cell.
        column: u32,
        /// Row of the rejected station cell.
        row: u32,
    },
    /// The piece arena for the requested dimensions cannot be allocated.
    #[error("board of {columns}x{rows} cells is too large to allocate")]
    TooLarge {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
}

/// Row-major grid of [`Piece`] values addressed by [`CellCoord`].
///
/// Exactly one piece carries the station flag and it always matches
/// [`Board::station`]. Pieces never reference each other; neighbours are
/// resolved through coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    columns: u32,
    rows: u32,
    station: CellCoord,
    pieces: Vec<Piece>,
}

impl Board {
    /// Builds the default comb layout.
    ///
    /// The station sits at `(columns / 2, rows / 2)`. Every piece on the
    /// station's row has all four stubs; every other piece is a horizontal
    /// run.
    pub fn new(columns: u32, rows: u32) -> Result<Self, BoardError> {
        let station = CellCoord::new(columns / 2, rows / 2);
        Self::build(columns, rows, station, |cell| {
            if cell.row() == station.row() {
                Connectors::ALL
            } else {
                Connectors::HORIZONTAL
            }
        })
    }

    /// Builds a board from an explicit row-major connector layout.
    pub fn from_connectors(
        columns: u32,
        rows: u32,
        connectors: Vec<Connectors>,
        station: CellCoord,
    ) -> Result<Self, BoardError> {
        let expected =
            cell_count(columns, rows).ok_or(BoardError::TooLarge { columns, rows })?;
        if connectors.len() != expected {
            if expected == 0 {
                return Err(BoardError::EmptyGrid { columns, rows });
            }
            return Err(BoardError::PieceCountMismatch {
                expected,
                actual: connectors.len(),
            });
        }

        let width = columns as usize;
        Self::build(columns, rows, station, |cell| {
            connectors[cell.row() as usize * width + cell.column() as usize]
        })
    }

    fn build<F>(columns: u32, rows: u32, station: CellCoord, mut layout: F) -> Result<Self, BoardError>
    where
        F: FnMut(CellCoord) -> Connectors,
    {
        if columns == 0 || rows == 0 {
            return Err(BoardError::EmptyGrid { columns, rows });
        }
        if station.column() >= columns || station.row() >= rows {
            return Err(BoardError::StationOutOfBounds {
                column: station.column(),
                row: station.row(),
            });
        }

        let too_large = BoardError::TooLarge { columns, rows };
        let count = cell_count(columns, rows).ok_or(too_large)?;
        let mut pieces = Vec::new();
        pieces.try_reserve_exact(count).map_err(|_| too_large)?;
        for row in 0..rows {
            for column in 0..columns {
                let cell = CellCoord::new(column, row);
                let mut piece = Piece::new(cell, layout(cell));
                piece.set_station(cell == station);
                pieces.push(piece);
            }
        }

        Ok(Self {
            columns,
            rows,
            station,
            pieces,
        })
    }

    /// Applies 0-3 quarter turns to every piece, one draw per piece in
    /// row-major order.
    pub fn random_rotate<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for piece in &mut self.pieces {
            let turns: u8 = rng.gen_range(0..4);
            for _ in 0..turns {
                piece.rotate();
            }
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

    /// Cell holding the power station.
    #[must_use]
    pub const fn station(&self) -> CellCoord {
        self.station
    }

    /// Every piece in row-major order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Piece at `cell`, if it lies on the board.
    #[must_use]
    pub fn piece(&self, cell: CellCoord) -> Option<&Piece> {
        self.index(cell).and_then(|index| self.pieces.get(index))
    }

    /// Cell one step from `cell` in `direction`, if it lies on the board.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        if self.index(cell).is_none() {
            return None;
        }
        cell.step(direction, self.columns, self.rows)
    }

    /// Neighbour electrically joined to `cell` in `direction`.
    ///
    /// Two pieces are joined only when both facing stubs are present; an open
    /// stub pointing at a blank side does not count.
    #[must_use]
    pub fn joined(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        if !self.piece(cell)?.has(direction) {
            return None;
        }
        let neighbor = self.neighbor(cell, direction)?;
        self.piece(neighbor)?
            .has(direction.opposite())
            .then_some(neighbor)
    }

    /// Number of pieces reached by the most recent propagation.
    #[must_use]
    pub fn powered_count(&self) -> usize {
        self.pieces.iter().filter(|piece| piece.is_powered()).count()
    }

    /// Reports whether every piece is powered.
    #[must_use]
    pub fn is_fully_powered(&self) -> bool {
        self.pieces.iter().all(Piece::is_powered)
    }

    /// Captures a read-only view of the board for renderers.
    #[must_use]
    pub fn view(&self, play_state: PlayState) -> BoardView {
        BoardView::from_snapshots(
            self.columns,
            self.rows,
            self.station,
            play_state,
            self.pieces.iter().map(Piece::snapshot).collect(),
        )
    }

    pub(crate) fn piece_mut(&mut self, cell: CellCoord) -> Option<&mut Piece> {
        let index = self.index(cell)?;
        self.pieces.get_mut(index)
    }

    pub(crate) fn pieces_mut(&mut self) -> &mut [Piece] {
        &mut self.pieces
    }

    /// Moves the station marker. The caller has already checked legality.
    pub(crate) fn relocate_station(&mut self, destination: CellCoord) {
        if self.index(destination).is_none() {
            return;
        }
        let origin = self.station;
        if let Some(piece) = self.piece_mut(origin) {
            piece.set_station(false);
        }
        if let Some(piece) = self.piece_mut(destination) {
            piece.set_station(true);
        }
        self.station = destination;
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

fn cell_count(columns: u32, rows: u32) -> Option<usize> {
    let columns = usize::try_from(columns).ok()?;
    let rows = usize::try_from(rows).ok()?;
    columns.checked_mul(rows)
}
