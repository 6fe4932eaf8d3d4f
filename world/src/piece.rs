//! Single board cell: connector layout, station marker and derived power flag.

use light_em_all_core::{CellCoord, Connectors, Direction, PieceSnapshot};

/// Wire piece anchored to one cell of the board.
///
/// The cell is fixed at creation. Connectors change only through
/// [`Piece::rotate`]. The powered flag is owned by propagation and is
/// overwritten on every pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    cell: CellCoord,
    connectors: Connectors,
    station: bool,
    powered: bool,
}

impl Piece {
    /// Creates an unpowered, non-station piece with the provided connectors.
    #[must_use]
    pub const fn new(cell: CellCoord, connectors: Connectors) -> Self {
        Self {
            cell,
            connectors,
            station: false,
            powered: false,
        }
    }

    /// Cell the piece occupies.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Current connector layout.
    #[must_use]
    pub const fn connectors(&self) -> Connectors {
        self.connectors
    }

    /// Reports whether a stub faces `direction`.
    #[must_use]
    pub const fn has(&self, direction: Direction) -> bool {
        self.connectors.has(direction)
    }

    /// Whether this piece is the power station.
    #[must_use]
    pub const fn is_station(&self) -> bool {
        self.station
    }

    /// Whether the most recent propagation reached this piece.
    #[must_use]
    pub const fn is_powered(&self) -> bool {
        self.powered
    }

    /// Turns the piece a quarter turn clockwise.
    pub fn rotate(&mut self) {
        self.connectors = self.connectors.rotated_clockwise();
    }

    /// Captures an immutable snapshot for queries.
    #[must_use]
    pub const fn snapshot(&self) -> PieceSnapshot {
        PieceSnapshot {
            cell: self.cell,
            connectors: self.connectors,
            powered: self.powered,
            station: self.station,
        }
    }

    pub(crate) fn set_station(&mut self, station: bool) {
        self.station = station;
    }

    pub(crate) fn set_powered(&mut self, powered: bool) {
        self.powered = powered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece_with(directions: &[Direction]) -> Piece {
        Piece::new(CellCoord::new(0, 0), Connectors::from_directions(directions))
    }

    #[test]
    fn rotate_moves_each_stub_one_side_clockwise() {
        let mut right = piece_with(&[Direction::Right]);
        right.rotate();
        assert_eq!(right.connectors(), Connectors::from_directions(&[Direction::Down]));

        let mut left = piece_with(&[Direction::Left]);
        left.rotate();
        assert_eq!(left.connectors(), Connectors::from_directions(&[Direction::Up]));

        let mut up = piece_with(&[Direction::Up]);
        up.rotate();
        assert_eq!(up.connectors(), Connectors::from_directions(&[Direction::Right]));

        let mut down = piece_with(&[Direction::Down]);
        down.rotate();
        assert_eq!(down.connectors(), Connectors::from_directions(&[Direction::Left]));
    }

    #[test]
    fn four_rotations_restore_the_original_layout() {
        let original = piece_with(&[Direction::Up, Direction::Left, Direction::Down]);
        let mut piece = original;
        for _ in 0..4 {
            piece.rotate();
        }
        assert_eq!(piece, original);
    }

    #[test]
    fn two_rotations_swap_opposite_sides() {
        let mut piece = piece_with(&[Direction::Up, Direction::Right]);
        piece.rotate();
        piece.rotate();
        assert_eq!(
            piece.connectors(),
            Connectors::from_directions(&[Direction::Down, Direction::Left])
        );
    }

    #[test]
    fn rotation_keeps_cell_and_flags() {
        let mut piece = Piece::new(CellCoord::new(3, 2), Connectors::HORIZONTAL);
        piece.set_station(true);
        piece.set_powered(true);
        piece.rotate();

        assert_eq!(piece.cell(), CellCoord::new(3, 2));
        assert!(piece.is_station());
        assert!(piece.is_powered());
    }
}
