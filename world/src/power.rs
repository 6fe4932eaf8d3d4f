//! Power propagation over the board.

use std::collections::VecDeque;

use light_em_all_core::Direction;

use crate::board::Board;

/// Recomputes every piece's powered flag with a breadth-first search seeded
/// at the station.
///
/// The pass is a full recompute: all flags are cleared first, so pieces cut
/// off by a rotation or a station move go dark. Neighbours are visited in the
/// order of [`Direction::ALL`]. Returns the number of powered pieces.
pub(crate) fn propagate(board: &mut Board) -> usize {
    for piece in board.pieces_mut() {
        piece.set_powered(false);
    }

    let station = board.station();
    let mut queue = VecDeque::new();
    if let Some(piece) = board.piece_mut(station) {
        piece.set_powered(true);
        queue.push_back(station);
    }
    let mut powered = queue.len();

    while let Some(cell) = queue.pop_front() {
        for direction in Direction::ALL {
            let Some(neighbor) = board.joined(cell, direction) else {
                continue;
            };
            let Some(piece) = board.piece_mut(neighbor) else {
                continue;
            };
            if piece.is_powered() {
                continue;
            }

            piece.set_powered(true);
            powered += 1;
            queue.push_back(neighbor);
        }
    }

    powered
}
