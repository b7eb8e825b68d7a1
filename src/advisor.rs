use crate::board::{Board, Player, Square};
use crate::rules::{jump_destinations, step_destinations};

/// Legal destination squares for the piece on `square`, for UI
/// highlighting. Display-only: the rule engine re-validates every
/// submission, since a highlighted set may reflect a stale board.
///
/// A square that does not hold one of the mover's pieces yields an empty
/// set rather than an error.
pub fn legal_destinations(
    board: &Board,
    square: Square,
    mover: Player,
    forced_continuation: Option<Square>,
) -> Vec<Square> {
    if let Some(forced) = forced_continuation {
        // only the forced piece may move, and only by capturing
        if square != forced {
            return Vec::new();
        }
    }

    match board.piece_at(square) {
        Some(piece) if piece.owner() == mover => {}
        _ => return Vec::new(),
    }

    let mut destinations = jump_destinations(board, square, mover);
    if forced_continuation.is_none() {
        destinations.extend(step_destinations(board, square, mover));
    }
    destinations
}
