use thiserror::Error;

use crate::board::{Board, Move, Player, Square};

/// Why a submitted move was turned down. Every variant is a normal,
/// recoverable outcome the UI can explain to the user; nothing here panics.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("square {0} does not hold one of your pieces")]
    WrongPlayer(Square),
    #[error("destination square {0} is occupied")]
    DestinationOccupied(Square),
    #[error("moves go diagonally, one square to step or two to jump")]
    IllegalGeometry,
    #[error("{0} pieces can only move {}", .0.direction_word())]
    IllegalDirection(Player),
    #[error("square {0} holds no opponent piece to capture")]
    InvalidCaptureTarget(Square),
    #[error("you must continue capturing with the piece on {0}")]
    MustContinueCapture(Square),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveKind {
    Step,
    Jump,
}

/// The whole game state between moves. `forced_continuation`, when set,
/// names the one piece that just captured and must capture again before
/// the turn passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    pub board: Board,
    pub mover: Player,
    pub forced_continuation: Option<Square>,
}

/// Successful outcome of a move submission. `turn_advanced` is false only
/// while the same player still owes a chained capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub state: TurnState,
    pub turn_advanced: bool,
}

impl TurnState {
    /// Fresh game: starting position, white to move.
    pub fn new() -> Self {
        TurnState {
            board: Board::initial(),
            mover: Player::White,
            forced_continuation: None,
        }
    }

    pub fn with_board(board: Board, mover: Player) -> Self {
        TurnState {
            board,
            mover,
            forced_continuation: None,
        }
    }

    /// Validate and apply one move. Pure: `self` is untouched and the same
    /// `(state, move)` pair always produces the same result, so replayed or
    /// reordered deliveries of one request are harmless.
    pub fn apply(&self, mv: Move) -> Result<Applied, MoveRejection> {
        let Move { from, to } = mv;

        match self.board.piece_at(from) {
            Some(piece) if piece.owner() == self.mover => {}
            _ => return Err(MoveRejection::WrongPlayer(from)),
        }
        if self.board.piece_at(to).is_some() {
            return Err(MoveRejection::DestinationOccupied(to));
        }
        if let Some(forced) = self.forced_continuation {
            if from != forced {
                return Err(MoveRejection::MustContinueCapture(forced));
            }
        }

        let d_row = to.row() as i32 - from.row() as i32;
        let d_col = to.col() as i32 - from.col() as i32;
        let kind = match (d_row.abs(), d_col.abs()) {
            (1, 1) => MoveKind::Step,
            (2, 2) => MoveKind::Jump,
            _ => return Err(MoveRejection::IllegalGeometry),
        };
        if let Some(forced) = self.forced_continuation {
            if kind != MoveKind::Jump {
                return Err(MoveRejection::MustContinueCapture(forced));
            }
        }
        // Same constraint for steps and jumps: no backward movement at all.
        if d_row.signum() != self.mover.forward_row() {
            return Err(MoveRejection::IllegalDirection(self.mover));
        }

        match kind {
            MoveKind::Step => Ok(Applied {
                state: TurnState {
                    board: self.board.with_move(from, to),
                    mover: self.mover.opponent(),
                    forced_continuation: None,
                },
                turn_advanced: true,
            }),
            MoveKind::Jump => {
                let captured = from
                    .offset(d_row.signum(), d_col.signum())
                    .ok_or(MoveRejection::IllegalGeometry)?;
                match self.board.piece_at(captured) {
                    Some(piece) if piece.owner() == self.mover.opponent() => {}
                    _ => return Err(MoveRejection::InvalidCaptureTarget(captured)),
                }

                let board = self.board.with_capture(from, to, captured);
                if can_capture_more(&board, to, self.mover) {
                    Ok(Applied {
                        state: TurnState {
                            board,
                            mover: self.mover,
                            forced_continuation: Some(to),
                        },
                        turn_advanced: false,
                    })
                } else {
                    Ok(Applied {
                        state: TurnState {
                            board,
                            mover: self.mover.opponent(),
                            forced_continuation: None,
                        },
                        turn_advanced: true,
                    })
                }
            }
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        TurnState::new()
    }
}

/// True when the piece on `from` has a capture available. Only the two
/// forward diagonals are examined; backward jumps don't exist in this
/// variant.
pub fn can_capture_more(board: &Board, from: Square, mover: Player) -> bool {
    !jump_destinations(board, from, mover).is_empty()
}

/// Empty adjacent squares on the mover's two forward diagonals.
pub fn step_destinations(board: &Board, from: Square, mover: Player) -> Vec<Square> {
    let d_row = mover.forward_row();
    let mut out = Vec::new();
    for d_col in [-1, 1] {
        if let Some(to) = from.offset(d_row, d_col) {
            if board.piece_at(to).is_none() {
                out.push(to);
            }
        }
    }
    out
}

/// Landing squares of the legal jumps from `from`: an adjacent opponent
/// piece on a forward diagonal with an empty on-board square beyond it.
pub fn jump_destinations(board: &Board, from: Square, mover: Player) -> Vec<Square> {
    let d_row = mover.forward_row();
    let mut out = Vec::new();
    for d_col in [-1, 1] {
        let over = from.offset(d_row, d_col);
        let landing = from.offset(2 * d_row, 2 * d_col);
        if let (Some(over), Some(landing)) = (over, landing) {
            let jumped_opponent = board
                .piece_at(over)
                .is_some_and(|piece| piece.owner() == mover.opponent());
            if jumped_opponent && board.piece_at(landing).is_none() {
                out.push(landing);
            }
        }
    }
    out
}
