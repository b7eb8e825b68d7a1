use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Board edge length and cell count
pub const BOARD_SIZE: usize = 8;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Pieces carry no identity beyond their color (no kings in this variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Piece {
    White,
    Purple,
}

impl Piece {
    pub fn owner(&self) -> Player {
        match self {
            Piece::White => Player::White,
            Piece::Purple => Player::Purple,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Piece::White => 'w',
            Piece::Purple => 'p',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    White,
    Purple,
}

impl Player {
    pub fn opponent(&self) -> Player {
        match self {
            Player::White => Player::Purple,
            Player::Purple => Player::White,
        }
    }

    pub fn piece(&self) -> Piece {
        match self {
            Player::White => Piece::White,
            Player::Purple => Piece::Purple,
        }
    }

    /// Row delta of this player's fixed travel direction. White advances
    /// toward row 0, purple toward row 7; this never reverses.
    pub fn forward_row(&self) -> i32 {
        match self {
            Player::White => -1,
            Player::Purple => 1,
        }
    }

    /// Travel direction as the word the UI shows.
    pub fn direction_word(&self) -> &str {
        match self {
            Player::White => "upward",
            Player::Purple => "downward",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "white"),
            Player::Purple => write!(f, "purple"),
        }
    }
}

impl FromStr for Player {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Player::White),
            "purple" => Ok(Player::Purple),
            _ => Err(()),
        }
    }
}

pub fn on_board(row: i32, col: i32) -> bool {
    row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
}

/// A cell index in 0..64, row-major with row 0 on purple's home edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    pub fn new(index: usize) -> Option<Square> {
        if index < CELL_COUNT {
            Some(Square(index as u8))
        } else {
            None
        }
    }

    pub fn from_row_col(row: i32, col: i32) -> Option<Square> {
        if on_board(row, col) {
            Some(Square((row as usize * BOARD_SIZE + col as usize) as u8))
        } else {
            None
        }
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn row(&self) -> usize {
        self.0 as usize / BOARD_SIZE
    }

    pub fn col(&self) -> usize {
        self.0 as usize % BOARD_SIZE
    }

    /// Diagonal-neighbor lookup without bounds pre-checks at call sites;
    /// off-board offsets yield None.
    pub fn offset(&self, d_row: i32, d_col: i32) -> Option<Square> {
        Square::from_row_col(self.row() as i32 + d_row, self.col() as i32 + d_col)
    }

    /// Only dark squares are reachable by diagonal movement.
    pub fn is_dark(&self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..CELL_COUNT as u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board string must be exactly {CELL_COUNT} characters, got {0}")]
    BadLength(usize),
    #[error("board string holds `{found}` at index {index}, expected one of `.`, `w`, `p`")]
    BadCell { index: usize, found: char },
}

/// The position: 64 cells, each empty or holding one colored piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; CELL_COUNT],
}

impl Board {
    pub fn empty() -> Board {
        Board {
            cells: [None; CELL_COUNT],
        }
    }

    /// Starting position: 12 purple pieces on the dark squares of rows 0-2,
    /// 12 white pieces on the dark squares of rows 5-7.
    pub fn initial() -> Board {
        let mut board = Board::empty();
        for sq in Square::all() {
            if !sq.is_dark() {
                continue;
            }
            if sq.row() <= 2 {
                board.cells[sq.index()] = Some(Piece::Purple);
            } else if sq.row() >= 5 {
                board.cells[sq.index()] = Some(Piece::White);
            }
        }
        board
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.cells.iter().filter(|c| **c == Some(piece)).count()
    }

    /// Mechanical cell copy; legality is the rule engine's business.
    pub fn with_move(&self, from: Square, to: Square) -> Board {
        let mut next = *self;
        next.cells[to.index()] = next.cells[from.index()];
        next.cells[from.index()] = None;
        next
    }

    /// As with_move, but additionally clears the jumped-over square.
    pub fn with_capture(&self, from: Square, to: Square, captured: Square) -> Board {
        let mut next = self.with_move(from, to);
        next.cells[captured.index()] = None;
        next
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.index()] = piece;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            let c = match cell {
                None => '.',
                Some(piece) => piece.as_char(),
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != CELL_COUNT {
            return Err(BoardError::BadLength(chars.len()));
        }
        let mut cells = [None; CELL_COUNT];
        for (index, &c) in chars.iter().enumerate() {
            cells[index] = match c {
                '.' => None,
                'w' => Some(Piece::White),
                'p' => Some(Piece::Purple),
                found => return Err(BoardError::BadCell { index, found }),
            };
        }
        Ok(Board { cells })
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_index_arithmetic() {
        let sq = Square::new(49).unwrap();
        assert_eq!(sq.row(), 6);
        assert_eq!(sq.col(), 1);
        assert_eq!(Square::from_row_col(6, 1), Some(sq));

        assert_eq!(Square::new(0).unwrap().row(), 0);
        assert_eq!(Square::new(63).unwrap().col(), 7);
        assert_eq!(Square::new(64), None);
    }

    #[test]
    fn test_off_board_lookups_are_none() {
        assert!(!on_board(-1, 0));
        assert!(!on_board(0, 8));
        assert_eq!(Square::from_row_col(8, 0), None);
        assert_eq!(Square::from_row_col(-1, 3), None);

        let corner = Square::from_row_col(0, 0).unwrap();
        assert_eq!(corner.offset(-1, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Square::from_row_col(1, 1).unwrap()));
    }

    #[test]
    fn test_initial_position_counts() {
        let board = Board::initial();
        assert_eq!(board.count(Piece::White), 12);
        assert_eq!(board.count(Piece::Purple), 12);

        for sq in Square::all() {
            match board.piece_at(sq) {
                Some(piece) => {
                    assert!(sq.is_dark(), "piece on light square {}", sq);
                    match piece {
                        Piece::Purple => assert!(sq.row() <= 2),
                        Piece::White => assert!(sq.row() >= 5),
                    }
                }
                None => assert!(sq.row() >= 3 && sq.row() <= 4 || !sq.is_dark()),
            }
        }
    }

    #[test]
    fn test_board_string_round_trip() {
        let board = Board::initial();
        let s = board.to_string();
        assert_eq!(s.len(), 64);
        assert!(s.chars().all(|c| matches!(c, '.' | 'w' | 'p')));
        assert_eq!(s.parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_board_string_rejects_bad_input() {
        assert_eq!("w".parse::<Board>(), Err(BoardError::BadLength(1)));

        let mut s = Board::initial().to_string();
        s.replace_range(9..10, "x");
        assert_eq!(
            s.parse::<Board>(),
            Err(BoardError::BadCell {
                index: 9,
                found: 'x'
            })
        );
    }

    #[test]
    fn test_with_move_relocates_piece() {
        let board = Board::initial();
        let from = Square::from_row_col(5, 0).unwrap();
        let to = Square::from_row_col(4, 1).unwrap();
        let next = board.with_move(from, to);

        assert_eq!(next.piece_at(from), None);
        assert_eq!(next.piece_at(to), Some(Piece::White));
        // source board untouched
        assert_eq!(board.piece_at(from), Some(Piece::White));
    }

    #[test]
    fn test_with_capture_clears_jumped_square() {
        let mut board = Board::empty();
        let from = Square::from_row_col(5, 2).unwrap();
        let captured = Square::from_row_col(4, 3).unwrap();
        let to = Square::from_row_col(3, 4).unwrap();
        board.set(from, Some(Piece::White));
        board.set(captured, Some(Piece::Purple));

        let next = board.with_capture(from, to, captured);
        assert_eq!(next.piece_at(from), None);
        assert_eq!(next.piece_at(captured), None);
        assert_eq!(next.piece_at(to), Some(Piece::White));
    }

    #[test]
    fn test_player_directions_are_fixed() {
        assert_eq!(Player::White.forward_row(), -1);
        assert_eq!(Player::Purple.forward_row(), 1);
        assert_eq!(Player::White.opponent(), Player::Purple);
        assert_eq!("purple".parse::<Player>(), Ok(Player::Purple));
        assert!("blue".parse::<Player>().is_err());
    }
}
