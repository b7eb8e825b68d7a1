use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, BoardError, Player, Square};
use crate::rules::TurnState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("unknown player `{0}`")]
    UnknownPlayer(String),
    #[error("square index {0} is out of range")]
    SquareOutOfRange(usize),
    #[error("missing `{0}` parameter")]
    MissingParam(&'static str),
    #[error("malformed `{0}` parameter")]
    MalformedParam(&'static str),
}

/// Everything a remote peer needs to reconstruct the game after one
/// update: the new position, who made it, and whose turn it is now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePayload {
    pub board: String,
    pub mover: Player,
    pub next_mover: Player,
    pub forced_continuation: Option<usize>,
}

impl StatePayload {
    /// Snapshot the state reached after `prev_mover` submitted a move.
    pub fn after(prev_mover: Player, state: &TurnState) -> Self {
        StatePayload {
            board: state.board.to_string(),
            mover: prev_mover,
            next_mover: state.mover,
            forced_continuation: state.forced_continuation.map(|sq| sq.index()),
        }
    }

    pub fn to_state(&self) -> Result<TurnState, LinkError> {
        let board: Board = self.board.parse()?;
        let forced_continuation = match self.forced_continuation {
            None => None,
            Some(index) => {
                Some(Square::new(index).ok_or(LinkError::SquareOutOfRange(index))?)
            }
        };
        Ok(TurnState {
            board,
            mover: self.next_mover,
            forced_continuation,
        })
    }
}

/// The shareable link: the full game state plus, optionally, the color the
/// receiving client will control. Carried as plain query parameters; the
/// board alphabet needs no percent-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLink {
    pub state: TurnState,
    pub role: Option<Player>,
}

impl GameLink {
    pub fn new(state: TurnState) -> Self {
        GameLink { state, role: None }
    }

    /// Link handed to the opponent: they control the other color.
    pub fn for_opponent(state: TurnState, own_role: Player) -> Self {
        GameLink {
            state,
            role: Some(own_role.opponent()),
        }
    }

    pub fn to_query(&self) -> String {
        let mut query = format!("state={}&player={}", self.state.board, self.state.mover);
        if let Some(forced) = self.state.forced_continuation {
            query.push_str(&format!("&forced={}", forced.index()));
        }
        if let Some(role) = self.role {
            query.push_str(&format!("&role={}", role));
        }
        query
    }

    pub fn parse(query: &str) -> Result<GameLink, LinkError> {
        let mut board = None;
        let mut player = None;
        let mut role = None;
        let mut forced = None;

        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "state" => board = Some(value.parse::<Board>()?),
                "player" => {
                    player = Some(parse_player(value)?);
                }
                "role" => {
                    role = Some(parse_player(value)?);
                }
                "forced" => {
                    let index: usize = value
                        .parse()
                        .map_err(|_| LinkError::MalformedParam("forced"))?;
                    forced = Some(Square::new(index).ok_or(LinkError::SquareOutOfRange(index))?);
                }
                _ => {}
            }
        }

        let board = board.ok_or(LinkError::MissingParam("state"))?;
        let mover = player.ok_or(LinkError::MissingParam("player"))?;
        Ok(GameLink {
            state: TurnState {
                board,
                mover,
                forced_continuation: forced,
            },
            role,
        })
    }
}

fn parse_player(value: &str) -> Result<Player, LinkError> {
    value
        .parse()
        .map_err(|_| LinkError::UnknownPlayer(value.to_string()))
}
