use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::services::ServeDir;

use crate::advisor::legal_destinations;
use crate::board::{Move, Player, Square};
use crate::link::{GameLink, StatePayload};
use crate::rules::TurnState;

/// Relay between the two browsers: whichever state was written last is the
/// truth. There is no conflict detection, exactly like the shared-link
/// exchange this stands in for.
#[derive(Clone)]
pub struct AppState {
    game: Arc<Mutex<TurnState>>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            game: Arc::new(Mutex::new(TurnState::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize)]
pub struct MoveRequest {
    from: usize,
    to: usize,
}

#[derive(Deserialize)]
pub struct LegalMovesQuery {
    square: usize,
}

#[derive(Serialize)]
pub struct GameResponse {
    board: String,
    current_player: String,
    forced_continuation: Option<usize>,
    share_link: String,
    message: String,
}

fn game_response(state: &TurnState, message: String) -> GameResponse {
    GameResponse {
        board: state.board.to_string(),
        current_player: state.mover.to_string(),
        forced_continuation: state.forced_continuation.map(|sq| sq.index()),
        share_link: GameLink::new(*state).to_query(),
        message,
    }
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

fn display_name(player: Player) -> &'static str {
    match player {
        Player::White => "White",
        Player::Purple => "Purple",
    }
}

#[axum::debug_handler]
async fn new_game(State(app_state): State<AppState>) -> Json<GameResponse> {
    let mut game = app_state.game.lock().unwrap();
    *game = TurnState::new();
    Json(game_response(
        &game,
        "New game started. White moves first.".to_string(),
    ))
}

#[axum::debug_handler]
async fn get_state(State(app_state): State<AppState>) -> Json<GameResponse> {
    let game = app_state.game.lock().unwrap();
    Json(game_response(&game, String::new()))
}

#[axum::debug_handler]
async fn get_legal_moves(
    State(app_state): State<AppState>,
    Query(query): Query<LegalMovesQuery>,
) -> Json<Vec<usize>> {
    let game = app_state.game.lock().unwrap();

    // out-of-range squares simply highlight nothing
    let Some(square) = Square::new(query.square) else {
        return Json(Vec::new());
    };

    let destinations =
        legal_destinations(&game.board, square, game.mover, game.forced_continuation);
    Json(destinations.iter().map(|sq| sq.index()).collect())
}

#[axum::debug_handler]
async fn make_move(State(app_state): State<AppState>, Json(req): Json<MoveRequest>) -> Response {
    let (Some(from), Some(to)) = (Square::new(req.from), Square::new(req.to)) else {
        return bad_request("square index out of range".to_string());
    };

    let mut game = app_state.game.lock().unwrap();
    let mover = game.mover;

    let applied = match game.apply(Move::new(from, to)) {
        Ok(applied) => applied,
        Err(rejection) => return bad_request(rejection.to_string()),
    };
    *game = applied.state;

    let message = if !applied.turn_advanced {
        "Piece captured! You must capture again.".to_string()
    } else if from.row().abs_diff(to.row()) == 2 {
        format!("{} captured a piece.", display_name(mover))
    } else {
        format!("{} to move.", display_name(game.mover))
    };

    Json(game_response(&game, message)).into_response()
}

#[axum::debug_handler]
async fn load_state(State(app_state): State<AppState>, Json(req): Json<StatePayload>) -> Response {
    let state = match req.to_state() {
        Ok(state) => state,
        Err(e) => return bad_request(e.to_string()),
    };

    let mut game = app_state.game.lock().unwrap();
    *game = state;
    Json(game_response(&game, "Game state loaded.".to_string())).into_response()
}

pub fn router() -> Router {
    Router::new()
        .route("/api/new-game", post(new_game))
        .route("/api/state", get(get_state))
        .route("/api/legal-moves", get(get_legal_moves))
        .route("/api/move", post(make_move))
        .route("/api/load", post(load_state))
        .nest_service("/", ServeDir::new("static"))
        .with_state(AppState::new())
}

pub async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    let app = router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    println!("🌐 Relay running at http://127.0.0.1:3000");
    println!("   Open it in two browsers and share the link to play!");

    axum::serve(listener, app).await?;
    Ok(())
}
