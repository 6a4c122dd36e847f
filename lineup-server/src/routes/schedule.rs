//! Schedule endpoints

use crate::routes::ApiResult;
use crate::state::ServerState;
use axum::{
    extract::{Path, State},
    Json,
};
use lineup_core::{Game, GameNumber};
use serde::Deserialize;
use std::sync::Arc;

pub async fn get_schedule(State(state): State<Arc<ServerState>>) -> ApiResult<Vec<Game>> {
    let team = state.read()?;
    Ok(Json(team.schedule().games().to_vec()))
}

#[derive(Deserialize)]
pub struct InitRequest {
    pub count: Option<usize>,
}

/// Replace the schedule with blank games 1..=count
pub async fn initialize(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<InitRequest>,
) -> ApiResult<Vec<Game>> {
    let mut team = state.write()?;
    let count = req.count.unwrap_or(team.config().default_games);
    team.initialize_schedule(count)?;
    Ok(Json(team.schedule().games().to_vec()))
}

pub async fn add_game(
    State(state): State<Arc<ServerState>>,
    Json(game): Json<Game>,
) -> ApiResult<Game> {
    let mut team = state.write()?;
    team.add_game(game.clone())?;
    Ok(Json(game))
}

/// Update a game; the number in the path wins over the body
pub async fn update_game(
    State(state): State<Arc<ServerState>>,
    Path(game_number): Path<GameNumber>,
    Json(mut game): Json<Game>,
) -> ApiResult<Game> {
    game.game_number = game_number;
    let mut team = state.write()?;
    team.update_game(game.clone())?;
    Ok(Json(game))
}

pub async fn remove_game(
    State(state): State<Arc<ServerState>>,
    Path(game_number): Path<GameNumber>,
) -> ApiResult<Game> {
    let mut team = state.write()?;
    Ok(Json(team.remove_game(game_number)?))
}
