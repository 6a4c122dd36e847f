//! Roster endpoints

use crate::routes::{ApiError, ApiResult};
use crate::state::ServerState;
use axum::{
    extract::{Path, State},
    Json,
};
use lineup_core::roster_csv;
use lineup_core::{Player, PlayerId};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub async fn get_roster(State(state): State<Arc<ServerState>>) -> ApiResult<Vec<Player>> {
    let team = state.read()?;
    Ok(Json(team.roster().players().to_vec()))
}

#[derive(Deserialize)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub jersey_number: u32,
}

/// Add a player; a duplicate jersey is a 400 and the roster is unchanged
pub async fn add_player(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<NewPlayer>,
) -> ApiResult<Player> {
    let mut team = state.write()?;
    let id = team.add_player(req.first_name, req.last_name, req.jersey_number)?;
    let player = team
        .roster()
        .get(id)
        .cloned()
        .ok_or_else(|| ApiError::internal("player missing after insert"))?;
    Ok(Json(player))
}

pub async fn remove_player(
    State(state): State<Arc<ServerState>>,
    Path(player): Path<u32>,
) -> ApiResult<Player> {
    let mut team = state.write()?;
    Ok(Json(team.remove_player(PlayerId(player))?))
}

/// Replace the roster from a CSV body
pub async fn upload_csv(State(state): State<Arc<ServerState>>, body: String) -> ApiResult<Value> {
    let roster = roster_csv::parse_roster_csv(&body)?;
    let mut team = state.write()?;
    team.replace_roster(roster)?;
    Ok(Json(json!({
        "success": true,
        "players": team.roster().len(),
    })))
}

/// Blank CSV template sized by the engine configuration
pub async fn template(State(state): State<Arc<ServerState>>) -> Result<String, ApiError> {
    let rows = state.read()?.config().template_players;
    Ok(roster_csv::roster_template(rows)?)
}
