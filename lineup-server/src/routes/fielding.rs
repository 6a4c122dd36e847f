//! Fielding rotation endpoints

use crate::routes::{ApiError, ApiResult};
use crate::state::ServerState;
use axum::{
    extract::{Path, State},
    Json,
};
use lineup_core::{FieldingIssue, GameNumber, PlayerId, Position, Team};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Serialize, Deserialize)]
pub struct PositionEntry {
    pub player: PlayerId,
    pub position: String,
}

#[derive(Serialize)]
pub struct InningResponse {
    pub game_number: GameNumber,
    pub inning: u32,
    pub positions: Vec<PositionEntry>,
    /// Issues for this inning only
    pub issues: Vec<FieldingIssue>,
}

fn inning_view(team: &mut Team, game_number: GameNumber, inning: u32) -> Result<InningResponse, ApiError> {
    let stored = team.fielding_inning(game_number, inning)?.clone();
    let positions = stored
        .in_roster_order(team.roster())
        .into_iter()
        .map(|(player, position)| PositionEntry {
            player,
            position: position.to_string(),
        })
        .collect();
    let issues = team
        .validate_game(game_number)?
        .fielding
        .into_iter()
        .filter(|issue| issue.inning == inning)
        .collect();
    Ok(InningResponse {
        game_number,
        inning,
        positions,
        issues,
    })
}

pub async fn get_inning(
    State(state): State<Arc<ServerState>>,
    Path((game_number, inning)): Path<(GameNumber, u32)>,
) -> ApiResult<InningResponse> {
    let mut team = state.write()?;
    Ok(Json(inning_view(&mut team, game_number, inning)?))
}

#[derive(Deserialize)]
pub struct InningUpdate {
    pub positions: Vec<PositionEntry>,
}

/// Save an inning as edited. Coverage problems are reported, not rejected;
/// an unknown position label is a 400.
pub async fn set_inning(
    State(state): State<Arc<ServerState>>,
    Path((game_number, inning)): Path<(GameNumber, u32)>,
    Json(req): Json<InningUpdate>,
) -> ApiResult<InningResponse> {
    let assignments = req
        .positions
        .iter()
        .map(|e| -> Result<(PlayerId, Position), ApiError> { Ok((e.player, e.position.parse()?)) })
        .collect::<Result<Vec<_>, _>>()?;

    let mut team = state.write()?;
    team.set_inning_positions(game_number, inning, &assignments)?;
    Ok(Json(inning_view(&mut team, game_number, inning)?))
}

/// Mark unavailable players OUT in every inning
pub async fn auto_out(
    State(state): State<Arc<ServerState>>,
    Path(game_number): Path<GameNumber>,
) -> ApiResult<Value> {
    let mut team = state.write()?;
    let changed = team.auto_out_unavailable(game_number)?;
    Ok(Json(json!({
        "game_number": game_number,
        "changed": changed,
    })))
}
