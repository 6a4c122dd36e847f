//! Batting order endpoints

use crate::routes::ApiResult;
use crate::state::ServerState;
use axum::{
    extract::{Path, State},
    Json,
};
use lineup_core::{BattingIssue, GameNumber, LineupError, PlayerId, SlotLabel, Team};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize, Deserialize)]
pub struct LabelEntry {
    pub player: PlayerId,
    pub label: SlotLabel,
}

#[derive(Serialize)]
pub struct BattingResponse {
    pub game_number: GameNumber,
    pub order: Vec<PlayerId>,
    pub labels: Vec<LabelEntry>,
    pub issues: Vec<BattingIssue>,
}

fn batting_view(team: &mut Team, game_number: GameNumber, issues: Vec<BattingIssue>) -> Result<BattingResponse, LineupError> {
    let order = team.batting_order(game_number)?.as_slice().to_vec();
    let labels = team
        .batting_labels(game_number)?
        .into_iter()
        .map(|(player, label)| LabelEntry { player, label })
        .collect();
    Ok(BattingResponse {
        game_number,
        order,
        labels,
        issues,
    })
}

/// Stored order (created on first access) with its grid labels
pub async fn get_batting(
    State(state): State<Arc<ServerState>>,
    Path(game_number): Path<GameNumber>,
) -> ApiResult<BattingResponse> {
    let mut team = state.write()?;
    let availability = team.availability_for(game_number);
    let order = team.batting_order(game_number)?.clone();
    let issues = lineup_core::batting::validate_order(&order, team.roster(), &availability);
    Ok(Json(batting_view(&mut team, game_number, issues)?))
}

#[derive(Deserialize)]
pub struct BattingUpdate {
    pub labels: Vec<LabelEntry>,
}

/// Save edited labels. Duplicates and gaps come back as issues; the save
/// itself always succeeds for a scheduled game.
pub async fn set_batting(
    State(state): State<Arc<ServerState>>,
    Path(game_number): Path<GameNumber>,
    Json(req): Json<BattingUpdate>,
) -> ApiResult<BattingResponse> {
    let labels: FxHashMap<PlayerId, SlotLabel> = req.labels.iter().map(|e| (e.player, e.label)).collect();

    let mut team = state.write()?;
    let issues = team.set_batting_labels(game_number, &labels)?;
    Ok(Json(batting_view(&mut team, game_number, issues)?))
}

/// Available players first, unavailable last
pub async fn auto_arrange(
    State(state): State<Arc<ServerState>>,
    Path(game_number): Path<GameNumber>,
) -> ApiResult<BattingResponse> {
    let mut team = state.write()?;
    team.auto_arrange_batting(game_number)?;
    Ok(Json(batting_view(&mut team, game_number, Vec::new())?))
}
