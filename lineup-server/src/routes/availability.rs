//! Player setup (availability) endpoints

use crate::routes::ApiResult;
use crate::state::ServerState;
use axum::{
    extract::{Path, State},
    Json,
};
use lineup_core::{Availability, AvailabilityChange, AvailabilitySummary, GameNumber, PlayerId, Team};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize, Deserialize)]
pub struct AvailabilityEntry {
    pub player: PlayerId,
    pub available: bool,
    #[serde(default)]
    pub can_play_catcher: bool,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub game_number: GameNumber,
    pub entries: Vec<AvailabilityEntry>,
    pub summary: AvailabilitySummary,
}

fn availability_view(team: &Team, game_number: GameNumber) -> AvailabilityResponse {
    let table = team.availability_for(game_number);
    let entries = table
        .in_roster_order(team.roster())
        .into_iter()
        .map(|(player, a)| AvailabilityEntry {
            player,
            available: a.available,
            can_play_catcher: a.can_play_catcher,
        })
        .collect();
    AvailabilityResponse {
        game_number,
        entries,
        summary: table.summary(team.roster()),
    }
}

/// Open the game for player setup and return the grid
pub async fn get_availability(
    State(state): State<Arc<ServerState>>,
    Path(game_number): Path<GameNumber>,
) -> ApiResult<AvailabilityResponse> {
    let mut team = state.write()?;
    team.open_player_setup(game_number)?;
    Ok(Json(availability_view(&team, game_number)))
}

#[derive(Deserialize)]
pub struct AvailabilityUpdate {
    pub entries: Vec<AvailabilityEntry>,
}

#[derive(Serialize)]
pub struct AvailabilityUpdateResponse {
    pub changes: Vec<AvailabilityChange>,
    pub availability: AvailabilityResponse,
}

/// Save the grid; players who became unavailable drop to the end of the
/// batting order
pub async fn set_availability(
    State(state): State<Arc<ServerState>>,
    Path(game_number): Path<GameNumber>,
    Json(req): Json<AvailabilityUpdate>,
) -> ApiResult<AvailabilityUpdateResponse> {
    let entries: Vec<(PlayerId, Availability)> = req
        .entries
        .iter()
        .map(|e| (e.player, Availability::new(e.available, e.can_play_catcher)))
        .collect();

    let mut team = state.write()?;
    let changes = team.set_game_availability(game_number, &entries)?;
    Ok(Json(AvailabilityUpdateResponse {
        changes,
        availability: availability_view(&team, game_number),
    }))
}
