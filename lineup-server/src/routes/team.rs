//! Team snapshot, team info and bundle import/export

use crate::routes::{ApiError, ApiResult};
use crate::state::ServerState;
use axum::{extract::State, Json};
use lineup_core::{ImportReport, TeamBundle, TeamInfo};
use serde_json::{json, Value};
use std::sync::Arc;

/// Team info, roster and schedule in one response
pub async fn get_team(State(state): State<Arc<ServerState>>) -> ApiResult<Value> {
    let team = state.read()?;
    Ok(Json(json!({
        "info": team.info,
        "players": team.roster().players(),
        "games": team.schedule().games(),
    })))
}

/// Replace the team info block
pub async fn update_info(
    State(state): State<Arc<ServerState>>,
    Json(info): Json<TeamInfo>,
) -> ApiResult<TeamInfo> {
    let mut team = state.write()?;
    team.info = info;
    Ok(Json(team.info.clone()))
}

/// Current team in the bundle file layout
pub async fn export_bundle(State(state): State<Arc<ServerState>>) -> ApiResult<TeamBundle> {
    let team = state.read()?;
    Ok(Json(TeamBundle::from_team(&team)))
}

/// Replace the whole team with an uploaded bundle. The current team is kept
/// if the bundle does not load.
pub async fn import_bundle(
    State(state): State<Arc<ServerState>>,
    Json(bundle): Json<TeamBundle>,
) -> ApiResult<ImportReport> {
    let config = state.read()?.config().clone();
    let (loaded, report) = bundle.into_team(&config).map_err(ApiError::from)?;

    let mut team = state.write()?;
    *team = loaded;
    tracing::info!("Imported bundle: {} players, {} games", team.roster().len(), team.schedule().len());
    Ok(Json(report))
}
