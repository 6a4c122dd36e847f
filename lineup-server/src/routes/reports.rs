//! Validation, fairness and game plan endpoints

use crate::routes::ApiResult;
use crate::state::ServerState;
use axum::{
    extract::{Path, State},
    Json,
};
use lineup_core::fairness::bench_summary;
use lineup_core::{BattingDistribution, GameNumber, GamePlan, GameValidation, Team};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Serialize)]
pub struct ValidationResponse {
    #[serde(flatten)]
    pub report: GameValidation,
    pub all_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

fn validation_view(team: &Team, report: GameValidation) -> ValidationResponse {
    ValidationResponse {
        all_valid: report.all_valid(),
        errors: report.errors(team.roster()),
        warnings: report.warnings(team.roster()),
        report,
    }
}

pub async fn validate_game(
    State(state): State<Arc<ServerState>>,
    Path(game_number): Path<GameNumber>,
) -> ApiResult<ValidationResponse> {
    let team = state.read()?;
    let report = team.validate_game(game_number)?;
    Ok(Json(validation_view(&team, report)))
}

pub async fn validate_all(State(state): State<Arc<ServerState>>) -> ApiResult<Vec<ValidationResponse>> {
    let team = state.read()?;
    let reports = team
        .validate_all()
        .into_iter()
        .map(|report| validation_view(&team, report))
        .collect();
    Ok(Json(reports))
}

pub async fn batting_fairness(State(state): State<Arc<ServerState>>) -> ApiResult<BattingDistribution> {
    let team = state.read()?;
    Ok(Json(team.batting_distribution()))
}

/// Cross-game fielding table with the bench spread
pub async fn fielding_fairness(State(state): State<Arc<ServerState>>) -> ApiResult<Value> {
    let team = state.read()?;
    let distribution = team.fielding_distribution();
    let bench = bench_summary(&distribution);
    Ok(Json(json!({
        "distribution": distribution,
        "bench": bench,
    })))
}

pub async fn game_fairness(
    State(state): State<Arc<ServerState>>,
    Path(game_number): Path<GameNumber>,
) -> ApiResult<Value> {
    let team = state.read()?;
    let distribution = team.game_fielding_distribution(game_number)?;
    Ok(Json(json!({
        "game_number": game_number,
        "distribution": distribution,
    })))
}

/// Plan rows plus the rendered text sheet
pub async fn game_plan(
    State(state): State<Arc<ServerState>>,
    Path(game_number): Path<GameNumber>,
) -> ApiResult<Value> {
    let team = state.read()?;
    let plan = GamePlan::build(&team, game_number)?;
    let text = plan.render_text();
    Ok(Json(json!({
        "plan": plan,
        "text": text,
    })))
}
