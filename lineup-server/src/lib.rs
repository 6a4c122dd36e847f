//! Lineup Server - HTTP API for the lineup engine
//!
//! This crate provides the web backend:
//! - REST API over a single team (roster, schedule, availability)
//! - Batting order and fielding rotation editing with validation
//! - Fairness reports and game plans
//! - Bundle import/export
//! - Optional static file serving for a front end

mod routes;
mod state;

use axum::routing::{get, post, put};
use axum::Router;
use lineup_core::{load_team, EngineConfig, Team};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use routes::ApiError;
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory served for any path outside `/api`
    pub static_dir: Option<String>,
    /// Bundle loaded at startup instead of an empty team
    pub bundle: Option<PathBuf>,
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8003,
            static_dir: None,
            bundle: None,
            engine: EngineConfig::default(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let router = Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Team and bundle
        .route("/api/team", get(routes::team::get_team))
        .route("/api/team/info", put(routes::team::update_info))
        .route(
            "/api/bundle",
            get(routes::team::export_bundle).post(routes::team::import_bundle),
        )
        // Roster
        .route(
            "/api/roster",
            get(routes::roster::get_roster).post(routes::roster::add_player),
        )
        .route(
            "/api/roster/:player",
            axum::routing::delete(routes::roster::remove_player),
        )
        .route("/api/roster/csv", post(routes::roster::upload_csv))
        .route("/api/roster/template", get(routes::roster::template))
        // Schedule
        .route(
            "/api/schedule",
            get(routes::schedule::get_schedule).post(routes::schedule::add_game),
        )
        .route("/api/schedule/init", post(routes::schedule::initialize))
        .route(
            "/api/schedule/:game",
            put(routes::schedule::update_game).delete(routes::schedule::remove_game),
        )
        // Availability
        .route(
            "/api/games/:game/availability",
            get(routes::availability::get_availability).put(routes::availability::set_availability),
        )
        // Batting order
        .route(
            "/api/games/:game/batting",
            get(routes::batting::get_batting).put(routes::batting::set_batting),
        )
        .route(
            "/api/games/:game/batting/auto-arrange",
            post(routes::batting::auto_arrange),
        )
        // Fielding rotation
        .route(
            "/api/games/:game/fielding/auto-out",
            post(routes::fielding::auto_out),
        )
        .route(
            "/api/games/:game/fielding/:inning",
            get(routes::fielding::get_inning).put(routes::fielding::set_inning),
        )
        // Validation, fairness and plans
        .route("/api/validation", get(routes::reports::validate_all))
        .route("/api/games/:game/validation", get(routes::reports::validate_game))
        .route("/api/fairness/batting", get(routes::reports::batting_fairness))
        .route("/api/fairness/fielding", get(routes::reports::fielding_fairness))
        .route("/api/games/:game/fairness", get(routes::reports::game_fairness))
        .route("/api/games/:game/plan", get(routes::reports::game_plan))
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive());

    // Static file serving (must be last)
    match &config.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let team = match &config.bundle {
        Some(path) => {
            let (team, report) = load_team(path, &config.engine)?;
            if !report.is_clean() {
                tracing::warn!(
                    "Bundle loaded with {} skipped game keys and {} dropped entries",
                    report.skipped_game_keys.len(),
                    report.dropped_entries
                );
            }
            team
        }
        None => Team::new(config.engine.clone()),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new(team));
    let router = create_router(&config, state);

    tracing::info!("Lineup server starting on http://0.0.0.0:{}", config.port);
    if let Some(dir) = &config.static_dir {
        tracing::info!("Static files served from: {}", dir);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
