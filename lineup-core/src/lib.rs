//! Lineup Core - Lineup consistency and assignment engine
//!
//! This crate provides the planning logic for a team's season:
//! - Roster with stable player identity
//! - Game schedule and per-game player availability
//! - Batting orders with availability-aware repair
//! - Per-inning fielding rotations with coverage validation
//! - Fairness statistics across all games
//!
//! Everything hangs off an explicit [`Team`] context; the bundle, CSV and
//! report modules are thin adapters that move plain data in and out of it.

pub mod availability;
pub mod batting;
pub mod bundle;
pub mod config;
pub mod error;
pub mod example;
pub mod fairness;
pub mod fielding;
pub mod report;
pub mod roster;
pub mod roster_csv;
pub mod schedule;
pub mod team;
pub mod validation;

// Re-exports for convenient access
pub use availability::{Availability, AvailabilityChange, AvailabilitySummary, AvailabilityTable, AvailabilityTracker};
pub use batting::{BattingIssue, BattingOrder, BattingOrders, SlotLabel};
pub use bundle::{load_team, save_team, GameKey, ImportReport, LabeledGameData, TeamBundle};
pub use config::EngineConfig;
pub use error::{ImportError, LineupError, RosterError, ScheduleError, UnknownPosition};
pub use fairness::{BattingDistribution, BenchSummary, FieldingDistribution, PositionCounts};
pub use fielding::{FieldingIssue, FieldingIssueKind, FieldingRotation, FieldingRotations, InningPositions, Position, PositionGroup};
pub use report::{BattingCell, GamePlan, PlanRow};
pub use roster::{Player, PlayerId, Roster};
pub use schedule::{Game, GameNumber, Schedule};
pub use team::{Team, TeamInfo};
pub use validation::GameValidation;
