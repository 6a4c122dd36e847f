//! Server state management
//!
//! One team behind a lock; requests are serialized through it.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use lineup_core::Team;

use crate::routes::ApiError;

/// Server-wide shared state
pub struct ServerState {
    team: RwLock<Team>,
}

impl ServerState {
    pub fn new(team: Team) -> Self {
        Self {
            team: RwLock::new(team),
        }
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, Team>, ApiError> {
        self.team.read().map_err(|_| ApiError::internal("team state lock poisoned"))
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Team>, ApiError> {
        self.team.write().map_err(|_| ApiError::internal("team state lock poisoned"))
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(Team::default())
    }
}
