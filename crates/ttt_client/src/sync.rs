//! Keeps the cached state in line with the authoritative game.

use crate::error::ServiceError;
use crate::service::GameService;
use crate::state::{Operation, SharedState};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Result of a successful state fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// The fetched snapshot replaced the cache.
    Applied,
    /// A newer refresh, claim or reset got there first; the response was dropped.
    Stale,
}

/// Fetches authoritative snapshots and installs them in the shared state.
pub struct StateSynchronizer<S> {
    service: Arc<S>,
    state: SharedState,
}

impl<S> Clone for StateSynchronizer<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            state: self.state.clone(),
        }
    }
}

impl<S: GameService> StateSynchronizer<S> {
    /// Creates a synchronizer over `service` writing into `state`.
    pub fn new(service: Arc<S>, state: SharedState) -> Self {
        Self { service, state }
    }

    /// Fetches the current snapshot and replaces the cache with it.
    ///
    /// The snapshot, turn indicator and game-over flag change together under
    /// one lock. On error the previous cache is left untouched and the error is
    /// returned; there is no retry.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Refresh, ServiceError> {
        let seq = self.state.update(|s| s.begin_refresh());
        let snapshot = self.service.state().await?;

        let applied = self.state.update(|s| s.apply_snapshot(seq, snapshot));
        if applied {
            debug!(
                seq,
                side_to_move = ?snapshot.side_to_move(),
                game_state = snapshot.game_state().0,
                "Applied snapshot"
            );
            Ok(Refresh::Applied)
        } else {
            Ok(Refresh::Stale)
        }
    }

    /// Starts a new game.
    ///
    /// Asks the service to initialize, refreshes, then resets the local view
    /// to an empty board with side A to move, whatever the refresh returned.
    /// If initialization fails nothing local changes. A failed refresh is
    /// reported and the local reset still happens.
    #[instrument(skip(self))]
    pub async fn reset_game(&self) -> Result<(), ServiceError> {
        self.service.initialize().await?;

        if let Err(err) = self.refresh().await {
            self.state.report_failure(Operation::Refresh, &err);
        }

        self.state.update(|s| s.reset_to_initial());
        info!("Game reset");
        Ok(())
    }
}
