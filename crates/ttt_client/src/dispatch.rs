//! Sends moves to the service and refreshes afterwards.

use crate::arbiter;
use crate::error::ServiceError;
use crate::service::GameService;
use crate::state::{ClientState, Operation, PendingMove, SharedState};
use crate::sync::StateSynchronizer;
use crate::types::Position;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// What happened to a move submission.
///
/// None of these is an error for the caller: rejections are expected races
/// and failures have already been reported to the failure sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The service acknowledged the request.
    Completed,
    /// Not this path's turn (or the game is over); nothing was sent.
    Rejected,
    /// The request failed; the failure was reported.
    Failed,
}

/// Issues human and engine moves, guarded by the turn arbiter.
///
/// Both paths claim the turn before sending: the cached turn indicator is set
/// to `Suspended` in the same critical section as the turn check, so a second
/// submission racing the first is rejected until the follow-up refresh lands.
pub struct MoveDispatcher<S> {
    service: Arc<S>,
    sync: StateSynchronizer<S>,
    state: SharedState,
}

impl<S> Clone for MoveDispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            sync: self.sync.clone(),
            state: self.state.clone(),
        }
    }
}

impl<S: GameService> MoveDispatcher<S> {
    /// Creates a dispatcher.
    pub fn new(service: Arc<S>, sync: StateSynchronizer<S>, state: SharedState) -> Self {
        Self {
            service,
            sync,
            state,
        }
    }

    /// Plays a manual move if the side to move is human-controlled.
    ///
    /// Silently rejected when it is not a human turn, the game is over, or
    /// another move is still in flight.
    #[instrument(skip(self))]
    pub async fn submit_human_move(&self, position: Position) -> DispatchOutcome {
        let claimed = self.state.update(|s| {
            claim_if(s, arbiter::is_human_turn, PendingMove::Human(position))
        });
        if !claimed {
            debug!(?position, "Human move rejected: not a human turn");
            return DispatchOutcome::Rejected;
        }

        info!(position = position.label(), "Sending manual move");
        let result = self.service.manual_move(position).await;
        self.finish(Operation::ManualMove, result).await
    }

    /// Requests an engine move if the side to move is engine-controlled.
    #[instrument(skip(self))]
    pub async fn submit_engine_move(&self) -> DispatchOutcome {
        if !self.try_claim_engine_turn() {
            debug!("Engine move rejected: not an engine turn");
            return DispatchOutcome::Rejected;
        }
        self.send_engine_move().await
    }

    /// Checks for an engine turn and, if there is one, suspends the turn
    /// indicator. Returns whether the caller now owns the engine request.
    pub fn try_claim_engine_turn(&self) -> bool {
        self.state
            .update(|s| claim_if(s, arbiter::is_engine_turn, PendingMove::Engine))
    }

    /// Sends the engine move for a turn already claimed with
    /// [`MoveDispatcher::try_claim_engine_turn`].
    #[instrument(skip(self))]
    pub(crate) async fn send_engine_move(&self) -> DispatchOutcome {
        info!("Requesting engine move");
        let result = self.service.engine_move().await;
        self.finish(Operation::EngineMove, result).await
    }

    async fn finish(
        &self,
        operation: Operation,
        result: Result<(), ServiceError>,
    ) -> DispatchOutcome {
        match result {
            Ok(()) => {
                self.state.update(|s| s.clear_failure());
                if let Err(err) = self.sync.refresh().await {
                    self.state.report_failure(Operation::Refresh, &err);
                }
                self.state.update(|s| s.release());
                DispatchOutcome::Completed
            }
            Err(err) => {
                self.state.report_failure(operation, &err);
                self.state.update(|s| s.release());
                DispatchOutcome::Failed
            }
        }
    }
}

fn claim_if(
    state: &mut ClientState,
    turn_check: fn(&ClientState) -> bool,
    pending: PendingMove,
) -> bool {
    if state.game_over() || state.in_flight().is_some() || !turn_check(state) {
        return false;
    }
    state.claim(pending);
    true
}
