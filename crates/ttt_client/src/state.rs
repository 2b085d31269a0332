//! Application state shared by the synchronizer, dispatcher, poller and registry.

use crate::control::ControlAssignment;
use crate::error::ServiceError;
use crate::types::{BoardSnapshot, Position, TurnIndicator};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace, warn};

/// A move request that has been claimed and not yet answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingMove {
    /// Manual move at a position.
    Human(Position),
    /// Engine move for the side that was to move.
    Engine,
}

/// Remote operation that a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Operation {
    /// Game initialization.
    #[strum(to_string = "initialize")]
    Initialize,
    /// State fetch.
    #[strum(to_string = "refresh")]
    Refresh,
    /// Engine move request.
    #[strum(to_string = "engine move")]
    EngineMove,
    /// Manual move request.
    #[strum(to_string = "manual move")]
    ManualMove,
}

/// Most recent remote failure, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Operation that failed.
    pub operation: Operation,
    /// Rendered error.
    pub message: String,
}

/// Cached view of the game plus the local control assignment.
///
/// The turn indicator is kept apart from the snapshot: the dispatcher suspends
/// it while a move is in flight, the snapshot itself is only ever replaced by a
/// refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientState {
    snapshot: BoardSnapshot,
    side_to_move: TurnIndicator,
    game_over: bool,
    controls: ControlAssignment,
    in_flight: Option<PendingMove>,
    last_failure: Option<Failure>,
    issued_refreshes: u64,
    applied_floor: u64,
}

impl ClientState {
    /// Creates the state of a fresh game with the given control assignment.
    pub fn new(controls: ControlAssignment) -> Self {
        let snapshot = BoardSnapshot::initial();
        Self {
            snapshot,
            side_to_move: snapshot.side_to_move(),
            game_over: false,
            controls,
            in_flight: None,
            last_failure: None,
            issued_refreshes: 0,
            applied_floor: 0,
        }
    }

    /// Last authoritative snapshot.
    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// Cached turn indicator; `Suspended` while a move is in flight.
    pub fn side_to_move(&self) -> TurnIndicator {
        self.side_to_move
    }

    /// True once the last fetched game state code was non-zero.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Current control assignment.
    pub fn controls(&self) -> ControlAssignment {
        self.controls
    }

    /// Move request currently awaiting its response.
    pub fn in_flight(&self) -> Option<PendingMove> {
        self.in_flight
    }

    /// Most recent remote failure.
    pub fn last_failure(&self) -> Option<&Failure> {
        self.last_failure.as_ref()
    }

    /// True when the turn indicator is stuck suspended with nothing in flight,
    /// which only happens after a failed request.
    pub fn needs_resync(&self) -> bool {
        self.side_to_move == TurnIndicator::Suspended
            && self.in_flight.is_none()
            && !self.game_over
    }

    pub(crate) fn controls_mut(&mut self) -> &mut ControlAssignment {
        &mut self.controls
    }

    /// Hands out the sequence number of a new refresh request.
    pub(crate) fn begin_refresh(&mut self) -> u64 {
        self.issued_refreshes += 1;
        self.issued_refreshes
    }

    /// Replaces the cached snapshot if no newer refresh has been applied since
    /// `seq` was issued. Returns whether the snapshot was applied.
    pub(crate) fn apply_snapshot(&mut self, seq: u64, snapshot: BoardSnapshot) -> bool {
        if seq <= self.applied_floor {
            debug!(seq, floor = self.applied_floor, "Discarding stale snapshot");
            return false;
        }
        self.snapshot = snapshot;
        self.side_to_move = snapshot.side_to_move();
        self.game_over = snapshot.game_state().is_terminal();
        self.applied_floor = seq;
        true
    }

    /// Marks every refresh issued so far as stale.
    fn invalidate_refreshes(&mut self) {
        self.applied_floor = self.issued_refreshes;
    }

    /// Suspends the turn and records the pending move.
    pub(crate) fn claim(&mut self, pending: PendingMove) {
        trace!(?pending, "Claiming turn");
        self.side_to_move = TurnIndicator::Suspended;
        self.in_flight = Some(pending);
        self.invalidate_refreshes();
    }

    /// Clears the pending move once its response (or failure) arrived.
    pub(crate) fn release(&mut self) {
        self.in_flight = None;
    }

    /// Resets to a fresh game: empty board, side A to move, not over.
    pub(crate) fn reset_to_initial(&mut self) {
        self.snapshot = BoardSnapshot::initial();
        self.side_to_move = TurnIndicator::INITIAL;
        self.game_over = false;
        self.invalidate_refreshes();
    }

    pub(crate) fn record_failure(&mut self, operation: Operation, message: String) {
        self.last_failure = Some(Failure { operation, message });
    }

    pub(crate) fn clear_failure(&mut self) {
        self.last_failure = None;
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new(ControlAssignment::default())
    }
}

/// Handle to the single [`ClientState`] of a session.
///
/// Every access is a short critical section; the lock is never held across an
/// `.await`, so readers always see a whole snapshot.
#[derive(Debug, Clone, Default)]
pub struct SharedState(Arc<Mutex<ClientState>>);

impl SharedState {
    /// Wraps a state for sharing.
    pub fn new(state: ClientState) -> Self {
        Self(Arc::new(Mutex::new(state)))
    }

    /// Reads the state.
    pub fn read<R>(&self, f: impl FnOnce(&ClientState) -> R) -> R {
        f(&self.lock())
    }

    /// Returns a copy of the whole state.
    pub fn view(&self) -> ClientState {
        self.lock().clone()
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut ClientState) -> R) -> R {
        f(&mut self.lock())
    }

    /// Observability sink for remote failures: logs the error and keeps it
    /// as the last failure for the front end to show.
    pub(crate) fn report_failure(&self, operation: Operation, err: &ServiceError) {
        warn!(%operation, error = %err, "Remote call failed");
        self.update(|s| s.record_failure(operation, err.to_string()));
    }

    fn lock(&self) -> MutexGuard<'_, ClientState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
