//! Fixed-interval driver that triggers engine moves.

use crate::dispatch::MoveDispatcher;
use crate::service::GameService;
use crate::state::{Operation, SharedState};
use crate::sync::StateSynchronizer;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, trace};

/// What a single tick decided to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing due: not an engine turn, game over, or a move in flight.
    Idle,
    /// An engine move was claimed and its request spawned.
    EngineMoveDispatched,
    /// The turn was stuck suspended after a failure; a refresh was spawned.
    Resync,
}

/// Periodically asks whether an engine move is due and dispatches it.
///
/// Each tick is independent. Engine requests run on their own task so ticks
/// keep arriving during the round trip; the dispatcher's claim keeps at most
/// one engine request in flight.
pub struct PollingDriver<S> {
    dispatcher: MoveDispatcher<S>,
    sync: StateSynchronizer<S>,
    state: SharedState,
    interval: Duration,
    resync_in_flight: Arc<AtomicBool>,
}

impl<S> Clone for PollingDriver<S> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            sync: self.sync.clone(),
            state: self.state.clone(),
            interval: self.interval,
            resync_in_flight: Arc::clone(&self.resync_in_flight),
        }
    }
}

impl<S: GameService + 'static> PollingDriver<S> {
    /// Creates a driver ticking every `interval`.
    pub fn new(
        dispatcher: MoveDispatcher<S>,
        sync: StateSynchronizer<S>,
        state: SharedState,
        interval: Duration,
    ) -> Self {
        Self {
            dispatcher,
            sync,
            state,
            interval: interval.max(Duration::from_millis(1)),
            resync_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Tick period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs one tick. Must be called from within a tokio runtime.
    pub fn tick(&self) -> TickOutcome {
        if self.dispatcher.try_claim_engine_turn() {
            debug!("Engine turn claimed, dispatching engine move");
            let dispatcher = self.dispatcher.clone();
            tokio::spawn(async move {
                dispatcher.send_engine_move().await;
            });
            return TickOutcome::EngineMoveDispatched;
        }

        if self.state.read(|s| s.needs_resync())
            && !self.resync_in_flight.swap(true, Ordering::AcqRel)
        {
            debug!("Turn indicator stuck suspended, resynchronizing");
            let sync = self.sync.clone();
            let state = self.state.clone();
            let flag = Arc::clone(&self.resync_in_flight);
            tokio::spawn(async move {
                if let Err(err) = sync.refresh().await {
                    state.report_failure(Operation::Refresh, &err);
                }
                flag.store(false, Ordering::Release);
            });
            return TickOutcome::Resync;
        }

        trace!("Idle tick");
        TickOutcome::Idle
    }

    /// Starts ticking on a background task until the handle is stopped or dropped.
    #[instrument(skip(self), fields(interval = ?self.interval))]
    pub fn start(self) -> PollHandle {
        info!("Starting polling driver");
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                self.tick();
            }
        });
        PollHandle { task: Some(task) }
    }
}

/// Handle to a running polling driver.
///
/// Stopping ends the tick loop; requests already in flight still complete.
#[derive(Debug)]
pub struct PollHandle {
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Stops the driver.
    #[instrument(skip(self))]
    pub fn stop(mut self) {
        self.abort();
    }

    /// True while the tick loop is running.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            info!("Stopping polling driver");
            task.abort();
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.abort();
    }
}
