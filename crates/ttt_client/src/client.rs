//! One game session: cached state plus the components that drive it.

use crate::arbiter;
use crate::config::ClientConfig;
use crate::control::{ControlAssignment, ControlMode};
use crate::dispatch::{DispatchOutcome, MoveDispatcher};
use crate::error::ServiceError;
use crate::http::HttpGameService;
use crate::poller::{PollHandle, PollingDriver};
use crate::registry::ControlRegistry;
use crate::service::GameService;
use crate::state::{ClientState, Failure, Operation, SharedState};
use crate::sync::StateSynchronizer;
use crate::types::{BoardSnapshot, Position, Side, TurnIndicator};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Client for one remote game.
///
/// Owns the shared state and wires the synchronizer, dispatcher, registry and
/// polling driver around it. This is the whole surface a front end needs.
pub struct GameClient<S> {
    state: SharedState,
    sync: StateSynchronizer<S>,
    dispatcher: MoveDispatcher<S>,
    registry: ControlRegistry,
    poll_interval: Duration,
}

impl<S> Clone for GameClient<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            sync: self.sync.clone(),
            dispatcher: self.dispatcher.clone(),
            registry: self.registry.clone(),
            poll_interval: self.poll_interval,
        }
    }
}

impl GameClient<HttpGameService> {
    /// Builds an HTTP-backed client from configuration.
    #[instrument(skip(config), fields(server_url = %config.server_url()))]
    pub fn from_config(config: &ClientConfig) -> Result<Self, ServiceError> {
        let service = HttpGameService::new(config.server_url(), config.request_timeout())?;
        Ok(Self::new(service, config.controls(), config.poll_interval()))
    }
}

impl<S: GameService + 'static> GameClient<S> {
    /// Creates a client over `service`.
    pub fn new(service: S, controls: ControlAssignment, poll_interval: Duration) -> Self {
        Self::with_shared_service(Arc::new(service), controls, poll_interval)
    }

    /// Creates a client over a service the caller keeps a handle to.
    pub fn with_shared_service(
        service: Arc<S>,
        controls: ControlAssignment,
        poll_interval: Duration,
    ) -> Self {
        let state = SharedState::new(ClientState::new(controls));
        let sync = StateSynchronizer::new(Arc::clone(&service), state.clone());
        let dispatcher = MoveDispatcher::new(service, sync.clone(), state.clone());
        let registry = ControlRegistry::new(state.clone());
        Self {
            state,
            sync,
            dispatcher,
            registry,
            poll_interval,
        }
    }

    /// Initializes a fresh game on the service and loads its state.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> DispatchOutcome {
        info!("Initializing game session");
        self.reset_game().await
    }

    /// Starts a new game. Failures are reported, never returned.
    #[instrument(skip(self))]
    pub async fn reset_game(&self) -> DispatchOutcome {
        self.state.update(|s| s.clear_failure());
        match self.sync.reset_game().await {
            Ok(()) => DispatchOutcome::Completed,
            Err(err) => {
                self.state.report_failure(Operation::Initialize, &err);
                DispatchOutcome::Failed
            }
        }
    }

    /// Plays a manual move if it is a human turn.
    pub async fn submit_human_move(&self, position: Position) -> DispatchOutcome {
        self.dispatcher.submit_human_move(position).await
    }

    /// Requests an engine move if it is an engine turn.
    pub async fn submit_engine_move(&self) -> DispatchOutcome {
        self.dispatcher.submit_engine_move().await
    }

    /// Overwrites one side's control mode.
    pub fn set_control(&self, side: Side, mode: ControlMode) {
        self.registry.set_control(side, mode);
    }

    /// Flips one side's control mode.
    pub fn toggle_control(&self, side: Side) -> ControlMode {
        self.registry.toggle(side)
    }

    /// Builds the polling driver for this session without starting it.
    pub fn polling_driver(&self) -> PollingDriver<S> {
        PollingDriver::new(
            self.dispatcher.clone(),
            self.sync.clone(),
            self.state.clone(),
            self.poll_interval,
        )
    }

    /// Starts the polling driver; it runs until the handle is stopped or dropped.
    pub fn start_polling(&self) -> PollHandle {
        self.polling_driver().start()
    }

    /// Fetches the authoritative state now.
    pub async fn refresh(&self) -> DispatchOutcome {
        match self.sync.refresh().await {
            Ok(_) => DispatchOutcome::Completed,
            Err(err) => {
                self.state.report_failure(Operation::Refresh, &err);
                DispatchOutcome::Failed
            }
        }
    }
}

impl<S> GameClient<S> {
    /// Copy of the whole cached state.
    pub fn view(&self) -> ClientState {
        self.state.view()
    }

    /// Last authoritative board snapshot.
    pub fn snapshot(&self) -> BoardSnapshot {
        self.state.read(|s| *s.snapshot())
    }

    /// True once the game has concluded.
    pub fn game_over(&self) -> bool {
        self.state.read(|s| s.game_over())
    }

    /// Cached turn indicator.
    pub fn side_to_move(&self) -> TurnIndicator {
        self.state.read(|s| s.side_to_move())
    }

    /// True iff a person should move now.
    pub fn is_human_turn(&self) -> bool {
        self.state.read(arbiter::is_human_turn)
    }

    /// True iff the engine should move now.
    pub fn is_engine_turn(&self) -> bool {
        self.state.read(arbiter::is_engine_turn)
    }

    /// Current control assignment.
    pub fn controls(&self) -> ControlAssignment {
        self.registry.assignment()
    }

    /// Most recent remote failure, if any.
    pub fn last_failure(&self) -> Option<Failure> {
        self.state.read(|s| s.last_failure().cloned())
    }
}
