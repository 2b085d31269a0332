//! Remote tic-tac-toe client core.
//!
//! The game itself lives in a remote service. This crate keeps a cached view
//! of it and decides, at every instant, whose turn it is and whether that turn
//! is played from the keyboard or requested from the engine.
//!
//! # Architecture
//!
//! - **Synchronizer**: fetches authoritative snapshots and replaces the cache
//! - **Arbiter**: pure turn predicates over the cached state
//! - **Dispatcher**: sends human and engine moves, then refreshes
//! - **Polling driver**: fixed-interval timer that triggers engine moves
//! - **Registry**: which side is human- or engine-controlled
//!
//! # Example
//!
//! ```no_run
//! use ttt_client::{ClientConfig, GameClient, Position};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::load("ttt.toml")?;
//! let client = GameClient::from_config(&config)?;
//! client.initialize().await;
//! let _poller = client.start_polling();
//!
//! if client.is_human_turn() {
//!     client.submit_human_move(Position::Center).await;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod arbiter;
mod client;
mod config;
mod control;
mod dispatch;
mod error;
mod http;
mod poller;
mod registry;
mod service;
mod state;
mod sync;
mod types;

// Crate-level exports - Domain types
pub use types::{
    BoardSnapshot, CELL_COUNT, Cell, GameStateCode, Position, STATE_PAYLOAD_LEN, Side,
    TurnIndicator,
};

// Crate-level exports - Control assignment
pub use control::{ControlAssignment, ControlMode};
pub use registry::ControlRegistry;

// Crate-level exports - Errors
pub use error::{ConfigError, ServiceError, ServiceErrorKind};

// Crate-level exports - Remote service
pub use http::HttpGameService;
pub use service::GameService;

// Crate-level exports - State machine
pub use arbiter::{controlling_mode, is_engine_turn, is_human_turn};
pub use dispatch::{DispatchOutcome, MoveDispatcher};
pub use poller::{PollHandle, PollingDriver, TickOutcome};
pub use state::{ClientState, Failure, Operation, PendingMove, SharedState};
pub use sync::{Refresh, StateSynchronizer};

// Crate-level exports - Session
pub use client::GameClient;
pub use config::{ClientConfig, SERVER_URL_ENV};
