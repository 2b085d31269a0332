//! In-memory game service shared by the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Semaphore;
use ttt_client::{BoardSnapshot, GameService, Position, ServiceError, ServiceErrorKind};

/// Remote call observed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Initialize,
    State,
    EngineMove,
    ManualMove(usize),
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Wire payload of a fresh game.
pub const INITIAL_WIRE: [i64; 11] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];

/// Scripted stand-in for the remote game service.
///
/// Plays real tic-tac-toe: the engine takes the first empty cell, the result
/// code is the winning side (1 or 2) or 3 for a draw.
pub struct ScriptedService {
    wire: Mutex<[i64; 11]>,
    calls: Mutex<Vec<Call>>,
    gated: AtomicBool,
    state_gated: AtomicBool,
    permits: Semaphore,
    fail_initialize: AtomicBool,
    fail_state: AtomicBool,
    fail_moves: AtomicBool,
}

impl Default for ScriptedService {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedService {
    pub fn new() -> Self {
        Self {
            wire: Mutex::new(INITIAL_WIRE),
            calls: Mutex::new(Vec::new()),
            gated: AtomicBool::new(false),
            state_gated: AtomicBool::new(false),
            permits: Semaphore::new(0),
            fail_initialize: AtomicBool::new(false),
            fail_state: AtomicBool::new(false),
            fail_moves: AtomicBool::new(false),
        }
    }

    /// Overwrites the authoritative payload.
    pub fn set_wire(&self, wire: [i64; 11]) {
        *self.wire.lock().unwrap() = wire;
    }

    pub fn wire(&self) -> [i64; 11] {
        *self.wire.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    pub fn engine_calls(&self) -> usize {
        self.count(|c| *c == Call::EngineMove)
    }

    pub fn manual_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::ManualMove(_)))
    }

    /// Holds every move request until [`ScriptedService::release`] is called.
    pub fn gate_moves(&self) {
        self.gated.store(true, Ordering::SeqCst);
    }

    /// Holds state fetches issued while `gated` is set until released.
    pub fn gate_state(&self, gated: bool) {
        self.state_gated.store(gated, Ordering::SeqCst);
    }

    /// Lets `n` held requests complete.
    pub fn release(&self, n: usize) {
        self.permits.add_permits(n);
    }

    pub fn fail_initialize(&self, fail: bool) {
        self.fail_initialize.store(fail, Ordering::SeqCst);
    }

    pub fn fail_state(&self, fail: bool) {
        self.fail_state.store(fail, Ordering::SeqCst);
    }

    pub fn fail_moves(&self, fail: bool) {
        self.fail_moves.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait_for_gate(&self, gate: &AtomicBool) {
        if gate.load(Ordering::SeqCst) {
            self.permits
                .acquire()
                .await
                .expect("semaphore closed")
                .forget();
        }
    }

    fn outage() -> ServiceError {
        ServiceError::new(ServiceErrorKind::Transport("connection refused".to_string()))
    }

    fn play(&self, index: usize) {
        let mut wire = self.wire.lock().unwrap();
        let side = wire[10];
        if wire[9] != 0 || wire[index] != 0 || !(side == 1 || side == 2) {
            return;
        }
        wire[index] = side;
        if LINES.iter().any(|line| line.iter().all(|&i| wire[i] == side)) {
            wire[9] = side;
        } else if wire[..9].iter().all(|&c| c != 0) {
            wire[9] = 3;
        }
        wire[10] = if side == 1 { 2 } else { 1 };
    }
}

#[async_trait::async_trait]
impl GameService for ScriptedService {
    async fn initialize(&self) -> Result<(), ServiceError> {
        self.record(Call::Initialize);
        if self.fail_initialize.load(Ordering::SeqCst) {
            return Err(Self::outage());
        }
        self.set_wire(INITIAL_WIRE);
        Ok(())
    }

    async fn state(&self) -> Result<BoardSnapshot, ServiceError> {
        self.record(Call::State);
        self.wait_for_gate(&self.state_gated).await;
        if self.fail_state.load(Ordering::SeqCst) {
            return Err(Self::outage());
        }
        BoardSnapshot::from_wire(&self.wire())
    }

    async fn engine_move(&self) -> Result<(), ServiceError> {
        self.record(Call::EngineMove);
        self.wait_for_gate(&self.gated).await;
        if self.fail_moves.load(Ordering::SeqCst) {
            return Err(Self::outage());
        }
        let first_empty = self.wire()[..9].iter().position(|&c| c == 0);
        if let Some(index) = first_empty {
            self.play(index);
        }
        Ok(())
    }

    async fn manual_move(&self, position: Position) -> Result<(), ServiceError> {
        self.record(Call::ManualMove(position.to_index()));
        self.wait_for_gate(&self.gated).await;
        if self.fail_moves.load(Ordering::SeqCst) {
            return Err(Self::outage());
        }
        self.play(position.to_index());
        Ok(())
    }
}
