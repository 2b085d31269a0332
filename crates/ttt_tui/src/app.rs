//! Application state and logic.

use strum::IntoEnumIterator;
use ttt_client::{
    ClientState, ControlMode, DispatchOutcome, GameClient, GameService, Position, Side,
    TurnIndicator,
};
use tracing::{debug, info, instrument};

use crate::input::KeyAction;

/// Completion of a background request started by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// A manual move request finished.
    MovePlayed {
        /// Cell that was played.
        position: Position,
        /// How the request ended.
        outcome: DispatchOutcome,
    },
    /// A new-game request finished.
    GameReset(DispatchOutcome),
}

/// Main application state.
pub struct App<S> {
    client: GameClient<S>,
    cursor: Position,
    notice: String,
    should_quit: bool,
}

impl<S: GameService + 'static> App<S> {
    /// Creates a new application over a running client.
    pub fn new(client: GameClient<S>) -> Self {
        Self {
            client,
            cursor: Position::Center,
            notice: "Press 1-9 or arrows + Enter to play.".to_string(),
            should_quit: false,
        }
    }

    /// Gets the game client.
    pub fn client(&self) -> &GameClient<S> {
        &self.client
    }

    /// Gets the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the last notice.
    pub fn notice(&self) -> &str {
        &self.notice
    }

    /// True once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies a key action. Remote work is spawned and reported back on `events`.
    #[instrument(skip(self, events))]
    pub fn handle_action(
        &mut self,
        action: KeyAction,
        events: &tokio::sync::mpsc::UnboundedSender<AppEvent>,
    ) {
        match action {
            KeyAction::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyAction::MoveCursor(position) => self.cursor = position,
            KeyAction::Play(position) => {
                self.cursor = position;
                let client = self.client.clone();
                let events = events.clone();
                tokio::spawn(async move {
                    let outcome = client.submit_human_move(position).await;
                    let _ = events.send(AppEvent::MovePlayed { position, outcome });
                });
            }
            KeyAction::ToggleControl(side) => {
                let mode = self.client.toggle_control(side);
                self.notice = format!("Side {} ({}) is now {}", side, side.mark(), mode);
            }
            KeyAction::Reset => {
                self.notice = "Starting a new game...".to_string();
                let client = self.client.clone();
                let events = events.clone();
                tokio::spawn(async move {
                    let outcome = client.reset_game().await;
                    let _ = events.send(AppEvent::GameReset(outcome));
                });
            }
            KeyAction::Ignore => {}
        }
    }

    /// Handles the completion of a background request.
    pub fn handle_event(&mut self, event: AppEvent) {
        debug!(?event, "Handling app event");

        self.notice = match event {
            AppEvent::MovePlayed { position, outcome } => match outcome {
                DispatchOutcome::Completed => format!("Played {}", position.label()),
                DispatchOutcome::Rejected => "Not your turn.".to_string(),
                DispatchOutcome::Failed => format!("Move at {} failed", position.label()),
            },
            AppEvent::GameReset(DispatchOutcome::Failed) => {
                "Could not start a new game".to_string()
            }
            AppEvent::GameReset(_) => "New game started".to_string(),
        };
    }
}

/// Headline describing whose turn it is, or the result.
pub fn turn_line(view: &ClientState) -> String {
    if view.game_over() {
        let result = match view.snapshot().game_state().0 {
            1 => "X wins!".to_string(),
            2 => "O wins!".to_string(),
            3 => "Draw!".to_string(),
            code => format!("Game over (result {})", code),
        };
        return format!("{} Press 'r' for a new game or 'q' to quit.", result);
    }

    match view.side_to_move() {
        TurnIndicator::Suspended => "Waiting for the game service...".to_string(),
        TurnIndicator::ToMove(side) => match view.controls().mode_for(side) {
            ControlMode::Human => format!("{} to move: your turn", side.mark()),
            ControlMode::Engine => format!("{} to move: engine is thinking...", side.mark()),
        },
    }
}

/// Who controls each side.
pub fn controls_line(view: &ClientState) -> String {
    let controls = view.controls();
    Side::iter()
        .map(|side| format!("{} ({}): {}", side, side.mark(), controls.mode_for(side)))
        .collect::<Vec<_>>()
        .join("    ")
}

/// Most recent remote failure, if any.
pub fn failure_line(view: &ClientState) -> Option<String> {
    view.last_failure()
        .map(|failure| format!("{} failed: {}", failure.operation, failure.message))
}
