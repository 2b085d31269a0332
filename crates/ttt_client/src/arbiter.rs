//! Turn arbitration: is the side to move driven locally or by the engine?

use crate::control::ControlMode;
use crate::state::ClientState;
use crate::types::TurnIndicator;

/// Mode controlling the side to move, or `None` when nobody may move
/// (game over, or a move in flight).
pub fn controlling_mode(state: &ClientState) -> Option<ControlMode> {
    if state.game_over() {
        return None;
    }
    match state.side_to_move() {
        TurnIndicator::ToMove(side) => Some(state.controls().mode_for(side)),
        TurnIndicator::Suspended => None,
    }
}

/// True iff the side to move is controlled by a person.
pub fn is_human_turn(state: &ClientState) -> bool {
    controlling_mode(state) == Some(ControlMode::Human)
}

/// True iff the side to move is controlled by the engine.
pub fn is_engine_turn(state: &ClientState) -> bool {
    controlling_mode(state) == Some(ControlMode::Engine)
}
