//! Player-control registry.

use crate::control::{ControlAssignment, ControlMode};
use crate::state::SharedState;
use crate::types::Side;
use tracing::{info, instrument};

/// Records which side is played by a person and which by the engine.
///
/// Changes apply to the next turn decision only. A request already in flight
/// is never cancelled by a control change.
#[derive(Debug, Clone)]
pub struct ControlRegistry {
    state: SharedState,
}

impl ControlRegistry {
    /// Creates a registry writing into `state`.
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Overwrites the control mode of one side.
    #[instrument(skip(self))]
    pub fn set_control(&self, side: Side, mode: ControlMode) {
        self.state.update(|s| s.controls_mut().set(side, mode));
        info!(%side, %mode, "Control changed");
    }

    /// Flips one side between human and engine control; returns the new mode.
    #[instrument(skip(self))]
    pub fn toggle(&self, side: Side) -> ControlMode {
        let mode = self.state.update(|s| {
            let mode = s.controls().mode_for(side).toggle();
            s.controls_mut().set(side, mode);
            mode
        });
        info!(%side, %mode, "Control toggled");
        mode
    }

    /// Current assignment.
    pub fn assignment(&self) -> ControlAssignment {
        self.state.read(|s| s.controls())
    }
}
