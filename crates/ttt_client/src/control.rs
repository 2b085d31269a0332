//! Who supplies the moves for each side.

use crate::types::Side;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Whether a side's moves come from the keyboard or from the remote engine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ControlMode {
    /// Moves are entered by a person.
    Human,
    /// Moves are computed by the remote engine.
    Engine,
}

impl ControlMode {
    /// Toggles between `Human` and `Engine`.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::Human => Self::Engine,
            Self::Engine => Self::Human,
        }
    }
}

/// Control mode of each side.
///
/// Assignment is per side: both sides may share a mode, in which case only the
/// side to move matters for turn decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlAssignment {
    side_a: ControlMode,
    side_b: ControlMode,
}

impl ControlAssignment {
    /// Creates an assignment from the two modes.
    pub fn new(side_a: ControlMode, side_b: ControlMode) -> Self {
        Self { side_a, side_b }
    }

    /// Returns the mode controlling `side`.
    pub fn mode_for(&self, side: Side) -> ControlMode {
        match side {
            Side::A => self.side_a,
            Side::B => self.side_b,
        }
    }

    /// Overwrites the mode of one side.
    pub fn set(&mut self, side: Side, mode: ControlMode) {
        match side {
            Side::A => self.side_a = mode,
            Side::B => self.side_b = mode,
        }
    }
}

impl Default for ControlAssignment {
    /// Engine plays side A, the person at the keyboard plays side B.
    fn default() -> Self {
        Self::new(ControlMode::Engine, ControlMode::Human)
    }
}
