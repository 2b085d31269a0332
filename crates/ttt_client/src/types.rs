//! Core domain types for the cached view of a remote game.

use crate::error::{ServiceError, ServiceErrorKind};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Length of the state payload: nine cells, the game state code, the side to move.
pub const STATE_PAYLOAD_LEN: usize = CELL_COUNT + 2;

/// One of the two sides of the game.
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
    strum::EnumIter,
)]
pub enum Side {
    /// Side A, plays X and moves first.
    A,
    /// Side B, plays O.
    B,
}

impl Side {
    /// Returns the mark drawn for this side.
    pub fn mark(self) -> &'static str {
        match self {
            Side::A => "X",
            Side::B => "O",
        }
    }

    /// Decodes a side from its wire code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Side::A),
            2 => Some(Side::B),
            _ => None,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Occupied by a side.
    Marked(Side),
}

impl Cell {
    /// Decodes a cell from its wire code (0 empty, 1 side A, 2 side B).
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            other => Side::from_code(other).map(Cell::Marked),
        }
    }
}

/// Whose turn the client believes it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnIndicator {
    /// The given side is to move.
    ToMove(Side),
    /// A remote move is in flight; nobody may move until the next refresh.
    Suspended,
}

impl TurnIndicator {
    /// Turn indicator of a freshly initialized game.
    pub const INITIAL: Self = TurnIndicator::ToMove(Side::A);

    /// Decodes the indicator from its wire code (0 suspended, 1 side A, 2 side B).
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(TurnIndicator::Suspended),
            other => Side::from_code(other).map(TurnIndicator::ToMove),
        }
    }
}

/// Opaque terminal-result code reported by the service.
///
/// Zero means the game is still in progress; any other value is a finished
/// game. The client never interprets the non-zero values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GameStateCode(pub i64);

impl GameStateCode {
    /// Code of a game in progress.
    pub const IN_PROGRESS: Self = GameStateCode(0);

    /// Returns true once the game has concluded.
    pub fn is_terminal(self) -> bool {
        self.0 != 0
    }
}

/// A position on the board, row-major (0-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Top-left (position 0)
    TopLeft,
    /// Top-center (position 1)
    TopCenter,
    /// Top-right (position 2)
    TopRight,
    /// Middle-left (position 3)
    MiddleLeft,
    /// Center (position 4)
    Center,
    /// Middle-right (position 5)
    MiddleRight,
    /// Bottom-left (position 6)
    BottomLeft,
    /// Bottom-center (position 7)
    BottomCenter,
    /// Bottom-right (position 8)
    BottomRight,
}

impl Position {
    /// All positions in index order.
    pub const ALL: [Position; CELL_COUNT] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Converts a cell index into a position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Cell index sent to the service.
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Label for display.
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }
}

/// Authoritative board state as last fetched from the service.
///
/// Snapshots are immutable values: a refresh replaces the cached snapshot as a
/// whole, it never edits one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    cells: [Cell; CELL_COUNT],
    game_state: GameStateCode,
    side_to_move: TurnIndicator,
}

impl BoardSnapshot {
    /// Snapshot of a freshly initialized game: empty board, side A to move.
    pub fn initial() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
            game_state: GameStateCode::IN_PROGRESS,
            side_to_move: TurnIndicator::INITIAL,
        }
    }

    /// Builds a snapshot from already decoded parts.
    pub fn new(
        cells: [Cell; CELL_COUNT],
        game_state: GameStateCode,
        side_to_move: TurnIndicator,
    ) -> Self {
        Self {
            cells,
            game_state,
            side_to_move,
        }
    }

    /// Decodes the service's 11-integer state payload.
    #[instrument(level = "trace")]
    pub fn from_wire(values: &[i64]) -> Result<Self, ServiceError> {
        if values.len() != STATE_PAYLOAD_LEN {
            return Err(ServiceError::new(ServiceErrorKind::MalformedState(
                format!(
                    "expected {} integers, got {}",
                    STATE_PAYLOAD_LEN,
                    values.len()
                ),
            )));
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (index, (cell, &code)) in cells.iter_mut().zip(values).enumerate() {
            *cell = Cell::from_code(code).ok_or_else(|| {
                ServiceError::new(ServiceErrorKind::MalformedState(format!(
                    "invalid cell code {} at index {}",
                    code, index
                )))
            })?;
        }

        let game_state = GameStateCode(values[CELL_COUNT]);
        let side_code = values[CELL_COUNT + 1];
        let side_to_move = TurnIndicator::from_code(side_code).ok_or_else(|| {
            ServiceError::new(ServiceErrorKind::MalformedState(format!(
                "invalid side-to-move code {}",
                side_code
            )))
        })?;

        Ok(Self {
            cells,
            game_state,
            side_to_move,
        })
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Returns the cell at a position.
    pub fn cell(&self, position: Position) -> Cell {
        self.cells[position.to_index()]
    }

    /// Terminal-result code.
    pub fn game_state(&self) -> GameStateCode {
        self.game_state
    }

    /// Side to move as reported by the service.
    pub fn side_to_move(&self) -> TurnIndicator {
        self.side_to_move
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}
