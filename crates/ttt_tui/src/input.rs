//! Keyboard mapping and cursor movement.

use crossterm::event::KeyCode;
use ttt_client::{Position, Side};

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Play a cell.
    Play(Position),
    /// Move the cursor.
    MoveCursor(Position),
    /// Flip human/engine control of a side.
    ToggleControl(Side),
    /// Start a new game.
    Reset,
    /// Leave the application.
    Quit,
    /// Key has no binding.
    Ignore,
}

/// Maps a key to an action given the current cursor.
pub fn action_for(key: KeyCode, cursor: Position) -> KeyAction {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('r') => KeyAction::Reset,
        KeyCode::Char('a') => KeyAction::ToggleControl(Side::A),
        KeyCode::Char('b') => KeyAction::ToggleControl(Side::B),
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Play(cursor),
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(Position::from_index)
            .map_or(KeyAction::Ignore, KeyAction::Play),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            KeyAction::MoveCursor(move_cursor(cursor, key))
        }
        _ => KeyAction::Ignore,
    }
}

/// Moves cursor based on arrow keys, stopping at the board edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);

    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };

    Position::from_index(row * 3 + col).unwrap_or(cursor)
}
