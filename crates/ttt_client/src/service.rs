//! Contract of the remote game service.

use crate::error::ServiceError;
use crate::types::{BoardSnapshot, Position};

/// The authoritative game, as seen by the client.
///
/// The service owns the board, the turn indicator and the result code. The
/// client never computes any of these itself; it asks for changes and reads
/// back the outcome with [`GameService::state`].
#[async_trait::async_trait]
pub trait GameService: Send + Sync {
    /// Resets the authoritative game to an empty board with side A to move.
    async fn initialize(&self) -> Result<(), ServiceError>;

    /// Fetches the authoritative snapshot.
    async fn state(&self) -> Result<BoardSnapshot, ServiceError>;

    /// Asks the service to compute and play the engine's move for the side to move.
    async fn engine_move(&self) -> Result<(), ServiceError>;

    /// Plays a manual move for the side to move.
    async fn manual_move(&self, position: Position) -> Result<(), ServiceError>;
}
