use thiserror::Error;

use super::types::{Action, GameState};

/// Errors that can arise while driving a game session.
#[derive(Debug, Error)]
pub enum GameError {
    /// The action has no transition out of the current state (e.g. `Fight` while exploring).
    #[error("{action} is not available while in {state}")]
    ActionUnavailable { action: Action, state: GameState },

    /// Wrapper around IO errors (save directory creation, locking, rename).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around serde_json errors when encoding or decoding saves.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Encounter weights cannot form a distribution (all zero, or overflow).
    #[error("invalid encounter weights: {0}")]
    InvalidWeights(#[from] rand::distributions::WeightedError),

    /// Balance values the state machine cannot run with (e.g. a probability outside 0..=1).
    #[error("invalid game config: {0}")]
    InvalidConfig(String),

    /// Returned when a player name cannot be used as a save key.
    #[error("invalid player name: {0}")]
    InvalidPlayerName(String),
}
