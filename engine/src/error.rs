//! Engine error types and their user-facing messages.

use thiserror::Error;

use crate::{event::PlayerId, game::GameError};

/// Errors produced while routing or handling a game interaction.
///
/// None of these escape the router into the host process. Each variant maps to a
/// message shown only to the player who triggered it, via `user_message`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A participant already owns a live session.
    ///
    /// Surfaced to the requesting player as a rejection; the request is not retried.
    #[error("Player {player} is already in a game")]
    Conflict {
        /// The first participant found to already be in a session
        player: PlayerId,
    },

    /// The actor has no live session.
    #[error("No active game session")]
    NotFound,

    /// The control identifier matches no known game family.
    #[error("Unrecognized interaction identifier '{0}'")]
    Unrecognized(String),

    /// Malformed setup choice or a request the game cannot accept in its current state.
    ///
    /// The player is re-prompted; game state is untouched.
    #[error("{0}")]
    Invalid(String),

    /// Action sent by a player who does not hold the turn.
    #[error("It is not your turn")]
    NotYourTurn,

    /// Action target that violates the game's rules (out of bounds, already resolved...).
    ///
    /// Does not consume the turn.
    #[error("{0}")]
    InvalidTarget(String),

    /// Input from a player who is not seated in the session.
    #[error("Player is not part of this game")]
    NotParticipant,
}

impl EngineError {
    /// Converts the error into the message shown to the player who caused it.
    ///
    /// Stale and foreign identifiers share the "no longer available" message so a
    /// misrouted click never reveals anything about another game.
    ///
    /// # Returns
    /// - `String` - Message suitable for an ephemeral reply
    pub fn user_message(&self) -> String {
        match self {
            Self::Conflict { player } => {
                format!("<@{}> is already playing a game. Finish or forfeit it first.", player)
            }
            Self::NotFound | Self::Unrecognized(_) => {
                "This game is no longer available.".to_string()
            }
            Self::Invalid(reason) | Self::InvalidTarget(reason) => reason.clone(),
            Self::NotYourTurn => "Wait for your turn.".to_string(),
            Self::NotParticipant => "You are not playing in this game.".to_string(),
        }
    }
}

impl From<GameError> for EngineError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::Invalid(reason) => Self::Invalid(reason),
            GameError::InvalidTarget(reason) => Self::InvalidTarget(reason),
            GameError::NotParticipant => Self::NotParticipant,
            err @ GameError::WrongPhase(_) => Self::Invalid(err.to_string()),
        }
    }
}
