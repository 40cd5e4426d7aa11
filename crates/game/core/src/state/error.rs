//! State management errors.
//!
//! Errors related to roster management and state capacity limits.

use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Errors that occur while managing the characters of a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Roster is full (max capacity reached).
    #[error("Roster is full (max: {max})")]
    RosterFull {
        /// Maximum capacity.
        max: usize,
    },

    /// A character with this id already exists.
    #[error("Character {0} already exists")]
    DuplicateCharacter(EntityId),

    /// Character was not found by id.
    #[error("Character {0} not found")]
    CharacterNotFound(EntityId),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            RosterFull { .. } => ErrorSeverity::Recoverable,
            DuplicateCharacter(_) => ErrorSeverity::Internal,
            CharacterNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            RosterFull { .. } => "STATE_ROSTER_FULL",
            DuplicateCharacter(_) => "STATE_DUPLICATE_CHARACTER",
            CharacterNotFound(_) => "STATE_CHARACTER_NOT_FOUND",
        }
    }
}
