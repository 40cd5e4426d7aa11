//! Oracle access errors.
//!
//! Errors related to catalog construction and lookups.

use crate::conditions::EffectId;
use crate::env::SkillId;
use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when building or querying a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// Skill definition was not found by id.
    #[error("skill {0:?} not found")]
    SkillNotFound(SkillId),

    /// Two skill definitions share an id.
    #[error("skill {0:?} defined twice")]
    DuplicateSkill(SkillId),

    /// Effect definition was not found by id.
    #[error("effect {0:?} not found")]
    EffectNotFound(EffectId),

    /// Two effect definitions share an id.
    #[error("effect {0:?} defined twice")]
    DuplicateEffect(EffectId),

    /// A skill bar slot index outside the bar.
    #[error("skill slot {0} out of range")]
    SlotOutOfRange(usize),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            SkillNotFound(_) | EffectNotFound(_) | SlotOutOfRange(_) => ErrorSeverity::Validation,
            DuplicateSkill(_) | DuplicateEffect(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            SkillNotFound(_) => "ORACLE_SKILL_NOT_FOUND",
            DuplicateSkill(_) => "ORACLE_DUPLICATE_SKILL",
            EffectNotFound(_) => "ORACLE_EFFECT_NOT_FOUND",
            DuplicateEffect(_) => "ORACLE_DUPLICATE_EFFECT",
            SlotOutOfRange(_) => "ORACLE_SLOT_OUT_OF_RANGE",
        }
    }
}
