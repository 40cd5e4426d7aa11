//! Warmth-for-energy conversion errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::School;

/// Reasons a warmth-for-energy conversion was refused.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SacrificeError {
    #[error("dead characters cannot sacrifice warmth")]
    Dead,

    #[error("{0} school has no sacrifice mechanic")]
    WrongSchool(School),

    #[error("sacrifice recharging ({remaining:.1}s left)")]
    OnCooldown { remaining: f32 },

    #[error("not enough warmth to sacrifice")]
    InsufficientWarmth,
}

impl GameError for SacrificeError {
    fn severity(&self) -> ErrorSeverity {
        use SacrificeError::*;
        match self {
            OnCooldown { .. } => ErrorSeverity::Recoverable,
            Dead | WrongSchool(_) | InsufficientWarmth => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use SacrificeError::*;
        match self {
            Dead => "SACRIFICE_DEAD",
            WrongSchool(_) => "SACRIFICE_WRONG_SCHOOL",
            OnCooldown { .. } => "SACRIFICE_ON_COOLDOWN",
            InsufficientWarmth => "SACRIFICE_INSUFFICIENT_WARMTH",
        }
    }
}
