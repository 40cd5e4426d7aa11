//! Cast outcomes.

use crate::error::{ErrorContext, ErrorSeverity, GameError};

/// Outcome of a cast attempt, the stable contract consumers branch on.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumCount,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CastResult {
    /// Instant skill cast; its effect has already fired.
    Success,
    /// Timed skill entered activation.
    CastingStarted,
    NoEnergy,
    OutOfRange,
    NoTarget,
    TargetDead,
    CasterDead,
    OnCooldown,
    AlreadyCasting,
    NoSkill,
    NoGrit,
    NoRhythm,
    NoWarmthForSacrifice,
    NoCreditAvailable,
}

impl CastResult {
    /// True for both success variants.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success | Self::CastingStarted)
    }
}

/// Why the pipeline refused a cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastFailure {
    #[error("caster is dead")]
    CasterDead,

    #[error("caster is already casting")]
    AlreadyCasting,

    #[error("skill is recharging")]
    OnCooldown,

    #[error("skill slot is empty")]
    NoSkill,

    #[error("not enough energy")]
    NoEnergy,

    #[error("not enough grit")]
    NoGrit,

    #[error("not enough rhythm")]
    NoRhythm,

    #[error("warmth sacrifice would breach the warmth floor")]
    NoWarmthForSacrifice,

    #[error("no credit available")]
    NoCreditAvailable,

    #[error("skill needs a target")]
    NoTarget,

    #[error("target is dead")]
    TargetDead,

    #[error("target is out of range")]
    OutOfRange,
}

impl GameError for CastFailure {
    fn severity(&self) -> ErrorSeverity {
        use CastFailure::*;
        match self {
            // Waiting resolves these without any player input.
            AlreadyCasting | OnCooldown | NoEnergy | OutOfRange => ErrorSeverity::Recoverable,
            CasterDead | NoSkill | NoGrit | NoRhythm | NoWarmthForSacrifice
            | NoCreditAvailable | NoTarget | TargetDead => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use CastFailure::*;
        match self {
            CasterDead => "CAST_CASTER_DEAD",
            AlreadyCasting => "CAST_ALREADY_CASTING",
            OnCooldown => "CAST_ON_COOLDOWN",
            NoSkill => "CAST_NO_SKILL",
            NoEnergy => "CAST_NO_ENERGY",
            NoGrit => "CAST_NO_GRIT",
            NoRhythm => "CAST_NO_RHYTHM",
            NoWarmthForSacrifice => "CAST_NO_WARMTH_FOR_SACRIFICE",
            NoCreditAvailable => "CAST_NO_CREDIT_AVAILABLE",
            NoTarget => "CAST_NO_TARGET",
            TargetDead => "CAST_TARGET_DEAD",
            OutOfRange => "CAST_OUT_OF_RANGE",
        }
    }
}

impl From<CastFailure> for CastResult {
    fn from(failure: CastFailure) -> Self {
        match failure {
            CastFailure::CasterDead => Self::CasterDead,
            CastFailure::AlreadyCasting => Self::AlreadyCasting,
            CastFailure::OnCooldown => Self::OnCooldown,
            CastFailure::NoSkill => Self::NoSkill,
            CastFailure::NoEnergy => Self::NoEnergy,
            CastFailure::NoGrit => Self::NoGrit,
            CastFailure::NoRhythm => Self::NoRhythm,
            CastFailure::NoWarmthForSacrifice => Self::NoWarmthForSacrifice,
            CastFailure::NoCreditAvailable => Self::NoCreditAvailable,
            CastFailure::NoTarget => Self::NoTarget,
            CastFailure::TargetDead => Self::TargetDead,
            CastFailure::OutOfRange => Self::OutOfRange,
        }
    }
}

/// A refused cast together with who attempted it and from which slot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct CastRejection {
    pub reason: CastFailure,
    pub context: ErrorContext,
}

impl CastRejection {
    pub fn new(reason: CastFailure, context: ErrorContext) -> Self {
        Self { reason, context }
    }
}

impl GameError for CastRejection {
    fn severity(&self) -> ErrorSeverity {
        self.reason.severity()
    }

    fn context(&self) -> Option<&ErrorContext> {
        Some(&self.context)
    }

    fn error_code(&self) -> &'static str {
        self.reason.error_code()
    }
}

impl From<CastRejection> for CastResult {
    fn from(rejection: CastRejection) -> Self {
        rejection.reason.into()
    }
}
