//! Deterministic combat core for a tick-based team battler.
//!
//! `arena-core` owns the per-character combat rules: the resource ledger
//! and school mechanics, the condition engine, the cast state machine, the
//! damage monitor and the cast validation pipeline. It performs no I/O and
//! no rendering. A match is driven through [`engine::Battle`], which
//! advances every [`Character`] in fixed steps and reports
//! [`CombatEvent`]s for an external combat resolver.
pub mod cast;
pub mod character;
pub mod conditions;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod monitor;
pub mod snapshot;
pub mod state;
pub mod validation;

pub use cast::{CastPhase, CastState, CastTarget, Cooldowns};
pub use character::{Character, CharacterEvent, SacrificeError};
pub use conditions::{
    Chill, ConditionEngine, ConditionIcon, Cozy, EffectDefinition, EffectId, PipTable,
    StackingPolicy,
};
pub use config::{CombatConfig, CombatRules};
pub use engine::{Battle, CombatEvent, Intent};
pub use env::{
    EffectCatalog, EffectOracle, OracleError, Skill, SkillCatalog, SkillCosts, SkillId,
    SkillOracle, SkillType, TargetKind,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use monitor::{DamageMonitor, DamageSource};
pub use snapshot::{CharacterSnapshot, SchoolSnapshot};
pub use state::{EntityId, Position, ResourceLedger, School, SchoolMechanic, SkillBar, Team};
pub use validation::{
    CastCounter, CastCounters, CastFailure, CastRejection, CastRequest, CastResult,
    TargetLookup, TargetView, TelemetrySink,
};
