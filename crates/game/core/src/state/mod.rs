//! Per-character state that is not owned by a more specific engine.
//!
//! This module holds identity and positioning types, the resource ledger,
//! school mechanics and the skill bar. The condition engine, cast machine
//! and damage monitor live in their own modules; [`crate::Character`]
//! aggregates all of them.
mod error;
pub mod types;

pub use error::StateError;
pub use types::{
    CreditLine, EntityId, GritStacks, Position, RegenRates, ResourceLedger, RhythmCharge,
    SacrificeState, School, SchoolMechanic, SkillBar, Team, VarietyTracker, sacrifice_affordable,
};
