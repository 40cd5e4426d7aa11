//! Condition engine: debuffs (chills), buffs (cozies) and composable
//! timed effects, and the signed regeneration rate derived from them.
//!
//! All collections are fixed-capacity and unordered. Applications beyond
//! capacity are dropped silently: conditions are tactical, not part of the
//! resource economy, and a live match must never halt on them.
mod effect;
mod engine;
mod pips;
mod set;
mod tags;

pub use effect::{ActiveEffect, EffectDefinition, EffectId, EffectSet, StackingPolicy};
pub use engine::{ConditionEngine, ConditionIcon};
pub use pips::PipTable;
pub use set::{ActiveCondition, ConditionSet};
pub use tags::{Chill, ConditionClass, ConditionTag, Cozy};
