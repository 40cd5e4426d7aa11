//! Traits describing read-only content.
//!
//! Oracles expose immutable skill and effect definitions. The simulation
//! looks definitions up by id and keeps shared references; it never mutates
//! or owns catalog data.
mod effects;
mod error;
mod skills;

pub use effects::{EffectCatalog, EffectOracle};
pub use error::OracleError;
pub use skills::{Skill, SkillCatalog, SkillCosts, SkillId, SkillOracle, SkillType, TargetKind};
