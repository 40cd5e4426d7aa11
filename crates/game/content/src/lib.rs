//! Data-driven arena content and loaders.
//!
//! This crate holds the definitions the combat core reads but never owns:
//! - Skill catalogs (data-driven via RON)
//! - Pip table and composable effect definitions (data-driven via RON)
//! - Combat configuration (data-driven via TOML)
//! - Match rosters (data-driven via RON)
//!
//! Content is shared with the simulation through catalogs and never appears
//! in per-character state except as `Arc` references.

pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use roster::{CharacterSpec, RosterSpec, UnknownSkill};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConditionLoader, ConfigLoader, ContentFactory, LoadResult, PipTableSpec, RosterLoader,
    SkillLoader,
};
