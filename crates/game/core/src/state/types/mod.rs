pub mod common;
pub mod resources;
pub mod school;
pub mod skill_bar;

// Re-export common types
pub use common::{EntityId, Position, Team};

// Re-export the resource ledger
pub use resources::{RegenRates, ResourceLedger};

// Re-export school mechanics
pub use school::{
    CreditLine, GritStacks, RhythmCharge, SacrificeState, School, SchoolMechanic, VarietyTracker,
    sacrifice_affordable,
};

// Re-export the skill bar
pub use skill_bar::SkillBar;
