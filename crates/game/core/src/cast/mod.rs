//! Cast state machine and its satellites: per-slot cooldowns, the
//! auto-attack timer and the approach queue.
//!
//! Every non-idle cast state carries exactly one countdown, so a cast can
//! never be stuck; death is the forced escape back to idle.
mod auto_attack;
mod cooldowns;
mod machine;
mod queue;

pub use auto_attack::AutoAttack;
pub use cooldowns::Cooldowns;
pub use machine::{Activation, Aftercast, CastEvent, CastPhase, CastState, CastTarget};
pub use queue::{QueuedCast, SkillQueue};
