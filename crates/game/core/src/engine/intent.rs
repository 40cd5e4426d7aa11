//! Battle inputs and outputs.

use std::sync::Arc;

use crate::cast::CastTarget;
use crate::env::Skill;
use crate::state::EntityId;
use crate::validation::{CastRequest, CastResult};

/// A discrete command from the input or AI layer, consumed once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    Cast {
        actor: EntityId,
        request: CastRequest,
    },
    Cancel {
        actor: EntityId,
    },
    /// Player-driven movement; abandons any queued approach cast.
    Move {
        actor: EntityId,
        dx: f32,
        dy: f32,
    },
    /// Movement toward a queued cast's target; keeps the queue.
    Approach {
        actor: EntityId,
        dx: f32,
        dy: f32,
    },
    StartAutoAttack {
        actor: EntityId,
        target: EntityId,
    },
    StopAutoAttack {
        actor: EntityId,
    },
}

impl Intent {
    pub fn cast(actor: EntityId, slot: usize, target: CastTarget) -> Self {
        Self::Cast {
            actor,
            request: CastRequest::new(slot, target),
        }
    }

    pub fn actor(&self) -> EntityId {
        match self {
            Self::Cast { actor, .. }
            | Self::Cancel { actor }
            | Self::Move { actor, .. }
            | Self::Approach { actor, .. }
            | Self::StartAutoAttack { actor, .. }
            | Self::StopAutoAttack { actor } => *actor,
        }
    }
}

/// Something the combat-resolution layer must act on or display.
#[derive(Clone, Debug, PartialEq)]
pub enum CombatEvent {
    /// Outcome of every cast attempt, including queued retries.
    CastResolved {
        actor: EntityId,
        slot: usize,
        result: CastResult,
    },
    CastCancelled {
        actor: EntityId,
    },
    /// A skill's effect fired against a valid target.
    EffectFired {
        actor: EntityId,
        slot: usize,
        skill: Arc<Skill>,
        target: CastTarget,
        /// School damage bonus of the caster at the moment of firing.
        damage_bonus: f32,
    },
    /// A skill's effect fired but its target was already gone; no recharge
    /// will be applied.
    Fizzled {
        actor: EntityId,
        slot: usize,
    },
    CastFinished {
        actor: EntityId,
        slot: usize,
        effect_fired: bool,
    },
    AutoAttack {
        actor: EntityId,
        target: EntityId,
    },
    Died {
        actor: EntityId,
    },
}
