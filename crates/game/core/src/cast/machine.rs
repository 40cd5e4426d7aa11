use crate::state::{EntityId, Position};

/// What a cast is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastTarget {
    /// No explicit target; self-targeted skills use this.
    #[default]
    Caster,
    Entity(EntityId),
    Ground(Position),
}

impl CastTarget {
    pub fn entity(&self) -> Option<EntityId> {
        match self {
            Self::Entity(id) => Some(*id),
            _ => None,
        }
    }
}

/// Coarse phase of a cast, for presentation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastPhase {
    #[default]
    Idle,
    Activating,
    Aftercast,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Activation {
    pub slot: usize,
    pub target: CastTarget,
    pub remaining: f32,
    pub duration: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aftercast {
    pub slot: usize,
    pub remaining: f32,
    pub duration: f32,
    /// Set on the activation edge; cleared by a fizzle. Recharge applies
    /// only when this is still set as the aftercast ends.
    pub effect_fired: bool,
}

/// Transition reported by [`CastState::begin`] or [`CastState::update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CastEvent {
    /// Activation completed with the caster alive.
    EffectFired { slot: usize, target: CastTarget },
    /// Aftercast ended; the machine is idle again.
    Finished { slot: usize, effect_fired: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum CastState {
    #[default]
    Idle,
    Activating(Activation),
    Aftercast(Aftercast),
}

impl CastState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn phase(&self) -> CastPhase {
        match self {
            Self::Idle => CastPhase::Idle,
            Self::Activating(_) => CastPhase::Activating,
            Self::Aftercast(_) => CastPhase::Aftercast,
        }
    }

    /// Slot of the skill being cast or recovering.
    pub fn slot(&self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Activating(activation) => Some(activation.slot),
            Self::Aftercast(aftercast) => Some(aftercast.slot),
        }
    }

    /// Elapsed fraction of the current phase in `[0, 1]`; zero while idle.
    pub fn progress(&self) -> f32 {
        let (remaining, duration) = match self {
            Self::Idle => return 0.0,
            Self::Activating(a) => (a.remaining, a.duration),
            Self::Aftercast(a) => (a.remaining, a.duration),
        };
        if duration <= 0.0 {
            1.0
        } else {
            (1.0 - remaining / duration).clamp(0.0, 1.0)
        }
    }

    /// Starts a cast from idle.
    ///
    /// A zero activation time skips straight to aftercast with the effect
    /// already fired, and that edge is returned.
    pub fn begin(
        &mut self,
        slot: usize,
        target: CastTarget,
        activation: f32,
        aftercast: f32,
    ) -> Option<CastEvent> {
        if activation <= 0.0 {
            *self = Self::Aftercast(Aftercast {
                slot,
                remaining: aftercast.max(0.0),
                duration: aftercast.max(0.0),
                effect_fired: true,
            });
            return Some(CastEvent::EffectFired { slot, target });
        }

        *self = Self::Activating(Activation {
            slot,
            target,
            remaining: activation,
            duration: activation,
        });
        None
    }

    /// Counts the active phase down by `dt` seconds.
    ///
    /// Leftover time past a phase boundary is not carried into the next
    /// phase. An activation that completes while the caster is dead drops
    /// to idle without firing.
    pub fn update(&mut self, dt: f32, caster_alive: bool, aftercast: f32) -> Option<CastEvent> {
        match self {
            Self::Idle => None,
            Self::Activating(activation) => {
                activation.remaining = (activation.remaining - dt).max(0.0);
                if activation.remaining > 0.0 {
                    return None;
                }
                let (slot, target) = (activation.slot, activation.target);
                if !caster_alive {
                    *self = Self::Idle;
                    return None;
                }
                *self = Self::Aftercast(Aftercast {
                    slot,
                    remaining: aftercast.max(0.0),
                    duration: aftercast.max(0.0),
                    effect_fired: true,
                });
                Some(CastEvent::EffectFired { slot, target })
            }
            Self::Aftercast(state) => {
                state.remaining = (state.remaining - dt).max(0.0);
                if state.remaining > 0.0 {
                    return None;
                }
                let event = CastEvent::Finished {
                    slot: state.slot,
                    effect_fired: state.effect_fired,
                };
                *self = Self::Idle;
                Some(event)
            }
        }
    }

    /// Voluntary cancel. Only an activating, non-instant cast can be
    /// cancelled; anything else is a no-op returning `false`.
    pub fn cancel(&mut self) -> bool {
        match self {
            Self::Activating(activation) if activation.duration > 0.0 => {
                *self = Self::Idle;
                true
            }
            _ => false,
        }
    }

    /// Forced stop by an external effect; allowed for any activating cast.
    pub fn interrupt(&mut self) -> bool {
        if matches!(self, Self::Activating(_)) {
            *self = Self::Idle;
            true
        } else {
            false
        }
    }

    /// Clears the fired flag of an aftercast so no recharge is applied.
    pub fn fizzle(&mut self, slot: usize) -> bool {
        match self {
            Self::Aftercast(state) if state.slot == slot && state.effect_fired => {
                state.effect_fired = false;
                true
            }
            _ => false,
        }
    }

    /// Unconditional return to idle, used on death.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
