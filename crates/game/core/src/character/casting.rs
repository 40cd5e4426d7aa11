//! Cast entry points on [`Character`].

use super::{Character, CharacterEvent};
use crate::cast::{CastEvent, CastTarget};
use crate::config::CombatConfig;
use crate::error::ErrorContext;
use crate::state::Position;
use crate::validation::{
    CastFailure, CastRejection, CastRequest, CastResult, TargetLookup, TelemetrySink,
    ValidatedCast, validate_cast,
};

impl Character {
    /// Runs the validation pipeline without committing anything.
    pub fn check_cast(
        &self,
        request: &CastRequest,
        lookup: &(impl TargetLookup + ?Sized),
        config: &CombatConfig,
        telemetry: Option<&dyn TelemetrySink>,
    ) -> Result<ValidatedCast, CastRejection> {
        validate_cast(self, request, lookup, config, telemetry).map_err(|reason| {
            CastRejection::new(
                reason,
                ErrorContext::new()
                    .with_actor(self.id)
                    .with_slot(request.slot),
            )
        })
    }

    /// Attempts a cast.
    ///
    /// On success every cost is paid at once and never refunded. A cast that
    /// fails only on range is queued so it starts once the caster is close
    /// enough.
    pub fn try_cast(
        &mut self,
        request: CastRequest,
        lookup: &(impl TargetLookup + ?Sized),
        config: &CombatConfig,
        telemetry: Option<&dyn TelemetrySink>,
    ) -> CastResult {
        match self.check_cast(&request, lookup, config, telemetry) {
            Ok(cast) => self.commit(cast, config),
            Err(rejection) => {
                if rejection.reason == CastFailure::OutOfRange {
                    self.queue.enqueue(request.slot, request.target);
                }
                rejection.into()
            }
        }
    }

    fn commit(&mut self, cast: ValidatedCast, config: &CombatConfig) -> CastResult {
        let skill = &cast.skill;
        self.ledger.spend(cast.energy_cost);
        self.mechanic
            .pay(&skill.costs, skill.skill_type, cast.free_cast, &mut self.ledger);
        self.queue.clear();

        tracing::debug!(
            actor = %self.id,
            skill = %skill.name,
            slot = cast.slot,
            energy = cast.energy_cost,
            free_cast = cast.free_cast,
            "cast started"
        );

        match self.cast.begin(
            cast.slot,
            cast.target,
            skill.activation,
            config.aftercast_seconds,
        ) {
            Some(CastEvent::EffectFired { slot, target }) => {
                self.fire(slot, target, config);
                CastResult::Success
            }
            _ => CastResult::CastingStarted,
        }
    }

    /// Retries the queued approach cast once its target is in range.
    ///
    /// A queued cast whose entity target is gone or dead is dropped. Returns
    /// the result when a retry was attempted.
    pub fn retry_queued(
        &mut self,
        lookup: &(impl TargetLookup + ?Sized),
        config: &CombatConfig,
        telemetry: Option<&dyn TelemetrySink>,
    ) -> Option<CastResult> {
        let queued = *self.queue.pending()?;
        if self.dead {
            self.queue.clear();
            return None;
        }
        if let Some(id) = queued.target.entity() {
            if !lookup.target(id).is_some_and(|view| view.alive) {
                tracing::debug!(actor = %self.id, target = %id, "queued cast target lost");
                self.queue.clear();
                return None;
            }
        }
        if !self.cast.is_idle() {
            return None;
        }

        let point = self.approach_target(lookup)?;
        let range = self.skills.get(queued.slot)?.range;
        if self.position.distance_to(point) > range {
            return None;
        }

        self.queue.clear();
        Some(self.try_cast(
            CastRequest::new(queued.slot, queued.target),
            lookup,
            config,
            telemetry,
        ))
    }

    /// Point the movement layer should steer toward, while a cast is queued.
    pub fn approach_target(&self, lookup: &(impl TargetLookup + ?Sized)) -> Option<Position> {
        match self.queue.pending()?.target {
            CastTarget::Entity(id) => lookup.target(id).map(|view| view.position),
            CastTarget::Ground(point) => Some(point),
            CastTarget::Caster => None,
        }
    }

    /// Voluntary cancel; see [`crate::cast::CastState::cancel`].
    pub fn cancel_cast(&mut self) -> bool {
        let cancelled = self.cast.cancel();
        if cancelled {
            tracing::debug!(actor = %self.id, "cast cancelled");
        }
        cancelled
    }

    /// Forced stop of an activating cast. Costs stay paid.
    pub fn interrupt(&mut self) -> bool {
        let interrupted = self.cast.interrupt();
        if interrupted {
            tracing::debug!(actor = %self.id, "cast interrupted");
        }
        interrupted
    }

    /// Marks the fired effect in `slot` as having had no valid target.
    pub fn fizzle(&mut self, slot: usize) -> bool {
        let fizzled = self.cast.fizzle(slot);
        if fizzled {
            tracing::debug!(actor = %self.id, slot, "cast fizzled");
        }
        fizzled
    }

    pub(super) fn on_cast_event(&mut self, event: CastEvent, config: &CombatConfig) {
        match event {
            CastEvent::EffectFired { slot, target } => self.fire(slot, target, config),
            CastEvent::Finished { slot, effect_fired } => {
                if effect_fired {
                    if let Some(skill) = self.skills.get(slot) {
                        self.cooldowns.start(slot, skill.recharge);
                    }
                }
                self.events.push(CharacterEvent::CastFinished { slot, effect_fired });
            }
        }
    }

    fn fire(&mut self, slot: usize, target: CastTarget, config: &CombatConfig) {
        let Some(skill) = self.skills.get(slot).cloned() else {
            return;
        };
        self.mechanic.on_effect_fired(skill.grit_gain, config);
        tracing::debug!(actor = %self.id, skill = %skill.name, slot, "effect fired");
        self.events.push(CharacterEvent::EffectFired {
            slot,
            skill,
            target,
        });
    }
}
