//! Fixed-step battle simulation.
//!
//! The [`Battle`] is the authoritative owner of every character in a match.
//! Each [`Battle::step`] advances all characters, applies the tick's
//! intents, retries queued approach casts and resolves auto-attacks, then
//! returns the [`CombatEvent`]s the combat-resolution layer acts on.
//!
//! Cross-character rules live here and nowhere else: a character never
//! reads another character directly, only the [`TargetView`]s captured by
//! the battle.

mod intent;

pub use intent::{CombatEvent, Intent};

use std::sync::Arc;

use crate::character::{Character, CharacterEvent};
use crate::conditions::{Chill, Cozy, EffectDefinition};
use crate::config::{CombatConfig, CombatRules};
use crate::snapshot::CharacterSnapshot;
use crate::state::{EntityId, StateError};
use crate::validation::{TargetLookup, TargetView, TelemetrySink};

pub struct Battle {
    rules: CombatRules,
    roster: Vec<Character>,
    telemetry: Option<Arc<dyn TelemetrySink>>,
    elapsed: f32,
}

impl Battle {
    pub fn new(rules: CombatRules) -> Self {
        Self {
            rules,
            roster: Vec::new(),
            telemetry: None,
            elapsed: 0.0,
        }
    }

    /// Attaches a telemetry sink. Results are identical with or without one.
    pub fn with_telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = Some(sink);
        self
    }

    pub fn rules(&self) -> &CombatRules {
        &self.rules
    }

    /// Seconds simulated so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    // ===== roster =====

    pub fn spawn(&mut self, character: Character) -> Result<(), StateError> {
        if self.roster.len() >= CombatConfig::MAX_CHARACTERS {
            return Err(StateError::RosterFull {
                max: CombatConfig::MAX_CHARACTERS,
            });
        }
        if self.index_of(character.id()).is_some() {
            return Err(StateError::DuplicateCharacter(character.id()));
        }
        tracing::debug!(
            actor = %character.id(),
            name = %character.name(),
            team = %character.team(),
            school = %character.school(),
            "character spawned"
        );
        self.roster.push(character);
        Ok(())
    }

    pub fn characters(&self) -> &[Character] {
        &self.roster
    }

    pub fn character(&self, id: EntityId) -> Option<&Character> {
        self.roster.iter().find(|c| c.id() == id)
    }

    pub fn character_mut(&mut self, id: EntityId) -> Option<&mut Character> {
        self.roster.iter_mut().find(|c| c.id() == id)
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.roster.iter().position(|c| c.id() == id)
    }

    fn require_mut(&mut self, id: EntityId) -> Result<&mut Character, StateError> {
        self.roster
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(StateError::CharacterNotFound(id))
    }

    pub fn snapshots(&self) -> Vec<CharacterSnapshot> {
        self.roster.iter().map(Character::snapshot).collect()
    }

    fn views(&self) -> Vec<TargetView> {
        self.roster.iter().map(Character::target_view).collect()
    }

    // ===== combat resolution hooks =====

    /// Applies resolved damage to `target`. Returns whether the hit killed;
    /// the death event is emitted by the next step.
    pub fn apply_damage(
        &mut self,
        target: EntityId,
        amount: f32,
        skill_name: &str,
        source: Option<EntityId>,
    ) -> Result<bool, StateError> {
        Ok(self
            .require_mut(target)?
            .apply_damage(amount, skill_name, source))
    }

    pub fn heal(&mut self, target: EntityId, amount: f32) -> Result<(), StateError> {
        self.require_mut(target)?.heal(amount);
        Ok(())
    }

    pub fn apply_chill(
        &mut self,
        target: EntityId,
        tag: Chill,
        duration_ms: u32,
        intensity: u8,
        source: Option<EntityId>,
    ) -> Result<bool, StateError> {
        let character = self
            .roster
            .iter_mut()
            .find(|c| c.id() == target)
            .ok_or(StateError::CharacterNotFound(target))?;
        Ok(character.add_chill(tag, duration_ms, intensity, source, &self.rules.pips))
    }

    pub fn apply_cozy(
        &mut self,
        target: EntityId,
        tag: Cozy,
        duration_ms: u32,
        intensity: u8,
        source: Option<EntityId>,
    ) -> Result<bool, StateError> {
        let character = self
            .roster
            .iter_mut()
            .find(|c| c.id() == target)
            .ok_or(StateError::CharacterNotFound(target))?;
        Ok(character.add_cozy(tag, duration_ms, intensity, source, &self.rules.pips))
    }

    pub fn apply_effect(
        &mut self,
        target: EntityId,
        definition: &Arc<EffectDefinition>,
        intensity: u8,
        source: Option<EntityId>,
    ) -> Result<bool, StateError> {
        let character = self
            .roster
            .iter_mut()
            .find(|c| c.id() == target)
            .ok_or(StateError::CharacterNotFound(target))?;
        Ok(character.add_effect(definition, intensity, source, &self.rules.pips))
    }

    pub fn resurrect(
        &mut self,
        target: EntityId,
        warmth_fraction: f32,
        energy_fraction: f32,
    ) -> Result<bool, StateError> {
        Ok(self
            .require_mut(target)?
            .resurrect(warmth_fraction, energy_fraction))
    }

    /// Stops `target`'s activating cast. Costs already paid stay paid and
    /// the slot does not recharge.
    pub fn interrupt(&mut self, target: EntityId) -> Result<bool, StateError> {
        Ok(self.require_mut(target)?.interrupt())
    }

    // ===== step =====

    /// Advances the battle by `dt` seconds and applies `intents` in order.
    pub fn step(&mut self, dt: f32, intents: &[Intent]) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        self.elapsed += dt.max(0.0);

        for character in &mut self.roster {
            character.tick(dt, &self.rules);
        }
        self.collect(&mut events);

        for intent in intents {
            self.apply_intent(intent, &mut events);
        }
        self.retry_queued(&mut events);
        self.collect(&mut events);
        self.resolve_auto_attacks(&mut events);

        events
    }

    fn apply_intent(&mut self, intent: &Intent, events: &mut Vec<CombatEvent>) {
        let actor = intent.actor();
        let Some(index) = self.index_of(actor) else {
            tracing::warn!(actor = %actor, ?intent, "intent for unknown character dropped");
            return;
        };

        match *intent {
            Intent::Cast { request, .. } => {
                let views = self.views();
                let telemetry = self.telemetry.as_deref();
                let result = self.roster[index].try_cast(
                    request,
                    views.as_slice(),
                    &self.rules.config,
                    telemetry,
                );
                events.push(CombatEvent::CastResolved {
                    actor,
                    slot: request.slot,
                    result,
                });
            }
            Intent::Cancel { .. } => {
                if self.roster[index].cancel_cast() {
                    events.push(CombatEvent::CastCancelled { actor });
                }
            }
            Intent::Move { dx, dy, .. } => {
                self.roster[index].move_by(dx, dy, true);
            }
            Intent::Approach { dx, dy, .. } => {
                self.roster[index].move_by(dx, dy, false);
            }
            Intent::StartAutoAttack { target, .. } => {
                self.roster[index].start_auto_attack(target);
            }
            Intent::StopAutoAttack { .. } => self.roster[index].stop_auto_attack(),
        }
    }

    fn retry_queued(&mut self, events: &mut Vec<CombatEvent>) {
        let views = self.views();
        let telemetry = self.telemetry.as_deref();
        for character in &mut self.roster {
            let Some(slot) = character.queue().pending().map(|queued| queued.slot) else {
                continue;
            };
            if let Some(result) =
                character.retry_queued(views.as_slice(), &self.rules.config, telemetry)
            {
                events.push(CombatEvent::CastResolved {
                    actor: character.id(),
                    slot,
                    result,
                });
            }
        }
    }

    fn resolve_auto_attacks(&mut self, events: &mut Vec<CombatEvent>) {
        let views = self.views();
        let config = &self.rules.config;
        for character in &mut self.roster {
            let Some(target) = character.auto_attack_ready() else {
                continue;
            };
            match views.target(target) {
                Some(view) if view.alive => {
                    if character.position().distance_to(view.position) <= config.auto_attack_range
                    {
                        character.complete_swing(config.auto_attack_interval);
                        events.push(CombatEvent::AutoAttack {
                            actor: character.id(),
                            target,
                        });
                    }
                }
                _ => character.stop_auto_attack(),
            }
        }
    }

    /// Drains every character's outbox. Effects aimed at an entity that is
    /// no longer alive fizzle instead of firing.
    fn collect(&mut self, events: &mut Vec<CombatEvent>) {
        let views = self.views();
        for character in &mut self.roster {
            let actor = character.id();
            for event in character.drain_events() {
                match event {
                    CharacterEvent::EffectFired {
                        slot,
                        skill,
                        target,
                    } => {
                        let target_alive = target
                            .entity()
                            .is_none_or(|id| views.target(id).is_some_and(|view| view.alive));
                        if target_alive {
                            events.push(CombatEvent::EffectFired {
                                actor,
                                slot,
                                skill,
                                target,
                                damage_bonus: character.damage_bonus(),
                            });
                        } else {
                            character.fizzle(slot);
                            events.push(CombatEvent::Fizzled { actor, slot });
                        }
                    }
                    CharacterEvent::CastFinished { slot, effect_fired } => {
                        events.push(CombatEvent::CastFinished {
                            actor,
                            slot,
                            effect_fired,
                        });
                    }
                    CharacterEvent::Died => events.push(CombatEvent::Died { actor }),
                }
            }
        }
    }
}
