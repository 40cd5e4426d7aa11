//! The character aggregate.
//!
//! A [`Character`] owns one of each combat component and is the only type
//! that sequences them. Components never reach into each other; every
//! cross-component rule (pips from conditions, recharge on a finished cast,
//! the monitor freezing on death) lives here.
mod casting;
mod error;

pub use error::SacrificeError;

use std::sync::Arc;

use crate::cast::{AutoAttack, CastState, CastTarget, Cooldowns, SkillQueue};
use crate::conditions::{Chill, ConditionEngine, Cozy, EffectDefinition, PipTable};
use crate::config::{CombatConfig, CombatRules};
use crate::env::Skill;
use crate::monitor::DamageMonitor;
use crate::state::{
    EntityId, Position, RegenRates, ResourceLedger, School, SchoolMechanic, SkillBar, Team,
    sacrifice_affordable,
};
use crate::validation::TargetView;

/// Something that happened to a character during a tick or a command,
/// collected until the owner drains them.
#[derive(Clone, Debug, PartialEq)]
pub enum CharacterEvent {
    /// A skill's effect fired and should be resolved against its target.
    EffectFired {
        slot: usize,
        skill: Arc<Skill>,
        target: CastTarget,
    },
    /// Aftercast ended.
    CastFinished { slot: usize, effect_fired: bool },
    Died,
}

#[derive(Clone, Debug)]
pub struct Character {
    id: EntityId,
    name: String,
    team: Team,
    position: Position,
    previous_position: Position,
    ledger: ResourceLedger,
    mechanic: SchoolMechanic,
    conditions: ConditionEngine,
    cast: CastState,
    cooldowns: Cooldowns,
    auto_attack: AutoAttack,
    queue: SkillQueue,
    skills: SkillBar,
    monitor: DamageMonitor,
    dead: bool,
    /// Sub-millisecond time not yet handed to the condition timers.
    ms_remainder: f32,
    events: Vec<CharacterEvent>,
}

impl Character {
    pub fn new(id: EntityId, name: impl Into<String>, team: Team, school: School) -> Self {
        Self {
            id,
            name: name.into(),
            team,
            position: Position::ORIGIN,
            previous_position: Position::ORIGIN,
            ledger: ResourceLedger::new(
                CombatConfig::DEFAULT_MAX_WARMTH,
                CombatConfig::DEFAULT_MAX_ENERGY,
            ),
            mechanic: school.mechanic(),
            conditions: ConditionEngine::new(),
            cast: CastState::Idle,
            cooldowns: Cooldowns::new(),
            auto_attack: AutoAttack::default(),
            queue: SkillQueue::default(),
            skills: SkillBar::new(),
            monitor: DamageMonitor::new(),
            dead: false,
            ms_remainder: 0.0,
            events: Vec::new(),
        }
    }

    /// Replaces the ledger with a full one of the given size.
    pub fn with_resources(mut self, max_warmth: f32, max_energy: u32) -> Self {
        self.ledger = ResourceLedger::new(max_warmth, max_energy);
        self
    }

    pub fn with_skills(mut self, skills: SkillBar) -> Self {
        self.skills = skills;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self.previous_position = position;
        self
    }

    // ===== accessors =====

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn school(&self) -> School {
        self.mechanic.school()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Position before the last move, for interpolation.
    pub fn previous_position(&self) -> Position {
        self.previous_position
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut ResourceLedger {
        &mut self.ledger
    }

    pub fn mechanic(&self) -> &SchoolMechanic {
        &self.mechanic
    }

    pub fn mechanic_mut(&mut self) -> &mut SchoolMechanic {
        &mut self.mechanic
    }

    pub fn conditions(&self) -> &ConditionEngine {
        &self.conditions
    }

    pub fn cast_state(&self) -> &CastState {
        &self.cast
    }

    pub fn cooldowns(&self) -> &Cooldowns {
        &self.cooldowns
    }

    pub fn cooldowns_mut(&mut self) -> &mut Cooldowns {
        &mut self.cooldowns
    }

    pub fn auto_attack(&self) -> &AutoAttack {
        &self.auto_attack
    }

    pub fn queue(&self) -> &SkillQueue {
        &self.queue
    }

    pub fn skills(&self) -> &SkillBar {
        &self.skills
    }

    pub fn monitor(&self) -> &DamageMonitor {
        &self.monitor
    }

    /// Records a hit from another character. The combat resolver calls this
    /// with exclusive access to the tick.
    pub fn monitor_mut(&mut self) -> &mut DamageMonitor {
        &mut self.monitor
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Max energy minus outstanding debt.
    pub fn effective_max_energy(&self) -> u32 {
        self.mechanic
            .effective_max_energy(self.ledger.max_energy())
    }

    /// Bonus the resolver applies to this character's damage.
    pub fn damage_bonus(&self) -> f32 {
        self.mechanic.damage_bonus()
    }

    pub fn movement_speed_multiplier(&self) -> f32 {
        self.conditions.movement_speed_multiplier()
    }

    pub fn target_view(&self) -> TargetView {
        TargetView {
            id: self.id,
            team: self.team,
            position: self.position,
            alive: !self.dead,
        }
    }

    pub fn drain_events(&mut self) -> Vec<CharacterEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== tick =====

    /// Advances every component by `dt` seconds.
    ///
    /// Order: conditions, regeneration, school timers, damage monitor,
    /// cooldowns and auto-attack, then the cast machine. Dead characters do
    /// not tick.
    pub fn tick(&mut self, dt: f32, rules: &CombatRules) {
        if self.dead || dt <= 0.0 {
            return;
        }
        let config = &rules.config;

        self.tick_conditions(dt, &rules.pips);

        let rates = RegenRates {
            energy_per_second: config.energy_regen_per_second
                * self.conditions.energy_regen_multiplier(),
            energy_cap: self.effective_max_energy(),
        };
        if self.ledger.tick_regen(dt, rates) {
            self.die();
            return;
        }

        self.mechanic.tick(dt, config);
        self.monitor.update(dt, config.damage_source_idle_seconds);
        self.cooldowns.tick(dt);
        self.auto_attack.tick(dt);

        if let Some(event) = self.cast.update(dt, true, config.aftercast_seconds) {
            self.on_cast_event(event, config);
        }
    }

    fn tick_conditions(&mut self, dt: f32, pips: &PipTable) {
        let elapsed = dt * 1000.0 + self.ms_remainder;
        let whole = elapsed.floor();
        self.ms_remainder = elapsed - whole;
        if self.conditions.update(whole as u32) {
            self.refresh_pips(pips);
        }
    }

    fn refresh_pips(&mut self, pips: &PipTable) {
        self.ledger
            .set_pips(self.conditions.recalculate_pips(pips));
    }

    // ===== conditions =====

    pub fn add_chill(
        &mut self,
        tag: Chill,
        duration_ms: u32,
        intensity: u8,
        source: Option<EntityId>,
        pips: &PipTable,
    ) -> bool {
        if self.dead {
            return false;
        }
        let added = self.conditions.add_chill(tag, duration_ms, intensity, source);
        if added {
            self.refresh_pips(pips);
        }
        added
    }

    pub fn add_cozy(
        &mut self,
        tag: Cozy,
        duration_ms: u32,
        intensity: u8,
        source: Option<EntityId>,
        pips: &PipTable,
    ) -> bool {
        if self.dead {
            return false;
        }
        let added = self.conditions.add_cozy(tag, duration_ms, intensity, source);
        if added {
            self.refresh_pips(pips);
        }
        added
    }

    pub fn add_effect(
        &mut self,
        definition: &Arc<EffectDefinition>,
        intensity: u8,
        source: Option<EntityId>,
        pips: &PipTable,
    ) -> bool {
        if self.dead {
            return false;
        }
        let added = self.conditions.add_effect(definition, intensity, source);
        if added {
            self.refresh_pips(pips);
        }
        added
    }

    pub fn remove_chill(&mut self, tag: Chill, pips: &PipTable) -> bool {
        let removed = self.conditions.remove_chill(tag);
        if removed {
            self.refresh_pips(pips);
        }
        removed
    }

    pub fn remove_cozy(&mut self, tag: Cozy, pips: &PipTable) -> bool {
        let removed = self.conditions.remove_cozy(tag);
        if removed {
            self.refresh_pips(pips);
        }
        removed
    }

    /// Removes every chill; returns how many were removed.
    pub fn cleanse(&mut self, pips: &PipTable) -> usize {
        let removed = self.conditions.cleanse_chills();
        if removed > 0 {
            self.refresh_pips(pips);
        }
        removed
    }

    /// Removes every cozy; returns how many were removed.
    pub fn strip_cozies(&mut self, pips: &PipTable) -> usize {
        let removed = self.conditions.strip_cozies();
        if removed > 0 {
            self.refresh_pips(pips);
        }
        removed
    }

    // ===== damage, death, resurrection =====

    /// Applies damage and records the attribution. Returns `true` when this
    /// hit killed the character.
    pub fn apply_damage(&mut self, amount: f32, skill_name: &str, source: Option<EntityId>) -> bool {
        if self.dead {
            return false;
        }
        if let Some(source) = source {
            self.monitor.record(skill_name, source);
        }
        if self.ledger.apply_damage(amount) {
            self.die();
            return true;
        }
        false
    }

    pub fn heal(&mut self, amount: f32) {
        if !self.dead {
            self.ledger.heal(amount);
        }
    }

    /// Forces the character into the dead state from anywhere.
    pub fn die(&mut self) {
        if self.dead {
            return;
        }
        self.dead = true;
        self.cast.reset();
        self.queue.clear();
        self.auto_attack.stop();
        self.conditions.clear();
        self.ledger.set_pips(0);
        self.monitor.freeze();
        self.events.push(CharacterEvent::Died);
        tracing::debug!(actor = %self.id, name = %self.name, "character died");
    }

    /// Brings a dead character back with the given resource fractions.
    pub fn resurrect(&mut self, warmth_fraction: f32, energy_fraction: f32) -> bool {
        if !self.dead {
            return false;
        }
        self.dead = false;
        self.ledger.restore_warmth_fraction(warmth_fraction);
        self.ledger.restore_energy_fraction(energy_fraction);
        let cap = self.effective_max_energy();
        self.ledger.clamp_energy_to(cap);
        self.monitor.unfreeze();
        tracing::debug!(actor = %self.id, "character resurrected");
        true
    }

    // ===== school actions =====

    /// Converts warmth into energy. Homeschool only, gated by its own
    /// cooldown and the warmth floor. Returns the energy actually gained.
    pub fn convert_warmth_to_energy(&mut self, config: &CombatConfig) -> Result<u32, SacrificeError> {
        if self.dead {
            return Err(SacrificeError::Dead);
        }
        let cap = self.effective_max_energy();
        let school = self.school();
        let SchoolMechanic::Sacrifice(state) = &mut self.mechanic else {
            return Err(SacrificeError::WrongSchool(school));
        };
        if !state.is_ready() {
            return Err(SacrificeError::OnCooldown {
                remaining: state.cooldown(),
            });
        }
        if !sacrifice_affordable(
            &self.ledger,
            config.sacrifice_warmth_cost,
            config.min_warmth_after_sacrifice,
        ) {
            return Err(SacrificeError::InsufficientWarmth);
        }

        state.start_cooldown(config.sacrifice_cooldown_seconds);
        self.ledger.sacrifice_warmth(config.sacrifice_warmth_cost);
        let before = self.ledger.energy();
        self.ledger.restore_energy(config.sacrifice_energy_gain, cap);
        Ok(self.ledger.energy() - before)
    }

    // ===== movement and auto-attack =====

    /// Applies a movement delta. Manual movement abandons any queued
    /// approach cast; approach-driven movement keeps it.
    pub fn move_by(&mut self, dx: f32, dy: f32, manual: bool) -> bool {
        if self.dead {
            return false;
        }
        self.previous_position = self.position;
        self.position = self.position.offset(dx, dy);
        if manual {
            self.queue.clear();
        }
        true
    }

    pub fn start_auto_attack(&mut self, target: EntityId) -> bool {
        if self.dead || target == self.id {
            return false;
        }
        self.auto_attack.start(target);
        true
    }

    pub fn stop_auto_attack(&mut self) {
        self.auto_attack.stop();
    }

    /// Target of a due swing. Held while dead or while the cast machine is
    /// busy.
    pub fn auto_attack_ready(&self) -> Option<EntityId> {
        if self.dead {
            return None;
        }
        self.auto_attack.ready(self.cast.is_idle())
    }

    pub fn complete_swing(&mut self, interval: f32) {
        self.auto_attack.swing(interval);
    }
}
