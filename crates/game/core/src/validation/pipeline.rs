//! The ordered cast checks.

use std::sync::Arc;

use super::{CastCounter, CastFailure, TelemetrySink};
use crate::error::GameError;
use crate::cast::CastTarget;
use crate::character::Character;
use crate::config::CombatConfig;
use crate::env::{Skill, TargetKind};
use crate::state::{EntityId, Position, Team};

/// A cast intent: which slot, aimed at what.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastRequest {
    pub slot: usize,
    pub target: CastTarget,
}

impl CastRequest {
    pub fn new(slot: usize, target: CastTarget) -> Self {
        Self { slot, target }
    }

    pub fn at_entity(slot: usize, target: EntityId) -> Self {
        Self::new(slot, CastTarget::Entity(target))
    }
}

/// Read-only facts about a potential target, captured once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetView {
    pub id: EntityId,
    pub team: Team,
    pub position: Position,
    pub alive: bool,
}

/// Resolves target ids to their current view.
pub trait TargetLookup {
    fn target(&self, id: EntityId) -> Option<TargetView>;
}

impl TargetLookup for [TargetView] {
    fn target(&self, id: EntityId) -> Option<TargetView> {
        self.iter().find(|view| view.id == id).copied()
    }
}

/// A cast that passed every check, with its costs resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedCast {
    pub skill: Arc<Skill>,
    pub slot: usize,
    /// Target normalised for the skill's kind.
    pub target: CastTarget,
    /// Energy to deduct, after cost multipliers and any free cast.
    pub energy_cost: u32,
    /// Whether a full grit bar pays for this cast.
    pub free_cast: bool,
}

/// Runs the checks in contract order and stops at the first failure.
pub fn validate_cast(
    caster: &Character,
    request: &CastRequest,
    lookup: &(impl TargetLookup + ?Sized),
    config: &CombatConfig,
    telemetry: Option<&dyn TelemetrySink>,
) -> Result<ValidatedCast, CastFailure> {
    let result = run_checks(caster, request, lookup, config, telemetry);
    if let Err(failure) = &result {
        tracing::debug!(
            actor = %caster.id(),
            slot = request.slot,
            reason = %failure,
            code = failure.error_code(),
            severity = failure.severity().as_str(),
            "cast rejected"
        );
    }
    result
}

fn run_checks(
    caster: &Character,
    request: &CastRequest,
    lookup: &(impl TargetLookup + ?Sized),
    config: &CombatConfig,
    telemetry: Option<&dyn TelemetrySink>,
) -> Result<ValidatedCast, CastFailure> {
    if caster.is_dead() {
        return Err(CastFailure::CasterDead);
    }
    if !caster.cast_state().is_idle() {
        return Err(CastFailure::AlreadyCasting);
    }
    if !caster.cooldowns().is_ready(request.slot) {
        emit(telemetry, CastCounter::CooldownBlocked);
        return Err(CastFailure::OnCooldown);
    }
    let skill = caster
        .skills()
        .get(request.slot)
        .ok_or(CastFailure::NoSkill)?;

    let (energy_cost, free_cast) = check_energy(caster, skill, telemetry)?;
    caster
        .mechanic()
        .check_costs(&skill.costs, caster.ledger(), config)?;
    let (target, point) = resolve_target(caster, skill, request.target, lookup)?;
    check_range(caster, skill, point, telemetry)?;

    Ok(ValidatedCast {
        skill: Arc::clone(skill),
        slot: request.slot,
        target,
        energy_cost,
        free_cast,
    })
}

fn emit(telemetry: Option<&dyn TelemetrySink>, counter: CastCounter) {
    if let Some(sink) = telemetry {
        sink.record(counter);
    }
}

fn check_energy(
    caster: &Character,
    skill: &Skill,
    telemetry: Option<&dyn TelemetrySink>,
) -> Result<(u32, bool), CastFailure> {
    if !skill.costs.is_free() {
        emit(telemetry, CastCounter::CastAttemptedWithCost);
    }
    if skill.costs.energy == 0 {
        return Ok((0, false));
    }

    if caster.mechanic().free_cast_available(&skill.costs) {
        return Ok((0, true));
    }

    let multiplier = caster.conditions().energy_cost_multiplier().max(0.0);
    let cost = (skill.costs.energy as f32 * multiplier).round() as u32;
    if caster.ledger().energy() < cost {
        emit(telemetry, CastCounter::NoEnergyBlocked);
        return Err(CastFailure::NoEnergy);
    }
    Ok((cost, false))
}

/// Normalises the requested target for the skill's kind and returns the
/// point that range is measured to.
fn resolve_target(
    caster: &Character,
    skill: &Skill,
    requested: CastTarget,
    lookup: &(impl TargetLookup + ?Sized),
) -> Result<(CastTarget, Option<Position>), CastFailure> {
    if skill.target.needs_entity() {
        let id = requested.entity().ok_or(CastFailure::NoTarget)?;
        let view = lookup.target(id).ok_or(CastFailure::NoTarget)?;
        if !view.alive {
            return Err(CastFailure::TargetDead);
        }
        return Ok((CastTarget::Entity(id), Some(view.position)));
    }

    match skill.target {
        TargetKind::Ground => {
            let point = match requested {
                CastTarget::Ground(point) => point,
                CastTarget::Entity(id) => lookup
                    .target(id)
                    .map_or(caster.position(), |view| view.position),
                CastTarget::Caster => caster.position(),
            };
            Ok((CastTarget::Ground(point), Some(point)))
        }
        _ => Ok((CastTarget::Caster, None)),
    }
}

fn check_range(
    caster: &Character,
    skill: &Skill,
    point: Option<Position>,
    telemetry: Option<&dyn TelemetrySink>,
) -> Result<(), CastFailure> {
    let Some(point) = point else {
        return Ok(());
    };
    if caster.position().distance_to(point) > skill.range {
        emit(telemetry, CastCounter::OutOfRangeBlocked);
        return Err(CastFailure::OutOfRange);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{SkillCosts, SkillId};
    use crate::state::{School, SkillBar};
    use crate::validation::CastCounters;

    fn snowball() -> Arc<Skill> {
        Arc::new(
            Skill::new(SkillId(1), "Snowball", TargetKind::Enemy)
                .with_activation(1.0)
                .with_recharge(4.0)
                .with_range(10.0)
                .with_costs(SkillCosts::energy(10)),
        )
    }

    fn caster(school: School, energy: u32) -> Character {
        Character::new(EntityId(1), "caster", Team(0), school)
            .with_resources(100.0, energy)
            .with_skills(SkillBar::from_skills([snowball()]))
    }

    fn views(target_at: Position, alive: bool) -> Vec<TargetView> {
        vec![TargetView {
            id: EntityId(2),
            team: Team(1),
            position: target_at,
            alive,
        }]
    }

    fn no_views() -> Vec<TargetView> {
        Vec::new()
    }

    #[test]
    fn energy_is_checked_before_range() {
        let mut character = caster(School::Public, 20);
        character.ledger_mut().spend(15);
        let far = views(Position::new(50.0, 0.0), true);
        let request = CastRequest::at_entity(0, EntityId(2));

        let result = validate_cast(
            &character,
            &request,
            far.as_slice(),
            &CombatConfig::default(),
            None,
        );
        assert_eq!(result.unwrap_err(), CastFailure::NoEnergy);
    }

    #[test]
    fn cooldown_is_checked_before_empty_slot_and_energy() {
        let mut character = caster(School::Public, 20);
        character.ledger_mut().spend(20);
        character.cooldowns_mut().start(3, 2.0);
        let near = views(Position::new(1.0, 0.0), true);
        let counters = CastCounters::new();

        let result = validate_cast(
            &character,
            &CastRequest::at_entity(3, EntityId(2)),
            near.as_slice(),
            &CombatConfig::default(),
            Some(&counters),
        );
        assert_eq!(result.unwrap_err(), CastFailure::OnCooldown);
        assert_eq!(counters.get(CastCounter::CooldownBlocked), 1);
    }

    #[test]
    fn target_checks_distinguish_missing_and_dead() {
        let character = caster(School::Public, 20);
        let config = CombatConfig::default();
        let dead = views(Position::new(1.0, 0.0), false);

        let missing = validate_cast(
            &character,
            &CastRequest::new(0, CastTarget::Caster),
            dead.as_slice(),
            &config,
            None,
        );
        assert_eq!(missing.unwrap_err(), CastFailure::NoTarget);

        let unknown = validate_cast(
            &character,
            &CastRequest::at_entity(0, EntityId(9)),
            dead.as_slice(),
            &config,
            None,
        );
        assert_eq!(unknown.unwrap_err(), CastFailure::NoTarget);

        let corpse = validate_cast(
            &character,
            &CastRequest::at_entity(0, EntityId(2)),
            dead.as_slice(),
            &config,
            None,
        );
        assert_eq!(corpse.unwrap_err(), CastFailure::TargetDead);
    }

    #[test]
    fn telemetry_never_changes_the_outcome() {
        let character = caster(School::Public, 20);
        let config = CombatConfig::default();
        let far = views(Position::new(50.0, 0.0), true);
        let request = CastRequest::at_entity(0, EntityId(2));
        let counters = CastCounters::new();

        let silent = validate_cast(&character, &request, far.as_slice(), &config, None);
        let observed =
            validate_cast(&character, &request, far.as_slice(), &config, Some(&counters));
        assert_eq!(silent, observed);
        assert_eq!(silent.unwrap_err(), CastFailure::OutOfRange);
        assert_eq!(counters.get(CastCounter::CastAttemptedWithCost), 1);
        assert_eq!(counters.get(CastCounter::OutOfRangeBlocked), 1);
    }

    #[test]
    fn school_only_costs_count_as_costed_attempts() {
        let on_credit = Arc::new(
            Skill::new(SkillId(2), "Put It On My Tab", TargetKind::SelfOnly).with_costs(
                SkillCosts {
                    credit: 3,
                    ..SkillCosts::default()
                },
            ),
        );
        let free = Arc::new(Skill::new(SkillId(3), "Wave", TargetKind::SelfOnly));
        let character = Character::new(EntityId(1), "caster", Team(0), School::Private)
            .with_skills(SkillBar::from_skills([on_credit, free]));
        let counters = CastCounters::new();
        let config = CombatConfig::default();

        let validated = validate_cast(
            &character,
            &CastRequest::new(0, CastTarget::Caster),
            no_views().as_slice(),
            &config,
            Some(&counters),
        )
        .unwrap();
        assert_eq!(validated.energy_cost, 0);
        assert_eq!(counters.get(CastCounter::CastAttemptedWithCost), 1);

        validate_cast(
            &character,
            &CastRequest::new(1, CastTarget::Caster),
            no_views().as_slice(),
            &config,
            Some(&counters),
        )
        .unwrap();
        assert_eq!(counters.get(CastCounter::CastAttemptedWithCost), 1);
    }

    #[test]
    fn cost_multiplier_scales_energy() {
        use crate::conditions::{EffectDefinition, EffectId};

        let mut character = caster(School::Public, 20);
        let tax = Arc::new(
            EffectDefinition::new(EffectId(1), "Brain Fog", 5_000)
                .debuff()
                .with_energy_cost(1.5),
        );
        character.add_effect(&tax, 1, None, &Default::default());
        character.ledger_mut().spend(6);

        let near = views(Position::new(1.0, 0.0), true);
        let result = validate_cast(
            &character,
            &CastRequest::at_entity(0, EntityId(2)),
            near.as_slice(),
            &CombatConfig::default(),
            None,
        );
        assert_eq!(result.unwrap_err(), CastFailure::NoEnergy);

        character.ledger_mut().restore_energy(1, 20);
        let validated = validate_cast(
            &character,
            &CastRequest::at_entity(0, EntityId(2)),
            near.as_slice(),
            &CombatConfig::default(),
            None,
        )
        .unwrap();
        assert_eq!(validated.energy_cost, 15);
    }

    #[test]
    fn full_grit_bar_waives_energy() {
        let mut character = caster(School::Public, 20);
        character.ledger_mut().spend(20);
        if let crate::state::SchoolMechanic::Grit(grit) = character.mechanic_mut() {
            grit.add(CombatConfig::MAX_GRIT);
        }

        let near = views(Position::new(1.0, 0.0), true);
        let validated = validate_cast(
            &character,
            &CastRequest::at_entity(0, EntityId(2)),
            near.as_slice(),
            &CombatConfig::default(),
            None,
        )
        .unwrap();
        assert!(validated.free_cast);
        assert_eq!(validated.energy_cost, 0);
    }
}
