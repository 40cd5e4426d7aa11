use std::sync::Arc;

use arena_core::{
    Battle, CastCounter, CastCounters, CastPhase, CastResult, CastTarget, Character, Chill,
    CombatEvent, CombatRules, Cozy, EntityId, Intent, Position, School, SchoolMechanic, Skill,
    SkillBar, SkillCosts, SkillId, SkillType, TargetKind, Team, TelemetrySink,
};
use arena_core::state::StateError;

const CASTER: EntityId = EntityId(1);
const ENEMY: EntityId = EntityId(2);

fn snowball(energy: u32, range: f32) -> Arc<Skill> {
    Arc::new(
        Skill::new(SkillId(1), "Snowball", TargetKind::Enemy)
            .with_type(SkillType::Throw)
            .with_activation(1.0)
            .with_recharge(4.0)
            .with_range(range)
            .with_costs(SkillCosts::energy(energy))
            .with_power(12.0),
    )
}

fn battle_with(caster: Character, enemy_at: Position) -> Battle {
    let mut battle = Battle::new(CombatRules::default());
    battle.spawn(caster).unwrap();
    battle
        .spawn(Character::new(ENEMY, "Target", Team(1), School::Public).at(enemy_at))
        .unwrap();
    battle
}

fn caster(school: School, max_energy: u32, skills: SkillBar) -> Character {
    Character::new(CASTER, "Caster", Team(0), school)
        .with_resources(100.0, max_energy)
        .with_skills(skills)
}

fn cast(slot: usize, target: CastTarget) -> Intent {
    Intent::cast(CASTER, slot, target)
}

fn results(events: &[CombatEvent]) -> Vec<CastResult> {
    events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::CastResolved { result, .. } => Some(*result),
            _ => None,
        })
        .collect()
}

/// Full cast lifecycle:
/// 1. 10/10 energy, a 10-energy skill with one second of activation
/// 2. casting drains energy immediately and enters activation
/// 3. activation completes and the effect fires
/// 4. aftercast ends, returning to idle with the recharge applied
#[test]
fn cast_runs_activation_aftercast_and_recharge() {
    let mut battle = battle_with(
        caster(School::Public, 10, SkillBar::from_skills([snowball(10, 20.0)])),
        Position::new(5.0, 0.0),
    );
    let aftercast = battle.rules().config.aftercast_seconds;

    // ================================================================
    // Cast start
    // ================================================================
    let events = battle.step(0.0, &[cast(0, CastTarget::Entity(ENEMY))]);
    assert_eq!(results(&events), vec![CastResult::CastingStarted]);
    let me = battle.character(CASTER).unwrap();
    assert_eq!(me.cast_state().phase(), CastPhase::Activating);
    assert_eq!(me.ledger().energy(), 0);

    // ================================================================
    // Activation
    // ================================================================
    assert!(battle.step(0.5, &[]).is_empty());
    let events = battle.step(0.5, &[]);
    assert!(matches!(
        events.as_slice(),
        [CombatEvent::EffectFired { actor: CASTER, slot: 0, target: CastTarget::Entity(ENEMY), .. }]
    ));
    let me = battle.character(CASTER).unwrap();
    assert_eq!(me.cast_state().phase(), CastPhase::Aftercast);
    assert!(me.cooldowns().is_ready(0));

    // ================================================================
    // Aftercast
    // ================================================================
    let events = battle.step(aftercast, &[]);
    assert_eq!(
        events,
        vec![CombatEvent::CastFinished {
            actor: CASTER,
            slot: 0,
            effect_fired: true
        }]
    );
    let me = battle.character(CASTER).unwrap();
    assert!(me.cast_state().is_idle());
    assert_eq!(me.cooldowns().remaining(0), 4.0);
    assert_eq!(me.ledger().energy(), 0);

    let events = battle.step(0.0, &[cast(0, CastTarget::Entity(ENEMY))]);
    assert_eq!(results(&events), vec![CastResult::OnCooldown]);
}

#[test]
fn energy_failure_is_reported_before_range() {
    let mut battle = battle_with(
        caster(School::Public, 5, SkillBar::from_skills([snowball(10, 5.0)])),
        Position::new(50.0, 0.0),
    );

    let events = battle.step(0.0, &[cast(0, CastTarget::Entity(ENEMY))]);
    assert_eq!(results(&events), vec![CastResult::NoEnergy]);
    assert!(battle.character(CASTER).unwrap().queue().is_empty());
}

#[test]
fn cast_at_dead_target_fizzles_without_recharge() {
    let mut battle = battle_with(
        caster(School::Public, 20, SkillBar::from_skills([snowball(5, 20.0)])),
        Position::new(5.0, 0.0),
    );
    battle.step(0.0, &[cast(0, CastTarget::Entity(ENEMY))]);

    assert!(battle.apply_damage(ENEMY, 500.0, "Avalanche", None).unwrap());
    let events = battle.step(1.0, &[]);
    assert_eq!(
        events,
        vec![
            CombatEvent::Fizzled {
                actor: CASTER,
                slot: 0
            },
            CombatEvent::Died { actor: ENEMY },
        ]
    );

    let events = battle.step(battle.rules().config.aftercast_seconds, &[]);
    assert_eq!(
        events,
        vec![CombatEvent::CastFinished {
            actor: CASTER,
            slot: 0,
            effect_fired: false
        }]
    );
    assert!(battle.character(CASTER).unwrap().cooldowns().is_ready(0));
}

#[test]
fn interrupt_stops_activation_and_keeps_costs_paid() {
    let mut battle = battle_with(
        caster(School::Public, 10, SkillBar::from_skills([snowball(10, 20.0)])),
        Position::new(5.0, 0.0),
    );
    let events = battle.step(0.0, &[cast(0, CastTarget::Entity(ENEMY))]);
    assert_eq!(results(&events), vec![CastResult::CastingStarted]);

    assert_eq!(battle.interrupt(CASTER), Ok(true));
    let me = battle.character(CASTER).unwrap();
    assert_eq!(me.cast_state().phase(), CastPhase::Idle);
    assert_eq!(me.ledger().energy(), 0);

    let events = battle.step(1.0 + battle.rules().config.aftercast_seconds, &[]);
    assert!(!events.iter().any(|e| matches!(
        e,
        CombatEvent::EffectFired { .. } | CombatEvent::CastFinished { .. }
    )));
    assert!(battle.character(CASTER).unwrap().cooldowns().is_ready(0));

    assert_eq!(battle.interrupt(CASTER), Ok(false));
    assert_eq!(
        battle.interrupt(EntityId(42)),
        Err(StateError::CharacterNotFound(EntityId(42)))
    );
}

#[test]
fn death_during_aftercast_applies_no_recharge() {
    let mut battle = battle_with(
        caster(School::Public, 20, SkillBar::from_skills([snowball(5, 20.0)])),
        Position::new(5.0, 0.0),
    );
    battle.step(0.0, &[cast(0, CastTarget::Entity(ENEMY))]);
    battle.step(1.0, &[]);
    assert_eq!(
        battle.character(CASTER).unwrap().cast_state().phase(),
        CastPhase::Aftercast
    );

    assert_eq!(battle.apply_damage(CASTER, 500.0, "Avalanche", Some(ENEMY)), Ok(true));
    let me = battle.character(CASTER).unwrap();
    assert!(me.is_dead());
    assert_eq!(me.cast_state().phase(), CastPhase::Idle);

    let events = battle.step(battle.rules().config.aftercast_seconds, &[]);
    assert_eq!(events, vec![CombatEvent::Died { actor: CASTER }]);
    assert!(battle.character(CASTER).unwrap().cooldowns().is_ready(0));
}

#[test]
fn auto_attack_never_swings_while_casting() {
    let stance = Arc::new(
        Skill::new(SkillId(3), "Hunker Down", TargetKind::SelfOnly)
            .with_type(SkillType::Stance)
            .with_activation(1.0)
            .with_costs(SkillCosts::energy(5)),
    );
    let mut battle = battle_with(
        caster(School::Public, 20, SkillBar::from_skills([stance])),
        Position::new(2.0, 0.0),
    );
    let swung = |events: &[CombatEvent]| {
        events
            .iter()
            .any(|e| matches!(e, CombatEvent::AutoAttack { actor: CASTER, .. }))
    };

    let events = battle.step(
        0.0,
        &[
            Intent::StartAutoAttack {
                actor: CASTER,
                target: ENEMY,
            },
            cast(0, CastTarget::Caster),
        ],
    );
    assert!(!swung(&events));
    assert!(!swung(&battle.step(0.5, &[])));
    assert!(!swung(&battle.step(0.5, &[])));

    let aftercast = battle.rules().config.aftercast_seconds;
    let events = battle.step(aftercast, &[]);
    assert!(swung(&events));
    assert!(!swung(&battle.step(0.5, &[])));
}

#[test]
fn queued_cast_starts_once_approach_closes_the_gap() {
    let mut battle = battle_with(
        caster(School::Public, 20, SkillBar::from_skills([snowball(5, 5.0)])),
        Position::new(8.0, 0.0),
    );

    let events = battle.step(0.0, &[cast(0, CastTarget::Entity(ENEMY))]);
    assert_eq!(results(&events), vec![CastResult::OutOfRange]);
    let approach = battle
        .characters()
        .iter()
        .find(|c| c.id() == CASTER)
        .unwrap();
    assert!(!approach.queue().is_empty());
    assert_eq!(approach.ledger().energy(), 20);

    let step = Intent::Approach {
        actor: CASTER,
        dx: 2.0,
        dy: 0.0,
    };
    assert!(results(&battle.step(0.1, &[step])).is_empty());
    let events = battle.step(0.1, &[step]);
    assert_eq!(results(&events), vec![CastResult::CastingStarted]);
    assert_eq!(battle.character(CASTER).unwrap().ledger().energy(), 15);
}

#[test]
fn queued_cast_is_dropped_when_target_dies() {
    let mut battle = battle_with(
        caster(School::Public, 20, SkillBar::from_skills([snowball(5, 5.0)])),
        Position::new(8.0, 0.0),
    );
    battle.step(0.0, &[cast(0, CastTarget::Entity(ENEMY))]);
    battle.apply_damage(ENEMY, 500.0, "Avalanche", None).unwrap();

    battle.step(0.1, &[]);
    assert!(battle.character(CASTER).unwrap().queue().is_empty());
}

#[test]
fn chill_and_cozy_net_out_to_minus_four_pips() {
    let mut battle = battle_with(
        caster(School::Public, 20, SkillBar::new()),
        Position::new(5.0, 0.0),
    );
    assert!(battle
        .apply_chill(CASTER, Chill::Soaked, 10_000, 3, Some(ENEMY))
        .unwrap());
    assert!(battle
        .apply_cozy(CASTER, Cozy::HotCocoa, 10_000, 1, None)
        .unwrap());

    assert_eq!(battle.character(CASTER).unwrap().ledger().pips(), -4);

    // -4 pips at 2 warmth per pip is 8 warmth per second.
    battle.step(1.0, &[]);
    assert_eq!(battle.character(CASTER).unwrap().ledger().warmth(), 92.0);
}

#[test]
fn full_grit_bar_pays_for_a_cast() {
    let builder = Arc::new(
        Skill::new(SkillId(4), "Packed Snow", TargetKind::SelfOnly)
            .with_costs(SkillCosts::energy(5))
            .with_grit_gain(5),
    );
    let spender = Arc::new(
        Skill::new(SkillId(5), "Snow Fort", TargetKind::SelfOnly)
            .with_type(SkillType::Fort)
            .with_costs(SkillCosts::energy(8)),
    );
    let mut battle = battle_with(
        caster(School::Public, 20, SkillBar::from_skills([builder, spender])),
        Position::new(5.0, 0.0),
    );
    let aftercast = battle.rules().config.aftercast_seconds;

    let events = battle.step(0.0, &[cast(0, CastTarget::Caster)]);
    assert_eq!(results(&events), vec![CastResult::Success]);
    battle.step(aftercast, &[]);
    let me = battle.character(CASTER).unwrap();
    assert_eq!(me.ledger().energy(), 15);
    assert!(matches!(me.mechanic(), SchoolMechanic::Grit(g) if g.free_cast_ready()));

    let events = battle.step(0.0, &[cast(1, CastTarget::Caster)]);
    assert_eq!(results(&events), vec![CastResult::Success]);
    let me = battle.character(CASTER).unwrap();
    assert_eq!(me.ledger().energy(), 15);
    assert!(matches!(me.mechanic(), SchoolMechanic::Grit(g) if g.stacks() == 0));
}

#[test]
fn rhythm_cost_needs_built_charge() {
    let finisher = Arc::new(
        Skill::new(SkillId(6), "Drum Roll", TargetKind::SelfOnly).with_costs(SkillCosts {
            rhythm: 2,
            ..SkillCosts::default()
        }),
    );
    let opener = Arc::new(Skill::new(SkillId(7), "Clap", TargetKind::SelfOnly));
    let mut battle = battle_with(
        caster(School::Waldorf, 20, SkillBar::from_skills([finisher, opener])),
        Position::new(5.0, 0.0),
    );
    let aftercast = battle.rules().config.aftercast_seconds;

    let events = battle.step(0.0, &[cast(0, CastTarget::Caster)]);
    assert_eq!(results(&events), vec![CastResult::NoRhythm]);

    // Clap twice: +1, then +2 inside the perfect window.
    battle.step(0.0, &[cast(1, CastTarget::Caster)]);
    battle.step(aftercast, &[]);
    battle.step(0.0, &[cast(1, CastTarget::Caster)]);
    battle.step(aftercast, &[]);
    let me = battle.character(CASTER).unwrap();
    assert!(matches!(me.mechanic(), SchoolMechanic::Rhythm(r) if r.charge() == 3));

    let events = battle.step(0.0, &[cast(0, CastTarget::Caster)]);
    assert_eq!(results(&events), vec![CastResult::Success]);
}

#[test]
fn credit_lowers_effective_max_energy() {
    let loan = Arc::new(
        Skill::new(SkillId(8), "Tuition Loan", TargetKind::SelfOnly).with_costs(SkillCosts {
            credit: 10,
            ..SkillCosts::default()
        }),
    );
    let mut battle = battle_with(
        caster(School::Private, 20, SkillBar::from_skills([loan])),
        Position::new(5.0, 0.0),
    );
    let aftercast = battle.rules().config.aftercast_seconds;

    let events = battle.step(0.0, &[cast(0, CastTarget::Caster)]);
    assert_eq!(results(&events), vec![CastResult::Success]);
    let me = battle.character(CASTER).unwrap();
    assert_eq!(me.effective_max_energy(), 10);
    assert_eq!(me.ledger().energy(), 10);

    // Ten more debt would leave an effective max of zero.
    battle.step(aftercast, &[]);
    let events = battle.step(0.0, &[cast(0, CastTarget::Caster)]);
    assert_eq!(results(&events), vec![CastResult::NoCreditAvailable]);
}

#[test]
fn telemetry_observes_without_changing_results() {
    let counters = Arc::new(CastCounters::new());
    let sink: Arc<dyn TelemetrySink> = counters.clone();

    let script = [
        cast(0, CastTarget::Entity(ENEMY)),
        cast(0, CastTarget::Entity(EntityId(99))),
    ];
    let mut silent = battle_with(
        caster(School::Public, 20, SkillBar::from_skills([snowball(5, 5.0)])),
        Position::new(8.0, 0.0),
    );
    let mut observed = battle_with(
        caster(School::Public, 20, SkillBar::from_skills([snowball(5, 5.0)])),
        Position::new(8.0, 0.0),
    )
    .with_telemetry(sink);

    let a = silent.step(0.0, &script);
    let b = observed.step(0.0, &script);
    assert_eq!(a, b);
    assert_eq!(
        results(&a),
        vec![CastResult::OutOfRange, CastResult::NoTarget]
    );
    assert_eq!(counters.get(CastCounter::CastAttemptedWithCost), 2);
    assert_eq!(counters.get(CastCounter::OutOfRangeBlocked), 1);
}

#[test]
fn roster_rejects_duplicates_and_unknown_targets() {
    let mut battle = battle_with(
        caster(School::Public, 20, SkillBar::new()),
        Position::new(5.0, 0.0),
    );
    assert!(battle
        .spawn(Character::new(CASTER, "Again", Team(0), School::Waldorf))
        .is_err());
    assert!(battle.apply_damage(EntityId(42), 1.0, "Snowball", None).is_err());

    // Intents for unknown actors are dropped, not fatal.
    let events = battle.step(
        0.1,
        &[Intent::Cancel {
            actor: EntityId(42),
        }],
    );
    assert!(events.is_empty());
}
