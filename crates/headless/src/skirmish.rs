//! Scripted skirmish: a greedy controller for every combatant and a flat
//! resolver that turns fired effects into warmth changes.

use arena_core::{
    Battle, CastTarget, Character, CombatEvent, Intent, Position, SkillType, TargetKind,
    TargetView,
};

/// Distance covered per second by a character walking toward a queued cast.
const WALK_SPEED: f32 = 4.0;

/// Per-step controller output for the whole roster.
pub fn plan(battle: &Battle, dt: f32) -> Vec<Intent> {
    let views: Vec<TargetView> = battle.characters().iter().map(Character::target_view).collect();
    let swing_range = battle.rules().config.auto_attack_range;
    battle
        .characters()
        .iter()
        .filter(|c| c.is_alive())
        .filter_map(|c| plan_for(c, views.as_slice(), dt, swing_range))
        .collect()
}

fn plan_for(
    character: &Character,
    views: &[TargetView],
    dt: f32,
    swing_range: f32,
) -> Option<Intent> {
    let actor = character.id();
    let step = WALK_SPEED * character.movement_speed_multiplier() * dt;

    if let Some(point) = character.approach_target(views) {
        let (dx, dy) = toward(character.position(), point, step);
        return Some(Intent::Approach { actor, dx, dy });
    }
    if !character.cast_state().is_idle() {
        return None;
    }

    let enemy = nearest(character, views, |view| view.team != character.team())?;
    for (slot, skill) in character.skills().iter() {
        if !character.cooldowns().is_ready(slot) || skill.costs.energy > character.ledger().energy()
        {
            continue;
        }
        let target = match skill.target {
            TargetKind::SelfOnly => CastTarget::Caster,
            TargetKind::Enemy => CastTarget::Entity(enemy.id),
            TargetKind::Ally => {
                if character.ledger().warmth_fraction() > 0.6 {
                    continue;
                }
                CastTarget::Entity(actor)
            }
            TargetKind::Ground => CastTarget::Ground(character.position()),
        };
        return Some(Intent::cast(actor, slot, target));
    }

    if character.auto_attack().target() != Some(enemy.id) {
        return Some(Intent::StartAutoAttack {
            actor,
            target: enemy.id,
        });
    }
    if character.position().distance_to(enemy.position) > swing_range {
        let (dx, dy) = toward(character.position(), enemy.position, step);
        return Some(Intent::Move { actor, dx, dy });
    }
    None
}

fn nearest(
    character: &Character,
    views: &[TargetView],
    filter: impl Fn(&TargetView) -> bool,
) -> Option<TargetView> {
    let origin = character.position();
    views
        .iter()
        .filter(|view| view.alive && view.id != character.id() && filter(view))
        .min_by(|a, b| {
            origin
                .distance_to(a.position)
                .total_cmp(&origin.distance_to(b.position))
        })
        .copied()
}

fn toward(from: Position, to: Position, step: f32) -> (f32, f32) {
    let distance = from.distance_to(to);
    if distance <= f32::EPSILON {
        return (0.0, 0.0);
    }
    let scale = step.min(distance) / distance;
    ((to.x - from.x) * scale, (to.y - from.y) * scale)
}

/// Applies warmth changes for fired effects and auto-attack swings.
pub fn resolve(battle: &mut Battle, events: &[CombatEvent], auto_attack_damage: f32) {
    for event in events {
        match event {
            CombatEvent::EffectFired {
                actor,
                skill,
                target,
                damage_bonus,
                ..
            } => {
                let Some(id) = target.entity() else {
                    continue;
                };
                let amount = skill.power * (1.0 + damage_bonus);
                if amount <= 0.0 {
                    continue;
                }
                let outcome = if skill.skill_type == SkillType::Remedy {
                    battle.heal(id, amount)
                } else {
                    battle
                        .apply_damage(id, amount, &skill.name, Some(*actor))
                        .map(|_| ())
                };
                if let Err(e) = outcome {
                    tracing::warn!(target = %id, "effect target vanished: {}", e);
                }
            }
            CombatEvent::AutoAttack { actor, target } => {
                if let Err(e) =
                    battle.apply_damage(*target, auto_attack_damage, "Auto Attack", Some(*actor))
                {
                    tracing::warn!(target = %target, "swing target vanished: {}", e);
                }
            }
            CombatEvent::Died { actor } => tracing::info!(actor = %actor, "character down"),
            _ => {}
        }
    }
}

/// Team ids with at least one living member.
pub fn standing_teams(battle: &Battle) -> Vec<u8> {
    let mut teams: Vec<u8> = battle
        .characters()
        .iter()
        .filter(|c| c.is_alive())
        .map(|c| c.team().0)
        .collect();
    teams.sort_unstable();
    teams.dedup();
    teams
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_content::ContentFactory;
    use arena_core::CastResult;

    fn bundled_battle() -> Battle {
        let factory = ContentFactory::bundled();
        let skills = factory.load_skills().unwrap();
        let mut battle = Battle::new(factory.load_rules().unwrap());
        for character in factory.load_characters(&skills).unwrap() {
            battle.spawn(character).unwrap();
        }
        battle
    }

    #[test]
    fn toward_never_overshoots() {
        let (dx, dy) = toward(Position::new(0.0, 0.0), Position::new(3.0, 4.0), 10.0);
        assert_eq!((dx, dy), (3.0, 4.0));
        let (dx, dy) = toward(Position::new(0.0, 0.0), Position::new(3.0, 4.0), 2.5);
        assert_eq!((dx, dy), (1.5, 2.0));
    }

    #[test]
    fn scripted_skirmish_lands_hits() {
        let mut battle = bundled_battle();
        let mut started = 0;
        let mut fired = 0;
        for _ in 0..200 {
            let intents = plan(&battle, 0.05);
            let events = battle.step(0.05, &intents);
            for event in &events {
                match event {
                    CombatEvent::CastResolved {
                        result: CastResult::CastingStarted | CastResult::Success,
                        ..
                    } => started += 1,
                    CombatEvent::EffectFired { .. } => fired += 1,
                    _ => {}
                }
            }
            resolve(&mut battle, &events, 4.0);
        }

        assert!(started > 0);
        assert!(fired > 0);
        assert!(
            battle
                .characters()
                .iter()
                .any(|c| c.ledger().warmth() < c.ledger().max_warmth())
        );
    }
}
