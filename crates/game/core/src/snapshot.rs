//! Read-only character views for the presentation layer.

use crate::cast::CastPhase;
use crate::character::Character;
use crate::conditions::ConditionIcon;
use crate::config::CombatConfig;
use crate::env::SkillType;
use crate::monitor::DamageSource;
use crate::state::{EntityId, Position, School, SchoolMechanic, Team};

/// School mechanic state as shown in the UI.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mechanic", rename_all = "snake_case"))]
pub enum SchoolSnapshot {
    Credit {
        debt: u32,
        effective_max_energy: u32,
    },
    Grit {
        stacks: u8,
        free_cast_ready: bool,
    },
    Rhythm {
        charge: u8,
        perfect_window: f32,
    },
    Sacrifice {
        cooldown: f32,
    },
    Variety {
        recent: Vec<SkillType>,
        damage_bonus: f32,
    },
}

impl SchoolSnapshot {
    fn capture(mechanic: &SchoolMechanic, max_energy: u32) -> Self {
        match mechanic {
            SchoolMechanic::Credit(credit) => Self::Credit {
                debt: credit.debt(),
                effective_max_energy: credit.effective_max_energy(max_energy),
            },
            SchoolMechanic::Grit(grit) => Self::Grit {
                stacks: grit.stacks(),
                free_cast_ready: grit.free_cast_ready(),
            },
            SchoolMechanic::Rhythm(rhythm) => Self::Rhythm {
                charge: rhythm.charge(),
                perfect_window: rhythm.perfect_window(),
            },
            SchoolMechanic::Sacrifice(sacrifice) => Self::Sacrifice {
                cooldown: sacrifice.cooldown(),
            },
            SchoolMechanic::Variety(variety) => Self::Variety {
                recent: variety.recent().collect(),
                damage_bonus: variety.damage_bonus(),
            },
        }
    }
}

/// Everything a HUD needs to draw one character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSnapshot {
    pub id: EntityId,
    pub name: String,
    pub team: Team,
    pub school: School,
    pub position: Position,
    pub dead: bool,
    pub warmth: f32,
    pub warmth_fraction: f32,
    pub energy: u32,
    pub energy_fraction: f32,
    pub pips: i8,
    pub cast_phase: CastPhase,
    pub cast_slot: Option<usize>,
    /// Elapsed fraction of the current cast phase, for progress bars.
    pub cast_progress: f32,
    /// Remaining recharge per slot as a fraction of the skill's recharge.
    pub cooldowns: [f32; CombatConfig::MAX_SKILL_SLOTS],
    pub conditions: Vec<ConditionIcon>,
    pub damage_sources: Vec<DamageSource>,
    pub school_state: SchoolSnapshot,
}

impl From<&Character> for CharacterSnapshot {
    fn from(character: &Character) -> Self {
        let ledger = character.ledger();
        let mut cooldowns = [0.0; CombatConfig::MAX_SKILL_SLOTS];
        for (slot, skill) in character.skills().iter() {
            if skill.recharge > 0.0 {
                cooldowns[slot] =
                    (character.cooldowns().remaining(slot) / skill.recharge).clamp(0.0, 1.0);
            }
        }

        Self {
            id: character.id(),
            name: character.name().to_owned(),
            team: character.team(),
            school: character.school(),
            position: character.position(),
            dead: character.is_dead(),
            warmth: ledger.warmth(),
            warmth_fraction: ledger.warmth_fraction(),
            energy: ledger.energy(),
            energy_fraction: ledger.energy_fraction(),
            pips: ledger.pips(),
            cast_phase: character.cast_state().phase(),
            cast_slot: character.cast_state().slot(),
            cast_progress: character.cast_state().progress(),
            cooldowns,
            conditions: character.conditions().icons(),
            damage_sources: character.monitor().entries().to_vec(),
            school_state: SchoolSnapshot::capture(character.mechanic(), ledger.max_energy()),
        }
    }
}

impl Character {
    pub fn snapshot(&self) -> CharacterSnapshot {
        CharacterSnapshot::from(self)
    }
}
