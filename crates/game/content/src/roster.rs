//! Match roster descriptions.
//!
//! A roster names each combatant's school, side, starting position and skill
//! bar by skill name. Building characters resolves those names against a
//! skill oracle; unknown names are reported rather than skipped so a typo
//! in content never silently empties a slot.

use arena_core::{
    Character, CombatConfig, EntityId, Position, School, SkillBar, SkillOracle, Team,
};

/// A roster entry names a skill no catalog entry carries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown skill `{0}`")]
pub struct UnknownSkill(pub String);

/// One combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSpec {
    pub id: u32,
    pub name: String,
    pub team: u8,
    pub school: School,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: (f32, f32),
    #[cfg_attr(feature = "serde", serde(default = "default_max_warmth"))]
    pub max_warmth: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_max_energy"))]
    pub max_energy: u32,
    /// Skill names in slot order; at most eight are used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<String>,
}

#[cfg(feature = "serde")]
fn default_max_warmth() -> f32 {
    CombatConfig::DEFAULT_MAX_WARMTH
}

#[cfg(feature = "serde")]
fn default_max_energy() -> u32 {
    CombatConfig::DEFAULT_MAX_ENERGY
}

impl CharacterSpec {
    /// Builds the character, or returns the first skill name the oracle
    /// does not know.
    pub fn build(&self, skills: &(impl SkillOracle + ?Sized)) -> Result<Character, UnknownSkill> {
        let mut bar = Vec::with_capacity(self.skills.len());
        for name in self.skills.iter().take(CombatConfig::MAX_SKILL_SLOTS) {
            let skill = skills
                .skill_by_name(name)
                .ok_or_else(|| UnknownSkill(name.clone()))?;
            bar.push(skill);
        }
        let (x, y) = self.position;
        Ok(
            Character::new(EntityId(self.id), self.name.as_str(), Team(self.team), self.school)
                .with_resources(self.max_warmth, self.max_energy)
                .with_skills(SkillBar::from_skills(bar))
                .at(Position::new(x, y)),
        )
    }
}

/// Every combatant of a match.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterSpec {
    pub characters: Vec<CharacterSpec>,
}
