//! Skill definitions and the skill oracle.
//!
//! Skills are immutable content loaded once per process. Characters hold
//! shared references (`Arc<Skill>`) in their skill bars and never copy or
//! mutate a definition.

use std::collections::HashMap;
use std::sync::Arc;

use super::OracleError;

/// Stable identifier of a skill definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillId(pub u16);

/// Who or what a skill is aimed at.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    /// Always the caster; never range-checked.
    SelfOnly,
    /// A living member of the caster's side.
    Ally,
    /// A living opponent.
    Enemy,
    /// A point on the ground.
    Ground,
}

impl TargetKind {
    /// True for kinds that need a living entity as target.
    pub const fn needs_entity(self) -> bool {
        matches!(self, Self::Ally | Self::Enemy)
    }
}

/// Coarse category of a skill, tracked by the variety mechanic.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillType {
    #[default]
    Throw,
    Trick,
    Stance,
    Shout,
    Remedy,
    Hex,
    Fort,
}

/// Resources a skill consumes when its cast starts.
///
/// Only the energy cost applies to every school; each of the other costs is
/// checked and paid only by the school that owns the matching mechanic.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillCosts {
    pub energy: u32,
    pub grit: u8,
    pub rhythm: u8,
    pub credit: u32,
    pub warmth_sacrifice: f32,
}

impl SkillCosts {
    pub const fn energy(energy: u32) -> Self {
        Self {
            energy,
            grit: 0,
            rhythm: 0,
            credit: 0,
            warmth_sacrifice: 0.0,
        }
    }

    /// True when no resource of any school is consumed.
    pub fn is_free(&self) -> bool {
        self.energy == 0
            && self.grit == 0
            && self.rhythm == 0
            && self.credit == 0
            && self.warmth_sacrifice <= 0.0
    }
}

/// Immutable skill definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_type: SkillType,
    pub target: TargetKind,
    /// Activation time in seconds. Zero means instant.
    #[cfg_attr(feature = "serde", serde(default))]
    pub activation: f32,
    /// Recharge in seconds, applied once the fired cast finishes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub recharge: f32,
    /// Maximum cast distance. Ignored for self-targeted skills.
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub costs: SkillCosts,
    /// Grit stacks gained when the effect fires.
    #[cfg_attr(feature = "serde", serde(default))]
    pub grit_gain: u8,
    /// Base magnitude handed to the combat resolver.
    #[cfg_attr(feature = "serde", serde(default))]
    pub power: f32,
}

impl Skill {
    pub fn new(id: SkillId, name: impl Into<String>, target: TargetKind) -> Self {
        Self {
            id,
            name: name.into(),
            skill_type: SkillType::default(),
            target,
            activation: 0.0,
            recharge: 0.0,
            range: 0.0,
            costs: SkillCosts::default(),
            grit_gain: 0,
            power: 0.0,
        }
    }

    pub fn with_type(mut self, skill_type: SkillType) -> Self {
        self.skill_type = skill_type;
        self
    }

    pub fn with_activation(mut self, seconds: f32) -> Self {
        self.activation = seconds.max(0.0);
        self
    }

    pub fn with_recharge(mut self, seconds: f32) -> Self {
        self.recharge = seconds.max(0.0);
        self
    }

    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range.max(0.0);
        self
    }

    pub fn with_costs(mut self, costs: SkillCosts) -> Self {
        self.costs = costs;
        self
    }

    pub fn with_grit_gain(mut self, grit: u8) -> Self {
        self.grit_gain = grit;
        self
    }

    pub fn with_power(mut self, power: f32) -> Self {
        self.power = power;
        self
    }

    pub fn is_instant(&self) -> bool {
        self.activation <= 0.0
    }
}

/// Oracle providing skill definitions.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: SkillId) -> Option<Arc<Skill>>;

    fn skill_by_name(&self, name: &str) -> Option<Arc<Skill>>;
}

/// In-memory skill catalog. Lookups hand out shared references.
#[derive(Clone, Debug, Default)]
pub struct SkillCatalog {
    skills: HashMap<SkillId, Arc<Skill>>,
}

impl SkillCatalog {
    /// Builds a catalog, rejecting duplicate ids.
    pub fn new(skills: impl IntoIterator<Item = Skill>) -> Result<Self, OracleError> {
        let mut catalog = Self::default();
        for skill in skills {
            catalog.insert(skill)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, skill: Skill) -> Result<Arc<Skill>, OracleError> {
        if self.skills.contains_key(&skill.id) {
            return Err(OracleError::DuplicateSkill(skill.id));
        }
        let skill = Arc::new(skill);
        self.skills.insert(skill.id, Arc::clone(&skill));
        Ok(skill)
    }

    /// Looks up a skill, reporting a missing id as an error.
    pub fn require(&self, id: SkillId) -> Result<Arc<Skill>, OracleError> {
        self.skill(id).ok_or(OracleError::SkillNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl SkillOracle for SkillCatalog {
    fn skill(&self, id: SkillId) -> Option<Arc<Skill>> {
        self.skills.get(&id).cloned()
    }

    fn skill_by_name(&self, name: &str) -> Option<Arc<Skill>> {
        self.skills.values().find(|s| s.name == name).cloned()
    }
}
