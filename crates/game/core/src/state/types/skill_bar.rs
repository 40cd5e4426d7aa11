//! Fixed-capacity skill bar.

use std::sync::Arc;

use crate::config::CombatConfig;
use crate::env::{OracleError, Skill};

/// Eight slots, each an optional shared reference to a catalog skill.
#[derive(Clone, Debug, Default)]
pub struct SkillBar {
    slots: [Option<Arc<Skill>>; CombatConfig::MAX_SKILL_SLOTS],
}

impl SkillBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bar from up to eight skills, filling slots in order.
    pub fn from_skills(skills: impl IntoIterator<Item = Arc<Skill>>) -> Self {
        let mut bar = Self::default();
        for (slot, skill) in bar.slots.iter_mut().zip(skills) {
            *slot = Some(skill);
        }
        bar
    }

    /// Places `skill` in `slot`, returning whatever was there.
    pub fn equip(
        &mut self,
        slot: usize,
        skill: Option<Arc<Skill>>,
    ) -> Result<Option<Arc<Skill>>, OracleError> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(OracleError::SlotOutOfRange(slot))?;
        Ok(std::mem::replace(entry, skill))
    }

    /// Skill in `slot`; `None` for empty or out-of-range slots.
    pub fn get(&self, slot: usize) -> Option<&Arc<Skill>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Arc<Skill>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, skill)| skill.as_ref().map(|s| (slot, s)))
    }

    pub const fn capacity(&self) -> usize {
        CombatConfig::MAX_SKILL_SLOTS
    }
}
