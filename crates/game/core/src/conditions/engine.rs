//! Condition engine: the chills, cozies and composable effects of one
//! character, plus the pip fold over all three.

use std::sync::Arc;

use super::{
    Chill, ConditionClass, ConditionSet, Cozy, EffectDefinition, EffectId, EffectSet, PipTable,
};
use crate::config::CombatConfig;
use crate::state::EntityId;

/// Display data for one active condition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionIcon {
    pub class: ConditionClass,
    pub name: String,
    pub time_remaining_ms: u32,
    pub stack_intensity: u8,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConditionEngine {
    chills: ConditionSet<Chill>,
    cozies: ConditionSet<Cozy>,
    effects: EffectSet,
}

impl ConditionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_chill(
        &mut self,
        tag: Chill,
        duration_ms: u32,
        intensity: u8,
        source: Option<EntityId>,
    ) -> bool {
        self.chills.add(tag, duration_ms, intensity, source)
    }

    pub fn add_cozy(
        &mut self,
        tag: Cozy,
        duration_ms: u32,
        intensity: u8,
        source: Option<EntityId>,
    ) -> bool {
        self.cozies.add(tag, duration_ms, intensity, source)
    }

    pub fn add_effect(
        &mut self,
        definition: &Arc<EffectDefinition>,
        intensity: u8,
        source: Option<EntityId>,
    ) -> bool {
        self.effects.add(definition, intensity, source)
    }

    pub fn remove_chill(&mut self, tag: Chill) -> bool {
        self.chills.remove(tag)
    }

    pub fn remove_cozy(&mut self, tag: Cozy) -> bool {
        self.cozies.remove(tag)
    }

    pub fn remove_effect(&mut self, id: EffectId) -> bool {
        self.effects.remove(id)
    }

    /// Removes every chill. Returns how many were removed.
    pub fn cleanse_chills(&mut self) -> usize {
        self.chills.clear()
    }

    /// Removes every cozy. Returns how many were removed.
    pub fn strip_cozies(&mut self) -> usize {
        self.cozies.clear()
    }

    pub fn clear(&mut self) {
        self.chills.clear();
        self.cozies.clear();
        self.effects.clear();
    }

    /// Counts every class down by `dt_ms`. Returns whether anything expired,
    /// which is the only time pips need recomputing.
    pub fn update(&mut self, dt_ms: u32) -> bool {
        // Non-short-circuiting: all three classes must advance.
        let chills = self.chills.update(dt_ms);
        let cozies = self.cozies.update(dt_ms);
        let effects = self.effects.update(dt_ms);
        chills | cozies | effects
    }

    /// Folds every active condition into a signed pip total in
    /// `[MIN_PIPS, MAX_PIPS]`. A pure recompute, never incremental.
    pub fn recalculate_pips(&self, table: &PipTable) -> i8 {
        let chills: i32 = self
            .chills
            .iter()
            .map(|c| i32::from(table.chill(c.tag)) * i32::from(c.stack_intensity))
            .sum();
        let cozies: i32 = self
            .cozies
            .iter()
            .map(|c| i32::from(table.cozy(c.tag)) * i32::from(c.stack_intensity))
            .sum();
        let total = chills + cozies + self.effects.pip_contribution();
        total.clamp(
            i32::from(CombatConfig::MIN_PIPS),
            i32::from(CombatConfig::MAX_PIPS),
        ) as i8
    }

    pub fn movement_speed_multiplier(&self) -> f32 {
        self.effects.move_speed_multiplier()
    }

    pub fn energy_regen_multiplier(&self) -> f32 {
        self.effects.energy_regen_multiplier()
    }

    pub fn energy_cost_multiplier(&self) -> f32 {
        self.effects.energy_cost_multiplier()
    }

    pub fn chills(&self) -> &ConditionSet<Chill> {
        &self.chills
    }

    pub fn cozies(&self) -> &ConditionSet<Cozy> {
        &self.cozies
    }

    pub fn effects(&self) -> &EffectSet {
        &self.effects
    }

    pub fn icons(&self) -> Vec<ConditionIcon> {
        let chills = self.chills.iter().map(|c| ConditionIcon {
            class: ConditionClass::Chill,
            name: c.tag.to_string(),
            time_remaining_ms: c.time_remaining_ms,
            stack_intensity: c.stack_intensity,
        });
        let cozies = self.cozies.iter().map(|c| ConditionIcon {
            class: ConditionClass::Cozy,
            name: c.tag.to_string(),
            time_remaining_ms: c.time_remaining_ms,
            stack_intensity: c.stack_intensity,
        });
        let effects = self.effects.iter().map(|e| ConditionIcon {
            class: ConditionClass::Effect,
            name: e.definition.name.clone(),
            time_remaining_ms: e.time_remaining_ms,
            stack_intensity: e.stack_intensity,
        });
        chills.chain(cozies).chain(effects).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debuff_and_buff_fold_into_net_pips() {
        let table = PipTable::default();
        let mut engine = ConditionEngine::new();
        engine.add_chill(Chill::Soaked, 10_000, 3, None);
        engine.add_cozy(Cozy::HotCocoa, 10_000, 1, None);
        assert_eq!(engine.recalculate_pips(&table), -4);
    }

    #[test]
    fn pips_clamp_to_range() {
        let table = PipTable::default();
        let mut engine = ConditionEngine::new();
        engine.add_chill(Chill::Frostbitten, 10_000, 50, None);
        assert_eq!(engine.recalculate_pips(&table), CombatConfig::MIN_PIPS);

        engine.cleanse_chills();
        engine.add_cozy(Cozy::FireInside, 10_000, 50, None);
        assert_eq!(engine.recalculate_pips(&table), CombatConfig::MAX_PIPS);
    }

    #[test]
    fn expired_condition_drops_out_of_pips() {
        let table = PipTable::default();
        let mut engine = ConditionEngine::new();
        engine.add_chill(Chill::Soaked, 1_000, 1, None);
        engine.add_cozy(Cozy::Toasty, 5_000, 1, None);
        assert_eq!(engine.recalculate_pips(&table), -1);

        assert!(engine.update(1_000));
        assert_eq!(engine.recalculate_pips(&table), 1);
        assert!(!engine.update(1_000));
    }

    #[test]
    fn effect_pips_join_the_fold() {
        let table = PipTable::default();
        let warm = Arc::new(EffectDefinition::new(EffectId(1), "warm", 2_000).with_pips(1));
        let mut engine = ConditionEngine::new();
        engine.add_effect(&warm, 2, None);
        engine.add_chill(Chill::Windburned, 2_000, 1, None);
        assert_eq!(engine.recalculate_pips(&table), 1);
    }

    #[test]
    fn icons_list_every_class() {
        let warm = Arc::new(EffectDefinition::new(EffectId(1), "warm", 2_000));
        let mut engine = ConditionEngine::new();
        engine.add_chill(Chill::Numb, 2_000, 1, None);
        engine.add_cozy(Cozy::Bundled, 2_000, 1, None);
        engine.add_effect(&warm, 1, None);

        let icons = engine.icons();
        assert_eq!(icons.len(), 3);
        assert_eq!(icons[0].name, "numb");
        assert_eq!(icons[1].class, ConditionClass::Cozy);
        assert_eq!(icons[2].name, "warm");
    }
}
