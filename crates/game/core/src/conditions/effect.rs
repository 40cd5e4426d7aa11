//! Composable effects: the generalized buff system layered on top of
//! chills and cozies.
//!
//! An effect definition is immutable content. It selects one of three
//! stacking policies and contributes multipliers that are folded
//! multiplicatively across every active effect.

use std::sync::Arc;

use arrayvec::ArrayVec;

use super::set::{Timed, tick_down};
use crate::config::CombatConfig;
use crate::state::EntityId;

/// Stable identifier of an effect definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectId(pub u16);

/// What happens when an effect is applied while already active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackingPolicy {
    /// Duration becomes the longer of the two; intensity unchanged.
    #[default]
    RefreshDuration,
    /// Intensity adds (saturating) and duration refreshes.
    AddIntensity,
    /// The new application is dropped.
    IgnoreIfActive,
}

#[cfg(feature = "serde")]
fn unit_multiplier() -> f32 {
    1.0
}

/// Immutable effect definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDefinition {
    pub id: EffectId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_buff: bool,
    pub duration_ms: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacking: StackingPolicy,
    /// Signed pip contribution per stack of intensity.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pips_per_stack: i8,
    #[cfg_attr(feature = "serde", serde(default = "unit_multiplier"))]
    pub move_speed_multiplier: f32,
    #[cfg_attr(feature = "serde", serde(default = "unit_multiplier"))]
    pub energy_regen_multiplier: f32,
    #[cfg_attr(feature = "serde", serde(default = "unit_multiplier"))]
    pub energy_cost_multiplier: f32,
}

impl EffectDefinition {
    pub fn new(id: EffectId, name: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            id,
            name: name.into(),
            is_buff: true,
            duration_ms,
            stacking: StackingPolicy::default(),
            pips_per_stack: 0,
            move_speed_multiplier: 1.0,
            energy_regen_multiplier: 1.0,
            energy_cost_multiplier: 1.0,
        }
    }

    pub fn debuff(mut self) -> Self {
        self.is_buff = false;
        self
    }

    pub fn with_stacking(mut self, stacking: StackingPolicy) -> Self {
        self.stacking = stacking;
        self
    }

    pub fn with_pips(mut self, pips_per_stack: i8) -> Self {
        self.pips_per_stack = pips_per_stack;
        self
    }

    pub fn with_move_speed(mut self, multiplier: f32) -> Self {
        self.move_speed_multiplier = multiplier.max(0.0);
        self
    }

    pub fn with_energy_regen(mut self, multiplier: f32) -> Self {
        self.energy_regen_multiplier = multiplier.max(0.0);
        self
    }

    pub fn with_energy_cost(mut self, multiplier: f32) -> Self {
        self.energy_cost_multiplier = multiplier.max(0.0);
        self
    }
}

/// One active composable effect.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveEffect {
    pub definition: Arc<EffectDefinition>,
    pub time_remaining_ms: u32,
    pub stack_intensity: u8,
    pub source: Option<EntityId>,
}

impl Timed for ActiveEffect {
    fn time_remaining_mut(&mut self) -> &mut u32 {
        &mut self.time_remaining_ms
    }
}

/// Bounded set of active effects, at most one per definition id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectSet {
    entries: ArrayVec<ActiveEffect, { CombatConfig::MAX_CONDITIONS }>,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an effect according to its stacking policy.
    ///
    /// Returns `false` when the application was ignored, either by
    /// [`StackingPolicy::IgnoreIfActive`] or because the set is full.
    pub fn add(
        &mut self,
        definition: &Arc<EffectDefinition>,
        intensity: u8,
        source: Option<EntityId>,
    ) -> bool {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.definition.id == definition.id)
        {
            match definition.stacking {
                StackingPolicy::RefreshDuration => {
                    existing.time_remaining_ms =
                        existing.time_remaining_ms.max(definition.duration_ms);
                }
                StackingPolicy::AddIntensity => {
                    existing.time_remaining_ms =
                        existing.time_remaining_ms.max(definition.duration_ms);
                    existing.stack_intensity = existing.stack_intensity.saturating_add(intensity);
                }
                StackingPolicy::IgnoreIfActive => return false,
            }
            if source.is_some() {
                existing.source = source;
            }
            return true;
        }

        let accepted = self
            .entries
            .try_push(ActiveEffect {
                definition: Arc::clone(definition),
                time_remaining_ms: definition.duration_ms,
                stack_intensity: intensity,
                source,
            })
            .is_ok();
        if !accepted {
            tracing::debug!(effect = %definition.name, "effect set full, dropped");
        }
        accepted
    }

    pub fn update(&mut self, dt_ms: u32) -> bool {
        tick_down(&mut self.entries, dt_ms)
    }

    pub fn remove(&mut self, id: EffectId) -> bool {
        match self.entries.iter().position(|e| e.definition.id == id) {
            Some(index) => {
                self.entries.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: EffectId) -> Option<&ActiveEffect> {
        self.entries.iter().find(|e| e.definition.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    fn fold(&self, multiplier: impl Fn(&EffectDefinition) -> f32) -> f32 {
        self.entries
            .iter()
            .map(|e| multiplier(&e.definition))
            .product()
    }

    pub fn move_speed_multiplier(&self) -> f32 {
        self.fold(|d| d.move_speed_multiplier)
    }

    pub fn energy_regen_multiplier(&self) -> f32 {
        self.fold(|d| d.energy_regen_multiplier)
    }

    pub fn energy_cost_multiplier(&self) -> f32 {
        self.fold(|d| d.energy_cost_multiplier)
    }

    /// Sum of `pips_per_stack * intensity` over active effects.
    pub fn pip_contribution(&self) -> i32 {
        self.entries
            .iter()
            .map(|e| i32::from(e.definition.pips_per_stack) * i32::from(e.stack_intensity))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(id: u16, stacking: StackingPolicy) -> Arc<EffectDefinition> {
        Arc::new(EffectDefinition::new(EffectId(id), "test", 4_000).with_stacking(stacking))
    }

    #[test]
    fn refresh_policy_keeps_intensity() {
        let def = definition(1, StackingPolicy::RefreshDuration);
        let mut set = EffectSet::new();
        assert!(set.add(&def, 2, None));
        set.update(3_000);
        assert!(set.add(&def, 5, None));

        let active = set.get(EffectId(1)).unwrap();
        assert_eq!(active.time_remaining_ms, 4_000);
        assert_eq!(active.stack_intensity, 2);
    }

    #[test]
    fn add_intensity_policy_stacks_and_refreshes() {
        let def = definition(2, StackingPolicy::AddIntensity);
        let mut set = EffectSet::new();
        set.add(&def, 1, None);
        set.update(1_000);
        assert!(set.add(&def, 2, None));

        let active = set.get(EffectId(2)).unwrap();
        assert_eq!(active.time_remaining_ms, 4_000);
        assert_eq!(active.stack_intensity, 3);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn ignore_policy_drops_reapplication() {
        let def = definition(3, StackingPolicy::IgnoreIfActive);
        let mut set = EffectSet::new();
        assert!(set.add(&def, 1, None));
        set.update(1_000);
        assert!(!set.add(&def, 1, None));
        assert_eq!(set.get(EffectId(3)).unwrap().time_remaining_ms, 3_000);
    }

    #[test]
    fn multipliers_fold_multiplicatively() {
        let haste = Arc::new(EffectDefinition::new(EffectId(1), "haste", 1_000).with_move_speed(1.5));
        let slush = Arc::new(
            EffectDefinition::new(EffectId(2), "slush", 1_000)
                .debuff()
                .with_move_speed(0.5)
                .with_energy_cost(2.0),
        );
        let mut set = EffectSet::new();
        assert_eq!(set.move_speed_multiplier(), 1.0);

        set.add(&haste, 1, None);
        set.add(&slush, 1, None);
        assert_eq!(set.move_speed_multiplier(), 0.75);
        assert_eq!(set.energy_cost_multiplier(), 2.0);
        assert_eq!(set.energy_regen_multiplier(), 1.0);
    }

    #[test]
    fn full_set_rejects_new_effects_by_design() {
        let mut set = EffectSet::new();
        for id in 0..CombatConfig::MAX_CONDITIONS as u16 {
            assert!(set.add(&definition(id, StackingPolicy::RefreshDuration), 1, None));
        }
        assert!(!set.add(&definition(99, StackingPolicy::RefreshDuration), 1, None));
        assert_eq!(set.len(), CombatConfig::MAX_CONDITIONS);
    }
}
