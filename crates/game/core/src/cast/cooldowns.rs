use crate::config::CombatConfig;

/// Per-slot recharge countdowns in seconds, floored at zero.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Cooldowns([f32; CombatConfig::MAX_SKILL_SLOTS]);

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot is usable only at exactly zero. Slots past the bar report
    /// ready so the empty-slot check can name them instead.
    pub fn is_ready(&self, slot: usize) -> bool {
        self.remaining(slot) == 0.0
    }

    pub fn remaining(&self, slot: usize) -> f32 {
        self.0.get(slot).copied().unwrap_or(0.0)
    }

    pub fn start(&mut self, slot: usize, seconds: f32) {
        if let Some(cooldown) = self.0.get_mut(slot) {
            *cooldown = seconds.max(0.0);
        }
    }

    pub fn tick(&mut self, dt: f32) {
        for cooldown in &mut self.0 {
            *cooldown = (*cooldown - dt).max(0.0);
        }
    }

    pub fn clear(&mut self) {
        self.0 = [0.0; CombatConfig::MAX_SKILL_SLOTS];
    }

    pub fn as_array(&self) -> [f32; CombatConfig::MAX_SKILL_SLOTS] {
        self.0
    }
}
