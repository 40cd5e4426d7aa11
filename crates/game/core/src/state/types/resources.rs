//! Resource ledger: warmth (health analog), energy (action analog) and the
//! signed warmth regeneration rate expressed in pips.
//!
//! Both resources regenerate through fractional accumulators: the per-tick
//! amount is added to the accumulator and only whole units are applied,
//! with the remainder carried forward. Truncating each tick in isolation
//! would systematically under-regenerate at high tick rates.
//!
//! Every mutation clamps. Nothing in here can make warmth or energy negative
//! or push them above their maximum.

use crate::config::CombatConfig;

/// Regeneration inputs for one tick, derived by the character from its
/// conditions and school mechanic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegenRates {
    /// Energy per second after effect multipliers.
    pub energy_per_second: f32,
    /// Highest energy value regen may reach (max minus any debt).
    pub energy_cap: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceLedger {
    warmth: f32,
    max_warmth: f32,
    warmth_accumulator: f32,
    energy: u32,
    max_energy: u32,
    energy_accumulator: f32,
    warmth_regen_pips: i8,
}

impl ResourceLedger {
    /// Creates a ledger with both resources full.
    pub fn new(max_warmth: f32, max_energy: u32) -> Self {
        let max_warmth = max_warmth.max(0.0);
        Self {
            warmth: max_warmth,
            max_warmth,
            warmth_accumulator: 0.0,
            energy: max_energy,
            max_energy,
            energy_accumulator: 0.0,
            warmth_regen_pips: 0,
        }
    }

    pub fn warmth(&self) -> f32 {
        self.warmth
    }

    pub fn max_warmth(&self) -> f32 {
        self.max_warmth
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn max_energy(&self) -> u32 {
        self.max_energy
    }

    pub fn pips(&self) -> i8 {
        self.warmth_regen_pips
    }

    pub fn warmth_fraction(&self) -> f32 {
        if self.max_warmth <= 0.0 {
            0.0
        } else {
            self.warmth / self.max_warmth
        }
    }

    pub fn energy_fraction(&self) -> f32 {
        if self.max_energy == 0 {
            0.0
        } else {
            self.energy as f32 / self.max_energy as f32
        }
    }

    /// Replaces the pip rate. Pips are always recomputed from conditions,
    /// never accumulated, so this is a plain clamped assignment.
    pub fn set_pips(&mut self, pips: i8) {
        self.warmth_regen_pips = pips.clamp(CombatConfig::MIN_PIPS, CombatConfig::MAX_PIPS);
    }

    /// Advances energy and warmth regeneration by `dt` seconds.
    ///
    /// Returns `true` when pip degeneration brought warmth from a positive
    /// value down to zero during this call.
    pub fn tick_regen(&mut self, dt: f32, rates: RegenRates) -> bool {
        if dt <= 0.0 {
            return false;
        }

        self.tick_energy(dt, rates);
        self.tick_warmth(dt)
    }

    fn tick_energy(&mut self, dt: f32, rates: RegenRates) {
        let cap = rates.energy_cap.min(self.max_energy);
        if self.energy >= cap {
            self.energy = cap;
            self.energy_accumulator = 0.0;
            return;
        }

        self.energy_accumulator += rates.energy_per_second.max(0.0) * dt;
        if self.energy_accumulator >= 1.0 {
            let whole = self.energy_accumulator.trunc();
            self.energy_accumulator -= whole;
            self.energy = self.energy.saturating_add(whole as u32).min(cap);
        }
    }

    fn tick_warmth(&mut self, dt: f32) -> bool {
        if self.warmth_regen_pips == 0 {
            self.warmth_accumulator = 0.0;
            return false;
        }

        let was_alive = self.warmth > 0.0;
        self.warmth_accumulator +=
            f32::from(self.warmth_regen_pips) * CombatConfig::WARMTH_PER_PIP * dt;

        // Truncation toward zero keeps the sign, so degeneration carries its
        // negative remainder the same way regeneration carries a positive one.
        let whole = self.warmth_accumulator.trunc();
        if whole != 0.0 {
            self.warmth_accumulator -= whole;
            self.warmth = (self.warmth + whole).clamp(0.0, self.max_warmth);
        }

        if self.warmth >= self.max_warmth && self.warmth_accumulator > 0.0 {
            self.warmth_accumulator = 0.0;
        }

        was_alive && self.warmth <= 0.0
    }

    /// Spends energy without re-checking availability.
    ///
    /// The validation pipeline has already established that the cost is
    /// affordable. Spent energy is never refunded, even if the cast that paid
    /// for it is later cancelled or interrupted.
    pub fn spend(&mut self, energy_cost: u32) {
        self.energy = self.energy.saturating_sub(energy_cost);
    }

    /// Restores energy, clamped to `cap` (the effective max energy).
    pub fn restore_energy(&mut self, amount: u32, cap: u32) {
        self.energy = self
            .energy
            .saturating_add(amount)
            .min(cap.min(self.max_energy));
    }

    /// Lowers current energy to `cap` if it exceeds it.
    pub fn clamp_energy_to(&mut self, cap: u32) {
        self.energy = self.energy.min(cap);
    }

    /// Applies damage to warmth.
    ///
    /// Returns `true` only when this call took warmth from a positive value
    /// to exactly zero. Damage to an already depleted ledger returns `false`.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        if amount <= 0.0 || self.warmth <= 0.0 {
            return false;
        }
        self.warmth = (self.warmth - amount).max(0.0);
        self.warmth == 0.0
    }

    pub fn heal(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.warmth = (self.warmth + amount).min(self.max_warmth);
    }

    /// Removes warmth as a cost. Never drops warmth below zero; affordability
    /// against the sacrifice floor is checked by the caller.
    pub fn sacrifice_warmth(&mut self, amount: f32) {
        self.warmth = (self.warmth - amount.max(0.0)).max(0.0);
    }

    /// Sets warmth to a fraction of max; used by resurrection.
    pub fn restore_warmth_fraction(&mut self, fraction: f32) {
        self.warmth = self.max_warmth * fraction.clamp(0.0, 1.0);
        self.warmth_accumulator = 0.0;
    }

    /// Sets energy to a fraction of max; used by resurrection.
    pub fn restore_energy_fraction(&mut self, fraction: f32) {
        self.energy = (self.max_energy as f32 * fraction.clamp(0.0, 1.0)) as u32;
        self.energy_accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates(energy_per_second: f32, energy_cap: u32) -> RegenRates {
        RegenRates {
            energy_per_second,
            energy_cap,
        }
    }

    #[test]
    fn energy_regen_carries_fractional_remainder() {
        let mut ledger = ResourceLedger::new(100.0, 20);
        ledger.spend(20);

        // 0.25 energy per tick: truncating each tick alone would never regen.
        for _ in 0..12 {
            ledger.tick_regen(1.0, rates(0.25, 20));
        }
        assert_eq!(ledger.energy(), 3);
    }

    #[test]
    fn energy_regen_clamps_to_cap() {
        let mut ledger = ResourceLedger::new(100.0, 10);
        ledger.spend(2);
        ledger.tick_regen(10.0, rates(5.0, 10));
        assert_eq!(ledger.energy(), 10);

        ledger.spend(5);
        ledger.tick_regen(10.0, rates(5.0, 7));
        assert_eq!(ledger.energy(), 7);
    }

    #[test]
    fn positive_pips_regenerate_two_warmth_per_pip_per_second() {
        let mut ledger = ResourceLedger::new(100.0, 10);
        ledger.apply_damage(50.0);
        ledger.set_pips(3);
        ledger.tick_regen(1.0, rates(0.0, 10));
        assert_eq!(ledger.warmth(), 56.0);
    }

    #[test]
    fn negative_pips_degenerate_and_signal_depletion() {
        let mut ledger = ResourceLedger::new(10.0, 10);
        ledger.set_pips(-5);
        assert!(!ledger.tick_regen(0.5, rates(0.0, 10)));
        assert_eq!(ledger.warmth(), 5.0);
        assert!(ledger.tick_regen(1.0, rates(0.0, 10)));
        assert_eq!(ledger.warmth(), 0.0);
        assert!(!ledger.tick_regen(1.0, rates(0.0, 10)));
    }

    #[test]
    fn pips_are_clamped_to_range() {
        let mut ledger = ResourceLedger::new(10.0, 10);
        ledger.set_pips(40);
        assert_eq!(ledger.pips(), CombatConfig::MAX_PIPS);
        ledger.set_pips(-40);
        assert_eq!(ledger.pips(), CombatConfig::MIN_PIPS);
    }

    #[test]
    fn apply_damage_reports_exact_zero_once() {
        let mut ledger = ResourceLedger::new(30.0, 10);
        assert!(!ledger.apply_damage(10.0));
        assert!(ledger.apply_damage(100.0));
        assert_eq!(ledger.warmth(), 0.0);
        assert!(!ledger.apply_damage(5.0));
    }

    #[test]
    fn spend_saturates_at_zero() {
        let mut ledger = ResourceLedger::new(30.0, 10);
        ledger.spend(25);
        assert_eq!(ledger.energy(), 0);
    }
}
