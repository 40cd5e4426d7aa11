//! School-specific secondary resource mechanics.
//!
//! Every character belongs to exactly one school, chosen at creation. The
//! school decides which single secondary mechanic the character carries, so
//! the mechanic is an enum with payload rather than five always-present
//! fields: a character can never accumulate a resource it has no way to
//! spend.
//!
//! | School     | Mechanic    |
//! |------------|-------------|
//! | Private    | Credit/Debt |
//! | Public     | Grit        |
//! | Waldorf    | Rhythm      |
//! | Homeschool | Sacrifice   |
//! | Montessori | Variety     |

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::env::{SkillCosts, SkillType};
use crate::state::ResourceLedger;
use crate::validation::CastFailure;

/// Faction a character fights for. Immutable after creation.
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
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum School {
    Private,
    Public,
    Waldorf,
    Homeschool,
    Montessori,
}

impl School {
    /// Fresh mechanic state for a newly created character of this school.
    pub fn mechanic(self) -> SchoolMechanic {
        match self {
            Self::Private => SchoolMechanic::Credit(CreditLine::default()),
            Self::Public => SchoolMechanic::Grit(GritStacks::default()),
            Self::Waldorf => SchoolMechanic::Rhythm(RhythmCharge::default()),
            Self::Homeschool => SchoolMechanic::Sacrifice(SacrificeState::default()),
            Self::Montessori => SchoolMechanic::Variety(VarietyTracker::default()),
        }
    }
}

// ============================================================================
// Credit / Debt
// ============================================================================

/// Energy borrowed against future regeneration.
///
/// Outstanding debt lowers the effective max energy and is repaid one unit
/// per recovery interval.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CreditLine {
    debt: u32,
    recovery_timer: f32,
}

impl CreditLine {
    pub fn debt(&self) -> u32 {
        self.debt
    }

    pub fn effective_max_energy(&self, max_energy: u32) -> u32 {
        max_energy.saturating_sub(self.debt)
    }

    /// Whether `credit` more debt keeps effective max energy at or above the floor.
    pub fn can_borrow(&self, credit: u32, max_energy: u32, floor: u32) -> bool {
        let total = u64::from(self.debt) + u64::from(credit);
        total <= u64::from(max_energy) && u64::from(max_energy) - total >= u64::from(floor)
    }

    pub fn borrow(&mut self, credit: u32, max_energy: u32) {
        self.debt = self.debt.saturating_add(credit).min(max_energy);
    }

    fn tick(&mut self, dt: f32, interval: f32) {
        if self.debt == 0 || interval <= 0.0 {
            self.recovery_timer = 0.0;
            return;
        }
        self.recovery_timer += dt;
        while self.recovery_timer >= interval && self.debt > 0 {
            self.recovery_timer -= interval;
            self.debt -= 1;
        }
        if self.debt == 0 {
            self.recovery_timer = 0.0;
        }
    }
}

// ============================================================================
// Grit
// ============================================================================

/// Stacks built by landing skills; a full bar pays for one cast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GritStacks {
    stacks: u8,
}

impl GritStacks {
    pub fn stacks(&self) -> u8 {
        self.stacks
    }

    pub fn add(&mut self, amount: u8) {
        self.stacks = self
            .stacks
            .saturating_add(amount)
            .min(CombatConfig::MAX_GRIT);
    }

    pub fn spend(&mut self, amount: u8) {
        self.stacks = self.stacks.saturating_sub(amount);
    }

    pub fn free_cast_ready(&self) -> bool {
        self.stacks >= CombatConfig::GRIT_PER_FREE_CAST
    }

    fn consume_free_cast(&mut self) {
        self.spend(CombatConfig::GRIT_PER_FREE_CAST);
    }
}

// ============================================================================
// Rhythm
// ============================================================================

/// Charge built by firing skills, doubled when fired inside the perfect
/// timing window left by the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RhythmCharge {
    charge: u8,
    perfect_window: f32,
}

impl RhythmCharge {
    pub fn charge(&self) -> u8 {
        self.charge
    }

    pub fn perfect_window(&self) -> f32 {
        self.perfect_window
    }

    pub fn in_perfect_window(&self) -> bool {
        self.perfect_window > 0.0
    }

    /// Builds charge for a fired skill and reopens the timing window.
    pub fn build(&mut self, config: &CombatConfig) {
        let gain = if self.in_perfect_window() { 2 } else { 1 };
        self.charge = self
            .charge
            .saturating_add(gain)
            .min(config.rhythm_max_charge);
        self.perfect_window = config.rhythm_window_seconds.max(0.0);
    }

    pub fn spend(&mut self, amount: u8) {
        self.charge = self.charge.saturating_sub(amount);
    }

    fn tick(&mut self, dt: f32) {
        self.perfect_window = (self.perfect_window - dt).max(0.0);
    }
}

// ============================================================================
// Sacrifice
// ============================================================================

/// Cooldown gating the warmth-for-energy conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SacrificeState {
    cooldown: f32,
}

impl SacrificeState {
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    pub fn start_cooldown(&mut self, seconds: f32) {
        self.cooldown = seconds.max(0.0);
    }

    fn tick(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }
}

/// Whether paying `amount` warmth leaves at least `floor` behind.
///
/// Warmth must stay above zero whatever `floor` is configured to: zero
/// warmth is death, and a cost may never kill its payer.
pub fn sacrifice_affordable(ledger: &ResourceLedger, amount: f32, floor: f32) -> bool {
    let remaining = ledger.warmth() - amount;
    remaining > 0.0 && remaining >= floor
}

// ============================================================================
// Variety
// ============================================================================

/// Ring buffer of the most recent skill types, rewarding a varied rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VarietyTracker {
    recent: [Option<SkillType>; CombatConfig::VARIETY_WINDOW],
    next: usize,
}

impl VarietyTracker {
    pub fn record(&mut self, skill_type: SkillType) {
        self.recent[self.next] = Some(skill_type);
        self.next = (self.next + 1) % CombatConfig::VARIETY_WINDOW;
    }

    /// Skill types in the window, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = SkillType> + '_ {
        (0..CombatConfig::VARIETY_WINDOW)
            .filter_map(move |i| self.recent[(self.next + i) % CombatConfig::VARIETY_WINDOW])
    }

    pub fn distinct_types(&self) -> usize {
        let mut seen: ArrayVec<SkillType, { CombatConfig::VARIETY_WINDOW }> = ArrayVec::new();
        for skill_type in self.recent() {
            if !seen.contains(&skill_type) {
                seen.push(skill_type);
            }
        }
        seen.len()
    }

    /// Damage bonus in `[0, 0.5]`: nothing for a single repeated type, a
    /// fixed step for every additional distinct type in the window.
    pub fn damage_bonus(&self) -> f32 {
        let extra = self.distinct_types().saturating_sub(1) as f32;
        (extra * CombatConfig::VARIETY_BONUS_PER_TYPE).min(CombatConfig::MAX_VARIETY_BONUS)
    }
}

// ============================================================================
// Mechanic
// ============================================================================

/// The single secondary mechanic carried by a character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SchoolMechanic {
    Credit(CreditLine),
    Grit(GritStacks),
    Rhythm(RhythmCharge),
    Sacrifice(SacrificeState),
    Variety(VarietyTracker),
}

impl SchoolMechanic {
    pub fn school(&self) -> School {
        match self {
            Self::Credit(_) => School::Private,
            Self::Grit(_) => School::Public,
            Self::Rhythm(_) => School::Waldorf,
            Self::Sacrifice(_) => School::Homeschool,
            Self::Variety(_) => School::Montessori,
        }
    }

    /// Advances the mechanic's timers.
    pub fn tick(&mut self, dt: f32, config: &CombatConfig) {
        if dt <= 0.0 {
            return;
        }
        match self {
            Self::Credit(credit) => credit.tick(dt, config.debt_recovery_interval),
            Self::Rhythm(rhythm) => rhythm.tick(dt),
            Self::Sacrifice(sacrifice) => sacrifice.tick(dt),
            Self::Grit(_) | Self::Variety(_) => {}
        }
    }

    pub fn debt(&self) -> u32 {
        match self {
            Self::Credit(credit) => credit.debt(),
            _ => 0,
        }
    }

    /// Max energy minus outstanding debt.
    pub fn effective_max_energy(&self, max_energy: u32) -> u32 {
        match self {
            Self::Credit(credit) => credit.effective_max_energy(max_energy),
            _ => max_energy,
        }
    }

    /// A full grit bar waives the energy cost of a skill that does not
    /// itself spend grit.
    pub fn free_cast_available(&self, costs: &SkillCosts) -> bool {
        match self {
            Self::Grit(grit) => costs.grit == 0 && costs.energy > 0 && grit.free_cast_ready(),
            _ => false,
        }
    }

    /// Secondary-resource check. Costs that belong to other schools are
    /// ignored, as is every cost the skill leaves at zero.
    pub fn check_costs(
        &self,
        costs: &SkillCosts,
        ledger: &ResourceLedger,
        config: &CombatConfig,
    ) -> Result<(), CastFailure> {
        match self {
            Self::Grit(grit) if costs.grit > 0 && grit.stacks() < costs.grit => {
                Err(CastFailure::NoGrit)
            }
            Self::Rhythm(rhythm) if costs.rhythm > 0 && rhythm.charge() < costs.rhythm => {
                Err(CastFailure::NoRhythm)
            }
            Self::Sacrifice(_)
                if costs.warmth_sacrifice > 0.0
                    && !sacrifice_affordable(
                        ledger,
                        costs.warmth_sacrifice,
                        config.min_warmth_after_sacrifice,
                    ) =>
            {
                Err(CastFailure::NoWarmthForSacrifice)
            }
            Self::Credit(credit)
                if costs.credit > 0
                    && !credit.can_borrow(
                        costs.credit,
                        ledger.max_energy(),
                        config.min_effective_max_energy,
                    ) =>
            {
                Err(CastFailure::NoCreditAvailable)
            }
            _ => Ok(()),
        }
    }

    /// Pays the school-specific share of a skill's costs and records the
    /// cast. Availability has already been validated.
    pub(crate) fn pay(
        &mut self,
        costs: &SkillCosts,
        skill_type: SkillType,
        free_cast: bool,
        ledger: &mut ResourceLedger,
    ) {
        match self {
            Self::Credit(credit) => {
                if costs.credit > 0 {
                    credit.borrow(costs.credit, ledger.max_energy());
                    ledger.clamp_energy_to(credit.effective_max_energy(ledger.max_energy()));
                }
            }
            Self::Grit(grit) => {
                if free_cast {
                    grit.consume_free_cast();
                }
                grit.spend(costs.grit);
            }
            Self::Rhythm(rhythm) => rhythm.spend(costs.rhythm),
            Self::Sacrifice(_) => {
                if costs.warmth_sacrifice > 0.0 {
                    ledger.sacrifice_warmth(costs.warmth_sacrifice);
                }
            }
            Self::Variety(variety) => variety.record(skill_type),
        }
    }

    /// Reacts to a skill's effect firing.
    pub(crate) fn on_effect_fired(&mut self, grit_gain: u8, config: &CombatConfig) {
        match self {
            Self::Grit(grit) => grit.add(grit_gain),
            Self::Rhythm(rhythm) => rhythm.build(config),
            _ => {}
        }
    }

    /// Damage bonus for the external resolver. Only variety grants one.
    pub fn damage_bonus(&self) -> f32 {
        match self {
            Self::Variety(variety) => variety.damage_bonus(),
            _ => 0.0,
        }
    }
}
