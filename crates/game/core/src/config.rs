/// Combat configuration constants and tunable parameters.
///
/// Capacities are compile-time constants because they size the fixed
/// collections inside every character. Everything else is a runtime-tunable
/// balance value with a default, and can be loaded from TOML by the content
/// crate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Base energy regenerated per second before effect multipliers.
    pub energy_regen_per_second: f32,
    /// Fixed lockout after a skill's effect fires, in seconds.
    pub aftercast_seconds: f32,
    /// Seconds between automatic swings while auto-attacking.
    pub auto_attack_interval: f32,
    /// Maximum distance for an auto-attack swing.
    pub auto_attack_range: f32,
    /// Seconds for one unit of debt to be repaid.
    pub debt_recovery_interval: f32,
    /// Effective max energy (max minus debt) may never drop below this.
    pub min_effective_max_energy: u32,
    /// Upper bound of the rhythm charge counter.
    pub rhythm_max_charge: u8,
    /// Length of the perfect-timing window opened by each fired skill.
    pub rhythm_window_seconds: f32,
    /// Warmth that must remain after paying a warmth sacrifice.
    pub min_warmth_after_sacrifice: f32,
    /// Warmth paid by a warmth-for-energy conversion.
    pub sacrifice_warmth_cost: f32,
    /// Energy granted by a warmth-for-energy conversion.
    pub sacrifice_energy_gain: u32,
    /// Cooldown started by a warmth-for-energy conversion.
    pub sacrifice_cooldown_seconds: f32,
    /// Seconds without a hit before a damage monitor entry is dropped.
    pub damage_source_idle_seconds: f32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_SKILL_SLOTS: usize = 8;
    pub const MAX_CONDITIONS: usize = 10;
    pub const MAX_DAMAGE_SOURCES: usize = 6;
    /// Characters one battle can hold.
    pub const MAX_CHARACTERS: usize = 32;
    pub const MAX_GRIT: u8 = 5;
    /// Grit stacks consumed by one free cast.
    pub const GRIT_PER_FREE_CAST: u8 = 5;
    pub const VARIETY_WINDOW: usize = 5;
    pub const VARIETY_BONUS_PER_TYPE: f32 = 0.125;
    pub const MAX_VARIETY_BONUS: f32 = 0.5;
    pub const MIN_PIPS: i8 = -10;
    pub const MAX_PIPS: i8 = 10;
    pub const DEFAULT_MAX_WARMTH: f32 = 100.0;
    pub const DEFAULT_MAX_ENERGY: u32 = 20;
    /// Warmth per second contributed by a single pip.
    pub const WARMTH_PER_PIP: f32 = 2.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ENERGY_REGEN: f32 = 0.5;
    pub const DEFAULT_AFTERCAST: f32 = 0.75;
    pub const DEFAULT_AUTO_ATTACK_INTERVAL: f32 = 1.33;
    pub const DEFAULT_AUTO_ATTACK_RANGE: f32 = 3.0;
    pub const DEFAULT_DEBT_RECOVERY: f32 = 3.0;
    pub const DEFAULT_MIN_EFFECTIVE_MAX_ENERGY: u32 = 5;
    pub const DEFAULT_RHYTHM_MAX: u8 = 10;
    pub const DEFAULT_RHYTHM_WINDOW: f32 = 1.0;
    pub const DEFAULT_MIN_WARMTH_AFTER_SACRIFICE: f32 = 1.0;
    pub const DEFAULT_SACRIFICE_WARMTH: f32 = 20.0;
    pub const DEFAULT_SACRIFICE_ENERGY: u32 = 5;
    pub const DEFAULT_SACRIFICE_COOLDOWN: f32 = 10.0;
    pub const DEFAULT_DAMAGE_SOURCE_IDLE: f32 = 10.0;

    pub fn new() -> Self {
        Self {
            energy_regen_per_second: Self::DEFAULT_ENERGY_REGEN,
            aftercast_seconds: Self::DEFAULT_AFTERCAST,
            auto_attack_interval: Self::DEFAULT_AUTO_ATTACK_INTERVAL,
            auto_attack_range: Self::DEFAULT_AUTO_ATTACK_RANGE,
            debt_recovery_interval: Self::DEFAULT_DEBT_RECOVERY,
            min_effective_max_energy: Self::DEFAULT_MIN_EFFECTIVE_MAX_ENERGY,
            rhythm_max_charge: Self::DEFAULT_RHYTHM_MAX,
            rhythm_window_seconds: Self::DEFAULT_RHYTHM_WINDOW,
            min_warmth_after_sacrifice: Self::DEFAULT_MIN_WARMTH_AFTER_SACRIFICE,
            sacrifice_warmth_cost: Self::DEFAULT_SACRIFICE_WARMTH,
            sacrifice_energy_gain: Self::DEFAULT_SACRIFICE_ENERGY,
            sacrifice_cooldown_seconds: Self::DEFAULT_SACRIFICE_COOLDOWN,
            damage_source_idle_seconds: Self::DEFAULT_DAMAGE_SOURCE_IDLE,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the simulation reads but never mutates during a match.
///
/// Passed by reference into every tick; characters never own rule data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CombatRules {
    pub config: CombatConfig,
    pub pips: crate::conditions::PipTable,
}

impl CombatRules {
    pub fn new(config: CombatConfig, pips: crate::conditions::PipTable) -> Self {
        Self { config, pips }
    }
}
