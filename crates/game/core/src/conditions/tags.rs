//! Condition tags.
//!
//! Chills are debuffs, cozies are buffs. Each tag maps to a per-stack pip
//! contribution through the [`PipTable`](super::PipTable); the tags
//! themselves carry no numbers.

/// Which class a condition belongs to; used for icons and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionClass {
    Chill,
    Cozy,
    Effect,
}

/// Tag types stored in a [`ConditionSet`](super::ConditionSet).
pub trait ConditionTag: Copy + Eq + core::fmt::Debug + AsRef<str> {
    const CLASS: ConditionClass;
}

/// Debuff tags.
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
    strum::EnumCount,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Chill {
    /// Drenched in meltwater.
    Soaked,
    Frostbitten,
    Windburned,
    Shivering,
    /// Footing lost on ice.
    Slipping,
    Numb,
    BrainFreeze,
}

impl ConditionTag for Chill {
    const CLASS: ConditionClass = ConditionClass::Chill;
}

/// Buff tags.
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
    strum::EnumCount,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cozy {
    HotCocoa,
    Toasty,
    FireInside,
    Bundled,
    Insulated,
    SecondWind,
}

impl ConditionTag for Cozy {
    const CLASS: ConditionClass = ConditionClass::Cozy;
}
