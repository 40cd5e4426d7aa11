//! Per-stack pip contributions of chills and cozies.
//!
//! This is configuration data, not engine logic. Chill entries are always
//! stored as non-positive and cozy entries as non-negative, so a table can
//! never turn a debuff into regeneration.

use strum::EnumCount;

use super::{Chill, Cozy};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipTable {
    chills: [i8; Chill::COUNT],
    cozies: [i8; Cozy::COUNT],
}

impl PipTable {
    /// A table where no condition affects regeneration.
    pub fn zeroed() -> Self {
        Self {
            chills: [0; Chill::COUNT],
            cozies: [0; Cozy::COUNT],
        }
    }

    /// Builds a table from `(tag, pips_per_stack)` pairs; unlisted tags
    /// contribute nothing.
    pub fn from_pairs(chills: &[(Chill, i8)], cozies: &[(Cozy, i8)]) -> Self {
        let mut table = Self::zeroed();
        for &(tag, pips) in chills {
            table.set_chill(tag, pips);
        }
        for &(tag, pips) in cozies {
            table.set_cozy(tag, pips);
        }
        table
    }

    pub fn set_chill(&mut self, tag: Chill, pips: i8) {
        self.chills[tag as usize] = -pips.saturating_abs();
    }

    pub fn set_cozy(&mut self, tag: Cozy, pips: i8) {
        self.cozies[tag as usize] = pips.saturating_abs();
    }

    pub fn chill(&self, tag: Chill) -> i8 {
        self.chills[tag as usize]
    }

    pub fn cozy(&self, tag: Cozy) -> i8 {
        self.cozies[tag as usize]
    }
}

impl Default for PipTable {
    fn default() -> Self {
        Self::from_pairs(
            &[
                (Chill::Soaked, -2),
                (Chill::Frostbitten, -3),
                (Chill::Windburned, -1),
                (Chill::Shivering, -1),
                (Chill::Numb, -1),
                (Chill::BrainFreeze, -1),
            ],
            &[
                (Cozy::HotCocoa, 2),
                (Cozy::Toasty, 1),
                (Cozy::FireInside, 3),
                (Cozy::Bundled, 1),
                (Cozy::SecondWind, 1),
            ],
        )
    }
}
