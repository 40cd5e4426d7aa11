//! Cast attempt counters.
//!
//! Telemetry observes the pipeline and never feeds back into it: a battle
//! with no sink behaves identically to one with a sink attached.

use std::sync::atomic::{AtomicU64, Ordering};

/// Named counters emitted by the validation pipeline.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumCount,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum CastCounter {
    CooldownBlocked,
    NoEnergyBlocked,
    OutOfRangeBlocked,
    CastAttemptedWithCost,
}

/// Receiver of cast counters.
pub trait TelemetrySink: Send + Sync {
    fn record(&self, counter: CastCounter);
}

/// In-memory sink counting each counter.
#[derive(Debug, Default)]
pub struct CastCounters {
    cooldown_blocked: AtomicU64,
    no_energy_blocked: AtomicU64,
    out_of_range_blocked: AtomicU64,
    cast_attempted_with_cost: AtomicU64,
}

impl CastCounters {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, counter: CastCounter) -> &AtomicU64 {
        match counter {
            CastCounter::CooldownBlocked => &self.cooldown_blocked,
            CastCounter::NoEnergyBlocked => &self.no_energy_blocked,
            CastCounter::OutOfRangeBlocked => &self.out_of_range_blocked,
            CastCounter::CastAttemptedWithCost => &self.cast_attempted_with_cost,
        }
    }

    pub fn get(&self, counter: CastCounter) -> u64 {
        self.slot(counter).load(Ordering::Relaxed)
    }
}

impl TelemetrySink for CastCounters {
    fn record(&self, counter: CastCounter) {
        self.slot(counter).fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn counters_are_independent() {
        let counters = CastCounters::new();
        counters.record(CastCounter::NoEnergyBlocked);
        counters.record(CastCounter::NoEnergyBlocked);
        counters.record(CastCounter::OutOfRangeBlocked);

        assert_eq!(counters.get(CastCounter::NoEnergyBlocked), 2);
        assert_eq!(counters.get(CastCounter::OutOfRangeBlocked), 1);
        let total: u64 = CastCounter::iter().map(|c| counters.get(c)).sum();
        assert_eq!(total, 3);
    }
}
