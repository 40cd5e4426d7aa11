//! Damage monitor: a short combat log of who has been hurting a character.
//!
//! Entries are kept in insertion order. A new distinct source evicts the
//! oldest entry when the ring is full, and entries that stay idle for the
//! configured threshold age out. While the owner is dead the monitor is
//! frozen and ignores both updates and hits.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::state::EntityId;

/// One (skill, source) pair in the monitor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageSource {
    pub skill_name: String,
    pub source: EntityId,
    pub hits: u32,
    /// Seconds since this pair last hit.
    pub idle_seconds: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DamageMonitor {
    entries: ArrayVec<DamageSource, { CombatConfig::MAX_DAMAGE_SOURCES }>,
    frozen: bool,
}

impl DamageMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a hit. Returns `false` only while frozen.
    pub fn record(&mut self, skill_name: &str, source: EntityId) -> bool {
        if self.frozen {
            return false;
        }

        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.source == source && e.skill_name == skill_name)
        {
            entry.hits = entry.hits.saturating_add(1);
            entry.idle_seconds = 0.0;
            return true;
        }

        if self.entries.is_full() {
            let evicted = self.entries.remove(0);
            tracing::trace!(
                skill = %evicted.skill_name,
                source = %evicted.source,
                "damage monitor evicted oldest entry"
            );
        }
        self.entries.push(DamageSource {
            skill_name: skill_name.to_owned(),
            source,
            hits: 1,
            idle_seconds: 0.0,
        });
        true
    }

    /// Ages every entry by `dt` seconds and drops those idle for
    /// `idle_limit` seconds or more.
    pub fn update(&mut self, dt: f32, idle_limit: f32) {
        if self.frozen {
            return;
        }
        for entry in &mut self.entries {
            entry.idle_seconds += dt;
        }
        self.entries.retain(|e| e.idle_seconds < idle_limit);
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Thaws the monitor and starts a fresh log.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
        self.entries.clear();
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn entries(&self) -> &[DamageSource] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
