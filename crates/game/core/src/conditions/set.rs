//! Bounded, unordered condition collections.

use arrayvec::ArrayVec;

use super::ConditionTag;
use crate::config::CombatConfig;
use crate::state::EntityId;

/// Anything with a millisecond countdown that expires at zero.
pub(crate) trait Timed {
    fn time_remaining_mut(&mut self) -> &mut u32;
}

/// Decrements every entry by `dt_ms` (floor zero) and swap-removes the
/// entries that reached zero. Returns whether anything expired.
///
/// Swap-remove reorders the collection; these sets are unordered.
pub(crate) fn tick_down<E: Timed, const N: usize>(
    entries: &mut ArrayVec<E, N>,
    dt_ms: u32,
) -> bool {
    let mut expired = false;
    let mut i = 0;
    while i < entries.len() {
        let remaining = entries[i].time_remaining_mut();
        *remaining = remaining.saturating_sub(dt_ms);
        if *remaining == 0 {
            entries.swap_remove(i);
            expired = true;
        } else {
            i += 1;
        }
    }
    expired
}

/// One active chill or cozy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveCondition<T> {
    pub tag: T,
    pub time_remaining_ms: u32,
    pub stack_intensity: u8,
    /// Who applied it. Attribution only.
    pub source: Option<EntityId>,
}

impl<T> Timed for ActiveCondition<T> {
    fn time_remaining_mut(&mut self) -> &mut u32 {
        &mut self.time_remaining_ms
    }
}

/// At most one entry per tag, at most [`CombatConfig::MAX_CONDITIONS`] entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionSet<T> {
    entries: ArrayVec<ActiveCondition<T>, { CombatConfig::MAX_CONDITIONS }>,
}

impl<T> Default for ConditionSet<T> {
    fn default() -> Self {
        Self {
            entries: ArrayVec::new(),
        }
    }
}

impl<T: ConditionTag> ConditionSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a condition.
    ///
    /// Reapplying an active tag refreshes its duration to the longer of the
    /// two and adds intensity (saturating at 255); it never creates a second
    /// entry. A new tag is inserted if there is room. When the set is full
    /// the application is dropped and `false` is returned.
    pub fn add(
        &mut self,
        tag: T,
        duration_ms: u32,
        intensity: u8,
        source: Option<EntityId>,
    ) -> bool {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.tag == tag) {
            existing.time_remaining_ms = existing.time_remaining_ms.max(duration_ms);
            existing.stack_intensity = existing.stack_intensity.saturating_add(intensity);
            if source.is_some() {
                existing.source = source;
            }
            return true;
        }

        let accepted = self
            .entries
            .try_push(ActiveCondition {
                tag,
                time_remaining_ms: duration_ms,
                stack_intensity: intensity,
                source,
            })
            .is_ok();
        if !accepted {
            let class = T::CLASS;
            tracing::debug!(class = %class, tag = tag.as_ref(), "condition set full, dropped");
        }
        accepted
    }

    /// Counts down all entries; see [`tick_down`].
    pub fn update(&mut self, dt_ms: u32) -> bool {
        tick_down(&mut self.entries, dt_ms)
    }

    pub fn remove(&mut self, tag: T) -> bool {
        match self.entries.iter().position(|e| e.tag == tag) {
            Some(index) => {
                self.entries.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, tag: T) -> Option<&ActiveCondition<T>> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    pub fn contains(&self, tag: T) -> bool {
        self.get(tag).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveCondition<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::Chill;
    use strum::IntoEnumIterator;

    #[test]
    fn reapplying_refreshes_to_longer_duration_and_sums_intensity() {
        let mut set = ConditionSet::new();
        assert!(set.add(Chill::Soaked, 5_000, 2, None));
        assert!(set.add(Chill::Soaked, 3_000, 1, Some(EntityId(4))));

        assert_eq!(set.len(), 1);
        let soaked = set.get(Chill::Soaked).unwrap();
        assert_eq!(soaked.time_remaining_ms, 5_000);
        assert_eq!(soaked.stack_intensity, 3);
        assert_eq!(soaked.source, Some(EntityId(4)));

        assert!(set.add(Chill::Soaked, 9_000, 0, None));
        assert_eq!(set.get(Chill::Soaked).unwrap().time_remaining_ms, 9_000);
    }

    #[test]
    fn intensity_saturates_at_255() {
        let mut set = ConditionSet::new();
        set.add(Chill::Numb, 1_000, 200, None);
        set.add(Chill::Numb, 1_000, 200, None);
        assert_eq!(set.get(Chill::Numb).unwrap().stack_intensity, u8::MAX);
    }

    #[test]
    fn entry_reaching_zero_is_removed_on_update() {
        let mut set = ConditionSet::new();
        set.add(Chill::Soaked, 1_000, 1, None);
        set.add(Chill::Numb, 3_000, 1, None);

        assert!(!set.update(999));
        assert!(set.contains(Chill::Soaked));
        assert!(set.update(1));
        assert!(!set.contains(Chill::Soaked));
        assert!(set.contains(Chill::Numb));
        assert_eq!(set.get(Chill::Numb).unwrap().time_remaining_ms, 2_000);
    }

    #[test]
    fn swap_remove_keeps_every_survivor() {
        let mut set = ConditionSet::new();
        for (i, tag) in Chill::iter().enumerate() {
            set.add(tag, 1_000 * (i as u32 + 1), 1, None);
        }
        assert!(set.update(2_000));
        assert_eq!(set.len(), Chill::iter().count() - 2);
        assert!(set.iter().all(|e| e.time_remaining_ms > 0));
    }

    /// Conditions are secondary systems: overflow is dropped on purpose, and
    /// the existing entries must come through untouched.
    #[test]
    fn full_set_rejects_new_tags_by_design() {
        // More distinct tags than any real tag enum has.
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        struct Tag(u8);
        impl AsRef<str> for Tag {
            fn as_ref(&self) -> &str {
                "tag"
            }
        }
        impl ConditionTag for Tag {
            const CLASS: crate::conditions::ConditionClass = crate::conditions::ConditionClass::Chill;
        }

        let mut set = ConditionSet::new();
        for i in 0..CombatConfig::MAX_CONDITIONS as u8 {
            assert!(set.add(Tag(i), 1_000, 1, None));
        }
        let before = set.clone();

        assert!(!set.add(Tag(200), 1_000, 1, None));
        assert_eq!(set, before);

        // Refreshing an existing tag still works when full.
        assert!(set.add(Tag(0), 5_000, 1, None));
        assert_eq!(set.get(Tag(0)).unwrap().stack_intensity, 2);
    }
}
