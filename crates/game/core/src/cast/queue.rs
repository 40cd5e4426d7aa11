use super::CastTarget;

/// A cast that failed only on range, waiting for the caster to close in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueuedCast {
    pub slot: usize,
    pub target: CastTarget,
}

/// Holds at most one pending approach cast. A newer out-of-range attempt
/// replaces the older one.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SkillQueue {
    pending: Option<QueuedCast>,
}

impl SkillQueue {
    pub fn enqueue(&mut self, slot: usize, target: CastTarget) {
        self.pending = Some(QueuedCast { slot, target });
    }

    pub fn pending(&self) -> Option<&QueuedCast> {
        self.pending.as_ref()
    }

    pub fn take(&mut self) -> Option<QueuedCast> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}
