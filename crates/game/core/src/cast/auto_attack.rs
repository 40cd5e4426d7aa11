use crate::state::EntityId;

/// Automatic basic attacks against one target.
///
/// The timer keeps counting while a skill is being cast, but a swing is
/// held until the cast machine is idle again.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct AutoAttack {
    target: Option<EntityId>,
    timer: f32,
}

impl AutoAttack {
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Switching targets keeps the running timer so retargeting cannot be
    /// used to swing early.
    pub fn start(&mut self, target: EntityId) {
        self.target = Some(target);
    }

    pub fn stop(&mut self) {
        self.target = None;
    }

    pub fn tick(&mut self, dt: f32) {
        self.timer = (self.timer - dt).max(0.0);
    }

    /// Target of the next swing when the timer is spent and the caster idle.
    pub fn ready(&self, cast_idle: bool) -> Option<EntityId> {
        if cast_idle && self.timer <= 0.0 {
            self.target
        } else {
            None
        }
    }

    pub fn swing(&mut self, interval: f32) {
        self.timer = interval.max(0.0);
    }
}
