use crate::config::{EffectsConfig, ViewState};
use crate::media::Media;
use crate::weapon::WeaponTable;

/// Game clock of the current render frame. Times are milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Clock {
    pub now: i64,
    /// Position between the previous and the latest snapshot, `0..=1`.
    pub lerp_frac: f32,
}

impl Clock {
    pub fn new(now: i64, lerp_frac: f32) -> Self {
        Self {
            now,
            lerp_frac: lerp_frac.clamp(0.0, 1.0),
        }
    }
}

/// Read-only inputs shared by every handler during one step.
#[derive(Debug, Clone, Copy)]
pub struct EffectContext<'a> {
    pub config: &'a EffectsConfig,
    pub media: &'a Media,
    pub weapons: &'a WeaponTable,
    pub view: &'a ViewState,
    pub clock: Clock,
}

impl EffectContext<'_> {
    pub fn now(&self) -> i64 {
        self.clock.now
    }
}
