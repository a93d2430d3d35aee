use glam::Vec3;

/// Lifecycle of a continuous laser beam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BeamPhase {
    #[default]
    Idle,
    Active {
        until: i64,
    },
}

impl BeamPhase {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LaserBeam {
    pub phase: BeamPhase,
    pub origin: Vec3,
    pub point: Vec3,
    pub origin_old: Vec3,
    pub point_old: Vec3,
    /// Last time impact sparks were emitted.
    pub smoke_trail: Option<i64>,
}

impl LaserBeam {
    pub fn lerp_origin(&self, frac: f32) -> Vec3 {
        self.origin_old.lerp(self.origin, frac)
    }

    pub fn lerp_point(&self, frac: f32) -> Vec3 {
        self.point_old.lerp(self.point, frac)
    }
}

/// Instant beam waiting for the next render tick to be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingBeam {
    pub origin: Vec3,
    pub end: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalEffects {
    pub vsay_until: Option<i64>,
    pub teleport_in: Option<i64>,
    pub teleport_out: Option<i64>,
}

/// Client-only presentation state of one entity slot. Nothing here is
/// replicated; it is written by event handlers and read by the render tick.
#[derive(Debug, Clone, Default)]
pub struct ContinuousState {
    pub laser: LaserBeam,
    pub weapon_beam: Option<PendingBeam>,
    pub local: LocalEffects,
    pub jumped_left: bool,
    pub respawn_time: Option<i64>,
    pub teleported_to: Vec3,
    pub teleported_from: Vec3,
    pub flash_until: Option<i64>,
    pub barrel_until: Option<i64>,
}

impl ContinuousState {
    pub fn has_pending_render(&self) -> bool {
        self.laser.phase.is_active() || self.weapon_beam.is_some()
    }
}
