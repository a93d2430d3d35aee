mod arena;
mod continuous;
mod state;

pub use arena::{ClientEntity, EntityArena};
pub use continuous::{BeamPhase, ContinuousState, LaserBeam, LocalEffects, PendingBeam};
pub use state::{EntityEffects, EntityState, EntityType, Team, team_color};

pub type EntityNum = u16;

pub const WORLD: EntityNum = 0;
pub const MAX_CLIENTS: usize = 64;
pub const MAX_ENTITIES: usize = 1024;

/// Entity numbers `1..=MAX_CLIENTS` belong to players.
pub fn is_client(num: EntityNum) -> bool {
    num != WORLD && (num as usize) <= MAX_CLIENTS
}
