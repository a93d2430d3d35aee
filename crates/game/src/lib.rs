pub mod announcer;
pub mod beam;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod entity;
pub mod event;
pub mod frame;
pub mod math;
pub mod media;
pub mod obituary;
pub mod ring;
pub mod roster;
pub mod services;
pub mod weapon;

pub use announcer::{ANNOUNCER_QUEUE, ANNOUNCER_SPACING, Announcer};
pub use config::{BloodTrail, EffectsConfig, PredictedPlayer, ViewState};
pub use context::{Clock, EffectContext};
pub use dispatch::{Reactor, VSAY_TIMEOUT};
pub use entity::{
    BeamPhase, ClientEntity, ContinuousState, EntityArena, EntityEffects, EntityNum, EntityState,
    EntityType, MAX_CLIENTS, MAX_ENTITIES, Team,
};
pub use event::{EntityEvent, EventKind, Origin, PlayerStateEvent, PlayerStateEventKind};
pub use frame::{Frame, PlayerStateFrame};
pub use media::{Media, PlayerSound, SoundId};
pub use obituary::{
    DamageType, Obituaries, ObituaryKind, ObituaryMessage, ObituaryNotice, ObituaryRecord,
};
pub use ring::Ring;
pub use roster::Roster;
pub use services::{
    Attenuation, Audio, Channel, Collision, Contents, Effect, Emitter, Scene, ScreenEffect,
    Services, SoundRequest, SurfaceFlags, Trace, TraceHit, TraceQuery,
};
pub use weapon::{WeaponTable, WeaponType};
