mod compose;
mod damage;
mod feed;

pub use compose::{compose, compose_seeded, conjunction, obituary_rng, scope_taunt};
pub use damage::{DamageCategory, DamageType, GENERIC_ICON, Gadget, WorldDamage};
pub use feed::{
    ChatSegment, MAX_OBITUARIES, OBITUARY_COLOR, OBITUARY_LIFETIME, Obituaries, ObituaryKind,
    ObituaryMessage, ObituaryNotice, ObituaryRecord, SelfObituary,
};
