mod filter;
mod types;

pub use filter::{Origin, should_fire};
pub use types::{EntityEvent, EventKind, PlayerStateEvent, PlayerStateEventKind};
