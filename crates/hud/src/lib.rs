pub mod api;
pub mod color;
pub mod constants;
pub mod error;
pub mod host;
pub mod layout;
pub mod snapshot;
pub mod widgets;

pub use api::{
    Alignment, Font, HudApi, HudFrame, PassThrough, Quad, Renderer2d, ScopeView, Text, TextStyle,
};
pub use color::{ColorValue, Rgba8};
pub use error::ScriptError;
pub use host::{FileAsset, HostStats, HudHost, HudScript, ScriptAsset, ScriptEngine, StaticAsset};
pub use layout::{Layout, LayoutEngine};
pub use snapshot::{
    BombProgress, FpsCounter, HudConfig, HudSnapshot, MatchHud, MatchState, NetStatus, Perk,
    PlayerHud, RoundType, StaminaState, TeamScore, Value, WeaponSlot, WeaponState,
};
