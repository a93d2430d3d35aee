use serde::{Deserialize, Serialize};

/// Entity event kinds in wire order. Every kind before `WeaponDrop` is
/// predictable: the local client simulates it from its own input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EventKind {
    #[default]
    None = 0,

    WeaponActivate,
    FireWeapon,
    ElectroTrail,
    FireRiotgun,
    SmoothRefireWeapon,
    NoAmmoClick,
    Dash,
    WallJump,
    DoubleJump,
    Jump,
    JumpPad,
    Fall,

    WeaponDrop,
    Pain,
    Die,
    Explosion1,
    Explosion2,
    Sparks,
    LaserSparks,
    Gibs,
    ItemRespawn,
    PlayerRespawn,
    PlayerTeleportIn,
    PlayerTeleportOut,
    PlasmaExplosion,
    BoltExplosion,
    GrenadeExplosion,
    RocketExplosion,
    GrenadeBounce,
    BladeImpact,
    Blood,
    PlatHitTop,
    PlatHitBottom,
    PlatStartMoving,
    DoorHitTop,
    DoorHitBottom,
    DoorStartMoving,
    ButtonFire,
    TrainStop,
    TrainStart,
    VoiceSay,
    Damage,
}

impl EventKind {
    pub const COUNT: usize = Self::Damage as usize + 1;

    pub const ALL: [EventKind; Self::COUNT] = [
        Self::None,
        Self::WeaponActivate,
        Self::FireWeapon,
        Self::ElectroTrail,
        Self::FireRiotgun,
        Self::SmoothRefireWeapon,
        Self::NoAmmoClick,
        Self::Dash,
        Self::WallJump,
        Self::DoubleJump,
        Self::Jump,
        Self::JumpPad,
        Self::Fall,
        Self::WeaponDrop,
        Self::Pain,
        Self::Die,
        Self::Explosion1,
        Self::Explosion2,
        Self::Sparks,
        Self::LaserSparks,
        Self::Gibs,
        Self::ItemRespawn,
        Self::PlayerRespawn,
        Self::PlayerTeleportIn,
        Self::PlayerTeleportOut,
        Self::PlasmaExplosion,
        Self::BoltExplosion,
        Self::GrenadeExplosion,
        Self::RocketExplosion,
        Self::GrenadeBounce,
        Self::BladeImpact,
        Self::Blood,
        Self::PlatHitTop,
        Self::PlatHitBottom,
        Self::PlatStartMoving,
        Self::DoorHitTop,
        Self::DoorHitBottom,
        Self::DoorStartMoving,
        Self::ButtonFire,
        Self::TrainStop,
        Self::TrainStart,
        Self::VoiceSay,
        Self::Damage,
    ];

    pub fn is_predictable(self) -> bool {
        (self as u8) < (Self::WeaponDrop as u8)
    }

    /// Fired in the first pass of a frame, before every other event.
    pub fn is_early(self) -> bool {
        self == Self::WeaponDrop
    }

    /// Mover sounds all resolve to a precached sound index.
    pub fn is_mover_sound(self) -> bool {
        matches!(
            self,
            Self::PlatHitTop
                | Self::PlatHitBottom
                | Self::PlatStartMoving
                | Self::DoorHitTop
                | Self::DoorHitBottom
                | Self::DoorStartMoving
                | Self::ButtonFire
                | Self::TrainStop
                | Self::TrainStart
        )
    }
}

impl From<u8> for EventKind {
    fn from(value: u8) -> Self {
        Self::ALL
            .get(value as usize)
            .copied()
            .unwrap_or(Self::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityEvent {
    pub kind: EventKind,
    pub parm: u8,
}

impl EntityEvent {
    pub fn new(kind: EventKind, parm: u8) -> Self {
        Self { kind, parm }
    }
}

/// Events addressed only to the local player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PlayerStateEventKind {
    #[default]
    None = 0,
    Hit,
    Damage10,
    Damage20,
    Damage30,
    Damage40,
    IndexedSound,
    Announcer,
    AnnouncerQueued,
}

impl PlayerStateEventKind {
    const ALL: [PlayerStateEventKind; 9] = [
        Self::None,
        Self::Hit,
        Self::Damage10,
        Self::Damage20,
        Self::Damage30,
        Self::Damage40,
        Self::IndexedSound,
        Self::Announcer,
        Self::AnnouncerQueued,
    ];

    pub fn indicator_damage(self) -> Option<u8> {
        match self {
            Self::Damage10 => Some(10),
            Self::Damage20 => Some(20),
            Self::Damage30 => Some(30),
            Self::Damage40 => Some(40),
            _ => None,
        }
    }
}

impl From<u8> for PlayerStateEventKind {
    fn from(value: u8) -> Self {
        Self::ALL
            .get((value & 127) as usize)
            .copied()
            .unwrap_or(Self::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStateEvent {
    pub kind: PlayerStateEventKind,
    pub parm: u8,
}

impl PlayerStateEvent {
    pub fn new(kind: PlayerStateEventKind, parm: u8) -> Self {
        Self { kind, parm }
    }
}
