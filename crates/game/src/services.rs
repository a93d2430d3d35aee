//! Interfaces of the services the event layer consumes but never implements:
//! collision traces, sound playback and the scene that receives visuals.

use bitflags::bitflags;
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::entity::EntityNum;
use crate::media::SoundId;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Contents: u32 {
        const SOLID = 1 << 0;
        const LAVA = 1 << 3;
        const SLIME = 1 << 4;
        const WATER = 1 << 5;
        const PLAYER_CLIP = 1 << 16;
        const BODY = 1 << 25;
        const CORPSE = 1 << 26;
    }
}

pub const MASK_SOLID: Contents = Contents::SOLID;
pub const MASK_SHOT: Contents = Contents::SOLID.union(Contents::BODY).union(Contents::CORPSE);
pub const MASK_WATER: Contents = Contents::WATER.union(Contents::LAVA).union(Contents::SLIME);

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct SurfaceFlags: u32 {
        const NO_IMPACT = 1 << 0;
        const NO_MARKS = 1 << 1;
        const FLESH = 1 << 2;
        const DUST = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceHit {
    #[default]
    Nothing,
    World,
    Entity(EntityNum),
}

#[derive(Debug, Clone, Copy)]
pub struct TraceQuery {
    pub start: Vec3,
    pub end: Vec3,
    pub mins: Vec3,
    pub maxs: Vec3,
    pub ignore: Option<EntityNum>,
    pub mask: Contents,
}

impl TraceQuery {
    pub fn line(start: Vec3, end: Vec3, ignore: Option<EntityNum>, mask: Contents) -> Self {
        Self {
            start,
            end,
            mins: Vec3::ZERO,
            maxs: Vec3::ZERO,
            ignore,
            mask,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trace {
    pub fraction: f32,
    pub end_pos: Vec3,
    pub normal: Vec3,
    pub surface: SurfaceFlags,
    pub contents: Contents,
    pub hit: TraceHit,
}

impl Trace {
    pub fn miss(end: Vec3) -> Self {
        Self {
            fraction: 1.0,
            end_pos: end,
            normal: Vec3::ZERO,
            surface: SurfaceFlags::empty(),
            contents: Contents::empty(),
            hit: TraceHit::Nothing,
        }
    }

    pub fn hit_something(&self) -> bool {
        self.hit != TraceHit::Nothing
    }

    /// A hit that should produce impact visuals.
    pub fn is_impact(&self) -> bool {
        self.hit_something() && !self.surface.contains(SurfaceFlags::NO_IMPACT)
    }

    pub fn hit_entity(&self) -> Option<EntityNum> {
        match self.hit {
            TraceHit::Entity(num) => Some(num),
            _ => None,
        }
    }
}

pub trait Collision {
    fn trace(&self, query: &TraceQuery) -> Trace;
    fn point_contents(&self, point: Vec3) -> Contents;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attenuation {
    None,
    #[default]
    Norm,
    Idle,
    Static,
    Distant,
}

impl Attenuation {
    pub fn factor(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Norm => 1.0,
            Self::Idle => 2.5,
            Self::Static => 5.0,
            Self::Distant => 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Auto,
    Pain,
    Body,
    Item,
    MuzzleFlash,
    Announcer,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Emitter {
    /// Interface sound, not spatialized.
    Local,
    /// Played as if emitted by the viewer.
    Global,
    Entity(EntityNum),
    Fixed(Vec3),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundRequest {
    pub sound: SoundId,
    pub emitter: Emitter,
    pub channel: Channel,
    pub volume: f32,
    pub attenuation: Attenuation,
    /// Looping sounds are re-submitted every render tick and stop when not.
    pub immediate: bool,
}

pub trait Audio {
    fn play(&mut self, request: SoundRequest);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimChannel {
    Base,
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAnim {
    LegsDash,
    LegsDashLeft,
    LegsDashRight,
    LegsDashBack,
    LegsWallJump,
    LegsWallJumpLeft,
    LegsWallJumpRight,
    LegsWallJumpBack,
    LegsJumpNeutral,
    LegsJumpLeg1,
    LegsJumpLeg2,
    TorsoWeaponSwitchIn,
    TorsoWeaponSwitchOut,
    TorsoShootBlade,
    TorsoShootPistol,
    TorsoShootLightWeapon,
    TorsoShootHeavyWeapon,
    TorsoShootAimWeapon,
    TorsoPain1,
    TorsoPain2,
    TorsoPain3,
    BothDead1,
    BothDead2,
    BothDead3,
    BothDeath1,
    BothDeath2,
    BothDeath3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewWeaponAnim {
    AttackWeak,
    AttackStrong,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionKind {
    Generic,
    Plasma,
    Grenade,
    Rocket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeamStyle {
    Laser,
    Tracer,
}

/// Feedback on the local player's screen and camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenEffect {
    FallKick(i32),
    KickAngles {
        origin: Vec3,
        radius: f32,
        knockback: f32,
        time: i64,
    },
    ResetKickAngles,
    ResetColorBlend,
    ResetDamageIndicator,
    DamageIndicator {
        damage: u8,
        dir: Vec3,
    },
    CrosshairDamage,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Animation {
        entity: EntityNum,
        channel: AnimChannel,
        anim: PlayerAnim,
    },
    ViewWeapon(ViewWeaponAnim),
    Particles {
        origin: Vec3,
        dir: Vec3,
        color: Vec4,
        count: u32,
    },
    ImpactPuff {
        origin: Vec3,
        normal: Vec3,
        count: u32,
        scale: f32,
        color: Vec4,
    },
    Sparks {
        origin: Vec3,
        color: Vec4,
        count: u32,
        cone_radius: f32,
        lifetime: f32,
    },
    BubbleTrail {
        start: Vec3,
        end: Vec3,
        density: u32,
    },
    Beam {
        start: Vec3,
        end: Vec3,
        width: f32,
        color: Vec4,
        style: BeamStyle,
        fade_time: f32,
    },
    ElectroBeam {
        start: Vec3,
        end: Vec3,
        team: u8,
    },
    ElectroImpact {
        origin: Vec3,
        normal: Vec3,
        surface: SurfaceFlags,
        team: u8,
    },
    LaserImpact {
        origin: Vec3,
        radius: f32,
        dir: Vec3,
        color: Vec4,
    },
    Light {
        origin: Vec3,
        radius: f32,
        color: Vec3,
    },
    BulletImpact {
        origin: Vec3,
        normal: Vec3,
        dust: bool,
    },
    Explosion {
        kind: ExplosionKind,
        origin: Vec3,
        dir: Vec3,
        radius: f32,
        team: u8,
    },
    Gibs {
        origin: Vec3,
        velocity: Vec3,
        damage: u8,
        team: u8,
    },
    BladeImpact {
        origin: Vec3,
        dir: Vec3,
    },
    Blood {
        origin: Vec3,
        dir: Vec3,
        damage: u16,
        team: u8,
    },
    DustCircle {
        origin: Vec3,
        normal: Vec3,
        radius: f32,
        count: u32,
    },
    DashSmoke {
        origin: Vec3,
        angles: Vec3,
    },
    DamageNumber {
        origin: Vec3,
        damage: u16,
    },
    Screen(ScreenEffect),
}

pub trait Scene {
    fn spawn(&mut self, effect: Effect);

    /// World position of the weapon muzzle of `entity`, when its model is
    /// posed this frame.
    fn projection_source(&self, entity: EntityNum) -> Option<Vec3> {
        let _ = entity;
        None
    }
}

/// The collaborators borrowed for the duration of one dispatch or render step.
pub struct Services<'a> {
    pub collision: &'a dyn Collision,
    pub audio: &'a mut dyn Audio,
    pub scene: &'a mut dyn Scene,
}

impl<'a> Services<'a> {
    pub fn new(
        collision: &'a dyn Collision,
        audio: &'a mut dyn Audio,
        scene: &'a mut dyn Scene,
    ) -> Self {
        Self {
            collision,
            audio,
            scene,
        }
    }

    pub fn play(
        &mut self,
        sound: Option<SoundId>,
        emitter: Emitter,
        channel: Channel,
        volume: f32,
        attenuation: Attenuation,
    ) {
        let Some(sound) = sound else {
            return;
        };
        self.audio.play(SoundRequest {
            sound,
            emitter,
            channel,
            volume,
            attenuation,
            immediate: false,
        });
    }

    pub fn play_immediate(
        &mut self,
        sound: Option<SoundId>,
        entity: EntityNum,
        volume: f32,
        attenuation: Attenuation,
    ) {
        let Some(sound) = sound else {
            return;
        };
        self.audio.play(SoundRequest {
            sound,
            emitter: Emitter::Entity(entity),
            channel: Channel::Auto,
            volume,
            attenuation,
            immediate: true,
        });
    }

    pub fn spawn(&mut self, effect: Effect) {
        self.scene.spawn(effect);
    }

    pub fn animate(&mut self, entity: EntityNum, channel: AnimChannel, anim: PlayerAnim) {
        self.scene.spawn(Effect::Animation {
            entity,
            channel,
            anim,
        });
    }

    pub fn screen(&mut self, effect: ScreenEffect) {
        self.scene.spawn(Effect::Screen(effect));
    }

    pub fn trace(&self, start: Vec3, end: Vec3, ignore: Option<EntityNum>, mask: Contents) -> Trace {
        self.collision
            .trace(&TraceQuery::line(start, end, ignore, mask))
    }
}
