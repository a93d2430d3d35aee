use bitflags::bitflags;
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use super::EntityNum;
use crate::event::EntityEvent;
use crate::services::Attenuation;
use crate::weapon::WeaponType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EntityType {
    #[default]
    Generic = 0,
    Player = 1,
    Corpse = 2,
    Item = 3,
    Projectile = 4,
    Mover = 5,
    Event = 6,
    SoundEvent = 7,
}

impl From<u8> for EntityType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Player,
            2 => Self::Corpse,
            3 => Self::Item,
            4 => Self::Projectile,
            5 => Self::Mover,
            6 => Self::Event,
            7 => Self::SoundEvent,
            _ => Self::Generic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Team {
    #[default]
    Spectator = 0,
    Players = 1,
    Alpha = 2,
    Beta = 3,
}

impl From<u8> for Team {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Players,
            2 => Self::Alpha,
            3 => Self::Beta,
            _ => Self::Spectator,
        }
    }
}

/// Linear colour used for everything drawn on behalf of `team`.
pub fn team_color(team: Team) -> Vec4 {
    match team {
        Team::Alpha => Vec4::new(0.1, 0.45, 1.0, 1.0),
        Team::Beta => Vec4::new(1.0, 0.1, 0.18, 1.0),
        Team::Players | Team::Spectator => Vec4::new(1.0, 1.0, 1.0, 1.0),
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct EntityEffects: u32 {
        const TAKEDAMAGE = 1 << 0;
        const CARRIER = 1 << 1;
    }
}

/// Replicated state of one entity as delivered by the latest snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityState {
    pub number: EntityNum,
    pub kind: EntityType,
    pub origin: Vec3,
    /// Secondary position: beam direction, gib velocity or blade direction
    /// depending on the event.
    pub origin2: Vec3,
    pub angles: Vec3,
    pub velocity: Vec3,
    pub owner: EntityNum,
    pub team: Team,
    pub weapon: WeaponType,
    /// Explosion radius in units of 8.
    pub radius: u8,
    pub damage: u16,
    pub effects: EntityEffects,
    pub color: [u8; 4],
    pub counter: u32,
    /// Precache index played by sound-event entities.
    pub sound: u16,
    pub attenuation: Attenuation,
    pub events: [EntityEvent; 2],
}

impl Default for EntityState {
    fn default() -> Self {
        Self {
            number: 0,
            kind: EntityType::Generic,
            origin: Vec3::ZERO,
            origin2: Vec3::ZERO,
            angles: Vec3::ZERO,
            velocity: Vec3::ZERO,
            owner: 0,
            team: Team::Spectator,
            weapon: WeaponType::None,
            radius: 0,
            damage: 0,
            effects: EntityEffects::empty(),
            color: [255; 4],
            counter: 0,
            sound: 0,
            attenuation: Attenuation::Norm,
            events: [EntityEvent::default(); 2],
        }
    }
}

impl EntityState {
    pub fn new(number: EntityNum, kind: EntityType) -> Self {
        Self {
            number,
            kind,
            ..Default::default()
        }
    }

    pub fn takes_damage(&self) -> bool {
        self.effects.contains(EntityEffects::TAKEDAMAGE)
    }

    pub fn color_rgb(&self) -> Vec3 {
        Vec3::new(
            self.color[0] as f32,
            self.color[1] as f32,
            self.color[2] as f32,
        ) / 255.0
    }
}
