use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::weapon::WeaponType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Gadget {
    #[default]
    None = 0,
    ThrowingAxe = 1,
    SuicideBomb = 2,
    StunGrenade = 3,
}

impl Gadget {
    pub const COUNT: usize = 4;

    pub const ALL: [Gadget; Self::COUNT] = [
        Self::None,
        Self::ThrowingAxe,
        Self::SuicideBomb,
        Self::StunGrenade,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ThrowingAxe => "axe",
            Self::SuicideBomb => "martyrdom",
            Self::StunGrenade => "flash",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldDamage {
    Slime,
    Lava,
    Crush,
    Telefrag,
    Suicide,
    Explosion,
    Trigger,
    Laser,
    Spike,
    Void,
}

impl WorldDamage {
    pub const ALL: [WorldDamage; 10] = [
        Self::Slime,
        Self::Lava,
        Self::Crush,
        Self::Telefrag,
        Self::Suicide,
        Self::Explosion,
        Self::Trigger,
        Self::Laser,
        Self::Spike,
        Self::Void,
    ];

    fn icon(self) -> &'static str {
        match self {
            Self::Slime => "gfx/slime",
            Self::Lava => "gfx/lava",
            Self::Crush => "gfx/crush",
            Self::Telefrag => "gfx/telefrag",
            Self::Suicide => "gfx/suicide",
            Self::Explosion => "gfx/explosion",
            Self::Trigger => "gfx/trigger",
            Self::Laser => "gfx/laser",
            Self::Spike => "gfx/spike",
            Self::Void => "gfx/void",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageCategory {
    Weapon(WeaponType),
    Gadget(Gadget),
    World(WorldDamage),
}

/// Cause of death as sent on the wire: weapons first, then gadgets, then
/// world damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DamageType(pub u8);

pub const GENERIC_ICON: &str = "gfx/unknown";

impl DamageType {
    const GADGET_BASE: usize = WeaponType::COUNT;
    const WORLD_BASE: usize = Self::GADGET_BASE + Gadget::COUNT;

    pub fn weapon(weapon: WeaponType) -> Self {
        Self(weapon as u8)
    }

    pub fn gadget(gadget: Gadget) -> Self {
        Self((Self::GADGET_BASE + gadget as usize) as u8)
    }

    pub fn world(world: WorldDamage) -> Self {
        let index = WorldDamage::ALL
            .iter()
            .position(|w| *w == world)
            .unwrap_or_default();
        Self((Self::WORLD_BASE + index) as u8)
    }

    pub fn decode(self) -> Option<DamageCategory> {
        let value = self.0 as usize;
        if value < Self::GADGET_BASE {
            return Some(DamageCategory::Weapon(WeaponType::ALL[value]));
        }
        if value < Self::WORLD_BASE {
            return Some(DamageCategory::Gadget(Gadget::ALL[value - Self::GADGET_BASE]));
        }
        WorldDamage::ALL
            .get(value - Self::WORLD_BASE)
            .map(|world| DamageCategory::World(*world))
    }

    pub fn is_world(self, world: WorldDamage) -> bool {
        self.decode() == Some(DamageCategory::World(world))
    }

    /// Material drawn for this cause in the kill feed. Unknown encodings get
    /// the generic icon.
    pub fn icon(self) -> Cow<'static, str> {
        match self.decode() {
            Some(DamageCategory::Weapon(weapon)) => {
                Cow::Owned(format!("weapons/{}/icon", weapon_slug(weapon)))
            }
            Some(DamageCategory::Gadget(gadget)) => {
                Cow::Owned(format!("gadgets/{}/icon", gadget.name()))
            }
            Some(DamageCategory::World(world)) => Cow::Borrowed(world.icon()),
            None => Cow::Borrowed(GENERIC_ICON),
        }
    }
}

fn weapon_slug(weapon: WeaponType) -> &'static str {
    match weapon {
        WeaponType::None => "none",
        WeaponType::Gunblade => "gb",
        WeaponType::Machinegun => "mg",
        WeaponType::Riotgun => "rg",
        WeaponType::GrenadeLauncher => "gl",
        WeaponType::RocketLauncher => "rl",
        WeaponType::Plasmagun => "pg",
        WeaponType::Lasergun => "lg",
        WeaponType::Electrobolt => "eb",
    }
}
