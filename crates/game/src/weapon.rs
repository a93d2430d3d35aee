use serde::{Deserialize, Serialize};

use crate::media::SoundId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum WeaponType {
    #[default]
    None = 0,
    Gunblade = 1,
    Machinegun = 2,
    Riotgun = 3,
    GrenadeLauncher = 4,
    RocketLauncher = 5,
    Plasmagun = 6,
    Lasergun = 7,
    Electrobolt = 8,
}

impl WeaponType {
    pub const COUNT: usize = 9;

    pub const ALL: [WeaponType; Self::COUNT] = [
        Self::None,
        Self::Gunblade,
        Self::Machinegun,
        Self::Riotgun,
        Self::GrenadeLauncher,
        Self::RocketLauncher,
        Self::Plasmagun,
        Self::Lasergun,
        Self::Electrobolt,
    ];
}

impl From<u8> for WeaponType {
    fn from(value: u8) -> Self {
        Self::ALL
            .get(value as usize)
            .copied()
            .unwrap_or(Self::None)
    }
}

/// Splits a weapon event parameter into the weapon and its silent bit.
pub fn decode_weapon_parm(parm: u8) -> (WeaponType, bool) {
    let weapon = WeaponType::from((parm >> 1) & 0x3f);
    (weapon, parm & 1 != 0)
}

pub fn encode_weapon_parm(weapon: WeaponType, silent: bool) -> u8 {
    ((weapon as u8) << 1) | u8::from(silent)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireDef {
    pub reload_time: u32,
    /// Maximum reach of hitscan fire.
    pub range: f32,
    pub projectile_count: u32,
    pub spread: f32,
    pub v_spread: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeaponDef {
    pub name: &'static str,
    pub short_name: &'static str,
    pub clip_size: u32,
    pub reload_time: u32,
    pub staged_reload_time: u32,
    pub zoom_fov: f32,
    pub fire: FireDef,
}

/// Client-side presentation data for a weapon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeaponInfo {
    pub fire_sounds: Vec<SoundId>,
    pub flash_time: i64,
    pub barrel_time: i64,
}

#[derive(Debug, Clone)]
pub struct WeaponTable {
    defs: Vec<WeaponDef>,
    infos: Vec<WeaponInfo>,
}

impl Default for WeaponTable {
    fn default() -> Self {
        let def = |name, short_name, clip_size, reload_time, fire: FireDef| WeaponDef {
            name,
            short_name,
            clip_size,
            reload_time,
            staged_reload_time: 0,
            zoom_fov: 0.0,
            fire,
        };
        let hitscan = |reload_time, range| FireDef {
            reload_time,
            range,
            projectile_count: 1,
            spread: 0.0,
            v_spread: 0.0,
        };

        let mut defs = vec![
            def("none", "none", 0, 0, hitscan(0, 0.0)),
            def("gunblade", "gb", 0, 0, hitscan(600, 64.0)),
            def("machinegun", "mg", 30, 1500, hitscan(100, 8192.0)),
            def(
                "riotgun",
                "rg",
                6,
                1200,
                FireDef {
                    reload_time: 950,
                    range: 8192.0,
                    projectile_count: 20,
                    spread: 90.0,
                    v_spread: 90.0,
                },
            ),
            def("grenade launcher", "gl", 6, 1400, hitscan(800, 0.0)),
            def("rocket launcher", "rl", 5, 1600, hitscan(950, 0.0)),
            def("plasmagun", "pg", 50, 1600, hitscan(100, 0.0)),
            def("lasergun", "lg", 100, 1600, hitscan(50, 900.0)),
            def("electrobolt", "eb", 0, 0, hitscan(1300, 8192.0)),
        ];
        defs[WeaponType::RocketLauncher as usize].staged_reload_time = 400;
        defs[WeaponType::Electrobolt as usize].zoom_fov = 40.0;

        let infos = WeaponType::ALL
            .iter()
            .map(|weapon| WeaponInfo {
                fire_sounds: Vec::new(),
                flash_time: match weapon {
                    WeaponType::None | WeaponType::Gunblade => 0,
                    _ => 50,
                },
                barrel_time: match weapon {
                    WeaponType::Machinegun | WeaponType::Gunblade => 120,
                    _ => 0,
                },
            })
            .collect();

        Self { defs, infos }
    }
}

impl WeaponTable {
    pub fn def(&self, weapon: WeaponType) -> &WeaponDef {
        &self.defs[weapon as usize]
    }

    pub fn def_mut(&mut self, weapon: WeaponType) -> &mut WeaponDef {
        &mut self.defs[weapon as usize]
    }

    pub fn fire(&self, weapon: WeaponType) -> &FireDef {
        &self.def(weapon).fire
    }

    pub fn info(&self, weapon: WeaponType) -> &WeaponInfo {
        &self.infos[weapon as usize]
    }

    pub fn info_mut(&mut self, weapon: WeaponType) -> &mut WeaponInfo {
        &mut self.infos[weapon as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parm_decoding() {
        let parm = encode_weapon_parm(WeaponType::Lasergun, true);
        assert_eq!(decode_weapon_parm(parm), (WeaponType::Lasergun, true));
        assert_eq!(decode_weapon_parm(0x7e), (WeaponType::None, false));
    }

    #[test]
    fn table_covers_every_weapon() {
        let table = WeaponTable::default();
        for weapon in WeaponType::ALL {
            let _ = table.def(weapon);
            let _ = table.info(weapon);
        }
        assert_eq!(table.fire(WeaponType::Riotgun).projectile_count, 20);
    }
}
