use serde::{Deserialize, Serialize};

/// Handle of a sound registered with the audio service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PlayerSound {
    Pain25 = 0,
    Pain50 = 1,
    Pain75 = 2,
    Pain100 = 3,
    Death = 4,
    Jump = 5,
    WallJump = 6,
    Dash = 7,
}

impl PlayerSound {
    pub const COUNT: usize = 8;
    pub const PAIN: [PlayerSound; 4] = [Self::Pain25, Self::Pain50, Self::Pain75, Self::Pain100];
}

pub const VSAY_TOTAL: usize = 16;

/// Sound handles the event layer plays. A missing handle silently skips the
/// sound.
#[derive(Debug, Clone, Default)]
pub struct Media {
    pub weapon_up: Option<SoundId>,
    pub weapon_up_no_ammo: Option<SoundId>,
    pub lasergun_hum: Option<SoundId>,
    pub lasergun_stop: Option<SoundId>,
    pub lasergun_hit: [Option<SoundId>; 3],
    pub ricochet: [Option<SoundId>; 2],
    pub riotgun_hit: Option<SoundId>,
    pub plasma_hit: Option<SoundId>,
    pub grenade_bounce: [Option<SoundId>; 2],
    pub item_respawn: Option<SoundId>,
    pub teleport_in: Option<SoundId>,
    pub teleport_out: Option<SoundId>,
    pub fall: Option<SoundId>,
    pub weapon_hit: [Option<SoundId>; 4],
    pub weapon_kill: Option<SoundId>,
    pub weapon_hit_team: Option<SoundId>,
    pub player: [Option<SoundId>; PlayerSound::COUNT],
    pub voice_say: [Option<SoundId>; VSAY_TOTAL],
    /// Sounds addressed by index from the wire.
    pub precache: Vec<Option<SoundId>>,
}

impl Media {
    pub fn indexed(&self, index: usize) -> Option<SoundId> {
        self.precache.get(index).copied().flatten()
    }

    pub fn player_sound(&self, sound: PlayerSound) -> Option<SoundId> {
        self.player[sound as usize]
    }

    /// Registers every handle with a distinct id, starting at `first`.
    /// Useful for headless runs where any handle is as good as another.
    pub fn sequential(first: u32, precache_len: usize) -> Self {
        let mut next = first;
        let mut id = || {
            let sound = SoundId(next);
            next += 1;
            Some(sound)
        };

        Self {
            weapon_up: id(),
            weapon_up_no_ammo: id(),
            lasergun_hum: id(),
            lasergun_stop: id(),
            lasergun_hit: [id(), id(), id()],
            ricochet: [id(), id()],
            riotgun_hit: id(),
            plasma_hit: id(),
            grenade_bounce: [id(), id()],
            item_respawn: id(),
            teleport_in: id(),
            teleport_out: id(),
            fall: id(),
            weapon_hit: [id(), id(), id(), id()],
            weapon_kill: id(),
            weapon_hit_team: id(),
            player: std::array::from_fn(|_| id()),
            voice_say: std::array::from_fn(|_| id()),
            precache: (0..precache_len).map(|_| id()).collect(),
        }
    }
}
