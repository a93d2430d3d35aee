use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::entity::EntityNum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloodTrail {
    Off,
    #[default]
    On,
    /// Hide blood caused by the viewer's own hits.
    HideOwnHits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub volume_effects: f32,
    pub volume_players: f32,
    pub volume_announcer: f32,
    pub volume_hitsound: f32,
    pub volume_voicechats: f32,

    pub voice_chats: bool,
    pub weapon_flashes: bool,
    pub particles: bool,
    /// Bit 0 enables wall-jump dust circles.
    pub cartoon_effects: u32,
    pub blood_trail: BloodTrail,

    /// Seed of the generator behind purely cosmetic choices (pain animation,
    /// ricochet sample).
    pub cosmetic_seed: u64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            volume_effects: 1.0,
            volume_players: 1.0,
            volume_announcer: 1.0,
            volume_hitsound: 1.0,
            volume_voicechats: 1.0,

            voice_chats: true,
            weapon_flashes: true,
            particles: true,
            cartoon_effects: 1,
            blood_trail: BloodTrail::On,

            cosmetic_seed: 0,
        }
    }
}

/// Locally predicted pose of the player the view follows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictedPlayer {
    pub origin: Vec3,
    pub view_height: f32,
    pub view_angles: Vec3,
    pub velocity: Vec3,
}

impl PredictedPlayer {
    pub fn eye(&self) -> Vec3 {
        self.origin + Vec3::Z * self.view_height
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    /// Entity the camera follows.
    pub pov: EntityNum,
    /// Zero-based client slot of the local player; its entity is `player_num + 1`.
    pub player_num: u16,
    pub third_person: bool,
    pub prediction: bool,
    pub postmatch: bool,
    pub predicted: PredictedPlayer,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pov: 1,
            player_num: 0,
            third_person: false,
            prediction: true,
            postmatch: false,
            predicted: PredictedPlayer {
                view_height: 30.0,
                ..Default::default()
            },
        }
    }
}

impl ViewState {
    pub fn is_viewer(&self, entity: EntityNum) -> bool {
        entity == self.pov
    }

    pub fn local_entity(&self) -> EntityNum {
        self.player_num + 1
    }

    pub fn first_person(&self, entity: EntityNum) -> bool {
        self.is_viewer(entity) && !self.third_person
    }

    pub fn eye(&self) -> Vec3 {
        self.predicted.eye()
    }
}
