//! The per-frame, read-only view of player and match state handed to HUD
//! scripts.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use ricochet::obituary::Gadget;
use ricochet::{EntityNum, Team, WeaponType};

/// Reported instead of a POV number while not spectating someone else.
pub const NOT_CHASING: u32 = 9999;

/// Commands the client keeps for resending.
pub const CMD_BACKUP: u32 = 64;

const FPS_FRAMES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Perk {
    #[default]
    Ninja = 0,
    Hooligan = 1,
    Midget = 2,
    Jetpack = 3,
    Boomer = 4,
}

impl Perk {
    pub fn name(self) -> &'static str {
        match self {
            Self::Ninja => "ninja",
            Self::Hooligan => "hooligan",
            Self::Midget => "midget",
            Self::Jetpack => "jetpack",
            Self::Boomer => "boomer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum StaminaState {
    #[default]
    Normal = 0,
    Reloading = 1,
    UsingAbility = 2,
    UsedAbility = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MatchState {
    #[default]
    Warmup = 0,
    Countdown = 1,
    Playing = 2,
    PostMatch = 3,
    WaitExit = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BombProgress {
    #[default]
    Nothing = 0,
    Planting = 1,
    Defusing = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RoundType {
    #[default]
    Normal = 0,
    MatchPoint = 1,
    Overtime = 2,
    OvertimeMatchPoint = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponState {
    #[default]
    Ready,
    Firing,
    Reloading,
    StagedReloading,
    Switching,
}

/// Charges a gadget starts a round with.
pub fn gadget_uses(gadget: Gadget) -> u8 {
    match gadget {
        Gadget::None => 0,
        Gadget::ThrowingAxe => 2,
        Gadget::SuicideBomb => 1,
        Gadget::StunGrenade => 2,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeaponSlot {
    pub weapon: WeaponType,
    pub ammo: u16,
}

/// Predicted state of the player whose view is drawn.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerHud {
    pub pov: EntityNum,
    pub ready: bool,
    pub health: i32,
    pub max_health: i32,
    pub perk: Perk,
    pub stamina: f32,
    pub stamina_state: StaminaState,
    pub team: Team,
    pub carrying_bomb: bool,
    pub can_plant: bool,
    pub can_change_loadout: bool,
    pub progress: u8,
    pub progress_type: BombProgress,
    pub voted: bool,
    pub velocity: Vec3,
    pub weapons: Vec<WeaponSlot>,
    pub weapon: WeaponType,
    pub pending_weapon: WeaponType,
    pub weapon_state: WeaponState,
    /// Milliseconds spent in `weapon_state`.
    pub weapon_state_time: u16,
    pub gadget: Gadget,
    pub gadget_ammo: u8,
    /// Zoom progress in milliseconds, zero when unzoomed.
    pub zoom_time: i32,
}

impl PlayerHud {
    pub fn is_dead(&self) -> bool {
        self.health <= 0 && self.team != Team::Spectator
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamScore {
    pub score: u32,
    pub alive: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchHud {
    pub team_based: bool,
    pub match_state: MatchState,
    pub alpha: TeamScore,
    pub beta: TeamScore,
    pub round_type: RoundType,
    pub vote: String,
    pub votes_required: u32,
    pub votes_total: u32,
    /// Match clock in milliseconds.
    pub clock: i64,
}

/// Command sequencing, for the lag indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetStatus {
    pub demo_playing: bool,
    pub outgoing_sequence: u32,
    pub acknowledged: u32,
}

impl NetStatus {
    /// Too many commands in flight: the server stopped acknowledging.
    pub fn lagging(&self) -> bool {
        !self.demo_playing
            && self.outgoing_sequence.wrapping_sub(self.acknowledged) >= CMD_BACKUP - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub show_fps: bool,
    pub show_hotkeys: bool,
    pub show_speed: bool,
}

/// Averages real frame times over the last 32 frames.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: [i64; FPS_FRAMES],
    count: usize,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frames: [0; FPS_FRAMES],
            count: 0,
        }
    }
}

impl FpsCounter {
    pub fn push(&mut self, frame_ms: i64) {
        self.frames[self.count % FPS_FRAMES] = frame_ms;
        self.count += 1;
    }

    pub fn fps(&self) -> u32 {
        let filled = self.count.min(FPS_FRAMES);
        if filled == 0 {
            return 0;
        }
        let total: i64 = self.frames[..filled].iter().sum();
        let average = total as f64 / filled as f64;
        if average <= 0.0 {
            return 0;
        }
        (1000.0 / average + 0.5) as u32
    }
}

/// What one call of the HUD script sees.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HudSnapshot {
    pub ready: bool,
    pub health: i32,
    pub max_health: i32,
    pub perk: u8,
    pub stamina: f32,
    pub stamina_state: u8,
    pub team: u8,
    pub is_carrier: bool,
    pub can_plant: bool,
    pub can_change_loadout: bool,
    pub bomb_progress: u8,
    pub teambased: bool,
    pub match_state: u8,
    pub score_alpha: u32,
    pub alive_alpha: u32,
    pub total_alpha: u32,
    pub score_beta: u32,
    pub alive_beta: u32,
    pub total_beta: u32,
    pub round_type: u8,
    pub chasing: u32,
    pub vote: String,
    pub votes_required: u32,
    pub votes_total: u32,
    pub has_voted: bool,
    pub lagging: bool,
    pub show_fps: bool,
    pub fps: u32,
    pub show_hotkeys: bool,
    pub show_speed: bool,
    pub speed: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

/// A snapshot field as scripts see it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl HudSnapshot {
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        player: &PlayerHud,
        game: &MatchHud,
        local_player: EntityNum,
        net: NetStatus,
        config: HudConfig,
        fps: u32,
        viewport: (f32, f32),
    ) -> Self {
        let chasing = if player.pov != local_player {
            player.pov as u32
        } else {
            NOT_CHASING
        };

        Self {
            ready: player.ready,
            health: player.health,
            max_health: player.max_health,
            perk: player.perk as u8,
            stamina: player.stamina,
            stamina_state: player.stamina_state as u8,
            team: player.team as u8,
            is_carrier: player.carrying_bomb,
            can_plant: player.can_plant,
            can_change_loadout: player.can_change_loadout,
            bomb_progress: player.progress,
            teambased: game.team_based,
            match_state: game.match_state as u8,
            score_alpha: game.alpha.score,
            alive_alpha: game.alpha.alive,
            total_alpha: game.alpha.total,
            score_beta: game.beta.score,
            alive_beta: game.beta.alive,
            total_beta: game.beta.total,
            round_type: game.round_type as u8,
            chasing,
            vote: game.vote.clone(),
            votes_required: game.votes_required,
            votes_total: game.votes_total,
            has_voted: player.voted,
            lagging: net.lagging(),
            show_fps: config.show_fps,
            fps,
            show_hotkeys: config.show_hotkeys,
            show_speed: config.show_speed,
            speed: player.velocity.truncate().length(),
            viewport_width: viewport.0,
            viewport_height: viewport.1,
        }
    }

    /// Looks a field up by the name scripts use for it.
    pub fn field(&self, name: &str) -> Option<Value> {
        use Value::{Bool, Number, Text};

        Some(match name {
            "ready" => Bool(self.ready),
            "health" => Number(self.health.into()),
            "max_health" => Number(self.max_health.into()),
            "perk" => Number(self.perk.into()),
            "stamina" => Number(self.stamina.into()),
            "staminaState" => Number(self.stamina_state.into()),
            "team" => Number(self.team.into()),
            "isCarrier" => Bool(self.is_carrier),
            "canPlant" => Bool(self.can_plant),
            "canChangeLoadout" => Bool(self.can_change_loadout),
            "bomb_progress" => Number(self.bomb_progress.into()),
            "teambased" => Bool(self.teambased),
            "matchState" => Number(self.match_state.into()),
            "scoreAlpha" => Number(self.score_alpha.into()),
            "aliveAlpha" => Number(self.alive_alpha.into()),
            "totalAlpha" => Number(self.total_alpha.into()),
            "scoreBeta" => Number(self.score_beta.into()),
            "aliveBeta" => Number(self.alive_beta.into()),
            "totalBeta" => Number(self.total_beta.into()),
            "roundType" => Number(self.round_type.into()),
            "chasing" => Number(self.chasing.into()),
            "vote" => Text(self.vote.clone()),
            "votesRequired" => Number(self.votes_required.into()),
            "votesTotal" => Number(self.votes_total.into()),
            "hasVoted" => Bool(self.has_voted),
            "lagging" => Bool(self.lagging),
            "show_fps" => Bool(self.show_fps),
            "fps" => Number(self.fps.into()),
            "show_hotkeys" => Bool(self.show_hotkeys),
            "show_speed" => Bool(self.show_speed),
            "speed" => Number(self.speed.into()),
            "viewport_width" => Number(self.viewport_width.into()),
            "viewport_height" => Number(self.viewport_height.into()),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_rounds_the_average() {
        let mut fps = FpsCounter::default();
        assert_eq!(fps.fps(), 0);

        for _ in 0..32 {
            fps.push(16);
        }
        assert_eq!(fps.fps(), 63);

        // older frames fall out of the window
        for _ in 0..32 {
            fps.push(8);
        }
        assert_eq!(fps.fps(), 125);
    }

    #[test]
    fn lagging_needs_a_full_backlog() {
        let mut net = NetStatus {
            demo_playing: false,
            outgoing_sequence: 100,
            acknowledged: 38,
        };
        assert!(!net.lagging());

        net.acknowledged = 37;
        assert!(net.lagging());

        net.demo_playing = true;
        assert!(!net.lagging());
    }

    #[test]
    fn chasing_and_speed() {
        let player = PlayerHud {
            pov: 3,
            velocity: Vec3::new(3.0, 4.0, 100.0),
            ..Default::default()
        };
        let snapshot = HudSnapshot::build(
            &player,
            &MatchHud::default(),
            3,
            NetStatus::default(),
            HudConfig::default(),
            60,
            (800.0, 600.0),
        );
        assert_eq!(snapshot.chasing, NOT_CHASING);
        assert_eq!(snapshot.speed, 5.0);

        let snapshot = HudSnapshot::build(
            &player,
            &MatchHud::default(),
            1,
            NetStatus::default(),
            HudConfig::default(),
            60,
            (800.0, 600.0),
        );
        assert_eq!(snapshot.chasing, 3);
        assert_eq!(snapshot.field("chasing"), Some(Value::Number(3.0)));
        assert_eq!(snapshot.field("viewport_width"), Some(Value::Number(800.0)));
        assert_eq!(snapshot.field("nope"), None);
    }
}
