//! Recorded event stream the replay tool plays back.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use log::warn;
use ricochet::{EffectsConfig, EventKind, Frame, ObituaryMessage, PredictedPlayer, ViewState};
use ricochet_hud::{HudConfig, MatchHud, PlayerHud};
use serde::{Deserialize, Serialize};

use crate::world::MapBlock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Zero-based client slot.
    pub slot: usize,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedEvent {
    pub kind: EventKind,
    #[serde(default)]
    pub parm: u8,
}

/// One recorded snapshot plus everything the client learned alongside it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoFrame {
    pub time: i64,
    #[serde(flatten)]
    pub snapshot: Frame,
    /// Events the local prediction produced before this snapshot arrived.
    pub predicted: Vec<PredictedEvent>,
    pub obituaries: Vec<ObituaryMessage>,
    pub pose: Option<PredictedPlayer>,
    pub hud: Option<PlayerHud>,
    pub game: Option<MatchHud>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Demo {
    pub map: Vec<MapBlock>,
    pub roster: Vec<RosterEntry>,
    pub view: ViewState,
    pub effects: EffectsConfig,
    pub hud_config: HudConfig,
    /// Size of the indexed sound precache.
    pub sounds: usize,
    pub frames: Vec<DemoFrame>,
}

impl Default for Demo {
    fn default() -> Self {
        Self {
            map: Vec::new(),
            roster: Vec::new(),
            view: ViewState::default(),
            effects: EffectsConfig::default(),
            hud_config: HudConfig::default(),
            sounds: 64,
            frames: Vec::new(),
        }
    }
}

impl Demo {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read demo {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid demo {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let demo: Demo = serde_json::from_str(text)?;

        if let Some(pair) = demo.frames.windows(2).find(|pair| pair[1].time < pair[0].time) {
            bail!(
                "frame at {} ms comes after frame at {} ms",
                pair[1].time,
                pair[0].time
            );
        }
        if demo.frames.is_empty() {
            warn!("demo has no frames");
        }
        Ok(demo)
    }
}
