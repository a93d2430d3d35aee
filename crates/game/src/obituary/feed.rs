use glam::Vec4;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::compose::{compose, conjunction, obituary_rng};
use super::{DamageType, WorldDamage};
use crate::config::ViewState;
use crate::entity::{EntityArena, EntityNum, Team, team_color};
use crate::ring::Ring;
use crate::roster::Roster;

pub const MAX_OBITUARIES: usize = 32;

/// How long a kill stays in the feed, in milliseconds.
pub const OBITUARY_LIFETIME: i64 = 5000;

pub const OBITUARY_COLOR: Vec4 = Vec4::new(1.0, 0.6, 0.0, 1.0);
const WORLD_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
const CONJUNCTION_COLOR: Vec4 = Vec4::ONE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObituaryKind {
    #[default]
    None,
    Normal,
    Suicide,
    Accident,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObituaryRecord {
    pub kind: ObituaryKind,
    pub time: i64,
    pub victim: String,
    pub victim_team: Team,
    pub attacker: String,
    pub attacker_team: Team,
    pub damage: DamageType,
    pub wallbang: bool,
}

impl ObituaryRecord {
    pub fn is_visible(&self, now: i64) -> bool {
        self.kind != ObituaryKind::None && now - self.time <= OBITUARY_LIFETIME
    }
}

/// The viewer's own death, replayed full screen while dead. Inactive while
/// `entropy` is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelfObituary {
    pub time: i64,
    pub entropy: u64,
    pub kind: ObituaryKind,
    pub damage: DamageType,
}

impl SelfObituary {
    pub fn is_active(&self) -> bool {
        self.entropy != 0
    }
}

/// A kill as announced by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObituaryMessage {
    pub victim: EntityNum,
    /// Zero when the world did the killing.
    pub attacker: EntityNum,
    #[serde(default)]
    pub assistor: Option<EntityNum>,
    pub damage: DamageType,
    #[serde(default)]
    pub wallbang: bool,
    pub entropy: u64,
}

impl ObituaryMessage {
    /// Parses the decimal command arguments
    /// `victim attacker assistor damage wallbang entropy`, with an assistor
    /// of -1 meaning none.
    pub fn parse_args(args: &[&str]) -> Option<Self> {
        let [victim, attacker, assistor, damage, wallbang, entropy] = args else {
            warn!("obituary with {} arguments", args.len());
            return None;
        };

        let parsed = (|| {
            let assistor: i32 = assistor.parse().ok()?;
            Some(Self {
                victim: victim.parse().ok()?,
                attacker: attacker.parse().ok()?,
                assistor: u16::try_from(assistor).ok(),
                damage: DamageType(damage.parse().ok()?),
                wallbang: wallbang.parse::<i32>().ok()? == 1,
                entropy: entropy.parse().ok()?,
            })
        })();

        if parsed.is_none() {
            warn!("malformed obituary arguments {args:?}");
        }
        parsed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatSegment {
    pub text: String,
    pub color: Vec4,
}

impl ChatSegment {
    fn new(text: impl Into<String>, color: Vec4) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// Text produced by one obituary besides the feed entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObituaryNotice {
    pub chat: Option<Vec<ChatSegment>>,
    pub center_print: Option<String>,
}

impl ObituaryNotice {
    pub fn chat_text(&self) -> Option<String> {
        self.chat.as_ref().map(|segments| {
            segments
                .iter()
                .map(|segment| segment.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Obituaries {
    records: Ring<ObituaryRecord, MAX_OBITUARIES>,
    self_obituary: SelfObituary,
}

impl Obituaries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.records.clear();
        self.self_obituary = SelfObituary::default();
    }

    pub fn records(&self) -> &Ring<ObituaryRecord, MAX_OBITUARIES> {
        &self.records
    }

    pub fn self_obituary(&self) -> &SelfObituary {
        &self.self_obituary
    }

    /// Feed entries younger than the lifetime, oldest first. Expired
    /// records stay stored until overwritten.
    pub fn visible(&self, now: i64) -> impl Iterator<Item = &ObituaryRecord> + '_ {
        self.records.iter().filter(move |record| record.is_visible(now))
    }

    pub fn record(
        &mut self,
        message: &ObituaryMessage,
        roster: &Roster,
        arena: &EntityArena,
        view: &ViewState,
        now: i64,
    ) -> ObituaryNotice {
        let kind = if message.attacker == 0 {
            ObituaryKind::Accident
        } else if message.attacker == message.victim {
            ObituaryKind::Suicide
        } else {
            ObituaryKind::Normal
        };

        let victim = roster.name(message.victim).unwrap_or_default().to_owned();
        let attacker = if message.attacker == 0 {
            String::new()
        } else {
            roster.name(message.attacker).unwrap_or_default().to_owned()
        };

        let record = ObituaryRecord {
            kind,
            time: now,
            victim_team: arena.team(message.victim),
            attacker_team: arena.team(message.attacker),
            victim,
            attacker,
            damage: message.damage,
            wallbang: message.wallbang,
        };
        debug!(
            "obituary {:?}: {} -> {} ({:?})",
            record.kind, record.attacker, record.victim, record.damage
        );

        let viewer_died = view.prediction && view.is_viewer(message.victim);
        if viewer_died {
            self.self_obituary.entropy = 0;
        }

        let mut notice = ObituaryNotice::default();
        let attacker_segment = if kind == ObituaryKind::Accident {
            if message.damage.is_world(WorldDamage::Void) {
                ChatSegment::new("THE VOID", WORLD_COLOR)
            } else if message.damage.is_world(WorldDamage::Spike) {
                ChatSegment::new("A SPIKE", WORLD_COLOR)
            } else {
                self.records.push(record);
                return notice;
            }
        } else {
            ChatSegment::new(record.attacker.to_uppercase(), team_color(record.attacker_team))
        };

        let mut rng = obituary_rng(message.entropy);
        let word = compose(&mut rng, kind, message.damage);

        if viewer_died {
            self.self_obituary = SelfObituary {
                time: now,
                entropy: message.entropy,
                kind,
                damage: message.damage,
            };
        }

        let mut chat = vec![attacker_segment];
        if let Some(assistor) = message.assistor {
            let name = roster.name(assistor).unwrap_or_default().to_uppercase();
            chat.push(ChatSegment::new(conjunction(&mut rng), CONJUNCTION_COLOR));
            chat.push(ChatSegment::new(name, team_color(arena.team(assistor))));
        }
        chat.push(ChatSegment::new(word.clone(), OBITUARY_COLOR));
        chat.push(ChatSegment::new(record.victim.to_uppercase(), team_color(record.victim_team)));
        notice.chat = Some(chat);

        if message.attacker != 0 && view.is_viewer(message.attacker) && message.attacker != message.victim {
            notice.center_print = Some(format!("{word} {}", record.victim.to_uppercase()));
        }

        self.records.push(record);
        notice
    }
}
