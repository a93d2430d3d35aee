//! Per-frame orchestration: snapshot intake, the early and main event
//! passes, player-state events and the render tick of continuous effects.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::beam::{render_electro, render_laser};
use crate::context::{Clock, EffectContext};
use crate::dispatch::Reactor;
use crate::entity::{EntityNum, EntityState, EntityType};
use crate::event::{EventKind, Origin, PlayerStateEvent, PlayerStateEventKind};
use crate::math::byte_to_dir;
use crate::media::SoundId;
use crate::obituary::{ObituaryMessage, ObituaryNotice};
use crate::services::{Attenuation, Audio, Channel, Emitter, ScreenEffect, Services};

/// Events addressed to the player whose view the snapshot was built for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStateFrame {
    pub pov: EntityNum,
    pub events: [PlayerStateEvent; 2],
}

/// One authoritative snapshot as far as the event layer cares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    pub entities: Vec<EntityState>,
    pub player_state: PlayerStateFrame,
}

impl Reactor {
    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Whether the latest snapshot still has events to fire.
    pub fn events_pending(&self) -> bool {
        self.fire_events
    }

    /// Takes in a new snapshot and arms the event gate. Events fire on the
    /// next [`Reactor::fire_events`] calls, once each.
    pub fn new_frame(&mut self, frame: Frame) {
        for state in &frame.entities {
            self.arena.update(state);
        }
        debug!(
            "new frame at {}: {} entities",
            self.clock.now,
            frame.entities.len()
        );

        self.frame = frame;
        self.fire_events = true;
    }

    /// Fires the events of the latest snapshot. The early pass handles
    /// weapon drops and sound entities; the main pass everything else plus
    /// the player-state events, and closes the gate.
    pub fn fire_events(&mut self, early: bool, svc: &mut Services) {
        if !self.fire_events {
            return;
        }

        let entities = std::mem::take(&mut self.frame.entities);
        for state in &entities {
            if state.kind == EntityType::SoundEvent {
                if early {
                    self.sound_entity(state, svc);
                }
                continue;
            }

            for event in state.events {
                if event.kind == EventKind::None || event.kind.is_early() != early {
                    continue;
                }
                self.entity_event(state, event.kind, event.parm, Origin::Authoritative, svc);
            }
        }
        self.frame.entities = entities;

        if early {
            return;
        }

        self.player_state_events(svc);
        self.fire_events = false;
    }

    /// Replays an event the local player just caused, ahead of the snapshot.
    pub fn predicted_event(&mut self, kind: EventKind, parm: u8, svc: &mut Services) -> bool {
        let pov = self.view.pov;
        let state = self
            .arena
            .get(pov)
            .map_or_else(|| EntityState::new(pov, EntityType::Player), |ent| ent.current);
        self.entity_event(&state, kind, parm, Origin::Predicted, svc)
    }

    fn sound_entity(&mut self, state: &EntityState, svc: &mut Services) {
        let sound = self.media.indexed(state.sound as usize);
        let emitter = if state.attenuation == Attenuation::None {
            Emitter::Global
        } else {
            Emitter::Fixed(state.origin)
        };
        trace!("sound entity {} plays precache {}", state.number, state.sound);
        svc.play(
            sound,
            emitter,
            Channel::Auto,
            self.config.volume_effects,
            state.attenuation,
        );
    }

    fn player_state_events(&mut self, svc: &mut Services) {
        if self.view.pov != self.frame.player_state.pov {
            return;
        }

        for event in self.frame.player_state.events {
            let parm = event.parm;
            match event.kind {
                PlayerStateEventKind::None => {}
                PlayerStateEventKind::Hit => self.hit_sound(parm, svc),
                PlayerStateEventKind::Damage10
                | PlayerStateEventKind::Damage20
                | PlayerStateEventKind::Damage30
                | PlayerStateEventKind::Damage40 => {
                    if let Some(damage) = event.kind.indicator_damage() {
                        svc.screen(ScreenEffect::DamageIndicator {
                            damage,
                            dir: byte_to_dir(parm),
                        });
                    }
                }
                PlayerStateEventKind::IndexedSound => {
                    svc.play(
                        self.media.indexed(parm as usize),
                        Emitter::Global,
                        Channel::Auto,
                        self.config.volume_effects,
                        Attenuation::None,
                    );
                }
                PlayerStateEventKind::Announcer | PlayerStateEventKind::AnnouncerQueued => {
                    let queued = event.kind == PlayerStateEventKind::AnnouncerQueued;
                    self.announcer.enqueue(
                        self.media.indexed(parm as usize),
                        queued,
                        svc.audio,
                        self.config.volume_announcer,
                    );
                }
            }
        }
    }

    fn hit_sound(&mut self, parm: u8, svc: &mut Services) {
        let (sound, crosshair) = match parm {
            0..=3 => (self.media.weapon_hit[parm as usize], true),
            4 => (self.media.weapon_kill, true),
            5 | 6 => (self.media.weapon_hit_team, false),
            _ => return,
        };

        svc.play(
            sound,
            Emitter::Local,
            Channel::Auto,
            self.config.volume_hitsound,
            Attenuation::None,
        );
        if crosshair {
            svc.screen(ScreenEffect::CrosshairDamage);
        }
    }

    /// Render tick: advances every live beam and draws pending instant beams.
    pub fn render(&mut self, svc: &mut Services) {
        let ctx = EffectContext {
            config: &self.config,
            media: &self.media,
            weapons: &self.weapons,
            view: &self.view,
            clock: self.clock,
        };

        let pending: Vec<EntityNum> = self
            .arena
            .iter()
            .enumerate()
            .filter(|(_, ent)| ent.fx.has_pending_render())
            .map(|(num, _)| num as EntityNum)
            .collect();

        for num in pending {
            render_laser(&ctx, &mut self.arena, num, svc, &mut self.rng);
            render_electro(&mut self.arena, num, svc);
        }
    }

    /// Advances the announcer by `elapsed` ms of real time.
    pub fn release_announcer(&mut self, elapsed: i64, audio: &mut dyn Audio) -> Option<SoundId> {
        self.announcer
            .release(elapsed, audio, self.config.volume_announcer)
    }

    pub fn obituary(&mut self, message: &ObituaryMessage) -> ObituaryNotice {
        self.obituaries.record(
            message,
            &self.roster,
            &self.arena,
            &self.view,
            self.clock.now,
        )
    }

    /// Forgets every continuous effect and queued line, as on a map change.
    pub fn reset(&mut self) {
        self.arena.reset();
        self.announcer.clear();
        self.obituaries.reset();
        self.predicted_weapon_switch = None;
        self.fire_events = false;
    }
}
