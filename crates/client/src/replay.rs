//! Drives the event layer and the HUD through a recording, frame by frame.

use std::fmt;

use log::{debug, info};
use ricochet::math::forward;
use ricochet::services::MASK_SHOT;
use ricochet::{Clock, Collision, Media, Reactor, Services, TraceQuery, WeaponTable};
use ricochet_hud::{
    FpsCounter, HudConfig, HudFrame, HudHost, HudSnapshot, LayoutEngine, MatchHud, NetStatus,
    PlayerHud, ScopeView,
};

use crate::backends::{AudioLog, DrawLog, SceneLog};
use crate::config::ClientConfig;
use crate::demo::{Demo, DemoFrame};
use crate::world::ClientWorld;

const SCOPE_RANGE: f32 = 8192.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub snapshots: usize,
    pub ticks: usize,
    pub predicted: usize,
    pub sounds: usize,
    pub looping: usize,
    pub effects: usize,
    pub obituaries: usize,
    pub chat_lines: usize,
    pub center_prints: usize,
    pub hud_frames: u64,
    pub hud_errors: u64,
    pub draw_calls: usize,
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "snapshots     {}", self.snapshots)?;
        writeln!(f, "render ticks  {}", self.ticks)?;
        writeln!(f, "predicted     {}", self.predicted)?;
        writeln!(f, "sounds        {} (+{} looping)", self.sounds, self.looping)?;
        writeln!(f, "effects       {}", self.effects)?;
        writeln!(
            f,
            "obituaries    {} ({} chat, {} centre)",
            self.obituaries, self.chat_lines, self.center_prints
        )?;
        write!(
            f,
            "hud frames    {} ({} failed, {} draw calls)",
            self.hud_frames, self.hud_errors, self.draw_calls
        )
    }
}

pub struct Replay {
    config: ClientConfig,
    hud_config: HudConfig,
    pub reactor: Reactor,
    world: ClientWorld,
    pub audio: AudioLog,
    pub scene: SceneLog,
    pub renderer: DrawLog,
    hud: HudHost<LayoutEngine>,
    fps: FpsCounter,
    player: PlayerHud,
    game: MatchHud,
    last_tick: Option<i64>,
    summary: ReplaySummary,
}

impl Replay {
    pub fn new(config: ClientConfig, demo: &Demo, hud: HudHost<LayoutEngine>) -> Self {
        let mut view = demo.view.clone();
        if let Some(prediction) = config.prediction {
            view.prediction = prediction;
        }

        let mut reactor = Reactor::new(
            demo.effects.clone(),
            Media::sequential(1, demo.sounds),
            WeaponTable::default(),
            view,
        );
        for entry in &demo.roster {
            reactor.roster.set_name(entry.slot, entry.name.as_str());
        }

        let player = PlayerHud {
            pov: reactor.view.pov,
            ..Default::default()
        };

        Self {
            renderer: DrawLog::new(config.binds.clone()),
            hud_config: demo.hud_config,
            config,
            reactor,
            world: ClientWorld::from_blocks(&demo.map),
            audio: AudioLog::default(),
            scene: SceneLog::default(),
            hud,
            fps: FpsCounter::default(),
            player,
            game: MatchHud::default(),
            last_tick: None,
            summary: ReplaySummary::default(),
        }
    }

    pub fn run(mut self, frames: Vec<DemoFrame>) -> ReplaySummary {
        let step = self.config.frame_ms.max(1);
        for frame in frames {
            if let Some(last) = self.last_tick {
                let mut now = last + step;
                while now < frame.time {
                    self.tick(now);
                    now += step;
                }
            }
            self.snapshot(frame);
        }

        if let Some(last) = self.last_tick {
            let mut now = last + step;
            while now <= last + self.config.tail_ms && self.reactor.announcer.pending() > 0 {
                self.tick(now);
                now += step;
            }
        }

        self.finish()
    }

    /// Takes in one recorded snapshot and runs the render tick at its time.
    pub fn snapshot(&mut self, frame: DemoFrame) {
        let DemoFrame {
            time,
            snapshot,
            predicted,
            obituaries,
            pose,
            hud,
            game,
        } = frame;

        self.reactor.set_clock(Clock::new(time, self.config.lerp));
        self.world.sync_entities(&snapshot.entities);
        self.scene.pose(&snapshot.entities);
        if let Some(pose) = pose {
            self.reactor.view.predicted = pose;
        }
        if let Some(hud) = hud {
            self.player = hud;
        }
        if let Some(game) = game {
            self.game = game;
        }

        {
            let mut svc = Services::new(&self.world, &mut self.audio, &mut self.scene);
            if self.reactor.view.prediction {
                for event in &predicted {
                    if self.reactor.predicted_event(event.kind, event.parm, &mut svc) {
                        self.summary.predicted += 1;
                    }
                }
            } else if !predicted.is_empty() {
                debug!("prediction off, skipping {} predicted events", predicted.len());
            }

            self.reactor.new_frame(snapshot);
            self.reactor.fire_events(true, &mut svc);
            self.reactor.fire_events(false, &mut svc);
        }

        for message in &obituaries {
            let notice = self.reactor.obituary(message);
            self.summary.obituaries += 1;
            if let Some(chat) = notice.chat_text() {
                info!("{chat}");
                self.summary.chat_lines += 1;
            }
            if let Some(text) = notice.center_print {
                info!("[centre] {text}");
                self.summary.center_prints += 1;
            }
        }

        self.summary.snapshots += 1;
        self.tick(time);
    }

    /// One render frame: continuous effects, the announcer queue and the HUD.
    pub fn tick(&mut self, now: i64) {
        let elapsed = self.last_tick.map_or(self.config.frame_ms, |last| now - last);
        self.last_tick = Some(now);
        self.reactor.set_clock(Clock::new(now, self.config.lerp));

        {
            let mut svc = Services::new(&self.world, &mut self.audio, &mut self.scene);
            self.reactor.render(&mut svc);
        }
        self.reactor.release_announcer(elapsed, &mut self.audio);

        if elapsed > 0 {
            self.fps.push(elapsed);
        }
        self.draw_hud();
        self.summary.ticks += 1;
    }

    fn scope_view(&self) -> Option<ScopeView> {
        if self.player.zoom_time <= 0 {
            return None;
        }
        let view = &self.reactor.view;
        let eye = view.eye();
        let end = eye + forward(view.predicted.view_angles) * SCOPE_RANGE;
        let tr = self
            .world
            .trace(&TraceQuery::line(eye, end, Some(view.pov), MASK_SHOT));
        Some(ScopeView {
            distance: (tr.end_pos - eye).length(),
            target: tr.hit_entity(),
        })
    }

    fn draw_hud(&mut self) {
        let snapshot = HudSnapshot::build(
            &self.player,
            &self.game,
            self.reactor.view.local_entity(),
            NetStatus {
                demo_playing: true,
                ..Default::default()
            },
            self.hud_config,
            self.fps.fps(),
            self.config.viewport,
        );
        let frame = HudFrame {
            snapshot,
            player: &self.player,
            game: &self.game,
            reactor: &self.reactor,
            scope: self.scope_view(),
        };
        self.renderer.begin_frame();
        self.hud.draw(&frame, &mut self.renderer);
    }

    fn finish(mut self) -> ReplaySummary {
        let stats = self.hud.stats();
        self.summary.sounds = self.audio.played;
        self.summary.looping = self.audio.looping;
        self.summary.effects = self.scene.total();
        self.summary.hud_frames = stats.frames_drawn;
        self.summary.hud_errors = stats.runtime_errors;
        self.summary.draw_calls = self.renderer.boxes + self.renderer.texts + self.renderer.widgets;
        crate::backends::log_counts(&self.scene);
        self.summary
    }
}
