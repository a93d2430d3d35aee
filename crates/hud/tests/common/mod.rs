#![allow(dead_code)]

use std::collections::HashMap;

use glam::Vec4;
use ricochet::{Clock, EffectsConfig, Media, Reactor, ViewState, WeaponTable};
use ricochet_hud::{
    Font, HudConfig, HudFrame, HudSnapshot, MatchHud, NetStatus, PassThrough, PlayerHud, Quad,
    Renderer2d, ScopeView, Text, TextStyle,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub material: Option<String>,
    pub color: Vec4,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnText {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
}

/// Records every draw call.
#[derive(Debug, Default)]
pub struct DrawLog {
    pub boxes: Vec<DrawnBox>,
    pub texts: Vec<DrawnText>,
    pub widgets: Vec<PassThrough>,
    pub binds: HashMap<String, String>,
}

impl DrawLog {
    pub fn bind(mut self, command: &str, keys: &str) -> Self {
        self.binds.insert(command.to_string(), keys.to_string());
        self
    }

    pub fn text(&self, text: &str) -> Option<&DrawnText> {
        self.texts.iter().find(|drawn| drawn.text == text)
    }

    pub fn strings(&self) -> Vec<&str> {
        self.texts.iter().map(|drawn| drawn.text.as_str()).collect()
    }

    pub fn with_material(&self, material: &str) -> Vec<&DrawnBox> {
        self.boxes
            .iter()
            .filter(|drawn| drawn.material.as_deref() == Some(material))
            .collect()
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
        self.texts.clear();
        self.widgets.clear();
    }
}

impl Renderer2d for DrawLog {
    fn draw_box(&mut self, quad: &Quad<'_>) {
        self.boxes.push(DrawnBox {
            x: quad.x,
            y: quad.y,
            w: quad.w,
            h: quad.h,
            material: quad.material.map(str::to_string),
            color: quad.color,
        });
    }

    fn draw_text(&mut self, text: &Text<'_>) {
        self.texts.push(DrawnText {
            text: text.text.to_string(),
            x: text.x,
            y: text.y,
            style: text.style,
        });
    }

    fn text_width(&self, _font: Font, size: f32, text: &str) -> f32 {
        text.len() as f32 * size * 0.5
    }

    fn bound_keys(&self, command: &str) -> Option<String> {
        self.binds.get(command).cloned()
    }

    fn widget(&mut self, widget: &PassThrough) {
        self.widgets.push(*widget);
    }
}

pub fn reactor(now: i64) -> Reactor {
    let mut reactor = Reactor::new(
        EffectsConfig::default(),
        Media::default(),
        WeaponTable::default(),
        ViewState::default(),
    );
    reactor.set_clock(Clock::new(now, 1.0));
    reactor
}

pub struct Scenario {
    pub reactor: Reactor,
    pub player: PlayerHud,
    pub game: MatchHud,
    pub config: HudConfig,
    pub scope: Option<ScopeView>,
}

impl Scenario {
    pub fn new(now: i64) -> Self {
        Self {
            reactor: reactor(now),
            player: PlayerHud {
                pov: 1,
                health: 100,
                max_health: 100,
                ..Default::default()
            },
            game: MatchHud::default(),
            config: HudConfig::default(),
            scope: None,
        }
    }

    pub fn frame(&self) -> HudFrame<'_> {
        let snapshot = HudSnapshot::build(
            &self.player,
            &self.game,
            self.reactor.view.local_entity(),
            NetStatus::default(),
            self.config,
            60,
            (1280.0, 720.0),
        );
        HudFrame {
            snapshot,
            player: &self.player,
            game: &self.game,
            reactor: &self.reactor,
            scope: self.scope,
        }
    }
}
