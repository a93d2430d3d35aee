//! The drawing surface HUD scripts paint through.

use glam::{Vec2, Vec4};
use log::info;
use serde::{Deserialize, Serialize};

use ricochet::entity::{MAX_CLIENTS, team_color};
use ricochet::{EntityNum, Reactor, Team};

use crate::color::attention_color;
use crate::snapshot::{HudSnapshot, MatchHud, PlayerHud};

pub const FONT_TINY: f32 = 10.0;
pub const FONT_EXTRA_SMALL: f32 = 12.0;
pub const FONT_SMALL: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    #[serde(rename = "left top")]
    LeftTop,
    #[serde(rename = "center top")]
    CenterTop,
    #[serde(rename = "right top")]
    RightTop,
    #[serde(rename = "left middle")]
    LeftMiddle,
    #[serde(rename = "center middle")]
    CenterMiddle,
    #[serde(rename = "right middle")]
    RightMiddle,
    #[serde(rename = "left bottom")]
    LeftBottom,
    #[serde(rename = "center bottom")]
    CenterBottom,
    #[serde(rename = "right bottom")]
    RightBottom,
}

impl Alignment {
    /// Left edge of a `width` wide element anchored at `x`.
    pub fn align_x(self, x: f32, width: f32) -> f32 {
        match self {
            Self::LeftTop | Self::LeftMiddle | Self::LeftBottom => x,
            Self::CenterTop | Self::CenterMiddle | Self::CenterBottom => x - width * 0.5,
            Self::RightTop | Self::RightMiddle | Self::RightBottom => x - width,
        }
    }

    /// Top edge of a `height` tall element anchored at `y`.
    pub fn align_y(self, y: f32, height: f32) -> f32 {
        match self {
            Self::LeftTop | Self::CenterTop | Self::RightTop => y,
            Self::LeftMiddle | Self::CenterMiddle | Self::RightMiddle => y - height * 0.5,
            Self::LeftBottom | Self::CenterBottom | Self::RightBottom => y - height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Vec4,
    /// Outline colour, when outlined.
    pub border: Option<Vec4>,
    pub alignment: Alignment,
}

impl TextStyle {
    pub fn new(font: Font, size: f32, color: Vec4) -> Self {
        Self {
            font,
            size,
            color,
            border: None,
            alignment: Alignment::LeftTop,
        }
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn outlined(mut self, border: Vec4) -> Self {
        self.border = Some(border);
        self
    }
}

/// A textured rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad<'a> {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub uv: [Vec2; 2],
    /// Untextured when `None`.
    pub material: Option<&'a str>,
    pub color: Vec4,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Text<'a> {
    pub text: &'a str,
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
}

/// Widgets drawn by the renderer itself, with no layout logic of their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassThrough {
    Crosshair { x: f32, y: f32 },
    DamageNumbers { x: f32, y: f32 },
    BombIndicators { icon_size: f32, font_size: f32 },
    Pointed { font_size: f32, color: Vec4, border: f32 },
    ScopeOverlay { zoom: f32 },
}

/// The 2D backend the HUD draws into.
pub trait Renderer2d {
    fn draw_box(&mut self, quad: &Quad<'_>);

    fn draw_text(&mut self, text: &Text<'_>);

    fn text_width(&self, _font: Font, size: f32, text: &str) -> f32 {
        text.chars().count() as f32 * size * 0.5
    }

    /// Human readable keys bound to `command`, if any.
    fn bound_keys(&self, _command: &str) -> Option<String> {
        None
    }

    fn widget(&mut self, _widget: &PassThrough) {}
}

/// Where a scoped weapon is aimed, traced by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScopeView {
    pub distance: f32,
    pub target: Option<EntityNum>,
}

/// Everything a frame of HUD drawing reads.
pub struct HudFrame<'a> {
    pub snapshot: HudSnapshot,
    pub player: &'a PlayerHud,
    pub game: &'a MatchHud,
    pub reactor: &'a Reactor,
    pub scope: Option<ScopeView>,
}

impl HudFrame<'_> {
    pub fn now(&self) -> i64 {
        self.reactor.clock.now
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.snapshot.viewport_width, self.snapshot.viewport_height)
    }
}

pub struct HudApi<'a, 'f> {
    pub frame: &'a HudFrame<'f>,
    pub(crate) renderer: &'a mut dyn Renderer2d,
}

impl<'a, 'f> HudApi<'a, 'f> {
    pub fn new(frame: &'a HudFrame<'f>, renderer: &'a mut dyn Renderer2d) -> Self {
        Self { frame, renderer }
    }

    pub fn print(&self, message: &str) {
        info!("hud: {message}");
    }

    pub fn draw_box(&mut self, x: f32, y: f32, w: f32, h: f32, color: Vec4, material: Option<&str>) {
        self.renderer.draw_box(&Quad {
            x,
            y,
            w,
            h,
            uv: [Vec2::ZERO, Vec2::ONE],
            material,
            color,
        });
    }

    /// A box grown by `border` on every side.
    pub(crate) fn draw_box_padded(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        border: f32,
        color: Vec4,
        material: Option<&str>,
    ) {
        self.draw_box(
            x - border,
            y - border,
            w + border * 2.0,
            h + border * 2.0,
            color,
            material,
        );
    }

    /// Draws the bottom `frac` of `material` over the bottom of the box.
    pub(crate) fn draw_box_partial(&mut self, x: f32, y: f32, size: f32, frac: f32, color: Vec4, material: &str) {
        let y_offset = size * (1.0 - frac);
        self.renderer.draw_box(&Quad {
            x,
            y: y + y_offset,
            w: size,
            h: size - y_offset,
            uv: [Vec2::new(0.0, 1.0 - frac), Vec2::ONE],
            material: Some(material),
            color,
        });
    }

    pub fn text(&mut self, style: TextStyle, x: f32, y: f32, text: &str) {
        self.renderer.draw_text(&Text { text, x, y, style });
    }

    pub fn text_width(&self, font: Font, size: f32, text: &str) -> f32 {
        self.renderer.text_width(font, size, text)
    }

    /// Keys bound to `command`, or the command in brackets when unbound.
    pub fn get_bind(&self, command: &str) -> String {
        self.renderer
            .bound_keys(command)
            .unwrap_or_else(|| format!("[{command}]"))
    }

    pub(crate) fn bound_keys(&self, command: &str) -> Option<String> {
        self.renderer.bound_keys(command)
    }

    pub fn team_color(&self, team: u8) -> Vec4 {
        team_color(Team::from(team))
    }

    pub fn attention_color(&self) -> Vec4 {
        attention_color()
    }

    /// Name of the player in 1-based client slot `index`.
    pub fn player_name(&self, index: i64) -> Option<&'f str> {
        if index < 1 || index > MAX_CLIENTS as i64 {
            return None;
        }
        self.frame.reactor.roster.name(index as EntityNum)
    }

    pub fn pass_through(&mut self, widget: PassThrough) {
        self.renderer.widget(&widget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_anchors() {
        assert_eq!(Alignment::LeftTop.align_x(100.0, 40.0), 100.0);
        assert_eq!(Alignment::CenterMiddle.align_x(100.0, 40.0), 80.0);
        assert_eq!(Alignment::RightBottom.align_x(100.0, 40.0), 60.0);

        assert_eq!(Alignment::RightTop.align_y(100.0, 40.0), 100.0);
        assert_eq!(Alignment::LeftMiddle.align_y(100.0, 40.0), 80.0);
        assert_eq!(Alignment::CenterBottom.align_y(100.0, 40.0), 60.0);
    }

    #[test]
    fn alignment_names() {
        let parsed: Alignment = serde_json::from_str("\"center bottom\"").unwrap();
        assert_eq!(parsed, Alignment::CenterBottom);
        assert!(serde_json::from_str::<Alignment>("\"middle\"").is_err());

        let font: Font = serde_json::from_str("\"bolditalic\"").unwrap();
        assert_eq!(font, Font::BoldItalic);
    }
}
