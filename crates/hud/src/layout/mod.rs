//! Declarative JSON layouts, the built-in HUD script engine.
//!
//! A layout is an object with an `elements` array. Every element names what
//! it draws in `draw`, may carry an `if` condition, and takes its numbers as
//! literals or expression strings over the snapshot:
//!
//! ```json
//! { "elements": [
//!     { "draw": "text", "if": "show_fps", "x": "viewport_width - 8", "y": 8,
//!       "text": "{fps} FPS", "font_size": 16, "color": "#fff",
//!       "alignment": "right top" },
//!     { "draw": "weapon_bar", "x": "viewport_width / 2", "y": "viewport_height - 80",
//!       "size": 64, "padding": 8, "alignment": "center bottom" }
//! ] }
//! ```

mod expr;

pub use expr::{Expression, Template};

use glam::Vec4;
use log::debug;
use serde::Deserialize;

use crate::api::{Alignment, Font, HudApi, PassThrough, TextStyle};
use crate::color::{ColorValue, attention_color};
use crate::error::ScriptError;
use crate::host::{HudScript, ScriptEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Attention,
}

/// A colour in a layout: fixed, the colour of a team, or a named one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LayoutColor {
    Fixed(ColorValue),
    Team { team: Expression },
    Named(NamedColor),
}

impl Default for LayoutColor {
    fn default() -> Self {
        Self::Fixed(ColorValue::linear(Vec4::ONE))
    }
}

impl LayoutColor {
    fn resolve(&self, api: &HudApi) -> Result<Vec4, ScriptError> {
        Ok(match self {
            Self::Fixed(color) => color.to_linear(),
            Self::Team { team } => api.team_color(team.eval_f32(api)? as u8),
            Self::Named(NamedColor::Attention) => attention_color(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "draw", rename_all = "snake_case")]
pub enum Draw {
    Box {
        x: Expression,
        y: Expression,
        w: Expression,
        h: Expression,
        #[serde(default)]
        color: LayoutColor,
        #[serde(default)]
        material: Option<String>,
    },
    Text {
        x: Expression,
        y: Expression,
        text: Template,
        #[serde(default)]
        font: Font,
        font_size: Expression,
        #[serde(default)]
        color: LayoutColor,
        #[serde(default)]
        border: Option<LayoutColor>,
        #[serde(default)]
        alignment: Alignment,
    },
    Print {
        text: Template,
    },
    Group {
        elements: Vec<Element>,
    },
    WeaponBar {
        x: Expression,
        y: Expression,
        size: Expression,
        padding: Expression,
        #[serde(default)]
        alignment: Alignment,
    },
    PerksUtility {
        x: Expression,
        y: Expression,
        size: Expression,
        padding: Expression,
        #[serde(default)]
        alignment: Alignment,
    },
    Obituaries {
        x: Expression,
        y: Expression,
        width: Expression,
        height: Expression,
        icon_size: Expression,
        font_size: Expression,
        #[serde(default)]
        alignment: Alignment,
    },
    Clock {
        x: Expression,
        y: Expression,
        font_size: Expression,
        #[serde(default)]
        color: LayoutColor,
        #[serde(default)]
        alignment: Alignment,
        #[serde(default)]
        border: Expression,
    },
    Crosshair,
    DamageNumbers {
        x: Expression,
        y: Expression,
    },
    BombIndicators {
        icon_size: Expression,
        font_size: Expression,
    },
    Pointed {
        font_size: Expression,
        #[serde(default)]
        color: LayoutColor,
        #[serde(default)]
        border: Expression,
    },
    Scope,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Element {
    #[serde(rename = "if", default)]
    pub condition: Option<Expression>,
    #[serde(flatten)]
    pub draw: Draw,
}

impl Element {
    fn run(&self, api: &mut HudApi) -> Result<(), ScriptError> {
        if let Some(condition) = &self.condition {
            if !condition.eval_bool(api)? {
                return Ok(());
            }
        }

        match &self.draw {
            Draw::Box {
                x,
                y,
                w,
                h,
                color,
                material,
            } => {
                let (x, y, w, h) = (x.eval_f32(api)?, y.eval_f32(api)?, w.eval_f32(api)?, h.eval_f32(api)?);
                let color = color.resolve(api)?;
                api.draw_box(x, y, w, h, color, material.as_deref());
            }
            Draw::Text {
                x,
                y,
                text,
                font,
                font_size,
                color,
                border,
                alignment,
            } => {
                let mut style =
                    TextStyle::new(*font, font_size.eval_f32(api)?, color.resolve(api)?).aligned(*alignment);
                if let Some(border) = border {
                    style = style.outlined(border.resolve(api)?);
                }
                let (x, y) = (x.eval_f32(api)?, y.eval_f32(api)?);
                let text = text.render(api)?;
                api.text(style, x, y, &text);
            }
            Draw::Print { text } => {
                let text = text.render(api)?;
                api.print(&text);
            }
            Draw::Group { elements } => {
                for element in elements {
                    element.run(api)?;
                }
            }
            Draw::WeaponBar {
                x,
                y,
                size,
                padding,
                alignment,
            } => {
                let (x, y) = (x.eval_f32(api)?, y.eval_f32(api)?);
                let (size, padding) = (size.eval_f32(api)?, padding.eval_f32(api)?);
                api.weapon_bar(x, y, size, padding, *alignment);
            }
            Draw::PerksUtility {
                x,
                y,
                size,
                padding,
                alignment,
            } => {
                let (x, y) = (x.eval_f32(api)?, y.eval_f32(api)?);
                let (size, padding) = (size.eval_f32(api)?, padding.eval_f32(api)?);
                api.perks_utility(x, y, size, padding, *alignment);
            }
            Draw::Obituaries {
                x,
                y,
                width,
                height,
                icon_size,
                font_size,
                alignment,
            } => {
                let (x, y) = (x.eval_f32(api)?, y.eval_f32(api)?);
                let (width, height) = (width.eval_f32(api)?, height.eval_f32(api)?);
                let (icon_size, font_size) = (icon_size.eval_f32(api)?, font_size.eval_f32(api)?);
                api.obituaries(x, y, width, height, icon_size, font_size, *alignment);
            }
            Draw::Clock {
                x,
                y,
                font_size,
                color,
                alignment,
                border,
            } => {
                let (x, y) = (x.eval_f32(api)?, y.eval_f32(api)?);
                let size = font_size.eval_f32(api)?;
                let color = color.resolve(api)?;
                let border = border.eval_f32(api)?;
                api.clock(x, y, size, color, *alignment, border);
            }
            Draw::Crosshair => api.crosshair(),
            Draw::DamageNumbers { x, y } => {
                let widget = PassThrough::DamageNumbers {
                    x: x.eval_f32(api)?,
                    y: y.eval_f32(api)?,
                };
                api.pass_through(widget);
            }
            Draw::BombIndicators {
                icon_size,
                font_size,
            } => {
                let widget = PassThrough::BombIndicators {
                    icon_size: icon_size.eval_f32(api)?,
                    font_size: font_size.eval_f32(api)?,
                };
                api.pass_through(widget);
            }
            Draw::Pointed {
                font_size,
                color,
                border,
            } => {
                let widget = PassThrough::Pointed {
                    font_size: font_size.eval_f32(api)?,
                    color: color.resolve(api)?,
                    border: border.eval_f32(api)?,
                };
                api.pass_through(widget);
            }
            Draw::Scope => api.scope(),
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Layout {
    pub elements: Vec<Element>,
}

impl HudScript for Layout {
    fn draw(&mut self, api: &mut HudApi) -> Result<(), ScriptError> {
        for element in &self.elements {
            element.run(api)?;
        }
        Ok(())
    }
}

/// Compiles JSON layouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine;

impl ScriptEngine for LayoutEngine {
    fn compile(&self, name: &str, source: &str) -> Result<Box<dyn HudScript>, ScriptError> {
        let compile_error = |err: serde_json::Error| ScriptError::Compile {
            name: name.to_string(),
            message: err.to_string(),
        };

        let document: serde_json::Value = serde_json::from_str(source).map_err(compile_error)?;
        if !document.is_object() {
            return Err(ScriptError::NotCallable {
                name: name.to_string(),
            });
        }

        let layout: Layout = serde_json::from_value(document).map_err(compile_error)?;
        debug!("{name}: {} top-level elements", layout.elements.len());
        Ok(Box::new(layout))
    }
}
