use glam::Vec4;
use serde::{Deserialize, Serialize};

/// An 8-bit per channel colour, as authored in layouts and tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`. Alpha defaults to
    /// opaque.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?.as_bytes();
        if !digits.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }

        let mut expanded = [b'f'; 8];
        match digits.len() {
            3 | 4 => {
                for (i, digit) in digits.iter().enumerate() {
                    expanded[i * 2] = *digit;
                    expanded[i * 2 + 1] = *digit;
                }
            }
            6 | 8 => expanded[..digits.len()].copy_from_slice(digits),
            _ => return None,
        }

        let byte = |i: usize| Some(hex_digit(expanded[i])? * 16 + hex_digit(expanded[i + 1])?);
        Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?))
    }

    pub fn to_linear(self) -> Vec4 {
        Vec4::new(
            srgb_to_linear(self.r as f32 / 255.0),
            srgb_to_linear(self.g as f32 / 255.0),
            srgb_to_linear(self.b as f32 / 255.0),
            self.a as f32 / 255.0,
        )
    }
}

fn hex_digit(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub const DIESEL_YELLOW: Rgba8 = Rgba8::new(255, 204, 38, 255);
const AMMO_EMPTY: Rgba8 = Rgba8::new(255, 56, 97, 255);

pub const WHITE: Vec4 = Vec4::ONE;
pub const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
pub const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
pub const DARK_GRAY: Vec4 = Vec4::new(0.015, 0.015, 0.015, 1.0);
pub const HALF_GRAY: Vec4 = Vec4::new(0.5, 0.5, 0.5, 1.0);

pub fn light_gray() -> Vec4 {
    Rgba8::new(96, 96, 96, 255).to_linear()
}

/// Highlight for things the player must notice, like kill icons.
pub fn attention_color() -> Vec4 {
    DIESEL_YELLOW.to_linear()
}

/// Bomb slot tint while standing on a plant site.
pub fn plantable_color() -> Vec4 {
    Rgba8::new(61, 220, 96, 255).to_linear()
}

/// Red when empty, yellow when full.
pub fn ammo_color(ammo_frac: f32) -> Vec4 {
    AMMO_EMPTY
        .to_linear()
        .lerp(DIESEL_YELLOW.to_linear(), ammo_frac)
}

/// A colour as written in a layout: a hex string or an explicit table
/// whose channels are sRGB bytes or linear floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Hex(#[serde(with = "hex")] Rgba8),
    Table {
        srgb: bool,
        r: f32,
        g: f32,
        b: f32,
        #[serde(default = "opaque")]
        a: f32,
    },
}

fn opaque() -> f32 {
    1.0
}

impl ColorValue {
    /// The table form the `RGBA8` helper returns.
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::Table {
            srgb: true,
            r: r as f32,
            g: g as f32,
            b: b as f32,
            a: a as f32,
        }
    }

    /// The table form the `RGBALinear` helper returns.
    pub fn linear(color: Vec4) -> Self {
        Self::Table {
            srgb: false,
            r: color.x,
            g: color.y,
            b: color.z,
            a: color.w,
        }
    }

    pub fn to_linear(self) -> Vec4 {
        match self {
            Self::Hex(rgba) => rgba.to_linear(),
            Self::Table {
                srgb: true,
                r,
                g,
                b,
                a,
            } => Rgba8::new(
                r.clamp(0.0, 255.0) as u8,
                g.clamp(0.0, 255.0) as u8,
                b.clamp(0.0, 255.0) as u8,
                a.clamp(0.0, 255.0) as u8,
            )
            .to_linear(),
            Self::Table {
                srgb: false,
                r,
                g,
                b,
                a,
            } => Vec4::new(r, g, b, a),
        }
    }
}

mod hex {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Rgba8;

    pub fn serialize<S: Serializer>(rgba: &Rgba8, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            rgba.r, rgba.g, rgba.b, rgba.a
        ))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgba8, D::Error> {
        let text = String::deserialize(deserializer)?;
        Rgba8::parse_hex(&text)
            .ok_or_else(|| D::Error::custom(format!("color doesn't parse as a hex string: {text}")))
    }
}
