use crate::foundation::core::Rgba8Premul;
use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA8 colour as written in project files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorDef {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl ColorDef {
    /// Opaque colour from RGB bytes.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Mean of the RGB channels, used to pick a contrasting panel colour.
    pub fn brightness(self) -> f64 {
        (f64::from(self.r) + f64::from(self.g) + f64::from(self.b)) / 3.0
    }

    /// Convert to premultiplied RGBA8.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }

    /// `#RRGGBB`, or `#RRGGBBAA` when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Parse `#RGB`, `#RRGGBB`, `#RRGGBBAA`, or a basic colour name.
    pub fn parse(s: &str) -> Result<Self, String> {
        let t = s.trim();
        if let Some(named) = named_color(&t.to_ascii_lowercase()) {
            return Ok(named);
        }
        parse_hex(t)
    }
}

impl Serialize for ColorDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Self {
                    r: *r,
                    g: *g,
                    b: *b,
                    a: *a,
                }),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err(format!("invalid color \"{s}\""));
    }

    match s.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, ch) in s.chars().enumerate() {
                let pair: String = [ch, ch].iter().collect();
                out[i] = hex_byte(&pair)?;
            }
            Ok(ColorDef::rgb(out[0], out[1], out[2]))
        }
        6 => Ok(ColorDef::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(ColorDef {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: hex_byte(&s[6..8])?,
        }),
        _ => Err(format!(
            "color \"{s}\" must be a name, #RGB, #RRGGBB or #RRGGBBAA"
        )),
    }
}

fn named_color(name: &str) -> Option<ColorDef> {
    Some(match name {
        "white" => ColorDef::WHITE,
        "black" => ColorDef::BLACK,
        "red" => ColorDef::rgb(255, 0, 0),
        "green" => ColorDef::rgb(0, 128, 0),
        "blue" => ColorDef::rgb(0, 0, 255),
        "yellow" => ColorDef::rgb(255, 255, 0),
        "orange" => ColorDef::rgb(255, 165, 0),
        "gold" => ColorDef::rgb(255, 215, 0),
        "cyan" => ColorDef::rgb(0, 255, 255),
        "magenta" => ColorDef::rgb(255, 0, 255),
        "gray" | "grey" => ColorDef::rgb(128, 128, 128),
        _ => return None,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
