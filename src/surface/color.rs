use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Straight (non-premultiplied) RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const PURPLE: Self = Self::rgb(128, 0, 128);
    pub const PINK: Self = Self::rgb(255, 192, 203);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const GREY: Self = Self::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Uniformly random opaque color.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::rgb(rng.gen(), rng.gen(), rng.gen())
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "transparent" => Self::TRANSPARENT,
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "blue" => Self::BLUE,
            "purple" => Self::PURPLE,
            "pink" => Self::PINK,
            "yellow" => Self::YELLOW,
            "grey" | "gray" => Self::GREY,
            _ => return None,
        };
        Some(color)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised color `{0}`")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let text = input.trim().to_ascii_lowercase();
        let err = || ParseColorError(input.to_string());

        if let Some(color) = Self::named(&text) {
            return Ok(color);
        }

        if let Some(hex) = text.strip_prefix('#') {
            let channel = |idx: usize| {
                hex.get(idx..idx + 2)
                    .filter(|pair| pair.bytes().all(|b| b.is_ascii_hexdigit()))
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            };
            return match hex.len() {
                6 => Ok(Self::rgb(
                    channel(0).ok_or_else(err)?,
                    channel(2).ok_or_else(err)?,
                    channel(4).ok_or_else(err)?,
                )),
                8 => Ok(Self::rgba(
                    channel(0).ok_or_else(err)?,
                    channel(2).ok_or_else(err)?,
                    channel(4).ok_or_else(err)?,
                    channel(6).ok_or_else(err)?,
                )),
                _ => Err(err()),
            };
        }

        let (args, has_alpha) = if let Some(rest) = text.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = text.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(err());
        };
        let args = args.strip_suffix(')').ok_or_else(err)?;
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(err());
        }

        let byte = |part: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err());
            }
            part.parse::<u8>().map_err(|_| err())
        };
        let alpha = if has_alpha {
            let value: f64 = parts[3].parse().map_err(|_| err())?;
            if !value.is_finite() {
                return Err(err());
            }
            (value.clamp(0.0, 1.0) * 255.0).round() as u8
        } else {
            255
        };
        Ok(Self::rgba(
            byte(parts[0])?,
            byte(parts[1])?,
            byte(parts[2])?,
            alpha,
        ))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "rgb({},{},{})", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
