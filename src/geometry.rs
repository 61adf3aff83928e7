//! Integer pixel geometry and ARGB colors shared by the bar and its children.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::Error;

/// Edges of a laid-out child, in pixels relative to the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Bounds from an origin and a size.
    pub const fn from_origin_size(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Shift by a fractional translation, truncating each edge to whole pixels.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            left: (self.left as f32 + dx) as i32,
            top: (self.top as f32 + dy) as i32,
            right: (self.right as f32 + dx) as i32,
            bottom: (self.bottom as f32 + dy) as i32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Padding {
    pub fn all(value: i32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// An 8-bit-per-channel color, stored as alpha, red, green, blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb {
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xFF, r, g, b }
    }

    /// Unpack a `0xAARRGGBB` word.
    pub const fn from_u32(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub const fn to_u32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Channels in `[a, r, g, b]` order.
    pub const fn channels(self) -> [u8; 4] {
        [self.a, self.r, self.g, self.b]
    }

    pub const fn from_channels(channels: [u8; 4]) -> Self {
        Self {
            a: channels[0],
            r: channels[1],
            g: channels[2],
            b: channels[3],
        }
    }

    pub const WHITE: Argb = Argb::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Argb = Argb::rgb(0, 0, 0);
}

impl FromStr for Argb {
    type Err = Error;

    /// Parses `#AARRGGBB` or `#RRGGBB` (opaque).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| Error::Config(format!("color '{s}' must start with '#'")))?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::Config(format!("color '{s}' is not valid hex")));
        }
        let value = u32::from_str_radix(hex, 16)
            .map_err(|_| Error::Config(format!("color '{s}' is not valid hex")))?;
        match hex.len() {
            8 => Ok(Argb::from_u32(value)),
            6 => Ok(Argb::from_u32(0xFF00_0000 | value)),
            _ => Err(Error::Config(format!(
                "color '{s}' must be #AARRGGBB or #RRGGBB"
            ))),
        }
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_u32())
    }
}

impl<'de> Deserialize<'de> for Argb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let literal = String::deserialize(deserializer)?;
        literal.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_size() {
        let b = Bounds::from_origin_size(10, 50, 100, 40);
        assert_eq!(b.right, 110);
        assert_eq!(b.bottom, 90);
        assert_eq!(b.width(), 100);
        assert_eq!(b.height(), 40);
    }

    #[test]
    fn test_bounds_translated_truncates() {
        let b = Bounds::new(10, 10, 20, 20).translated(-2.5, 3.7);
        assert_eq!(b, Bounds::new(7, 13, 17, 23));
    }

    #[test]
    fn test_padding_helpers() {
        let p = Padding::symmetric(8, 4);
        assert_eq!(p.horizontal(), 16);
        assert_eq!(p.vertical(), 8);
        assert_eq!(Padding::all(3).left, 3);
    }

    #[test]
    fn test_argb_word_round_trip() {
        let c = Argb::from_u32(0x80FF_2010);
        assert_eq!(c, Argb::new(0x80, 0xFF, 0x20, 0x10));
        assert_eq!(c.to_u32(), 0x80FF_2010);
        assert_eq!(c.channels(), [0x80, 0xFF, 0x20, 0x10]);
    }

    #[test]
    fn test_argb_parse() {
        assert_eq!("#FF000000".parse::<Argb>().unwrap(), Argb::BLACK);
        assert_eq!("#ffffff".parse::<Argb>().unwrap(), Argb::WHITE);
        assert!("ffffff".parse::<Argb>().is_err());
        assert!("#fffff".parse::<Argb>().is_err());
        assert!("#zzzzzz".parse::<Argb>().is_err());
        assert!("#+FFFFF".parse::<Argb>().is_err());
        assert!("#-FFFFF".parse::<Argb>().is_err());
    }

    #[test]
    fn test_argb_display() {
        assert_eq!(Argb::new(0x80, 1, 2, 3).to_string(), "#80010203");
    }
}
