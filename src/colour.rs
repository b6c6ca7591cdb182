use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// PNG colour types; the discriminant is the IHDR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ColourType {
    Grayscale = 0,
    RGB = 2,
    Palette = 3,
    GrayscaleAlpha = 4,
    RGBAlpha = 6,
}

impl ColourType {
    pub const ALL: [ColourType; 5] = [
        ColourType::Grayscale,
        ColourType::RGB,
        ColourType::Palette,
        ColourType::GrayscaleAlpha,
        ColourType::RGBAlpha,
    ];

    /// Bit depths the format allows for this colour type.
    pub fn bit_depths(&self) -> &'static [u8] {
        match self {
            ColourType::Grayscale => &[1, 2, 4, 8, 16],
            ColourType::Palette => &[1, 2, 4, 8],
            ColourType::RGB | ColourType::GrayscaleAlpha | ColourType::RGBAlpha => &[8, 16],
        }
    }

    pub fn valid_bit_depth(&self, bit_depth: u8) -> bool {
        self.bit_depths().contains(&bit_depth)
    }

    pub const fn get_code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<ColourType> {
        ColourType::ALL.into_iter().find(|ct| ct.get_code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const MATERIAL_BLUE: Rgb = Rgb::new(25, 118, 210);

    pub const fn new(red: u8, green: u8, blue: u8) -> Rgb {
        Rgb { red, green, blue }
    }

    /// Fully opaque RGBA bytes.
    pub const fn opaque(self) -> [u8; 4] {
        [self.red, self.green, self.blue, 0xFF]
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Rgb { red, green, blue }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid colour {0:?}, expected #RRGGBB")]
pub struct ParseColourError(String);

impl FromStr for Rgb {
    type Err = ParseColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColourError(s.to_owned());
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Accept "#RRGGBB" as well as [r, g, b].
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Triple([u8; 3]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Triple([r, g, b]) => Ok(Rgb::new(r, g, b)),
        }
    }
}

/// Outer field and centered square colours of an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconColours {
    pub background: Rgb,
    pub foreground: Rgb,
}

impl IconColours {
    pub fn new(background: Rgb, foreground: Rgb) -> IconColours {
        IconColours {
            background,
            foreground,
        }
    }

    pub fn swapped(self) -> IconColours {
        IconColours {
            background: self.foreground,
            foreground: self.background,
        }
    }
}

impl Default for IconColours {
    fn default() -> Self {
        IconColours::new(Rgb::MATERIAL_BLUE, Rgb::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_codes_round_trip() {
        for ct in ColourType::ALL {
            assert_eq!(ColourType::from_code(ct.get_code()), Some(ct));
        }
        assert_eq!(ColourType::RGBAlpha.get_code(), 6);
        assert_eq!(ColourType::from_code(3), Some(ColourType::Palette));
        assert_eq!(ColourType::from_code(1), None);
        assert_eq!(ColourType::from_code(5), None);
    }

    #[test]
    fn test_rgba_accepts_only_8_and_16() {
        assert!(ColourType::RGBAlpha.valid_bit_depth(8));
        assert!(ColourType::RGBAlpha.valid_bit_depth(16));
        assert!(!ColourType::RGBAlpha.valid_bit_depth(4));
        assert!(ColourType::Palette.valid_bit_depth(1));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#1976D2".parse::<Rgb>(), Ok(Rgb::MATERIAL_BLUE));
        assert_eq!("ffffff".parse::<Rgb>(), Ok(Rgb::WHITE));
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#GG0000".parse::<Rgb>().is_err());
        assert!("#ééé".parse::<Rgb>().is_err());
        assert_eq!(Rgb::MATERIAL_BLUE.to_string(), "#1976D2");
    }

    #[test]
    fn test_swapped() {
        let colours = IconColours::new(Rgb::BLACK, Rgb::WHITE).swapped();
        assert_eq!(colours.background, Rgb::WHITE);
        assert_eq!(colours.foreground, Rgb::BLACK);
    }
}
