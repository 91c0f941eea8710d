//! Two-color palettes for rendered codes.

use image::Rgb;

use crate::error::{EncodingError, RenderResult};

/// Foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Dark modules / bars.
    pub dark: Rgb<u8>,
    /// Light modules / spaces and margins.
    pub light: Rgb<u8>,
}

impl Default for Palette {
    /// Black on white.
    fn default() -> Self {
        Palette {
            dark: Rgb([0x00, 0x00, 0x00]),
            light: Rgb([0xFF, 0xFF, 0xFF]),
        }
    }
}

impl Palette {
    /// Builds a palette from `#RRGGBB` / `#RGB` strings.
    pub fn from_hex(dark: &str, light: &str) -> RenderResult<Self> {
        Ok(Palette {
            dark: parse_hex_color(dark)?,
            light: parse_hex_color(light)?,
        })
    }
}

/// Parses `#RRGGBB` or the `#RGB` shorthand.
pub fn parse_hex_color(text: &str) -> RenderResult<Rgb<u8>> {
    let invalid = || EncodingError::InvalidColor(text.to_string());

    let hex = text.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    match hex.len() {
        6 => Ok(Rgb([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ])),
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, digit) in rgb.iter_mut().zip(hex.chars()) {
                let doubled: String = [digit, digit].iter().collect();
                *slot = channel(&doubled)?;
            }
            Ok(Rgb(rgb))
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_and_short_forms() {
        assert_eq!(parse_hex_color("#000000").unwrap(), Rgb([0, 0, 0]));
        assert_eq!(parse_hex_color("#FFFFFF").unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_hex_color("#1a2B3c").unwrap(), Rgb([0x1A, 0x2B, 0x3C]));
        assert_eq!(parse_hex_color("#f80").unwrap(), Rgb([0xFF, 0x88, 0x00]));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["000000", "#00000", "#GGGGGG", "black", "#", "#0000000"] {
            assert!(parse_hex_color(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_default_palette_is_black_on_white() {
        let palette = Palette::default();
        assert_eq!(palette, Palette::from_hex("#000000", "#FFFFFF").unwrap());
    }
}
