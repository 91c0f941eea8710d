//! # Linear Barcode Renderer
//!
//! Renders `code + price` as a CODE128 barcode, then stands it on its side
//! so it fits the narrow strip next to the QR code.
//!
//! ## Two-Stage Render
//! ```text
//!   Stage 1: horizontal                     Stage 2: vertical
//!
//!   ┌─ margin ────────────────────┐         ┌── bar_height + 2·margin + padding ──┐
//!   │ ▌▌ ▌ ▌▌▌ ▌ ▌▌ ▌▌▌ ▌ ▌▌ ▌▌▌ │ bar      │                                      │
//!   │ ▌▌ ▌ ▌▌▌ ▌ ▌▌ ▌▌▌ ▌ ▌▌ ▌▌▌ │ height   │   ══════════════════════════         │ canvas
//!   │ ▌▌ ▌ ▌▌▌ ▌ ▌▌ ▌▌▌ ▌ ▌▌ ▌▌▌ │ (128)    │   ══════════  rotated 90°           │ height
//!   └─────────────────────────────┘         │   ══════════════════════════         │ (128)
//!    modules × module_width + 2·margin      └──────────────────────────────────────┘
//! ```
//!
//! The rotated strip is centered on the vertical canvas. A strip taller than
//! the canvas is squeezed to the canvas height with nearest-neighbour
//! sampling, so the start code, every data character, the checksum and the
//! stop code all stay visible. Padding around the strip is filled with the
//! light color.

use barcoders::sym::code128::Code128;
use image::imageops::FilterType;
use image::{imageops, DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use kupon_core::DataUri;

use crate::color::Palette;
use crate::data_uri::png_data_uri;
use crate::error::{EncodingError, RenderResult};
use crate::CodeRenderer;

/// CODE128 code set B selector understood by `barcoders`.
const SET_B: char = 'Ɓ';

/// CODE128 code set A selector understood by `barcoders`.
const SET_A: char = 'À';

/// Linear barcode options.
///
/// Appears as the `[barcode]` table of the kiosk config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarcodeOptions {
    /// Width of one module (narrowest bar) in pixels.
    pub module_width: u32,

    /// Bar height in pixels.
    pub bar_height: u32,

    /// Light margin around the horizontal barcode in pixels.
    pub margin: u32,

    /// Extra width added to the vertical canvas.
    pub padding: u32,

    /// Height of the vertical canvas in pixels.
    pub canvas_height: u32,

    /// Bar color (`#RRGGBB`).
    pub dark: String,

    /// Background color (`#RRGGBB`).
    pub light: String,
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        BarcodeOptions {
            module_width: 2,
            bar_height: 128,
            margin: 5,
            padding: 10,
            canvas_height: 128,
            dark: "#000000".to_string(),
            light: "#FFFFFF".to_string(),
        }
    }
}

/// Renders text as a vertical CODE128 strip.
#[derive(Debug, Clone)]
pub struct LinearRenderer {
    options: BarcodeOptions,
    palette: Palette,
}

impl LinearRenderer {
    /// Creates a renderer, validating the palette up front.
    pub fn new(options: BarcodeOptions) -> RenderResult<Self> {
        let palette = Palette::from_hex(&options.dark, &options.light)?;
        Ok(LinearRenderer { options, palette })
    }

    /// Returns the options this renderer was built with.
    pub fn options(&self) -> &BarcodeOptions {
        &self.options
    }

    /// Encodes `text` into CODE128 modules (`1` = bar, `0` = space).
    ///
    /// Printable ASCII goes through code set B. Text with control
    /// characters falls back to code set A, which has no lowercase.
    pub fn modules(&self, text: &str) -> RenderResult<Vec<u8>> {
        if text.is_empty() {
            return Err(EncodingError::EmptyText);
        }

        let set = pick_code_set(text)?;
        let symbol = Code128::new(format!("{set}{text}"))
            .map_err(|err| EncodingError::Symbology(err.to_string()))?;

        Ok(symbol.encode())
    }

    /// Stage 1: the barcode as drawn, bars running top to bottom.
    pub fn render_horizontal(&self, text: &str) -> RenderResult<RgbImage> {
        let modules = self.modules(text)?;
        let BarcodeOptions {
            module_width,
            bar_height,
            margin,
            ..
        } = self.options;

        let width = modules.len() as u32 * module_width + 2 * margin;
        let height = bar_height + 2 * margin;
        let Palette { dark, light } = self.palette;

        debug!(modules = modules.len(), width, height, "Rendering CODE128");

        Ok(RgbImage::from_fn(width, height, |x, y| {
            let in_bars = x >= margin
                && x < width - margin
                && y >= margin
                && y < height - margin;

            if in_bars && modules[((x - margin) / module_width) as usize] == 1 {
                dark
            } else {
                light
            }
        }))
    }

    /// Stage 2: rotates a horizontal barcode 90° clockwise and centers it on
    /// a `(height + padding) × canvas_height` canvas, squeezing it to fit.
    pub fn rotate_vertical(&self, horizontal: &RgbImage) -> RgbImage {
        let mut rotated = imageops::rotate90(horizontal);
        if rotated.height() > self.options.canvas_height {
            debug!(
                from = rotated.height(),
                to = self.options.canvas_height,
                "Squeezing barcode to canvas"
            );
            rotated = imageops::resize(
                &rotated,
                rotated.width(),
                self.options.canvas_height,
                FilterType::Nearest,
            );
        }

        let canvas_width = horizontal.height() + self.options.padding;
        let canvas_height = self.options.canvas_height;
        let mut canvas = RgbImage::from_pixel(canvas_width, canvas_height, self.palette.light);

        let x = (i64::from(canvas_width) - i64::from(rotated.width())) / 2;
        let y = (i64::from(canvas_height) - i64::from(rotated.height())) / 2;
        imageops::overlay(&mut canvas, &rotated, x, y);

        canvas
    }

    /// Renders the final vertical strip.
    pub fn render(&self, text: &str) -> RenderResult<RgbImage> {
        let horizontal = self.render_horizontal(text)?;
        Ok(self.rotate_vertical(&horizontal))
    }
}

impl CodeRenderer for LinearRenderer {
    fn render_data_uri(&self, text: &str) -> RenderResult<DataUri> {
        let image = self.render(text)?;
        png_data_uri(DynamicImage::ImageRgb8(image))
    }
}

fn pick_code_set(text: &str) -> RenderResult<char> {
    if let Some(character) = text.chars().find(|c| !c.is_ascii()) {
        return Err(EncodingError::UnsupportedCharacter { character });
    }

    if text.chars().all(|c| (' '..='~').contains(&c)) {
        return Ok(SET_B);
    }

    // Set A covers control characters plus space through underscore.
    match text.chars().find(|c| *c > '_') {
        Some(character) => Err(EncodingError::UnsupportedCharacter { character }),
        None => Ok(SET_A),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_uri::decode_png_image;
    use image::Rgb;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn renderer() -> LinearRenderer {
        LinearRenderer::new(BarcodeOptions::default()).unwrap()
    }

    #[test]
    fn test_horizontal_dimensions() {
        let r = renderer();
        let modules = r.modules("ABC12315000").unwrap();
        let image = r.render_horizontal("ABC12315000").unwrap();

        assert_eq!(image.width(), modules.len() as u32 * 2 + 10);
        assert_eq!(image.height(), 138);

        // Margins are light, the first module of a start code is a bar.
        assert_eq!(*image.get_pixel(0, 64), WHITE);
        assert_eq!(*image.get_pixel(5, 64), BLACK);
        assert_eq!(*image.get_pixel(5, 2), WHITE);
    }

    #[test]
    fn test_vertical_strip_is_148_by_128() {
        let image = renderer().render("ABC12315000").unwrap();
        assert_eq!(image.dimensions(), (148, 128));

        // Left padding and the rotated margin are light.
        for x in 0..10 {
            assert_eq!(*image.get_pixel(x, 64), WHITE, "column {x}");
        }

        // Bars now run horizontally: some rows dark, some light.
        let column: Vec<_> = (0..128).map(|y| *image.get_pixel(74, y)).collect();
        assert!(column.contains(&BLACK));
        assert!(column.contains(&WHITE));
    }

    #[test]
    fn test_rotation_preserves_bars() {
        let r = renderer();
        let horizontal = r.render_horizontal("AB").unwrap();
        let vertical = r.rotate_vertical(&horizontal);

        // Short codes fit entirely; the first bar lands on a row.
        assert!(horizontal.width() <= 128);
        let top = (128 - horizontal.width()) / 2;
        assert_eq!(*vertical.get_pixel(74, top + 5), BLACK);
        assert_eq!(*vertical.get_pixel(74, top + 4), WHITE);
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = renderer().render_data_uri("ABC12315000").unwrap();
        let b = renderer().render_data_uri("ABC12315000").unwrap();
        let c = renderer().render_data_uri("ABC12315001").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);

        // Codes that differ only in the final digit stay distinct on the canvas.
        let r = renderer();
        assert_ne!(r.render("ABC12315000").unwrap(), r.render("ABC12315009").unwrap());

        let decoded = decode_png_image(&a).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (148, 128));
    }

    #[test]
    fn test_long_code_is_squeezed_not_clipped() {
        let r = renderer();
        let horizontal = r.render_horizontal("ABC12315000").unwrap();
        assert!(horizontal.width() > 128);

        let vertical = r.rotate_vertical(&horizontal);
        assert_eq!(vertical.dimensions(), (148, 128));

        // The quiet zones survive at both ends and the stop code reaches
        // the bottom rows.
        assert_eq!(*vertical.get_pixel(74, 0), WHITE);
        assert_eq!(*vertical.get_pixel(74, 127), WHITE);
        assert!((118..127).any(|y| *vertical.get_pixel(74, y) == BLACK));
    }

    #[test]
    fn test_rejects_unencodable_text() {
        assert!(matches!(renderer().modules(""), Err(EncodingError::EmptyText)));
        assert!(matches!(
            renderer().modules("KOPI☕"),
            Err(EncodingError::UnsupportedCharacter { character: '☕' })
        ));
    }

    #[test]
    fn test_code_set_selection() {
        assert_eq!(pick_code_set("abc 123").unwrap(), SET_B);
        assert_eq!(pick_code_set("AB\tC").unwrap(), SET_A);
        assert!(pick_code_set("ab\tc").is_err());
    }
}
