//! Rasterizer: executes a worksheet paint plan into an RGBA page and
//! encodes it as PNG.
//!
//! Text is drawn with an embedded 5x7 bitmap font under integer scaling.
//! Characters outside the table (kana, kanji, emoji) rasterize through a
//! deterministic codepoint-seeded pattern, so the page stays a pure
//! function of its inputs and distinct strings stay pixel-distinct.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::canvas::DrawingSurface;
use crate::error::{Error, Result};
use crate::palette::Color;
use crate::rendering::layout::WorksheetPlan;
use crate::rendering::paint::{PaintCommand, TextAlign};
use crate::rendering::WorksheetImage;

/// Glyph advance in pattern columns (5 columns + 1 spacing).
const GLYPH_ADVANCE: u32 = 6;
/// Glyph height in pattern rows.
const GLYPH_HEIGHT: u32 = 7;

/// Execute `plan` against an opaque white page and encode the result.
pub fn rasterize(plan: &WorksheetPlan, surface: &DrawingSurface) -> Result<WorksheetImage> {
    let page = rasterize_rgba(plan, surface);
    let mut png_data = Vec::new();
    PngEncoder::new(&mut png_data)
        .write_image(&page, plan.width, plan.height, ExtendedColorType::Rgba8)
        .map_err(|e| Error::EncodeError(e.to_string()))?;
    Ok(WorksheetImage {
        width: plan.width,
        height: plan.height,
        png_data,
    })
}

/// Execute `plan` and return the raw RGBA page (row-major).
pub fn rasterize_rgba(plan: &WorksheetPlan, surface: &DrawingSurface) -> Vec<u8> {
    // The page starts opaque white, as the original filled it before
    // painting sections.
    let mut page = Page {
        width: plan.width,
        height: plan.height,
        pixels: vec![255; (plan.width * plan.height * 4) as usize],
    };

    for command in &plan.commands {
        match command {
            PaintCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
                alpha,
            } => page.fill_rect(*x, *y, *width, *height, *color, *alpha),
            PaintCommand::StrokeRect {
                x,
                y,
                width,
                height,
                color,
                line_width,
            } => page.stroke_rect(*x, *y, *width, *height, *color, *line_width),
            PaintCommand::Text {
                x,
                y,
                text,
                color,
                scale,
                align,
            } => page.draw_text(*x, *y, text, *color, *scale, *align),
            PaintCommand::Blit {
                x,
                y,
                width,
                height,
            } => page.blit_surface(surface, *x, *y, *width, *height),
        }
    }

    page.pixels
}

struct Page {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Page {
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color, alpha: u8) {
        let inv = 255 - alpha as u16;
        let a = alpha as u16;
        for py in y.max(0)..(y + height as i32).min(self.height as i32) {
            for px in x.max(0)..(x + width as i32).min(self.width as i32) {
                let i = ((py as u32 * self.width + px as u32) * 4) as usize;
                self.pixels[i] = ((color.r as u16 * a + self.pixels[i] as u16 * inv) / 255) as u8;
                self.pixels[i + 1] =
                    ((color.g as u16 * a + self.pixels[i + 1] as u16 * inv) / 255) as u8;
                self.pixels[i + 2] =
                    ((color.b as u16 * a + self.pixels[i + 2] as u16 * inv) / 255) as u8;
                self.pixels[i + 3] = 255;
            }
        }
    }

    // Stroke centered on the rect boundary, as the original's strokeRect.
    fn stroke_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color, lw: u32) {
        let half = (lw / 2) as i32;
        let w = width as i32;
        let h = height as i32;
        // top, bottom
        self.fill_rect(x - half, y - half, width + lw, lw, color, 255);
        self.fill_rect(x - half, y + h - half, width + lw, lw, color, 255);
        // left, right
        self.fill_rect(x - half, y - half, lw, height + lw, color, 255);
        self.fill_rect(x + w - half, y - half, lw, height + lw, color, 255);
    }

    fn draw_text(&mut self, x: i32, y_baseline: i32, text: &str, color: Color, scale: u32, align: TextAlign) {
        let scale = scale.max(1);
        let count = text.chars().count() as u32;
        let text_width = count * GLYPH_ADVANCE * scale;
        let start_x = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - text_width as i32 / 2,
        };
        let top = y_baseline - (GLYPH_HEIGHT * scale) as i32;

        let mut pen_x = start_x;
        for ch in text.chars() {
            if ch != ' ' {
                let rows = glyph(ch).unwrap_or_else(|| seeded_glyph(ch));
                self.draw_glyph(pen_x, top, &rows, color, scale);
            }
            pen_x += (GLYPH_ADVANCE * scale) as i32;
        }
    }

    fn draw_glyph(&mut self, x: i32, y: i32, rows: &[u8; 7], color: Color, scale: u32) {
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..5u32 {
                if bits & (1u8 << (4 - col)) != 0 {
                    self.fill_rect(
                        x + (col * scale) as i32,
                        y + (row as u32 * scale) as i32,
                        scale,
                        scale,
                        color,
                        255,
                    );
                }
            }
        }
    }

    // Nearest-neighbor scale of the full surface bitmap into the dest rect.
    fn blit_surface(&mut self, surface: &DrawingSurface, x: i32, y: i32, width: u32, height: u32) {
        let src = surface.size();
        let data = surface.data();
        for dy in 0..height {
            let py = y + dy as i32;
            if py < 0 || py >= self.height as i32 {
                continue;
            }
            let sy = (dy as u64 * src.height as u64 / height as u64) as u32;
            for dx in 0..width {
                let px = x + dx as i32;
                if px < 0 || px >= self.width as i32 {
                    continue;
                }
                let sx = (dx as u64 * src.width as u64 / width as u64) as u32;
                let si = ((sy * src.width + sx) * 4) as usize;
                let di = ((py as u32 * self.width + px as u32) * 4) as usize;
                self.pixels[di..di + 4].copy_from_slice(&data[si..si + 4]);
            }
        }
    }
}

/// Deterministic fallback pattern for characters without a table glyph.
fn seeded_glyph(ch: char) -> [u8; 7] {
    let mut h = (ch as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
    let mut rows = [0u8; 7];
    for row in rows.iter_mut() {
        *row = (h & 0x1f) as u8;
        h >>= 5;
    }
    if rows.iter().all(|r| *r == 0) {
        rows[3] = 0b01110;
    }
    rows
}

/// 5x7 patterns for the basic Latin subset.
fn glyph(ch: char) -> Option<[u8; 7]> {
    let rows: [u8; 7] = match ch {
        'A' | 'a' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' | 'b' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' | 'c' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' | 'd' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' | 'e' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' | 'f' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' | 'g' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' | 'h' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' | 'i' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' | 'j' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' | 'k' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' | 'l' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' | 'm' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' | 'n' => [0b10001, 0b11001, 0b10101, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' | 'o' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' | 'p' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' | 'q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' | 'r' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' | 's' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' | 't' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' | 'u' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' | 'v' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' | 'w' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' | 'x' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' | 'y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' | 'z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00000, 0b00100, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100, 0b01000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        _ => return None,
    };
    Some(rows)
}
