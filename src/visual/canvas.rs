//! RGB drawing surface with the primitives the plots are built from.

use crate::error::ViewerError;
use crate::visual::font::{glyph, ADVANCE};
use crate::visual::plot::Axes;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ImageEncoder, Rgb, RgbImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Smallest canvas that still leaves room for the plot area inside the margins.
pub const MIN_WIDTH: u32 = 128;
pub const MIN_HEIGHT: u32 = 96;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Drawing target of the viewer together with the axes of its last plot.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbImage,
    axes: Option<Axes>,
}

impl Canvas {
    /// Blank white canvas.
    pub fn new(width: u32, height: u32) -> Result<Self, ViewerError> {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(ViewerError::InvalidParameter("canvas is too small to hold a plot"));
        }
        Ok(Self {
            image: RgbImage::from_pixel(width, height, WHITE),
            axes: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Axes of the most recent successful plot, `None` while blank.
    pub fn axes(&self) -> Option<&Axes> {
        self.axes.as_ref()
    }

    pub(crate) fn set_axes(&mut self, axes: Axes) {
        self.axes = Some(axes);
    }

    /// Reset to a blank white canvas.
    pub fn clear(&mut self) {
        for p in self.image.pixels_mut() {
            *p = WHITE;
        }
        self.axes = None;
    }

    /// Set one pixel; coordinates outside the canvas are ignored.
    pub fn put(&mut self, x: i32, y: i32, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && x < self.width() as i32 && y < self.height() as i32 {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Bresenham line between two points, clipped to the canvas.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
        let (mut x, mut y) = (x0, y0);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fill a `width` x `height` block with its top-left corner at `(x, y)`,
    /// clipped to the canvas.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb<u8>) {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x + width as i32).clamp(0, self.width() as i32) as u32;
        let y1 = (y + height as i32).clamp(0, self.height() as i32) as u32;
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.image.put_pixel(xx, yy, color);
            }
        }
    }

    /// Draw `text` left-to-right with its top-left corner at `(x, y)`.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u32, color: Rgb<u8>) {
        let mut cx = x;
        for ch in text.chars() {
            self.draw_glyph(cx, y, ch, scale, color, false);
            cx += (ADVANCE * scale) as i32;
        }
    }

    /// Draw `text` rotated a quarter turn counter-clockwise, reading
    /// bottom-to-top, with its bottom-left corner at `(x, y)`.
    pub fn draw_text_vertical(&mut self, x: i32, y: i32, text: &str, scale: u32, color: Rgb<u8>) {
        let mut cy = y;
        for ch in text.chars() {
            self.draw_glyph(x, cy, ch, scale, color, true);
            cy -= (ADVANCE * scale) as i32;
        }
    }

    fn draw_glyph(&mut self, x: i32, y: i32, ch: char, scale: u32, color: Rgb<u8>, rotated: bool) {
        let step = scale as i32;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for (col, c) in bits.chars().enumerate() {
                if c != '#' {
                    continue;
                }
                let (px0, py0) = if rotated {
                    (x + row as i32 * step, y - (col as i32 + 1) * step + 1)
                } else {
                    (x + col as i32 * step, y + row as i32 * step)
                };
                self.fill_rect(px0, py0, scale, scale, color);
            }
        }
    }

    /// Write the canvas as an 8-bit RGB PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), ViewerError> {
        let file = BufWriter::new(File::create(path.as_ref())?);
        let encoder =
            PngEncoder::new_with_quality(file, CompressionType::Best, FilterType::Adaptive);
        encoder.write_image(
            self.image.as_raw(),
            self.width(),
            self.height(),
            ColorType::Rgb8,
        )?;
        log::debug!("wrote canvas to {}", path.as_ref().display());
        Ok(())
    }
}
