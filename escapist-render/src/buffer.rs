use crate::error::RenderError;
use crate::palette::Color;

/// A raster target the renderer can paint on.
///
/// Coordinates are in pixels with `(0, 0)` at the top-left corner.
/// Rectangles may be fractional and may extend past the edges.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Reset every pixel to the background color.
    fn clear(&mut self);

    /// Paint an axis-aligned filled rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);

    /// Outline an axis-aligned rectangle with one-pixel lines drawn just
    /// inside its edges.
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.fill_rect(x, y, w, 1.0, color);
        self.fill_rect(x, y + h - 1.0, w, 1.0, color);
        self.fill_rect(x, y, 1.0, h, color);
        self.fill_rect(x + w - 1.0, y, 1.0, h, color);
    }
}

/// An RGBA pixel buffer representing a rendered image.
#[derive(Debug, Clone)]
pub struct RenderBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
    background: [u8; 4],
}

impl RenderBuffer {
    /// Create a new buffer filled with black (opaque).
    pub fn new(width: u32, height: u32) -> crate::Result<Self> {
        Self::with_background(width, height, Color::BLACK)
    }

    /// Create a buffer whose background, and therefore in-set color, is
    /// `background`.
    pub fn with_background(width: u32, height: u32, background: Color) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let background = background.to_rgba();
        Ok(Self {
            width,
            height,
            pixels: background.repeat(width as usize * height as usize),
            background,
        })
    }

    /// RGBA value of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(px)
    }

    pub fn background(&self) -> [u8; 4] {
        self.background
    }
}

/// Clip a fractional span to whole pixels in `[0, limit)`.
///
/// Both edges are rounded, so spans laid end to end share their boundary
/// pixel column and never leave a gap.
fn pixel_span(start: f64, len: f64, limit: u32) -> (usize, usize) {
    let lo = start.round().clamp(0.0, limit as f64) as usize;
    let hi = (start + len).round().clamp(0.0, limit as f64) as usize;
    (lo, hi.max(lo))
}

impl Surface for RenderBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&self.background);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        let (x0, x1) = pixel_span(x, w, self.width);
        let (y0, y1) = pixel_span(y, h, self.height);
        if x0 == x1 || y0 == y1 {
            return;
        }
        let rgba = color.to_rgba();
        let stride = self.width as usize * 4;
        for row in y0..y1 {
            let start = row * stride + x0 * 4;
            let end = row * stride + x1 * 4;
            for chunk in self.pixels[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&rgba);
            }
        }
    }
}
