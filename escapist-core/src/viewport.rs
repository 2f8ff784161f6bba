use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// Defines the visible region of the complex plane.
///
/// An axis-aligned rectangle given by its `start` corner (smallest real and
/// imaginary parts) and its extent. Raster row 0 maps to `start.im`, so the
/// imaginary axis grows downwards on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Corner with the smallest real and imaginary parts.
    pub start: Complex,

    /// Extent along the real axis.
    pub width: f64,

    /// Extent along the imaginary axis.
    pub height: f64,
}

impl Viewport {
    /// Start corner of the default view.
    pub const DEFAULT_START: Complex = Complex { re: -2.0, im: -1.0 };

    /// Real-axis extent of the default view.
    pub const DEFAULT_WIDTH: f64 = 3.5;

    /// Create a viewport with explicit parameters.
    pub fn new(start: Complex, width: f64, height: f64) -> crate::Result<Self> {
        if !start.is_finite() {
            return Err(CoreError::InvalidViewport {
                reason: format!("start must be finite, got {start}"),
            });
        }
        if width <= 0.0 || !width.is_finite() {
            return Err(CoreError::InvalidViewport {
                reason: format!("width must be positive and finite, got {width}"),
            });
        }
        if height <= 0.0 || !height.is_finite() {
            return Err(CoreError::InvalidViewport {
                reason: format!("height must be positive and finite, got {height}"),
            });
        }
        Ok(Self {
            start,
            width,
            height,
        })
    }

    /// Re-check invariants, for values built with struct literals or
    /// deserialized from disk.
    pub fn validate(&self) -> crate::Result<()> {
        Self::new(self.start, self.width, self.height).map(|_| ())
    }

    /// Create a viewport from its two opposite corners.
    ///
    /// `end` must lie strictly above and to the right of `start`.
    pub fn from_corners(start: Complex, end: Complex) -> crate::Result<Self> {
        Self::new(start, end.re - start.re, end.im - start.im)
    }

    /// Create a viewport whose height follows the canvas aspect ratio, so
    /// square pixels cover square regions of the plane.
    pub fn with_aspect(
        start: Complex,
        view_width: f64,
        canvas_width: f64,
        canvas_height: f64,
    ) -> crate::Result<Self> {
        check_canvas(canvas_width, canvas_height)?;
        Self::new(start, view_width, view_width * (canvas_height / canvas_width))
    }

    /// Default view: `start = -2 - i`, width 3.5, height locked to the canvas.
    pub fn default_for_canvas(canvas_width: f64, canvas_height: f64) -> crate::Result<Self> {
        Self::with_aspect(
            Self::DEFAULT_START,
            Self::DEFAULT_WIDTH,
            canvas_width,
            canvas_height,
        )
    }

    /// The corner opposite `start`.
    #[inline]
    pub fn end(&self) -> Complex {
        Complex::new(self.start.re + self.width, self.start.im + self.height)
    }

    /// Midpoint of the rectangle.
    pub fn center(&self) -> Complex {
        Complex::new(
            self.start.re + self.width / 2.0,
            self.start.im + self.height / 2.0,
        )
    }

    /// The aspect ratio of the viewport (width / height).
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// `true` when `p` lies in the half-open rectangle `[start, end)`.
    pub fn contains(&self, p: Complex) -> bool {
        let end = self.end();
        p.re >= self.start.re && p.re < end.re && p.im >= self.start.im && p.im < end.im
    }

    /// Shift by a fraction of the current extent along each axis.
    pub fn panned(&self, fx: f64, fy: f64) -> Self {
        Self {
            start: Complex::new(
                self.start.re + fx * self.width,
                self.start.im + fy * self.height,
            ),
            ..*self
        }
    }

    /// Scale the extent by `factor` while keeping the centre fixed.
    ///
    /// `factor < 1` zooms in.
    pub fn zoomed(&self, factor: f64) -> crate::Result<Self> {
        if factor <= 0.0 || !factor.is_finite() {
            return Err(CoreError::InvalidViewport {
                reason: format!("zoom factor must be positive and finite, got {factor}"),
            });
        }
        let center = self.center();
        let width = self.width * factor;
        let height = self.height * factor;
        Self::new(
            Complex::new(center.re - width / 2.0, center.im - height / 2.0),
            width,
            height,
        )
    }
}

pub(crate) fn check_canvas(width: f64, height: f64) -> crate::Result<()> {
    if width > 0.0 && width.is_finite() && height > 0.0 && height.is_finite() {
        Ok(())
    } else {
        Err(CoreError::InvalidCanvas { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn default_view_is_aspect_locked() {
        let vp = Viewport::default_for_canvas(500.0, 250.0).unwrap();
        assert_eq!(vp.start, Complex::new(-2.0, -1.0));
        assert!((vp.width - 3.5).abs() < EPSILON);
        assert!((vp.height - 1.75).abs() < EPSILON);
        assert!((vp.aspect_ratio() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn corners_roundtrip() {
        let vp = Viewport::from_corners(Complex::new(-1.0, -0.5), Complex::new(1.0, 0.5)).unwrap();
        assert!((vp.width - 2.0).abs() < EPSILON);
        assert!((vp.height - 1.0).abs() < EPSILON);
        assert_eq!(vp.end(), Complex::new(1.0, 0.5));
        assert_eq!(vp.center(), Complex::ZERO);
    }

    #[test]
    fn degenerate_viewports_rejected() {
        assert!(Viewport::new(Complex::ZERO, 0.0, 1.0).is_err());
        assert!(Viewport::new(Complex::ZERO, 1.0, 0.0).is_err());
        assert!(Viewport::new(Complex::ZERO, -1.0, 1.0).is_err());
        assert!(Viewport::new(Complex::ZERO, f64::INFINITY, 1.0).is_err());
        assert!(Viewport::new(Complex::new(f64::NAN, 0.0), 1.0, 1.0).is_err());
        assert!(Viewport::from_corners(Complex::new(1.0, 0.0), Complex::new(1.0, 1.0)).is_err());

        let literal = Viewport {
            start: Complex::ZERO,
            width: 1.0,
            height: 0.0,
        };
        assert!(literal.validate().is_err());
    }

    #[test]
    fn invalid_canvas_rejected() {
        assert!(matches!(
            Viewport::with_aspect(Complex::ZERO, 1.0, 0.0, 100.0),
            Err(CoreError::InvalidCanvas { .. })
        ));
        assert!(Viewport::with_aspect(Complex::ZERO, 1.0, 100.0, f64::NAN).is_err());
    }

    #[test]
    fn pan_moves_by_fraction_of_extent() {
        let vp = Viewport::new(Complex::ZERO, 2.0, 1.0).unwrap();
        let moved = vp.panned(0.1, -0.5);
        assert!((moved.start.re - 0.2).abs() < EPSILON);
        assert!((moved.start.im + 0.5).abs() < EPSILON);
        assert_eq!(moved.width, vp.width);
        assert_eq!(moved.height, vp.height);
    }

    #[test]
    fn zoom_keeps_center() {
        let vp = Viewport::new(Complex::new(-2.0, -1.0), 3.5, 2.0).unwrap();
        let z = vp.zoomed(0.8).unwrap();
        assert!((z.center().re - vp.center().re).abs() < EPSILON);
        assert!((z.center().im - vp.center().im).abs() < EPSILON);
        assert!((z.width - 2.8).abs() < EPSILON);
        assert!((z.aspect_ratio() - vp.aspect_ratio()).abs() < EPSILON);
        assert!(vp.zoomed(0.0).is_err());
    }

    #[test]
    fn contains_is_half_open() {
        let vp = Viewport::new(Complex::ZERO, 1.0, 1.0).unwrap();
        assert!(vp.contains(Complex::ZERO));
        assert!(vp.contains(Complex::new(0.5, 0.999)));
        assert!(!vp.contains(Complex::new(1.0, 0.5)));
        assert!(!vp.contains(Complex::new(-0.1, 0.5)));
    }
}
