use tracing::debug;

use crate::complex::Complex;
use crate::error::CoreError;
use crate::viewport::{check_canvas, Viewport};

/// Bidirectional affine map between a viewport and a raster of known size.
///
/// `(0, 0)` in raster space is the viewport's `start` corner. Both
/// directions use the same per-axis scale, so [`to_plane`](Self::to_plane)
/// undoes [`to_raster`](Self::to_raster) up to rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneMapper {
    viewport: Viewport,
    canvas_width: f64,
    canvas_height: f64,
    /// Pixels per plane unit along the real axis.
    scale_x: f64,
    /// Pixels per plane unit along the imaginary axis.
    scale_y: f64,
}

impl PlaneMapper {
    pub fn new(viewport: Viewport, canvas_width: f64, canvas_height: f64) -> crate::Result<Self> {
        check_canvas(canvas_width, canvas_height)?;
        let end = viewport.end();
        Ok(Self {
            viewport,
            canvas_width,
            canvas_height,
            scale_x: canvas_width / (end.re - viewport.start.re).abs(),
            scale_y: canvas_height / (end.im - viewport.start.im).abs(),
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn canvas_size(&self) -> (f64, f64) {
        (self.canvas_width, self.canvas_height)
    }

    /// Map a plane point to raster coordinates.
    #[inline]
    pub fn to_raster(&self, p: Complex) -> (f64, f64) {
        (
            (p.re - self.viewport.start.re) * self.scale_x,
            (p.im - self.viewport.start.im) * self.scale_y,
        )
    }

    /// Map raster coordinates back to the plane.
    #[inline]
    pub fn to_plane(&self, px: f64, py: f64) -> Complex {
        Complex::new(
            px / self.scale_x + self.viewport.start.re,
            py / self.scale_y + self.viewport.start.im,
        )
    }

    /// Turn a drag rectangle on the raster into a new viewport.
    ///
    /// The new view starts at the rectangle's top-left corner and spans the
    /// dragged horizontal distance. Its height follows the canvas aspect
    /// ratio, so only the x extent of the drag matters.
    pub fn select_region(&self, from: (f64, f64), to: (f64, f64)) -> crate::Result<Viewport> {
        let coords = [
            ("from.x", from.0),
            ("from.y", from.1),
            ("to.x", to.0),
            ("to.y", to.1),
        ];
        for (name, value) in coords {
            if !value.is_finite() {
                return Err(CoreError::NonFiniteParameter { name, value });
            }
        }
        let start = self.to_plane(from.0.min(to.0), from.1.min(to.1));
        let right = self.to_plane(from.0.max(to.0), 0.0);
        let selected = Viewport::with_aspect(
            start,
            right.re - start.re,
            self.canvas_width,
            self.canvas_height,
        )?;
        debug!(?from, ?to, start = %selected.start, width = selected.width, "Selected region");
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn mapper() -> PlaneMapper {
        let vp = Viewport::default_for_canvas(500.0, 300.0).unwrap();
        PlaneMapper::new(vp, 500.0, 300.0).unwrap()
    }

    #[test]
    fn start_maps_to_origin() {
        let m = mapper();
        let (px, py) = m.to_raster(Complex::new(-2.0, -1.0));
        assert!(px.abs() < EPSILON);
        assert!(py.abs() < EPSILON);
    }

    #[test]
    fn end_maps_to_far_corner() {
        let m = mapper();
        let (px, py) = m.to_raster(m.viewport().end());
        assert!((px - 500.0).abs() < EPSILON);
        assert!((py - 300.0).abs() < EPSILON);
    }

    #[test]
    fn raster_plane_roundtrip() {
        let m = mapper();
        for px in (0..=500).step_by(25) {
            for py in (0..=300).step_by(20) {
                let (x, y) = (px as f64 + 0.37, py as f64 + 0.61);
                let (rx, ry) = m.to_raster(m.to_plane(x, y));
                assert!((rx - x).abs() < EPSILON, "x drift at ({x}, {y})");
                assert!((ry - y).abs() < EPSILON, "y drift at ({x}, {y})");
            }
        }
    }

    #[test]
    fn plane_raster_roundtrip() {
        let m = mapper();
        let p = Complex::new(-0.7436, 0.1318);
        let (px, py) = m.to_raster(p);
        let back = m.to_plane(px, py);
        assert!((back.re - p.re).abs() < EPSILON);
        assert!((back.im - p.im).abs() < EPSILON);
    }

    #[test]
    fn invalid_canvas() {
        let vp = Viewport::default_for_canvas(1.0, 1.0).unwrap();
        assert!(PlaneMapper::new(vp, 0.0, 10.0).is_err());
        assert!(PlaneMapper::new(vp, 10.0, -1.0).is_err());
    }

    #[test]
    fn select_region_is_aspect_locked() {
        let m = mapper();
        let vp = m.select_region((100.0, 50.0), (200.0, 400.0)).unwrap();
        let expected_start = m.to_plane(100.0, 50.0);
        assert!((vp.start.re - expected_start.re).abs() < EPSILON);
        assert!((vp.start.im - expected_start.im).abs() < EPSILON);
        // 100 px of a 500 px canvas spanning 3.5 units.
        assert!((vp.width - 0.7).abs() < EPSILON);
        assert!((vp.aspect_ratio() - 500.0 / 300.0).abs() < EPSILON);
    }

    #[test]
    fn select_region_normalises_direction() {
        let m = mapper();
        let a = m.select_region((200.0, 80.0), (100.0, 20.0)).unwrap();
        let b = m.select_region((100.0, 20.0), (200.0, 80.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn select_region_rejects_zero_width() {
        let m = mapper();
        assert!(m.select_region((120.0, 10.0), (120.0, 90.0)).is_err());
        assert!(m.select_region((f64::NAN, 0.0), (10.0, 10.0)).is_err());
    }
}
