use std::fmt;

use crate::error::RenderError;

/// Position on the gradient scale that maps to the last stop.
const GRADIENT_SPAN: f64 = 100.0;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGB color with fractional channels.
///
/// Interpolation keeps full `f64` precision; channels are only rounded to
/// bytes when a pixel is written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(255.0, 255.0, 255.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
        }
    }

    /// Opaque RGBA bytes, rounding and clamping each channel to `[0, 255]`.
    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [channel(self.r), channel(self.g), channel(self.b), 255]
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

#[inline]
fn channel(v: f64) -> u8 {
    // `as` saturates, and NaN becomes 0.
    v.round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

// ---------------------------------------------------------------------------
// Gradient
// ---------------------------------------------------------------------------

/// A cyclic linear gradient over evenly spaced color stops.
///
/// Positions run from 0 (first stop) to 100 (last stop); larger positions
/// wrap around modulo 100.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    name: String,
    stops: Vec<Color>,
}

impl Gradient {
    pub fn new(name: impl Into<String>, stops: Vec<Color>) -> crate::Result<Self> {
        if stops.is_empty() {
            return Err(RenderError::EmptyGradient);
        }
        Ok(Self {
            name: name.into(),
            stops,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Interpolated color at position `n`.
    ///
    /// Values above 100 are reduced modulo 100. Negative values are not
    /// reduced and resolve to the first stop.
    pub fn color_at(&self, n: f64) -> Color {
        let last = self.stops.len() - 1;
        if last == 0 {
            return self.stops[0];
        }

        let n = if n > GRADIENT_SPAN { n % GRADIENT_SPAN } else { n };
        let x = n / (GRADIENT_SPAN / last as f64);

        // Float casts saturate, so negative or NaN positions land on stop 0.
        let lo = (x.floor() as usize).min(last);
        let hi = (x.ceil() as usize).min(last);
        let t = x - x.floor();

        self.stops[lo].lerp(self.stops[hi], t)
    }
}

impl Default for Gradient {
    fn default() -> Self {
        classic()
    }
}

// ---------------------------------------------------------------------------
// Builtin gradients
// ---------------------------------------------------------------------------

pub fn builtin_gradients() -> Vec<Gradient> {
    vec![classic(), fire(), ocean(), neon(), grayscale()]
}

/// Look up a builtin gradient by name, ignoring ASCII case.
pub fn gradient_by_name(name: &str) -> crate::Result<Gradient> {
    builtin_gradients()
        .into_iter()
        .find(|g| g.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| RenderError::UnknownGradient(name.to_string()))
}

fn builtin(name: &str, stops: &[[u8; 3]]) -> Gradient {
    Gradient {
        name: name.to_string(),
        stops: stops.iter().map(|&[r, g, b]| Color::rgb(r, g, b)).collect(),
    }
}

fn classic() -> Gradient {
    builtin(
        "Classic",
        &[
            [0, 7, 100],
            [32, 107, 203],
            [237, 255, 255],
            [255, 170, 0],
            [0, 2, 0],
        ],
    )
}

fn fire() -> Gradient {
    builtin(
        "Fire",
        &[
            [0, 0, 0],
            [128, 0, 0],
            [255, 128, 0],
            [255, 255, 0],
            [255, 255, 255],
        ],
    )
}

fn ocean() -> Gradient {
    builtin(
        "Ocean",
        &[
            [0, 0, 30],
            [0, 50, 120],
            [0, 150, 200],
            [100, 220, 255],
            [240, 255, 255],
        ],
    )
}

fn neon() -> Gradient {
    builtin(
        "Neon",
        &[
            [10, 0, 20],
            [80, 0, 150],
            [200, 0, 200],
            [0, 200, 255],
            [0, 255, 100],
            [10, 0, 20],
        ],
    )
}

fn grayscale() -> Gradient {
    builtin("Grayscale", &[[0, 0, 0], [255, 255, 255]])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
