use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;
use crate::julia::julia_escape;
use crate::mandelbrot::mandelbrot_escape;

/// Threshold on the real part of `z` that counts as escaping.
///
/// Only `re(z)` is compared, after each update. This is not the usual
/// `|z| > 2` bailout and produces a visibly different image.
pub const ESCAPE_THRESHOLD: f64 = 2.0;

/// The result of iterating a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IterationResult {
    /// The orbit crossed the threshold at 0-based step `iterations`.
    Escaped { iterations: u32 },

    /// The orbit stayed bounded for the whole iteration budget.
    Interior,
}

impl IterationResult {
    /// The escape index, or `None` for interior points.
    #[inline]
    pub fn escape_index(&self) -> Option<u32> {
        match self {
            Self::Escaped { iterations } => Some(*iterations),
            Self::Interior => None,
        }
    }

    /// Integer form used by external collaborators: the escape index, or
    /// `-1` when the point never escaped.
    #[inline]
    pub fn as_sentinel(&self) -> i64 {
        match self {
            Self::Escaped { iterations } => *iterations as i64,
            Self::Interior => -1,
        }
    }
}

/// Shared iteration core for both fractal families.
///
/// Starts at `z0` and applies `z = z·z + c` up to `max_iterations` times,
/// returning the first step at which `re(z) >= 2`.
#[inline]
pub fn escape_time(z0: Complex, c: Complex, max_iterations: u32) -> IterationResult {
    let mut z = z0;
    for n in 0..max_iterations {
        z = z * z + c;
        if z.re >= ESCAPE_THRESHOLD {
            return IterationResult::Escaped { iterations: n };
        }
    }
    IterationResult::Interior
}

/// Parameters controlling fractal iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractalParams {
    /// Maximum number of iterations before declaring a point interior.
    pub max_iterations: u32,
}

impl FractalParams {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

    pub fn new(max_iterations: u32) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self { max_iterations })
    }
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Sampling density and iteration depth for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Samples per axis.
    pub resolution: u32,
    /// Iteration budget per sample.
    pub accuracy: u32,
}

impl SimulationParams {
    pub const DEFAULT_RESOLUTION: u32 = 500;

    pub fn new(resolution: u32, accuracy: u32) -> crate::Result<Self> {
        if resolution < 1 {
            return Err(CoreError::InvalidResolution(resolution));
        }
        if accuracy < 1 {
            return Err(CoreError::InvalidMaxIterations(accuracy));
        }
        Ok(Self {
            resolution,
            accuracy,
        })
    }

    /// Re-check invariants, for values built with struct literals or
    /// deserialized from disk.
    pub fn validate(&self) -> crate::Result<()> {
        Self::new(self.resolution, self.accuracy).map(|_| ())
    }

    pub fn fractal_params(&self) -> FractalParams {
        FractalParams {
            max_iterations: self.accuracy,
        }
    }

    pub fn with_resolution(self, resolution: u32) -> Self {
        Self { resolution, ..self }
    }

    pub fn with_accuracy(self, accuracy: u32) -> Self {
        Self { accuracy, ..self }
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            resolution: Self::DEFAULT_RESOLUTION,
            accuracy: FractalParams::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Which fractal family to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FractalMode {
    Mandelbrot,
    /// Julia set for the fixed parameter `c`.
    Julia { c: Complex },
}

impl FractalMode {
    /// Resolve a mode name: `"mandelbrot"` selects the Mandelbrot set, any
    /// other name selects the Julia set for `julia_c`.
    pub fn from_name(name: &str, julia_c: Complex) -> Self {
        if name.eq_ignore_ascii_case("mandelbrot") {
            Self::Mandelbrot
        } else {
            Self::Julia { c: julia_c }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia { .. } => "Julia",
        }
    }

    /// The Julia parameter, if any.
    pub fn julia_c(&self) -> Option<Complex> {
        match self {
            Self::Mandelbrot => None,
            Self::Julia { c } => Some(*c),
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        if let Self::Julia { c } = self {
            if !c.re.is_finite() {
                return Err(CoreError::NonFiniteParameter {
                    name: "julia_c.re",
                    value: c.re,
                });
            }
            if !c.im.is_finite() {
                return Err(CoreError::NonFiniteParameter {
                    name: "julia_c.im",
                    value: c.im,
                });
            }
        }
        Ok(())
    }

    /// Evaluate a single sample point under this mode.
    #[inline]
    pub fn iterate(&self, point: Complex, max_iterations: u32) -> IterationResult {
        match self {
            Self::Mandelbrot => mandelbrot_escape(point, max_iterations),
            Self::Julia { c } => julia_escape(point, *c, max_iterations),
        }
    }
}

impl Default for FractalMode {
    fn default() -> Self {
        Self::Mandelbrot
    }
}

/// Trait implemented by all fractal types.
///
/// Designed for **static dispatch**: the simulator is generic over
/// `F: Fractal` so the compiler can inline the iteration loop.
pub trait Fractal {
    /// Iterate a single sample point and return the result.
    fn iterate(&self, point: Complex) -> IterationResult;

    /// Access the iteration parameters.
    fn params(&self) -> &FractalParams;
}
