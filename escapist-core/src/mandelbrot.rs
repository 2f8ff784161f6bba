use crate::complex::Complex;
use crate::fractal::{escape_time, Fractal, FractalParams, IterationResult};

/// Escape index of `c` under `z_{n+1} = z_n² + c`, starting from `z₀ = 0`.
#[inline]
pub fn mandelbrot_escape(c: Complex, max_iterations: u32) -> IterationResult {
    escape_time(Complex::ZERO, c, max_iterations)
}

/// The Mandelbrot set: `z_{n+1} = z_n² + c`, starting from `z₀ = 0`.
///
/// The point `c` is the coordinate on the complex plane.
#[derive(Debug, Clone)]
pub struct Mandelbrot {
    params: FractalParams,
}

impl Mandelbrot {
    pub fn new(params: FractalParams) -> Self {
        Self { params }
    }
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self::new(FractalParams::default())
    }
}

impl Fractal for Mandelbrot {
    #[inline]
    fn iterate(&self, c: Complex) -> IterationResult {
        mandelbrot_escape(c, self.params.max_iterations)
    }

    fn params(&self) -> &FractalParams {
        &self.params
    }
}
