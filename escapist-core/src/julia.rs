use crate::complex::Complex;
use crate::fractal::{escape_time, Fractal, FractalParams, IterationResult};

/// Escape index of `point` under `z_{n+1} = z_n² + param`, starting from
/// `z₀ = point`.
#[inline]
pub fn julia_escape(point: Complex, param: Complex, max_iterations: u32) -> IterationResult {
    escape_time(point, param, max_iterations)
}

/// A Julia set: `z_{n+1} = z_n² + c`, where `c` is a fixed constant
/// and `z₀` is the point on the complex plane.
#[derive(Debug, Clone)]
pub struct Julia {
    params: FractalParams,

    /// The fixed constant `c` that defines this Julia set.
    c: Complex,
}

impl Julia {
    pub fn new(c: Complex, params: FractalParams) -> Self {
        Self { params, c }
    }

    /// A visually interesting default: `c = -0.7 + 0.27015i`.
    pub fn default_c() -> Complex {
        Complex::new(-0.7, 0.27015)
    }

    /// The constant `c` defining this Julia set.
    pub fn c(&self) -> Complex {
        self.c
    }
}

impl Default for Julia {
    fn default() -> Self {
        Self::new(Self::default_c(), FractalParams::default())
    }
}

impl Fractal for Julia {
    #[inline]
    fn iterate(&self, point: Complex) -> IterationResult {
        julia_escape(point, self.c, self.params.max_iterations)
    }

    fn params(&self) -> &FractalParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_fixed_point_for_zero_parameter() {
        assert_eq!(
            julia_escape(Complex::ZERO, Complex::ZERO, 50),
            IterationResult::Interior
        );
    }

    #[test]
    fn far_point_escapes_first_step() {
        let r = Julia::default().iterate(Complex::new(10.0, 0.0));
        assert_eq!(r, IterationResult::Escaped { iterations: 0 });
    }

    #[test]
    fn zero_parameter_unit_circle() {
        // With c = 0 the orbit of 1.5 is 2.25, … which escapes at once.
        assert_eq!(
            julia_escape(Complex::new(1.5, 0.0), Complex::ZERO, 50),
            IterationResult::Escaped { iterations: 0 }
        );
        // |z| < 1 shrinks towards 0 and never escapes.
        assert_eq!(
            julia_escape(Complex::new(0.5, 0.5), Complex::ZERO, 50),
            IterationResult::Interior
        );
    }

    #[test]
    fn matches_mandelbrot_when_starting_at_zero() {
        // From z₀ = 0 the Julia orbit of parameter c is the Mandelbrot orbit of c.
        let c = Complex::new(0.3, 0.5);
        assert_eq!(
            julia_escape(Complex::ZERO, c, 100),
            crate::mandelbrot_escape(c, 100)
        );
    }

    #[test]
    fn deterministic_results() {
        let j = Julia::default();
        let points = [
            Complex::new(0.0, 0.0),
            Complex::new(0.5, 0.5),
            Complex::new(-1.0, 0.3),
            Complex::new(0.0, 1.0),
        ];
        let run1: Vec<_> = points.iter().map(|&p| j.iterate(p)).collect();
        let run2: Vec<_> = points.iter().map(|&p| j.iterate(p)).collect();
        assert_eq!(run1, run2, "iteration results must be deterministic");
    }

    #[test]
    fn accessor_returns_parameter() {
        let c = Complex::new(0.285, 0.01);
        assert_eq!(Julia::new(c, FractalParams::default()).c(), c);
    }
}
