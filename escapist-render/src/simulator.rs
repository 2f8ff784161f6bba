use std::time::Instant;

use tracing::debug;

use escapist_core::{
    Complex, Fractal, FractalMode, IterationResult, Julia, Mandelbrot, SimulationParams, Viewport,
};

use crate::frame::{Frame, Sample};

/// Evaluate a full grid of sample points for `mode`.
///
/// Validates every input first, so a frame is never built from a zero
/// resolution, a degenerate viewport, or a non-finite Julia parameter.
pub fn simulate(
    params: &SimulationParams,
    viewport: &Viewport,
    mode: FractalMode,
) -> crate::Result<Frame> {
    params.validate()?;
    viewport.validate()?;
    mode.validate()?;

    let fractal_params = params.fractal_params();
    let frame = match mode {
        FractalMode::Mandelbrot => {
            simulate_fractal(&Mandelbrot::new(fractal_params), viewport, params.resolution)
        }
        FractalMode::Julia { c } => {
            simulate_fractal(&Julia::new(c, fractal_params), viewport, params.resolution)
        }
    };
    Ok(frame)
}

/// Sample `resolution × resolution` points spanning `viewport` and iterate
/// each one with `fractal`.
///
/// Row `i` sits at `start.im + i·(height / resolution)` and column `j` at
/// `start.re + j·(width / resolution)`; the far edges are excluded. Indices
/// are integers, so the grid size never drifts with floating-point error.
pub fn simulate_fractal<F: Fractal>(fractal: &F, viewport: &Viewport, resolution: u32) -> Frame {
    let start = Instant::now();
    let accuracy = fractal.params().max_iterations;
    let x_step = viewport.width / resolution as f64;
    let y_step = viewport.height / resolution as f64;

    let rows: Vec<Vec<Option<Sample>>> = (0..resolution)
        .map(|i| {
            let y = viewport.start.im + i as f64 * y_step;
            (0..resolution)
                .map(|j| {
                    let point = Complex::new(viewport.start.re + j as f64 * x_step, y);
                    match fractal.iterate(point) {
                        IterationResult::Escaped { iterations } => Some(Sample { point, iterations }),
                        IterationResult::Interior => None,
                    }
                })
                .collect()
        })
        .collect();

    debug!(
        resolution,
        accuracy,
        elapsed_ms = start.elapsed().as_millis(),
        "Simulated frame"
    );

    Frame::new(*viewport, resolution, accuracy, rows)
}
