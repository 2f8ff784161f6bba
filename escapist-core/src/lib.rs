pub mod complex;
pub mod error;
pub mod fractal;
pub mod julia;
pub mod mandelbrot;
pub mod mapper;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use fractal::{
    escape_time, Fractal, FractalMode, FractalParams, IterationResult, SimulationParams,
    ESCAPE_THRESHOLD,
};
pub use julia::{julia_escape, Julia};
pub use mandelbrot::{mandelbrot_escape, Mandelbrot};
pub use mapper::PlaneMapper;
pub use viewport::Viewport;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
