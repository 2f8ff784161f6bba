pub mod buffer;
pub mod error;
pub mod export;
pub mod frame;
pub mod palette;
pub mod renderer;
pub mod simulator;

pub use buffer::{RenderBuffer, Surface};
pub use error::RenderError;
pub use export::{export_png, ExportMetadata};
pub use frame::{Frame, Sample};
pub use palette::{builtin_gradients, gradient_by_name, Color, Gradient};
pub use renderer::{draw_frame, render, FrameTiming, RenderStats};
pub use simulator::{simulate, simulate_fractal};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
