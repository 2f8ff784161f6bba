use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use escapist_core::{FractalMode, PlaneMapper, SimulationParams, Viewport};

use crate::buffer::Surface;
use crate::frame::Frame;
use crate::palette::Gradient;
use crate::simulator::simulate;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// What a single [`render`] call painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Escaped samples painted with a gradient color.
    pub painted: usize,
    /// In-set samples left as background.
    pub interior: usize,
}

/// Wall-clock cost of one simulate-then-render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTiming {
    pub evaluation: Duration,
    pub render: Duration,
    pub stats: RenderStats,
}

impl fmt::Display for FrameTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Evaluation took {} milliseconds, rendering took {} milliseconds",
            self.evaluation.as_millis(),
            self.render.as_millis()
        )
    }
}

// ---------------------------------------------------------------------------
// Painting
// ---------------------------------------------------------------------------

/// Paint `frame` onto `surface`.
///
/// The surface is cleared first; its background doubles as the in-set
/// color, because interior samples are never painted. Each escaped sample
/// becomes a rectangle of about `surface / resolution` pixels at the
/// sample's raster position, snapped to whole pixels so the cells tile the
/// surface, colored by its escape index.
pub fn render<S: Surface>(
    frame: &Frame,
    gradient: &Gradient,
    surface: &mut S,
) -> crate::Result<RenderStats> {
    let canvas_w = surface.width() as f64;
    let canvas_h = surface.height() as f64;
    let mapper = PlaneMapper::new(*frame.viewport(), canvas_w, canvas_h)?;
    let resolution = frame.resolution() as f64;
    let (point_w, point_h) = (canvas_w / resolution, canvas_h / resolution);

    debug!(
        width = surface.width(),
        height = surface.height(),
        point_w,
        point_h,
        gradient = gradient.name(),
        "Painting frame"
    );

    surface.clear();

    let mut painted = 0;
    for sample in frame.samples() {
        let (px, py) = mapper.to_raster(sample.point);
        // Snap to the sample's grid cell so neighbouring cells share edges.
        let (x, w) = cell_span((px / point_w).round(), point_w);
        let (y, h) = cell_span((py / point_h).round(), point_h);
        let color = gradient.color_at(sample.iterations as f64);
        surface.fill_rect(x, y, w, h, color);
        painted += 1;
    }

    Ok(RenderStats {
        painted,
        interior: frame.interior_count(),
    })
}

/// Whole-pixel origin and length of grid cell `index`.
///
/// Both edges come from the cell index, so cell `i`'s far edge is exactly
/// cell `i + 1`'s near edge.
fn cell_span(index: f64, cell: f64) -> (f64, f64) {
    let lo = (index * cell).round();
    let hi = ((index + 1.0) * cell).round();
    (lo, hi - lo)
}

/// Simulate and paint one frame, timing both phases.
///
/// Runs synchronously to completion; the returned timing is also logged.
pub fn draw_frame<S: Surface>(
    params: &SimulationParams,
    viewport: &Viewport,
    mode: FractalMode,
    gradient: &Gradient,
    surface: &mut S,
) -> crate::Result<FrameTiming> {
    let start = Instant::now();
    let frame = simulate(params, viewport, mode)?;
    let evaluation = start.elapsed();

    let start = Instant::now();
    let stats = render(&frame, gradient, surface)?;
    let render_time = start.elapsed();

    let timing = FrameTiming {
        evaluation,
        render: render_time,
        stats,
    };
    info!(
        mode = mode.label(),
        resolution = params.resolution,
        accuracy = params.accuracy,
        eval_ms = evaluation.as_millis(),
        render_ms = render_time.as_millis(),
        painted = stats.painted,
        "{timing}"
    );
    Ok(timing)
}
