use tracing::{debug, warn};

use escapist_core::{FractalMode, PlaneMapper, SimulationParams, Viewport};

use crate::error::AppError;
use crate::input::InputEvent;
use crate::preferences::AppPreferences;

/// Maximum number of views remembered for `back`.
pub(crate) const MAX_HISTORY: usize = 200;

/// Everything that decides what the next frame shows.
///
/// Events never mutate a session in place: [`apply`](Self::apply) consumes
/// the old state and returns the next one.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SessionState {
    canvas_width: u32,
    canvas_height: u32,
    pub(crate) viewport: Viewport,
    pub(crate) params: SimulationParams,
    pub(crate) mode: FractalMode,
    quality_step: u32,
    /// Target of `r`.
    home: Viewport,
    pointer_down: Option<(f64, f64)>,
    pointer_up: Option<(f64, f64)>,
    history: Vec<Viewport>,
}

impl SessionState {
    pub(crate) fn from_preferences(prefs: &AppPreferences) -> Result<Self, AppError> {
        let (cw, ch) = (prefs.canvas_width as f64, prefs.canvas_height as f64);
        let home = Viewport::with_aspect(prefs.initial_start(), prefs.view_width, cw, ch)?;
        let mode = prefs.mode();
        mode.validate()?;

        let mut state = Self {
            canvas_width: prefs.canvas_width,
            canvas_height: prefs.canvas_height,
            viewport: home,
            params: SimulationParams::new(prefs.resolution, prefs.accuracy)?,
            mode,
            quality_step: prefs.quality_step.max(1),
            home,
            pointer_down: None,
            pointer_up: None,
            history: Vec::new(),
        };

        if prefs.restore_last_view {
            if let Some(last) = &prefs.last_view {
                // The canvas may have changed since the view was saved, so
                // keep its start and width and re-lock the height.
                let viewport = last
                    .viewport()
                    .and_then(|vp| Viewport::with_aspect(vp.start, vp.width, cw, ch));
                match (viewport, last.params(), last.mode().validate()) {
                    (Ok(viewport), Ok(params), Ok(())) => {
                        state.viewport = viewport;
                        state.params = params;
                        state.mode = last.mode();
                    }
                    (vp, params, mode) => {
                        let reason = vp
                            .err()
                            .or(params.err())
                            .or(mode.err())
                            .map(|e| e.to_string())
                            .unwrap_or_default();
                        warn!("Ignoring saved last view: {reason}");
                    }
                }
            }
        }
        Ok(state)
    }

    pub(crate) fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    pub(crate) fn history_len(&self) -> usize {
        self.history.len()
    }

    pub(crate) fn has_pending_selection(&self) -> bool {
        self.pointer_down.is_some()
    }

    /// Raster rectangle `(x, y, w, h)` of a finished but unconfirmed drag.
    ///
    /// The height is aspect-locked the same way `enter` will lock the new
    /// view, so the outline shows the region that would be selected.
    pub(crate) fn pending_outline(&self) -> Option<(f64, f64, f64, f64)> {
        let ((x0, y0), (x1, y1)) = (self.pointer_down?, self.pointer_up?);
        let w = (x1 - x0).abs();
        if w == 0.0 {
            return None;
        }
        let h = w * self.canvas_height as f64 / self.canvas_width as f64;
        Some((x0.min(x1), y0.min(y1), w, h))
    }

    /// Produce the state that follows `event`.
    pub(crate) fn apply(self, event: InputEvent) -> Self {
        let step = self.quality_step;
        match event {
            InputEvent::IncreaseResolution => {
                let resolution = self.params.resolution.saturating_add(step);
                Self {
                    params: self.params.with_resolution(resolution),
                    ..self
                }
            }
            InputEvent::DecreaseResolution if self.params.resolution > step => {
                let resolution = self.params.resolution - step;
                Self {
                    params: self.params.with_resolution(resolution),
                    ..self
                }
            }
            InputEvent::IncreaseAccuracy => {
                let accuracy = self.params.accuracy.saturating_add(step);
                Self {
                    params: self.params.with_accuracy(accuracy),
                    ..self
                }
            }
            InputEvent::DecreaseAccuracy if self.params.accuracy > step => {
                let accuracy = self.params.accuracy - step;
                Self {
                    params: self.params.with_accuracy(accuracy),
                    ..self
                }
            }
            InputEvent::DecreaseResolution | InputEvent::DecreaseAccuracy => {
                debug!(step, "Quality already at its minimum");
                self
            }
            InputEvent::Pan { fx, fy } => {
                let next = self.viewport.panned(fx, fy);
                self.navigate_to(next)
            }
            InputEvent::Zoom { factor } => match self.viewport.zoomed(factor) {
                Ok(next) => self.navigate_to(next),
                Err(e) => {
                    warn!("Zoom ignored: {e}");
                    self
                }
            },
            InputEvent::ResetView => {
                let home = self.home;
                self.navigate_to(home)
            }
            InputEvent::Back => self.go_back(),
            InputEvent::SetMandelbrot => Self {
                mode: FractalMode::Mandelbrot,
                ..self
            },
            InputEvent::SetJulia { c } => {
                let mode = FractalMode::Julia { c };
                if let Err(e) = mode.validate() {
                    warn!("Julia parameter ignored: {e}");
                    return self;
                }
                Self { mode, ..self }
            }
            InputEvent::PointerDown { x, y } => Self {
                pointer_down: Some((x, y)),
                pointer_up: None,
                ..self
            },
            InputEvent::PointerUp { x, y } => {
                if self.pointer_down.is_none() {
                    debug!("Pointer release without a press");
                    return self;
                }
                Self {
                    pointer_up: Some((x, y)),
                    ..self
                }
            }
            InputEvent::ConfirmSelection => self.confirm_selection(),
        }
    }

    /// Zoom into the pending drag rectangle, if it describes a usable region.
    fn confirm_selection(self) -> Self {
        let (down, up) = (self.pointer_down, self.pointer_up);
        let cleared = Self {
            pointer_down: None,
            pointer_up: None,
            ..self
        };
        let (Some(from), Some(to)) = (down, up) else {
            debug!("No pending selection");
            return cleared;
        };

        let selected = PlaneMapper::new(
            cleared.viewport,
            cleared.canvas_width as f64,
            cleared.canvas_height as f64,
        )
        .and_then(|mapper| mapper.select_region(from, to));
        match selected {
            Ok(next) => cleared.navigate_to(next),
            Err(e) => {
                debug!("Selection ignored: {e}");
                cleared
            }
        }
    }

    fn navigate_to(mut self, next: Viewport) -> Self {
        self.history.push(self.viewport);
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
        self.viewport = next;
        self
    }

    fn go_back(mut self) -> Self {
        match self.history.pop() {
            Some(previous) => self.viewport = previous,
            None => debug!("History is empty"),
        }
        self
    }
}
