use std::path::Path;

use tracing::{debug, info, warn};

use escapist_render::{
    draw_frame, export_png, gradient_by_name, Color, ExportMetadata, FrameTiming, Gradient,
    RenderBuffer, Surface,
};

use crate::error::AppError;
use crate::input::InputEvent;
use crate::preferences::{AppPreferences, LastView};
use crate::session::SessionState;

/// A headless exploring session: the current state plus the canvas it
/// draws on.
pub(crate) struct EscapistApp {
    session: SessionState,
    gradient: Gradient,
    buffer: RenderBuffer,
    frames_drawn: usize,
}

impl EscapistApp {
    pub(crate) fn new(prefs: &AppPreferences) -> Result<Self, AppError> {
        let session = SessionState::from_preferences(prefs)?;
        let gradient = gradient_by_name(&prefs.gradient).unwrap_or_else(|e| {
            warn!("{e}, using the default gradient");
            Gradient::default()
        });
        let (width, height) = session.canvas_size();
        let buffer = RenderBuffer::new(width, height)?;
        info!(
            width,
            height,
            mode = session.mode.label(),
            gradient = gradient.name(),
            "Session ready"
        );
        Ok(Self {
            session,
            gradient,
            buffer,
            frames_drawn: 0,
        })
    }

    /// Simulate and paint the current state.
    pub(crate) fn redraw(&mut self) -> Result<FrameTiming, AppError> {
        let s = &self.session;
        let timing = draw_frame(&s.params, &s.viewport, s.mode, &self.gradient, &mut self.buffer)?;
        self.frames_drawn += 1;
        Ok(timing)
    }

    /// Apply one event, redrawing when it changes what is shown.
    pub(crate) fn handle(&mut self, event: InputEvent) -> Result<Option<FrameTiming>, AppError> {
        self.session = self.session.clone().apply(event);
        debug!(
            ?event,
            history = self.session.history_len(),
            "Applied input"
        );
        if event.triggers_render() {
            return self.redraw().map(Some);
        }
        if let InputEvent::PointerUp { .. } = event {
            if let Some((x, y, w, h)) = self.session.pending_outline() {
                self.buffer.stroke_rect(x, y, w, h, Color::WHITE);
            }
        }
        Ok(None)
    }

    pub(crate) fn has_pending_selection(&self) -> bool {
        self.session.has_pending_selection()
    }

    pub(crate) fn frames_drawn(&self) -> usize {
        self.frames_drawn
    }

    /// Write the last drawn frame as a PNG.
    pub(crate) fn export(&self, path: &Path) -> Result<(), AppError> {
        let s = &self.session;
        let metadata = ExportMetadata {
            mode: s.mode,
            viewport: s.viewport,
            params: s.params,
            gradient_name: self.gradient.name().to_string(),
        };
        export_png(&self.buffer, path, &metadata)?;
        info!("Saved {}", path.display());
        Ok(())
    }

    pub(crate) fn last_view(&self) -> LastView {
        let s = &self.session;
        LastView::capture(s.mode, &s.viewport, &s.params)
    }
}
