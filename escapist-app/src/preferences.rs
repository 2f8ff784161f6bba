use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use escapist_core::{Complex, FractalMode, SimulationParams, Viewport};

// ---------------------------------------------------------------------------
// Last-view snapshot
// ---------------------------------------------------------------------------

/// State captured at exit so the next run can start where this one ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastView {
    pub mode: String,
    pub start_re: f64,
    pub start_im: f64,
    pub view_width: f64,
    pub view_height: f64,
    pub resolution: u32,
    pub accuracy: u32,
    pub julia_c_re: f64,
    pub julia_c_im: f64,
}

impl LastView {
    pub fn capture(mode: FractalMode, viewport: &Viewport, params: &SimulationParams) -> Self {
        // Mandelbrot snapshots keep the default parameter for a later `julia`.
        let c = mode
            .julia_c()
            .unwrap_or_else(|| Complex::new(default_julia_c_re(), default_julia_c_im()));
        Self {
            mode: mode.label().to_lowercase(),
            start_re: viewport.start.re,
            start_im: viewport.start.im,
            view_width: viewport.width,
            view_height: viewport.height,
            resolution: params.resolution,
            accuracy: params.accuracy,
            julia_c_re: c.re,
            julia_c_im: c.im,
        }
    }

    pub fn mode(&self) -> FractalMode {
        FractalMode::from_name(&self.mode, Complex::new(self.julia_c_re, self.julia_c_im))
    }

    pub fn viewport(&self) -> escapist_core::Result<Viewport> {
        Viewport::new(
            Complex::new(self.start_re, self.start_im),
            self.view_width,
            self.view_height,
        )
    }

    pub fn params(&self) -> escapist_core::Result<SimulationParams> {
        SimulationParams::new(self.resolution, self.accuracy)
    }
}

// ---------------------------------------------------------------------------
// Application preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    #[serde(default = "default_accuracy")]
    pub accuracy: u32,
    /// Amount `w`/`s`/`l`/`j` add or remove.
    #[serde(default = "default_quality_step")]
    pub quality_step: u32,
    #[serde(default = "default_start_re")]
    pub start_re: f64,
    #[serde(default = "default_start_im")]
    pub start_im: f64,
    /// Real-axis extent of the initial view; the height follows the canvas.
    #[serde(default = "default_view_width")]
    pub view_width: f64,
    /// `"mandelbrot"`, anything else selects the Julia set.
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_julia_c_re")]
    pub julia_c_re: f64,
    #[serde(default = "default_julia_c_im")]
    pub julia_c_im: f64,
    #[serde(default = "default_gradient")]
    pub gradient: String,
    #[serde(default = "default_true")]
    pub restore_last_view: bool,
    #[serde(default)]
    pub last_view: Option<LastView>,
}

fn default_canvas_width() -> u32 {
    900
}
fn default_canvas_height() -> u32 {
    600
}
fn default_resolution() -> u32 {
    SimulationParams::DEFAULT_RESOLUTION
}
fn default_accuracy() -> u32 {
    200
}
fn default_quality_step() -> u32 {
    5
}
fn default_start_re() -> f64 {
    Viewport::DEFAULT_START.re
}
fn default_start_im() -> f64 {
    Viewport::DEFAULT_START.im
}
fn default_view_width() -> f64 {
    Viewport::DEFAULT_WIDTH
}
fn default_mode() -> String {
    "mandelbrot".to_string()
}
fn default_julia_c_re() -> f64 {
    -0.7
}
fn default_julia_c_im() -> f64 {
    0.27015
}
fn default_gradient() -> String {
    "Classic".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            resolution: default_resolution(),
            accuracy: default_accuracy(),
            quality_step: default_quality_step(),
            start_re: default_start_re(),
            start_im: default_start_im(),
            view_width: default_view_width(),
            mode: default_mode(),
            julia_c_re: default_julia_c_re(),
            julia_c_im: default_julia_c_im(),
            gradient: default_gradient(),
            restore_last_view: true,
            last_view: None,
        }
    }
}

impl AppPreferences {
    pub fn julia_c(&self) -> Complex {
        Complex::new(self.julia_c_re, self.julia_c_im)
    }

    pub fn mode(&self) -> FractalMode {
        FractalMode::from_name(&self.mode, self.julia_c())
    }

    pub fn initial_start(&self) -> Complex {
        Complex::new(self.start_re, self.start_im)
    }

    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<AppPreferences>(&json) {
                    Ok(prefs) => {
                        info!("Loaded preferences from {}", path.display());
                        return prefs;
                    }
                    Err(e) => {
                        error!("Failed to parse preferences: {e}");
                    }
                },
                Err(e) => {
                    error!("Failed to read preferences file: {e}");
                }
            }
        } else {
            debug!("No preferences file at {}", path.display());
        }
        Self::default()
    }

    /// Persist preferences to disk.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences");
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}
