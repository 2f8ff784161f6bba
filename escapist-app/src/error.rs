use thiserror::Error;

use escapist_core::CoreError;
use escapist_render::RenderError;

/// Unparsable input script token.
#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("unknown input `{0}` (run with --help for the list of inputs)")]
    UnknownToken(String),

    #[error("input `{token}` expects {expected}")]
    BadArguments {
        token: String,
        expected: &'static str,
    },
}

/// Anything that can stop a session run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
