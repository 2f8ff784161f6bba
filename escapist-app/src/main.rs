mod app;
mod app_dir;
mod error;
mod input;
mod preferences;
mod session;

use std::process::ExitCode;

use tracing::{error, info, warn};

use app::EscapistApp;
use error::AppError;
use preferences::AppPreferences;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print!("{}", input::USAGE);
        return ExitCode::SUCCESS;
    }

    info!("Starting Escapist");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), AppError> {
    // Parse everything up front so a typo fails before any rendering.
    let events = input::parse_script(args)?;

    let mut prefs = AppPreferences::load();
    let mut app = EscapistApp::new(&prefs)?;
    app.redraw()?;

    for event in events {
        app.handle(event)?;
    }
    if app.has_pending_selection() {
        warn!("Selection was never confirmed with `enter`");
    }

    let path = app_dir::images_directory()
        .join(format!("escapist_{}.png", app_dir::now_timestamp()));
    app.export(&path)?;

    prefs.last_view = Some(app.last_view());
    prefs.save();

    info!(frames = app.frames_drawn(), "Done");
    Ok(())
}
