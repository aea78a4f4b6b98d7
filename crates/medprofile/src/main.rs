#[cfg(feature = "native")]
use clap::Parser;
#[cfg(feature = "native")]
use medprofile::platform::{FileStore, NativeWorker};
#[cfg(feature = "native")]
use medprofile::state::AppState;
#[cfg(feature = "native")]
use medprofile::{App, AppConfig, init_logging};
#[cfg(feature = "native")]
use std::path::PathBuf;

#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(name = "medprofile")]
#[command(about = "View and edit your medical profile in the terminal")]
struct Args {
    /// Path to the data directory (default: ~/.medprofile/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Profile to open (overrides user_id in config.yaml)
    #[arg(short, long)]
    user: Option<String>,
}

#[cfg(feature = "native")]
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".medprofile")
}

#[cfg(feature = "native")]
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let config = AppConfig::load_or_default(&data_dir);
    let user_id = config.resolve_user(args.user.as_deref());
    tracing::info!(data_dir = %data_dir.display(), user = %user_id, "Starting");

    let store = FileStore::new(&data_dir);
    let mut app = App::new(AppState::new(&user_id), NativeWorker::new(Box::new(store)));

    ratatui::run(|terminal| app.run(terminal))?;

    tracing::info!("Application shutting down");

    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() {
    // Web entry point is handled via wasm_bindgen in lib.rs
    panic!(
        "This binary requires the 'native' feature. For web, use trunk to build the WASM target."
    );
}
