/// Hullview Terminal - hull wireframe and lines plan in the terminal
///
/// Usage: hullview-terminal [wireframe|profiles]
///
/// Set HULLVIEW_CONFIG to a JSON file to override viewer settings, and
/// RUST_LOG to control log output on stderr.
/// Controls:
///   - Q/ESC: Quit

use std::{env, fs, io};

use hullview_core::ViewerConfig;
use hullview_terminal::{TerminalApp, ViewMode};

fn load_config() -> io::Result<ViewerConfig> {
    let Ok(path) = env::var("HULLVIEW_CONFIG") else {
        return Ok(ViewerConfig::default());
    };
    let json = fs::read_to_string(&path)
        .map_err(|e| io::Error::new(e.kind(), format!("Failed to read config {}: {}", path, e)))?;
    ViewerConfig::from_json(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mode = match env::args().nth(1) {
        Some(arg) => arg
            .parse::<ViewMode>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
        None => ViewMode::Wireframe,
    };
    let config = load_config()?;

    println!("Hullview Terminal - starting {:?} view (press Q to quit)...", mode);
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(&config, mode)?;
    app.run()?;

    Ok(())
}
