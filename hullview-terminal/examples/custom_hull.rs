/// Example: Render a hull built from principal dimensions given on the command line
///
/// Usage: cargo run --example custom_hull -- <lpp> <beam> <depth> <draft> <displacement> [profiles]

use std::env;
use std::io;

use hullview_core::{HullParams, ViewerConfig};
use hullview_terminal::{TerminalApp, ViewMode};

fn parse(name: &str, value: &str) -> io::Result<f32> {
    value.parse().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} must be a number, got '{}'", name, value),
        )
    })
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 6 {
        eprintln!("Usage: {} <lpp> <beam> <depth> <draft> <displacement> [profiles]", args[0]);
        eprintln!("\nNo dimensions provided, using the default hull...");
        let mut app = TerminalApp::new(&ViewerConfig::default(), ViewMode::Wireframe)?;
        return app.run();
    }

    let hull = HullParams {
        lpp: parse("lpp", &args[1])?,
        beam: parse("beam", &args[2])?,
        depth: parse("depth", &args[3])?,
        draft: parse("draft", &args[4])?,
        displacement: parse("displacement", &args[5])?,
        loa: None,
    };

    // Report every rule violation before touching the terminal
    if let Err(e) = hull.validate() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, e));
    }

    let mode = match args.get(6) {
        Some(arg) => arg
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
        None => ViewMode::Wireframe,
    };

    let config = ViewerConfig {
        camera: hullview_core::CameraConfig {
            auto_frame: true,
            ..Default::default()
        },
        hull,
        ..ViewerConfig::default()
    };

    println!(
        "Hull: Lpp {} m, B {} m, T {} m",
        config.hull.lpp, config.hull.beam, config.hull.draft
    );
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(&config, mode)?;
    app.run()?;

    Ok(())
}
