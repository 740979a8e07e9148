/// Terminal front end for the hull viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use hullview_core::{
    feed, HullLines, Pipeline, ProfilePipeline, TimedFeed, ViewerConfig, Viewport,
    ViewportWatcher, WireframePipeline,
};
use log::{info, warn};
use std::io::{self, stdout, Write};
use std::str::FromStr;
use std::time::{Duration, Instant};

pub mod canvas;
pub mod surface;

pub use canvas::CharCanvas;
pub use surface::{TerminalSurface2d, TerminalSurface3d};

/// Which pipeline the terminal shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Wireframe,
    Profiles,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wireframe" | "3d" => Ok(ViewMode::Wireframe),
            "profiles" | "2d" => Ok(ViewMode::Profiles),
            other => Err(format!("unknown view mode '{}', expected wireframe or profiles", other)),
        }
    }
}

enum View {
    Wireframe(WireframePipeline<TerminalSurface3d>),
    Profiles(ProfilePipeline<TerminalSurface2d>),
}

impl View {
    fn new(
        config: &ViewerConfig,
        mode: ViewMode,
        lines: &HullLines,
        viewport: Viewport,
    ) -> hullview_core::Result<Self> {
        match mode {
            ViewMode::Wireframe => {
                let surface = TerminalSurface3d::new(&config.camera, config.helpers());
                let renderer = config.wireframe_renderer();
                let pipeline = Pipeline::new(lines.to_wireframe()?, renderer, surface, viewport)?;
                Ok(View::Wireframe(pipeline))
            }
            ViewMode::Profiles => {
                // Labels sit one row above the line rather than a pixel offset
                let mut renderer = config.profile_renderer();
                renderer.label_offset = 1.0;
                let surface = TerminalSurface2d::new();
                let profiles = lines.to_profiles(viewport);
                let pipeline = Pipeline::new(profiles, renderer, surface, viewport)?;
                Ok(View::Profiles(pipeline))
            }
        }
    }

    fn on_resize(&mut self, viewport: Viewport) {
        match self {
            View::Wireframe(p) => p.on_resize(viewport),
            View::Profiles(p) => p.on_resize(viewport),
        }
    }

    /// Push hull lines into whichever pipeline is active
    fn on_new_lines(&mut self, lines: &HullLines) -> hullview_core::Result<()> {
        match self {
            View::Wireframe(p) => p.on_new_data(lines.to_wireframe()?),
            View::Profiles(p) => {
                let profiles = lines.to_profiles(p.viewport());
                p.on_new_data(profiles)
            }
        }
    }

    fn canvas(&self) -> &CharCanvas {
        match self {
            View::Wireframe(p) => p.surface().canvas(),
            View::Profiles(p) => p.surface().canvas(),
        }
    }

    fn model_version(&self) -> u64 {
        match self {
            View::Wireframe(p) => p.model().version(),
            View::Profiles(p) => p.model().version(),
        }
    }

    fn frames_rendered(&self) -> u64 {
        match self {
            View::Wireframe(p) => p.frames_rendered(),
            View::Profiles(p) => p.frames_rendered(),
        }
    }
}

/// What the main loop does after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

/// Route one terminal event. Resizes reach the pipeline only when the size
/// actually changed.
fn dispatch_event(view: &mut View, watcher: &mut ViewportWatcher, event: Event) -> Control {
    match event {
        Event::Resize(width, height) => {
            if let Some(viewport) = watcher.observe(width as u32, height as u32) {
                view.on_resize(viewport);
            }
            Control::Continue
        }
        Event::Key(KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        }) => Control::Quit,
        _ => Control::Continue,
    }
}

fn to_io(e: hullview_core::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

/// Main application struct for terminal hull rendering
pub struct TerminalApp {
    mode: ViewMode,
    view: View,
    feed: TimedFeed<HullLines>,
    watcher: ViewportWatcher,
    frame_interval: Duration,
    running: bool,
    started: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: &ViewerConfig, mode: ViewMode) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let viewport = Viewport::new(width as u32, height as u32);

        let lines = HullLines::generate(&config.hull, config.stations).map_err(to_io)?;
        let updates = feed::simulated_hull_updates(&lines).map_err(to_io)?;

        let view = View::new(config, mode, &lines, viewport).map_err(to_io)?;
        info!("terminal viewer started in {:?} mode at {}x{}", mode, width, height);

        Ok(Self {
            mode,
            view,
            feed: TimedFeed::new(config.feed_delay(), updates, Duration::ZERO),
            watcher: ViewportWatcher::new(viewport),
            frame_interval: config.frame_interval(),
            running: true,
            started: Instant::now(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Drain pending events; each handler runs to completion
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.poll_feed();

            self.present()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_interval {
                std::thread::sleep(self.frame_interval - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if dispatch_event(&mut self.view, &mut self.watcher, event) == Control::Quit {
            self.running = false;
        }
    }

    fn poll_feed(&mut self) {
        if let Some(lines) = self.feed.poll(self.started.elapsed()) {
            if let Err(e) = self.view.on_new_lines(&lines) {
                warn!("simulated update v{} dropped: {}", lines.version, e);
            }
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.view.canvas().draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Hullview {:?} | model v{} | frames: {} | pending: {} | FPS: {:.1} | Q=Quit",
                self.mode,
                self.view.model_version(),
                self.view.frames_rendered(),
                self.feed.remaining(),
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
