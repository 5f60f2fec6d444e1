use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use image::RgbaImage;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use nineorten::audio;
use nineorten::config;
use nineorten::controller::Controller;
use nineorten::loader::image_loader::{self, PanelAsset};
use nineorten::loader::sample_loader;
use nineorten::projection::Size;
use nineorten::render::RenderOptions;
use nineorten::screen::{self, Screen};
use nineorten::shared::InputEvent;
use nineorten::tui;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    // the terminal belongs to the panel, so logs go to a file
    let log_path = dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("nineorten")
        .join("nineorten.log");
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(_) => match File::create(std::env::temp_dir().join("nineorten.log")) {
            Ok(f) => f,
            Err(_) => return, // run without logs
        },
    };

    if WriteLogger::init(log_level, Config::default(), log_file).is_ok() {
        log::info!("nineorten starting (log level: {:?})", log_level);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let debug = args.iter().any(|a| a == "--debug");
    let asset_dir: PathBuf = args
        .iter()
        .find(|a| !a.starts_with('-'))
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    init_logging(verbose);
    log::info!("assets from {}", asset_dir.display());

    let mut settings = config::load_settings(&asset_dir);
    if debug {
        settings.debug_overlay = true;
    }

    // no output device still gives a working panel, just a silent one
    let audio = match audio::start_audio() {
        Ok(audio) => Some(audio),
        Err(e) => {
            log::warn!("audio unavailable, every region is inert: {e:#}");
            None
        }
    };

    // all decoding happens here, before the first frame
    let screen = load_screen(&asset_dir, &settings, audio.as_ref());
    run_panel(screen, audio.as_ref(), Duration::from_millis(settings.tick_ms))
}

fn load_screen(
    asset_dir: &Path,
    settings: &config::Settings,
    audio: Option<&audio::AudioHandle>,
) -> Screen<audio::EnginePlayer> {
    let idle = image_loader::load_panel_image(asset_dir, PanelAsset::Idle);
    let pressed = image_loader::load_panel_image(asset_dir, PanelAsset::Pressed);
    let controller = Controller::build(settings, |id| {
        let audio = audio?;
        sample_loader::prepare_region(asset_dir, id, |path| audio.prepare(path))
    });
    let options = RenderOptions {
        background: screen::background_color(settings.background),
        debug_overlay: settings.debug_overlay,
    };
    Screen::new(idle, pressed, controller, options)
}

// Takes the screen by value: it drops (and releases every player) on every
// way out of here, before the audio stream it talks to.
fn run_panel(
    mut screen: Screen<audio::EnginePlayer>,
    audio: Option<&audio::AudioHandle>,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    let _guard = TerminalGuard::enter()?; // auto drops when out of scope
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let mut surface = RgbaImage::new(0, 0);
    let mut surface_size = Size::default();

    loop {
        // playback completions from the audio thread
        if let Some(audio) = audio {
            while let Some(event) = audio.poll_event() {
                screen.on_audio_event(event);
            }
        }

        term.draw(|frame| {
            let area = frame.area();
            let (w, h) = tui::view::surface_dimensions(area);
            if surface.dimensions() != (w, h) {
                surface = RgbaImage::new(w, h);
            }
            surface_size = tui::view::surface_size(area);
            screen.render(&mut surface);
            tui::view::draw_surface(frame, area, &surface);
        })?;

        for event in tui::input::poll_input(tick_rate)? {
            if event == InputEvent::Quit {
                log::info!("quit");
                return Ok(());
            }
            screen.handle_input(event, surface_size);
        }
    }
}

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard; // from here on, leaving undoes raw mode too
        crossterm::execute!(std::io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = crossterm::execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = terminal::disable_raw_mode();
    }
}
