use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::RodioDevice;
use crate::catalog::{Catalog, CatalogProvider, LocalCatalog};
use crate::logging;
use crate::player::PlaybackController;

mod cli;
mod event_loop;
mod settings;

use cli::Cli;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (settings, settings_warning) = settings::load_settings();

    // Logging is best effort; the player works without it.
    let _log_guard = match logging::init(&settings.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("albumdeck: logging disabled: {e:#}");
            None
        }
    };
    if let Some(msg) = &settings_warning {
        tracing::warn!("{msg}");
    }

    let root = cli
        .music_dir
        .clone()
        .or_else(|| settings.library.root.clone())
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("Music"));
    let default_album = cli
        .album
        .clone()
        .or_else(|| settings.library.default_album.clone());
    tracing::info!(root = %root.display(), ?default_album, "starting");

    let provider = LocalCatalog::new(root.clone(), settings.library.clone());

    if cli.list {
        return print_catalog(&provider);
    }

    let (device, events) =
        RodioDevice::spawn(&settings.audio).context("failed to open audio output")?;
    let mut controller =
        PlaybackController::new(provider, device, settings.playback.clone(), default_album);
    let mut app = App::new(&settings.ui, controller.provider().root().display().to_string());

    if let Err(e) = controller.start() {
        tracing::warn!(error = %e, "startup failed");
        app.set_error(e.to_string());
    }
    if let Some(msg) = settings_warning {
        app.set_error(msg);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut controller,
        &events,
        &mut state,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller
        .device_mut()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    tracing::info!("bye");

    run_result
}

/// `--list`: print every album with its track titles.
fn print_catalog<P: CatalogProvider>(provider: &P) -> anyhow::Result<()> {
    let mut catalog = Catalog::load(provider).context("failed to read the music directory")?;

    for index in 0..catalog.len() {
        let Some(album) = catalog.album(index) else {
            continue;
        };
        let header = if album.title == album.id {
            album.id.clone()
        } else {
            format!("{} ({})", album.title, album.id)
        };
        println!("{header}");

        match catalog.ensure_tracks(index, provider) {
            Ok(tracks) => {
                for (i, track) in tracks.iter().enumerate() {
                    println!("  {:>2}. {}", i + 1, track.display_title());
                }
            }
            Err(e) => println!("  (unavailable: {e})"),
        }
    }
    Ok(())
}
