use std::io::Stdout;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Focus};
use crate::catalog::CatalogProvider;
use crate::config;
use crate::player::{AudioDevice, DeviceEvent, PlaybackController, PlayerEvent};
use crate::ui::{self, View};

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: drains device notifications, draws, and handles
/// input. Returns `Ok(())` when shutdown is requested.
pub fn run<P: CatalogProvider, D: AudioDevice>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlaybackController<P, D>,
    events: &Receiver<DeviceEvent>,
    state: &mut EventLoopState,
) -> anyhow::Result<()> {
    loop {
        while let Ok(ev) = events.try_recv() {
            dispatch(app, controller, PlayerEvent::Device(ev));
        }

        app.follow(controller.now_playing());

        terminal.draw(|f| {
            let view = View {
                catalog: controller.catalog(),
                state: controller.state(),
                now_playing: controller.now_playing(),
                loaded: controller.device().loaded_filename(),
            };
            ui::draw(f, app, &view, &settings.controls);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, controller, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Forward one event to the controller, surfacing failures in the status line.
fn dispatch<P: CatalogProvider, D: AudioDevice>(
    app: &mut App,
    controller: &mut PlaybackController<P, D>,
    event: PlayerEvent,
) -> bool {
    match controller.handle(event) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "player event failed");
            app.set_error(e.to_string());
            false
        }
    }
}

/// Make sure the album under the cursor has its track list.
fn browse_cursor<P: CatalogProvider, D: AudioDevice>(
    app: &mut App,
    controller: &mut PlaybackController<P, D>,
) {
    if controller.catalog().is_empty() {
        return;
    }
    if let Err(e) = controller.browse(app.album_cursor) {
        tracing::warn!(album = app.album_cursor, error = %e, "failed to list tracks");
        app.set_error(e.to_string());
    }
}

fn focused_len<P: CatalogProvider, D: AudioDevice>(
    app: &App,
    controller: &PlaybackController<P, D>,
) -> usize {
    match app.focus {
        Focus::Albums => controller.catalog().len(),
        Focus::Tracks => controller
            .catalog()
            .tracks(app.album_cursor)
            .map_or(0, <[_]>::len),
    }
}

/// Apply one key press. Returns true when the user asked to quit.
pub(super) fn handle_key_event<P: CatalogProvider, D: AudioDevice>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlaybackController<P, D>,
    state: &mut EventLoopState,
) -> bool {
    let pending_gg = std::mem::take(&mut state.pending_gg);
    app.clear_status();

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Char('j') | KeyCode::Down => {
            app.follow_playback_off();
            let len = focused_len(app, controller);
            if app.next(len) {
                browse_cursor(app, controller);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.follow_playback_off();
            let len = focused_len(app, controller);
            if app.prev(len) {
                browse_cursor(app, controller);
            }
        }
        KeyCode::Char('g') => {
            if pending_gg {
                app.follow_playback_off();
                let len = focused_len(app, controller);
                if app.first(len) {
                    browse_cursor(app, controller);
                }
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            app.follow_playback_off();
            let len = focused_len(app, controller);
            if app.last(len) {
                browse_cursor(app, controller);
            }
        }
        KeyCode::Enter => {
            let event = match app.focus {
                Focus::Albums => PlayerEvent::PlayAlbum(app.album_cursor),
                Focus::Tracks => PlayerEvent::PlayTrack {
                    album: app.album_cursor,
                    track: app.track_cursor,
                },
            };
            if focused_len(app, controller) > 0 {
                app.follow_playback_on();
                dispatch(app, controller, event);
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            app.follow_playback_on();
            dispatch(app, controller, PlayerEvent::TogglePlayPause);
        }
        KeyCode::Char('l') => {
            app.follow_playback_on();
            dispatch(app, controller, PlayerEvent::Next);
        }
        KeyCode::Char('h') => {
            app.follow_playback_on();
            dispatch(app, controller, PlayerEvent::Previous);
        }
        KeyCode::Char('L') => {
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            dispatch(app, controller, PlayerEvent::SeekBy(secs));
        }
        KeyCode::Char('H') => {
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            dispatch(app, controller, PlayerEvent::SeekBy(-secs));
        }
        KeyCode::Char(c @ '0'..='9') => {
            let tenths = c.to_digit(10).unwrap_or(0);
            dispatch(
                app,
                controller,
                PlayerEvent::SeekFraction(f64::from(tenths) / 10.0),
            );
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            dispatch(
                app,
                controller,
                PlayerEvent::AdjustVolume(settings.controls.volume_step),
            );
        }
        KeyCode::Char('-') => {
            dispatch(
                app,
                controller,
                PlayerEvent::AdjustVolume(-settings.controls.volume_step),
            );
        }
        KeyCode::Char('m') => {
            dispatch(app, controller, PlayerEvent::ToggleMute);
        }
        KeyCode::Char('f') => app.toggle_follow_playback(),
        KeyCode::Char('r') => {
            if dispatch(app, controller, PlayerEvent::RefreshCatalog) {
                let albums = controller.catalog().len();
                app.album_cursor = app.album_cursor.min(albums.saturating_sub(1));
                browse_cursor(app, controller);
                let tracks = controller
                    .catalog()
                    .tracks(app.album_cursor)
                    .map_or(0, <[_]>::len);
                app.clamp_cursors(albums, tracks);
                app.set_info(format!("rescanned: {albums} albums"));
            }
        }
        _ => {}
    }

    false
}
