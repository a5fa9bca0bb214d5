//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Focus};
use crate::catalog::{Catalog, display_title};
use crate::config::ControlsSettings;
use crate::player::{PlaybackState, PlayerState};

/// Everything from the player the frame needs.
pub struct View<'a> {
    pub catalog: &'a Catalog,
    pub state: &'a PlayerState,
    /// `(album, track)` currently loaded in the device.
    pub now_playing: Option<(usize, usize)>,
    /// Filename currently loaded, even if it left the active list.
    pub loaded: Option<&'a str>,
}

const NOW_PLAYING_MARK: &str = "♪ ";

/// Render the controls help text, incorporating scrub seconds and volume step.
fn controls_text(controls: &ControlsSettings) -> String {
    let step = (controls.volume_step * 100.0).round() as u32;
    [
        "[j/k] up/down".to_string(),
        "[gg/G] top/bottom".to_string(),
        "[tab] albums/tracks".to_string(),
        "[enter] play selected".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next track".to_string(),
        format!("[H/L] scrub -/+{}s", controls.scrub_seconds),
        "[0-9] jump".to_string(),
        format!("[-/+] volume -/+{step}%"),
        "[m] mute".to_string(),
        "[f] follow".to_string(),
        "[r] rescan".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn playback_label(playback: PlaybackState) -> &'static str {
    match playback {
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    }
}

fn volume_text(state: &PlayerState) -> String {
    if state.is_muted() {
        "Vol: muted".to_string()
    } else {
        format!("Vol: {:.0}%", state.volume() * 100.0)
    }
}

/// `Title • Album` of the loaded track, or a placeholder.
fn now_playing_text(view: &View) -> String {
    let Some(filename) = view.loaded else {
        return "Nothing loaded".to_string();
    };
    let title = display_title(filename);
    match view
        .state
        .album_index
        .and_then(|i| view.catalog.album(i))
    {
        Some(album) => format!("{title} • {}", album.title),
        None => title,
    }
}

/// Compute the visible `[start, end)` window of a list of `total` rows in
/// `height` lines, keeping `selected` centered when possible. The third value
/// is the selected row's position inside the window.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    let selected = selected.min(total.saturating_sub(1));
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().fg(Color::Cyan))
    } else {
        block
    }
}

/// Render `rows` as a list with the cursor row highlighted, only building the
/// visible window.
fn render_list(frame: &mut Frame, area: Rect, rows: Vec<String>, cursor: usize, block: Block) {
    // Borders take two lines.
    let height = area.height.saturating_sub(2) as usize;
    let (start, end, pos) = visible_window(rows.len(), height, cursor);

    let items: Vec<ListItem> = rows
        .into_iter()
        .skip(start)
        .take(end - start)
        .map(ListItem::new)
        .collect();
    let has_items = !items.is_empty();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if has_items {
        state.select(Some(pos));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_albums(frame: &mut Frame, area: Rect, app: &App, view: &View) {
    let rows = view
        .catalog
        .albums()
        .enumerate()
        .map(|(i, album)| {
            if view.state.album_index == Some(i) {
                format!("{NOW_PLAYING_MARK}{}", album.title)
            } else {
                format!("  {}", album.title)
            }
        })
        .collect();
    let title = format!(" albums ({}) ", view.catalog.len());
    render_list(
        frame,
        area,
        rows,
        app.album_cursor,
        pane_block(&title, app.focus == Focus::Albums),
    );
}

fn draw_tracks(frame: &mut Frame, area: Rect, app: &App, view: &View) {
    let album = view.catalog.album(app.album_cursor);

    let about_text = album
        .filter(|_| app.show_descriptions)
        .map(|a| {
            let mut lines = vec![a.description.clone()];
            if let Some(cover) = a.cover.as_deref().and_then(|p| p.file_name()) {
                lines.push(format!("cover: {}", cover.to_string_lossy()));
            }
            lines.retain(|l| !l.is_empty());
            lines.join("\n")
        })
        .filter(|text| !text.is_empty());

    let area = if let Some(text) = about_text {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);
        let about = Paragraph::new(text)
            .italic()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" about ")
                    .padding(Padding::horizontal(1)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(about, parts[0]);
        parts[1]
    } else {
        area
    };

    let playing_here = view
        .now_playing
        .filter(|&(a, _)| a == app.album_cursor)
        .map(|(_, t)| t);

    let rows: Vec<String> = match view.catalog.tracks(app.album_cursor) {
        Some([]) => vec!["  (no tracks)".to_string()],
        Some(tracks) => tracks
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let mark = if playing_here == Some(i) {
                    NOW_PLAYING_MARK
                } else {
                    "  "
                };
                format!("{mark}{:>2}. {}", i + 1, t.display_title())
            })
            .collect(),
        None if album.is_some() => vec!["  (track list unavailable)".to_string()],
        None => Vec::new(),
    };

    let title = match album {
        Some(a) => format!(" {} ", a.title),
        None => " tracks ".to_string(),
    };
    render_list(
        frame,
        area,
        rows,
        app.track_cursor,
        pane_block(&title, app.focus == Focus::Tracks),
    );
}

fn draw_now_playing(frame: &mut Frame, area: Rect, view: &View) {
    let state = view.state;
    let label = format!(
        "{} / {}",
        format_mmss(state.elapsed),
        format_mmss(state.duration)
    );
    let title = format!(
        " {} • {} • {} ",
        playback_label(state.playback),
        now_playing_text(view),
        volume_text(state)
    );

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(state.progress())
        .label(label);
    frame.render_widget(gauge, area);
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, view: &View, controls: &ControlsSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(app.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" albumdeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);
    draw_albums(frame, panes[0], app, view);
    draw_tracks(frame, panes[1], app, view);

    draw_now_playing(frame, chunks[2], view);

    // Status box
    let cursor = if app.follow_playback {
        "CURSOR: Follow"
    } else {
        "CURSOR: Free-roam"
    };
    let mut status = vec![cursor.to_string(), format!("Dir: {}", app.current_dir)];
    let mut style = Style::default();
    if let Some(s) = &app.status {
        status.push(s.text.clone());
        if s.error {
            style = style.fg(Color::Red);
        }
    }
    let status_par = Paragraph::new(status.join(" • "))
        .style(style)
        .block(Block::bordered().padding(Padding::left(1)).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[3]);

    let footer = Paragraph::new(controls_text(controls))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding::left(1)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
