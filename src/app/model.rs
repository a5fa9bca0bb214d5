//! Application model types: `App`, `Focus` and `Status`.

use crate::config::UiSettings;

/// Which pane receives cursor movement and `Enter`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Albums,
    Tracks,
}

/// One-line message shown under the panes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub error: bool,
}

/// The main application model.
pub struct App {
    pub focus: Focus,
    /// Selected album; also the album whose tracks are listed.
    pub album_cursor: usize,
    pub track_cursor: usize,
    /// Cursor jumps to whatever is playing.
    pub follow_playback: bool,
    pub status: Option<Status>,
    pub header_text: String,
    pub show_descriptions: bool,
    /// Library root, shown in the header.
    pub current_dir: String,
}

impl App {
    pub fn new(ui: &UiSettings, current_dir: impl Into<String>) -> Self {
        Self {
            focus: Focus::Albums,
            album_cursor: 0,
            track_cursor: 0,
            follow_playback: true,
            status: None,
            header_text: ui.header_text.clone(),
            show_descriptions: ui.show_descriptions,
            current_dir: current_dir.into(),
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Albums => Focus::Tracks,
            Focus::Tracks => Focus::Albums,
        };
    }

    /// Move the focused cursor down, wrapping to the top. `len` is the length
    /// of the focused list. Returns true when the album cursor changed.
    pub fn next(&mut self, len: usize) -> bool {
        self.move_to(len, |cur| (cur + 1) % len)
    }

    /// Move the focused cursor up, wrapping to the bottom.
    pub fn prev(&mut self, len: usize) -> bool {
        self.move_to(len, |cur| if cur == 0 { len - 1 } else { cur - 1 })
    }

    pub fn first(&mut self, len: usize) -> bool {
        self.move_to(len, |_| 0)
    }

    pub fn last(&mut self, len: usize) -> bool {
        self.move_to(len, |_| len - 1)
    }

    fn move_to(&mut self, len: usize, step: impl FnOnce(usize) -> usize) -> bool {
        if len == 0 {
            return false;
        }
        match self.focus {
            Focus::Albums => {
                self.album_cursor = self.album_cursor.min(len - 1);
                let cur = self.album_cursor;
                let target = step(cur);
                let changed = target != cur;
                self.album_cursor = target;
                if changed {
                    self.track_cursor = 0;
                }
                changed
            }
            Focus::Tracks => {
                let cur = self.track_cursor.min(len - 1);
                self.track_cursor = step(cur);
                false
            }
        }
    }

    /// Keep cursors inside the current lists after the catalog changed.
    pub fn clamp_cursors(&mut self, album_count: usize, track_count: usize) {
        self.album_cursor = self.album_cursor.min(album_count.saturating_sub(1));
        self.track_cursor = self.track_cursor.min(track_count.saturating_sub(1));
    }

    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }

    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    pub fn toggle_follow_playback(&mut self) {
        self.follow_playback = !self.follow_playback;
    }

    /// Move both cursors onto the playing track when following playback.
    pub fn follow(&mut self, now_playing: Option<(usize, usize)>) {
        if !self.follow_playback {
            return;
        }
        if let Some((album, track)) = now_playing {
            self.album_cursor = album;
            self.track_cursor = track;
        }
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            error: true,
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}
