use std::path::PathBuf;

use serde::Deserialize;

use crate::catalog::KNOWN_EXTENSIONS;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/albumdeck/config.toml` or `~/.config/albumdeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ALBUMDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory holding one sub-directory per album.
    pub root: Option<PathBuf>,
    /// File extensions to treat as tracks (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to list hidden albums and tracks (dotfiles).
    pub include_hidden: bool,
    /// Album selected at startup; falls back to the first album.
    pub default_album: Option<String>,
    /// Per-album metadata file.
    pub info_file: String,
    /// Per-album cover image.
    pub cover_file: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: None,
            extensions: KNOWN_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: false,
            default_album: None,
            info_file: "info.json".to_string(),
            cover_file: "cover.jpg".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Volume applied before the first track is loaded.
    pub initial_volume: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// How often the audio thread reports elapsed time and checks for the end of a track.
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 300,
            tick_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change per `+` / `-` press.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether album descriptions are shown under their titles.
    pub show_descriptions: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ one album after another ~ ".to_string(),
            show_descriptions: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Directory for log files; defaults to the XDG state directory.
    pub directory: Option<PathBuf>,
    pub file_name: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_name: "albumdeck.log".to_string(),
        }
    }
}
