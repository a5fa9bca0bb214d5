//! Error taxonomy shared by the catalog, the navigation engine and the
//! playback controller.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reaching the catalog provider.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure (the directory or file could not be read).
    #[error("failed to read {}: {source}", path.display())]
    Fetch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The album info file exists but is not valid JSON.
    #[error("malformed album info in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The album (or its info file) does not exist.
    #[error("album not found: {0}")]
    NotFound(String),
}

/// Failures reported by the audio device.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("no audio output device: {0}")]
    NoOutput(String),

    /// Asynchronous failure notified by the device after a load or play.
    #[error("audio device error: {0}")]
    Device(String),

    #[error("audio thread is not running")]
    Disconnected,
}

/// Anything the playback controller can surface to the frontend.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("no album at index {0}")]
    NoSuchAlbum(usize),

    #[error("no track at index {track} in album {album}")]
    NoSuchTrack { album: usize, track: usize },
}
