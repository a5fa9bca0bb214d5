//! Player state: which album is active, its track list, and the transport.
//!
//! The current track index is never stored. It is recomputed from the
//! filename the audio device reports as loaded, so the two can't drift apart.

use std::time::Duration;

use crate::catalog::Track;

/// Transport state of the audio device as seen by the frontend.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Index into the catalog; `None` while the catalog is empty.
    pub album_index: Option<usize>,
    /// Track list of the active album.
    pub track_list: Vec<Track>,
    pub playback: PlaybackState,
    pub elapsed: Duration,
    pub duration: Duration,
    volume: f32,
}

impl PlayerState {
    pub fn new(volume: f32) -> Self {
        Self {
            album_index: None,
            track_list: Vec::new(),
            playback: PlaybackState::Stopped,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            volume: clamp_volume(volume),
        }
    }

    /// Position of the loaded filename in the active track list.
    pub fn track_index(&self, loaded: Option<&str>) -> Option<usize> {
        let loaded = loaded?;
        self.track_list.iter().position(|t| t.filename == loaded)
    }

    /// Replace the active album and its track list in one step.
    pub fn switch_album(&mut self, index: usize, tracks: Vec<Track>) {
        self.album_index = Some(index);
        self.track_list = tracks;
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Store `volume` clamped to `[0, 1]` and return the stored value.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.volume = clamp_volume(volume);
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.volume == 0.0
    }

    /// Mute when audible, otherwise jump to [`UNMUTE_VOLUME`]. Returns the new
    /// volume.
    pub fn toggle_mute(&mut self) -> f32 {
        if self.is_muted() {
            self.set_volume(UNMUTE_VOLUME)
        } else {
            self.set_volume(0.0)
        }
    }

    /// Zero the displayed times until the device reports real values.
    pub fn reset_times(&mut self) {
        self.elapsed = Duration::ZERO;
        self.duration = Duration::ZERO;
    }

    pub fn update_times(&mut self, elapsed: Duration, duration: Option<Duration>) {
        self.elapsed = elapsed;
        if let Some(d) = duration {
            self.duration = d;
        }
    }

    /// Clamp a seek target to `[0, duration]`.
    pub fn clamp_seek(&self, target: Duration) -> Duration {
        target.min(self.duration)
    }

    /// Elapsed position as a fraction of the track, for progress bars.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Level restored when un-muting, whatever the volume was before muting.
pub const UNMUTE_VOLUME: f32 = 0.1;

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
