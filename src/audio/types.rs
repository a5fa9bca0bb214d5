//! Commands understood by the audio thread, and its playback clock.

use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Replace the current sink with `path`, paused at the start.
    Load {
        path: PathBuf,
        generation: u64,
        duration: Option<Duration>,
    },
    Play,
    Pause,
    /// Restart the current source at an absolute position.
    Seek(Duration),
    SetVolume(f32),
    /// Drop the current sink.
    Stop,
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Elapsed time of the current source: wall time while playing plus
/// whatever was accumulated before the last pause or seek.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct Clock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Clock {
    pub(super) fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub(super) fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    /// Jump to `at`, keeping the running/paused state.
    pub(super) fn reset(&mut self, at: Duration) {
        let running = self.started_at.is_some();
        self.accumulated = at;
        self.started_at = running.then(Instant::now);
    }

    pub(super) fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub(super) fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }
}
