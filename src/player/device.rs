use std::path::Path;
use std::time::Duration;

use crate::error::PlaybackError;

/// The audio output the controller drives.
///
/// Holds at most one loaded source; `load` always replaces the previous one.
/// Each load or unload bumps `generation`, and notifications carry the generation of the
/// load they belong to.
pub trait AudioDevice {
    /// Replace whatever is loaded with `source`, paused at the start.
    fn load(&mut self, source: &Path) -> Result<(), PlaybackError>;
    /// Drop the loaded source, if any. Also bumps `generation`.
    fn unload(&mut self);
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);
    fn set_volume(&mut self, volume: f32);
    fn loaded_source(&self) -> Option<&Path>;
    fn generation(&self) -> u64;

    /// Filename of the loaded source, used to locate the current track.
    fn loaded_filename(&self) -> Option<&str> {
        self.loaded_source()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
    }
}

/// Notifications emitted by an audio device.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    TimeUpdate {
        generation: u64,
        elapsed: Duration,
        duration: Option<Duration>,
    },
    Ended {
        generation: u64,
    },
    Error {
        generation: u64,
        detail: String,
    },
}

impl DeviceEvent {
    pub fn generation(&self) -> u64 {
        match self {
            DeviceEvent::TimeUpdate { generation, .. }
            | DeviceEvent::Ended { generation }
            | DeviceEvent::Error { generation, .. } => *generation,
        }
    }
}
