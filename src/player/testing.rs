//! Scriptable audio device for unit tests.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::PlaybackError;

use super::device::AudioDevice;

/// Records every call; `broken` filenames fail to load and `refuse_play`
/// makes `play` fail.
#[derive(Default)]
pub(crate) struct FakeDevice {
    pub(crate) source: Option<PathBuf>,
    pub(crate) generation: u64,
    pub(crate) playing: bool,
    pub(crate) volume: f32,
    pub(crate) seeks: Vec<Duration>,
    pub(crate) loads: Vec<PathBuf>,
    pub(crate) broken: HashSet<String>,
    pub(crate) refuse_play: bool,
}

impl AudioDevice for FakeDevice {
    fn load(&mut self, source: &Path) -> Result<(), PlaybackError> {
        self.generation += 1;
        self.playing = false;
        self.loads.push(source.to_path_buf());

        let name = source.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if self.broken.contains(name) {
            self.source = None;
            return Err(PlaybackError::Open {
                path: source.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        self.source = Some(source.to_path_buf());
        Ok(())
    }

    fn unload(&mut self) {
        self.generation += 1;
        self.playing = false;
        self.source = None;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.refuse_play {
            return Err(PlaybackError::Device("playback refused".into()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, position: Duration) {
        self.seeks.push(position);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn loaded_source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}
