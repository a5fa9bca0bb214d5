use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::error::PlaybackError;
use crate::player::{AudioDevice, DeviceEvent};

use super::sink::probe;
use super::thread::spawn_audio_thread;
use super::types::AudioCmd;

/// Handle to the audio thread.
pub struct RodioDevice {
    tx: Sender<AudioCmd>,
    join: Option<JoinHandle<()>>,
    source: Option<PathBuf>,
    generation: u64,
}

impl RodioDevice {
    /// Open the default output and start the audio thread.
    ///
    /// Returns the device plus the receiving end of its notifications.
    pub fn spawn(settings: &AudioSettings) -> Result<(Self, Receiver<DeviceEvent>), PlaybackError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<DeviceEvent>();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);

        let tick = Duration::from_millis(settings.tick_ms.max(1));
        let join = spawn_audio_thread(rx, events_tx, ready_tx, tick);

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = join.join();
                return Err(e);
            }
            Err(_) => return Err(PlaybackError::Disconnected),
        }
        tracing::info!(tick_ms = settings.tick_ms, "audio output ready");

        let device = Self {
            tx,
            join: Some(join),
            source: None,
            generation: 0,
        };
        Ok((device, events_rx))
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), PlaybackError> {
        self.tx.send(cmd).map_err(|_| PlaybackError::Disconnected)
    }

    /// Fade out, stop the audio thread and wait for it.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl AudioDevice for RodioDevice {
    fn load(&mut self, source: &Path) -> Result<(), PlaybackError> {
        self.generation += 1;
        self.source = None;

        let duration = match probe(source) {
            Ok(duration) => duration,
            Err(e) => {
                let _ = self.send(AudioCmd::Stop);
                return Err(e);
            }
        };

        self.send(AudioCmd::Load {
            path: source.to_path_buf(),
            generation: self.generation,
            duration,
        })?;
        self.source = Some(source.to_path_buf());
        Ok(())
    }

    fn unload(&mut self) {
        self.generation += 1;
        self.source = None;
        let _ = self.send(AudioCmd::Stop);
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.source.is_none() {
            return Ok(());
        }
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) {
        let _ = self.send(AudioCmd::Pause);
    }

    fn seek(&mut self, position: Duration) {
        let _ = self.send(AudioCmd::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.send(AudioCmd::SetVolume(volume));
    }

    fn loaded_source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}
