//! Playback controller: the single place where player events turn into device
//! commands and state changes.

use std::time::Duration;

use crate::catalog::{Catalog, CatalogProvider, Track};
use crate::config::PlaybackSettings;
use crate::error::{PlaybackError, PlayerError};
use crate::navigation::{NavigationDecision, Trigger, decide};

use super::device::{AudioDevice, DeviceEvent};
use super::state::{PlaybackState, PlayerState};

/// Everything that can change what the player is doing.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Next,
    Previous,
    TogglePlayPause,
    /// Switch to an album and play its first track.
    PlayAlbum(usize),
    PlayTrack {
        album: usize,
        track: usize,
    },
    Seek(Duration),
    /// Seek to a fraction (`0.0..=1.0`) of the loaded track.
    SeekFraction(f64),
    /// Scrub by whole seconds, backwards when negative.
    SeekBy(i64),
    SetVolume(f32),
    AdjustVolume(f32),
    ToggleMute,
    RefreshCatalog,
    Device(DeviceEvent),
}

pub struct PlaybackController<P, D> {
    provider: P,
    device: D,
    catalog: Catalog,
    state: PlayerState,
    default_album: Option<String>,
}

impl<P: CatalogProvider, D: AudioDevice> PlaybackController<P, D> {
    pub fn new(
        provider: P,
        mut device: D,
        settings: PlaybackSettings,
        default_album: Option<String>,
    ) -> Self {
        let state = PlayerState::new(settings.initial_volume);
        device.set_volume(state.volume());

        Self {
            provider,
            device,
            catalog: Catalog::default(),
            state,
            default_album,
        }
    }

    /// Load the catalog, select the startup album and load (without playing)
    /// its first track.
    pub fn start(&mut self) -> Result<(), PlayerError> {
        self.catalog = Catalog::load(&self.provider)?;

        let Some(album) = self.catalog.initial_album(self.default_album.as_deref()) else {
            tracing::info!("catalog is empty, nothing to play");
            return Ok(());
        };

        let tracks = self.catalog.ensure_tracks(album, &self.provider)?.to_vec();
        let has_tracks = !tracks.is_empty();
        self.state.switch_album(album, tracks);

        if has_tracks {
            self.play_track(album, 0, false)?;
        }
        Ok(())
    }

    /// Apply one event. Errors are reportable; the player stays usable and the
    /// state is left as it was before the failing step.
    pub fn handle(&mut self, event: PlayerEvent) -> Result<(), PlayerError> {
        match event {
            PlayerEvent::Next => self.navigate(Trigger::RequestNext),
            PlayerEvent::Previous => self.navigate(Trigger::RequestPrevious),
            PlayerEvent::TogglePlayPause => self.toggle_play_pause(),
            PlayerEvent::PlayAlbum(album) => self.play_album(album),
            PlayerEvent::PlayTrack { album, track } => self.play_track(album, track, true),
            PlayerEvent::Seek(target) => {
                self.seek(target);
                Ok(())
            }
            PlayerEvent::SeekFraction(fraction) => {
                let fraction = if fraction.is_nan() {
                    0.0
                } else {
                    fraction.clamp(0.0, 1.0)
                };
                self.seek(self.state.duration.mul_f64(fraction));
                Ok(())
            }
            PlayerEvent::SeekBy(secs) => {
                let delta = Duration::from_secs(secs.unsigned_abs());
                let target = if secs < 0 {
                    self.state.elapsed.saturating_sub(delta)
                } else {
                    self.state.elapsed.saturating_add(delta)
                };
                self.seek(target);
                Ok(())
            }
            PlayerEvent::SetVolume(volume) => {
                self.set_volume(volume);
                Ok(())
            }
            PlayerEvent::AdjustVolume(delta) => {
                self.set_volume(self.state.volume() + delta);
                Ok(())
            }
            PlayerEvent::ToggleMute => {
                let volume = self.state.toggle_mute();
                self.device.set_volume(volume);
                Ok(())
            }
            PlayerEvent::RefreshCatalog => self.refresh_catalog(),
            PlayerEvent::Device(ev) => self.on_device_event(ev),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// `(album, track)` of the loaded track, if it belongs to the active album.
    pub fn now_playing(&self) -> Option<(usize, usize)> {
        let album = self.state.album_index?;
        let track = self.state.track_index(self.device.loaded_filename())?;
        Some((album, track))
    }

    /// Track list of any album, fetched on first visit.
    pub fn browse(&mut self, album: usize) -> Result<&[Track], PlayerError> {
        if album >= self.catalog.len() {
            return Err(PlayerError::NoSuchAlbum(album));
        }
        Ok(self.catalog.ensure_tracks(album, &self.provider)?)
    }

    fn navigate(&mut self, trigger: Trigger) -> Result<(), PlayerError> {
        let decision = decide(
            trigger,
            &self.state,
            self.device.loaded_filename(),
            &mut self.catalog,
            &self.provider,
        )?;

        match decision {
            NavigationDecision::PlayTrack { album, track } => self.play_track(album, track, true),
            NavigationDecision::NoOp => Ok(()),
        }
    }

    fn play_album(&mut self, album: usize) -> Result<(), PlayerError> {
        if self.browse(album)?.is_empty() {
            tracing::info!(album, "album has no tracks, staying put");
            return Ok(());
        }
        self.play_track(album, 0, true)
    }

    /// Load `(album, track)` into the device, switching the active album first
    /// if needed, and start it unless `autoplay` is false.
    fn play_track(&mut self, album: usize, track: usize, autoplay: bool) -> Result<(), PlayerError> {
        let album_id = self
            .catalog
            .album(album)
            .ok_or(PlayerError::NoSuchAlbum(album))?
            .id
            .clone();

        let switched_tracks = if self.state.album_index == Some(album) {
            None
        } else {
            Some(self.catalog.ensure_tracks(album, &self.provider)?.to_vec())
        };
        let list = switched_tracks.as_deref().unwrap_or(&self.state.track_list);
        let filename = list
            .get(track)
            .ok_or(PlayerError::NoSuchTrack { album, track })?
            .filename
            .clone();
        let source = self.provider.track_source(&album_id, &filename);

        if let Err(e) = self.device.load(&source) {
            self.state.playback = PlaybackState::Stopped;
            self.state.reset_times();
            return Err(e.into());
        }

        if let Some(tracks) = switched_tracks {
            tracing::info!(album = %album_id, tracks = tracks.len(), "switched album");
            self.state.switch_album(album, tracks);
        }
        self.state.reset_times();
        tracing::debug!(album = %album_id, track = %filename, autoplay, "loaded track");

        if autoplay {
            self.start_playback()
        } else {
            self.state.playback = PlaybackState::Paused;
            Ok(())
        }
    }

    fn start_playback(&mut self) -> Result<(), PlayerError> {
        match self.device.play() {
            Ok(()) => {
                self.state.playback = PlaybackState::Playing;
                Ok(())
            }
            Err(e) => {
                self.state.playback = PlaybackState::Stopped;
                Err(e.into())
            }
        }
    }

    fn toggle_play_pause(&mut self) -> Result<(), PlayerError> {
        match self.state.playback {
            PlaybackState::Playing => {
                self.device.pause();
                self.state.playback = PlaybackState::Paused;
                Ok(())
            }
            PlaybackState::Paused if self.device.loaded_source().is_some() => {
                self.start_playback()
            }
            // Nothing loaded, finished, or failed: (re)load from the start.
            _ => {
                let Some(album) = self.state.album_index else {
                    return Ok(());
                };
                if self.state.track_list.is_empty() {
                    return Ok(());
                }
                let track = self
                    .state
                    .track_index(self.device.loaded_filename())
                    .unwrap_or(0);
                self.play_track(album, track, true)
            }
        }
    }

    fn seek(&mut self, target: Duration) {
        if self.device.loaded_source().is_none() {
            return;
        }
        let position = self.state.clamp_seek(target);
        self.device.seek(position);
        self.state.elapsed = position;
    }

    fn set_volume(&mut self, volume: f32) {
        let volume = self.state.set_volume(volume);
        self.device.set_volume(volume);
    }

    /// Replace the catalog wholesale, keeping the active album when it still exists.
    fn refresh_catalog(&mut self) -> Result<(), PlayerError> {
        let current_id = self
            .state
            .album_index
            .and_then(|i| self.catalog.album(i))
            .map(|a| a.id.clone());

        let mut catalog = Catalog::load(&self.provider)?;
        let album = current_id
            .as_deref()
            .and_then(|id| catalog.index_of(id))
            .or_else(|| catalog.initial_album(self.default_album.as_deref()));

        match album {
            Some(album) => {
                let tracks = catalog.ensure_tracks(album, &self.provider)?.to_vec();
                self.catalog = catalog;
                self.state.switch_album(album, tracks);
            }
            None => {
                self.catalog = catalog;
                self.state.album_index = None;
                self.state.track_list.clear();
                self.device.unload();
                self.state.reset_times();
                self.state.playback = PlaybackState::Stopped;
                tracing::info!("catalog is empty after rescan, unloaded current track");
            }
        }
        Ok(())
    }

    fn on_device_event(&mut self, ev: DeviceEvent) -> Result<(), PlayerError> {
        if ev.generation() != self.device.generation() {
            tracing::trace!(?ev, "dropping notification from a replaced load");
            return Ok(());
        }

        match ev {
            DeviceEvent::TimeUpdate {
                elapsed, duration, ..
            } => {
                self.state.update_times(elapsed, duration);
                Ok(())
            }
            DeviceEvent::Ended { .. } => {
                // The device has finished either way; a following track flips
                // this back to Playing.
                self.state.playback = PlaybackState::Stopped;
                self.navigate(Trigger::TrackEnded)
            }
            DeviceEvent::Error { detail, .. } => {
                self.state.playback = PlaybackState::Stopped;
                Err(PlaybackError::Device(detail).into())
            }
        }
    }
}
