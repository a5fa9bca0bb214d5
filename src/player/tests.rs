use std::path::PathBuf;
use std::time::Duration;

use super::testing::FakeDevice;
use super::*;
use crate::catalog::Track;
use crate::catalog::testing::MemoryCatalog;
use crate::config::PlaybackSettings;
use crate::error::{PlaybackError, PlayerError};

type Controller = PlaybackController<MemoryCatalog, FakeDevice>;

fn started(provider: MemoryCatalog, default_album: Option<&str>) -> Controller {
    let mut c = PlaybackController::new(
        provider,
        FakeDevice::default(),
        PlaybackSettings::default(),
        default_album.map(str::to_string),
    );
    c.start().unwrap();
    c
}

fn loaded(c: &Controller) -> Option<&str> {
    c.device().loaded_filename()
}

fn ended(c: &mut Controller) -> Result<(), PlayerError> {
    let generation = c.device().generation();
    c.handle(PlayerEvent::Device(DeviceEvent::Ended { generation }))
}

fn tick(c: &mut Controller, elapsed: u64, duration: u64) {
    let generation = c.device().generation();
    c.handle(PlayerEvent::Device(DeviceEvent::TimeUpdate {
        generation,
        elapsed: Duration::from_secs(elapsed),
        duration: Some(Duration::from_secs(duration)),
    }))
    .unwrap();
}

fn names(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.filename.as_str()).collect()
}

#[test]
fn start_loads_first_track_without_playing() {
    let c = started(MemoryCatalog::ncs_lofi(), None);

    assert_eq!(c.state().album_index, Some(0));
    assert_eq!(names(&c.state().track_list), ["a.mp3", "b.mp3"]);
    assert_eq!(loaded(&c), Some("a.mp3"));
    assert_eq!(c.state().playback, PlaybackState::Paused);
    assert!(!c.device().playing);
    assert_eq!(c.device().loads, [PathBuf::from("/music/ncs/a.mp3")]);
}

#[test]
fn start_honours_default_album() {
    let c = started(MemoryCatalog::ncs_lofi(), Some("lofi"));
    assert_eq!(c.state().album_index, Some(1));
    assert_eq!(loaded(&c), Some("c.mp3"));
}

#[test]
fn start_with_unknown_default_album_falls_back_to_first() {
    let c = started(MemoryCatalog::ncs_lofi(), Some("jazz"));
    assert_eq!(c.state().album_index, Some(0));
}

#[test]
fn track_endings_walk_the_catalog_then_stop() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);

    ended(&mut c).unwrap();
    assert_eq!(loaded(&c), Some("b.mp3"));
    assert_eq!(c.state().playback, PlaybackState::Playing);

    ended(&mut c).unwrap();
    assert_eq!(c.state().album_index, Some(1));
    assert_eq!(names(&c.state().track_list), ["c.mp3"]);
    assert_eq!(loaded(&c), Some("c.mp3"));
    assert_eq!(c.device().loads.last(), Some(&PathBuf::from("/music/lofi/c.mp3")));

    // Last track of the last album: nothing new is loaded and the album stays
    // active. Only the transport follows the device, which has finished.
    let before = c.state().clone();
    ended(&mut c).unwrap();
    assert_eq!(c.state().album_index, before.album_index);
    assert_eq!(c.state().track_list, before.track_list);
    assert_eq!(loaded(&c), Some("c.mp3"));
    assert_eq!(c.state().playback, PlaybackState::Stopped);
    assert_eq!(c.device().loads.len(), 3);
}

#[test]
fn previous_from_first_track_returns_to_last_track_of_previous_album() {
    let mut c = started(MemoryCatalog::ncs_lofi(), Some("lofi"));

    c.handle(PlayerEvent::Previous).unwrap();
    assert_eq!(c.state().album_index, Some(0));
    assert_eq!(names(&c.state().track_list), ["a.mp3", "b.mp3"]);
    assert_eq!(loaded(&c), Some("b.mp3"));
    assert_eq!(c.now_playing(), Some((0, 1)));
}

#[test]
fn next_and_previous_at_catalog_edges_do_nothing() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);
    c.handle(PlayerEvent::Previous).unwrap();
    assert_eq!(c.device().loads.len(), 1);

    let mut c = started(MemoryCatalog::ncs_lofi(), Some("lofi"));
    c.handle(PlayerEvent::Next).unwrap();
    assert_eq!(c.device().loads.len(), 1);
    assert_eq!(loaded(&c), Some("c.mp3"));
}

#[test]
fn volume_is_clamped_and_forwarded() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);

    c.handle(PlayerEvent::SetVolume(-0.5)).unwrap();
    assert_eq!(c.state().volume(), 0.0);
    assert_eq!(c.device().volume, 0.0);

    c.handle(PlayerEvent::SetVolume(1.7)).unwrap();
    assert_eq!(c.state().volume(), 1.0);
    assert_eq!(c.device().volume, 1.0);

    c.handle(PlayerEvent::AdjustVolume(0.5)).unwrap();
    assert_eq!(c.state().volume(), 1.0);
}

#[test]
fn unmute_restores_fixed_level_not_previous_one() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);
    c.handle(PlayerEvent::SetVolume(0.4)).unwrap();

    c.handle(PlayerEvent::ToggleMute).unwrap();
    assert!(c.state().is_muted());
    assert_eq!(c.device().volume, 0.0);

    c.handle(PlayerEvent::ToggleMute).unwrap();
    assert_eq!(c.state().volume(), 0.1);
    assert_eq!(c.device().volume, 0.1);
}

#[test]
fn seeks_are_clamped_to_the_track() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);
    tick(&mut c, 10, 180);

    c.handle(PlayerEvent::Seek(Duration::from_secs(600))).unwrap();
    assert_eq!(c.state().elapsed, Duration::from_secs(180));

    c.handle(PlayerEvent::SeekFraction(0.5)).unwrap();
    assert_eq!(c.state().elapsed, Duration::from_secs(90));

    c.handle(PlayerEvent::SeekBy(-500)).unwrap();
    assert_eq!(c.state().elapsed, Duration::ZERO);

    c.handle(PlayerEvent::SeekBy(5)).unwrap();
    assert_eq!(c.state().elapsed, Duration::from_secs(5));

    assert_eq!(
        c.device().seeks,
        [180, 90, 0, 5].map(Duration::from_secs).to_vec()
    );
}

#[test]
fn seek_without_a_loaded_track_is_ignored() {
    let mut c = started(MemoryCatalog::new(&[]), None);
    c.handle(PlayerEvent::Seek(Duration::from_secs(3))).unwrap();
    assert!(c.device().seeks.is_empty());
}

#[test]
fn notifications_from_a_replaced_load_are_dropped() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);
    let stale = c.device().generation();
    c.handle(PlayerEvent::Next).unwrap();

    c.handle(PlayerEvent::Device(DeviceEvent::Ended { generation: stale }))
        .unwrap();
    assert_eq!(loaded(&c), Some("b.mp3"));

    c.handle(PlayerEvent::Device(DeviceEvent::TimeUpdate {
        generation: stale,
        elapsed: Duration::from_secs(42),
        duration: None,
    }))
    .unwrap();
    assert_eq!(c.state().elapsed, Duration::ZERO);
}

#[test]
fn time_updates_refresh_the_display_times() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);
    tick(&mut c, 30, 120);
    assert_eq!(c.state().elapsed, Duration::from_secs(30));
    assert_eq!(c.state().duration, Duration::from_secs(120));
    assert_eq!(c.state().progress(), 0.25);
}

#[test]
fn failed_load_stops_and_keeps_album() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);
    c.device_mut().broken.insert("b.mp3".into());

    let err = c.handle(PlayerEvent::Next).unwrap_err();
    assert!(matches!(err, PlayerError::Playback(PlaybackError::Open { .. })));
    assert_eq!(c.state().playback, PlaybackState::Stopped);
    assert_eq!(c.state().album_index, Some(0));
    assert_eq!(loaded(&c), None);

    // Nothing matches the (empty) loaded filename, so next starts over.
    c.handle(PlayerEvent::Next).unwrap();
    assert_eq!(loaded(&c), Some("a.mp3"));
}

#[test]
fn failed_cross_album_load_keeps_previous_album_active() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);
    c.handle(PlayerEvent::Next).unwrap();
    c.device_mut().broken.insert("c.mp3".into());

    assert!(c.handle(PlayerEvent::Next).is_err());
    assert_eq!(c.state().album_index, Some(0));
    assert_eq!(names(&c.state().track_list), ["a.mp3", "b.mp3"]);
}

#[test]
fn refused_play_leaves_track_loaded_but_stopped() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);
    c.device_mut().refuse_play = true;

    assert!(c.handle(PlayerEvent::Next).is_err());
    assert_eq!(loaded(&c), Some("b.mp3"));
    assert_eq!(c.state().playback, PlaybackState::Stopped);
}

#[test]
fn device_error_stops_playback() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);
    c.handle(PlayerEvent::TogglePlayPause).unwrap();

    let generation = c.device().generation();
    let err = c
        .handle(PlayerEvent::Device(DeviceEvent::Error {
            generation,
            detail: "decoder gave up".into(),
        }))
        .unwrap_err();
    assert!(err.to_string().contains("decoder gave up"));
    assert_eq!(c.state().playback, PlaybackState::Stopped);
}

#[test]
fn fetch_failure_while_crossing_albums_changes_nothing() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);
    c.handle(PlayerEvent::Next).unwrap();
    c.provider().fail("lofi");

    let err = c.handle(PlayerEvent::Next).unwrap_err();
    assert!(matches!(err, PlayerError::Catalog(_)));
    assert_eq!(c.state().album_index, Some(0));
    assert_eq!(loaded(&c), Some("b.mp3"));

    c.provider().heal("lofi");
    c.handle(PlayerEvent::Next).unwrap();
    assert_eq!(loaded(&c), Some("c.mp3"));
}

#[test]
fn play_pause_toggles_the_loaded_track() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);

    c.handle(PlayerEvent::TogglePlayPause).unwrap();
    assert_eq!(c.state().playback, PlaybackState::Playing);
    assert!(c.device().playing);
    assert_eq!(c.device().loads.len(), 1);

    c.handle(PlayerEvent::TogglePlayPause).unwrap();
    assert_eq!(c.state().playback, PlaybackState::Paused);
    assert!(!c.device().playing);
}

#[test]
fn play_after_catalog_end_restarts_last_track() {
    let mut c = started(MemoryCatalog::ncs_lofi(), Some("lofi"));
    ended(&mut c).unwrap();
    assert_eq!(c.state().playback, PlaybackState::Stopped);

    c.handle(PlayerEvent::TogglePlayPause).unwrap();
    assert_eq!(loaded(&c), Some("c.mp3"));
    assert_eq!(c.device().loads.len(), 2);
    assert_eq!(c.state().playback, PlaybackState::Playing);
}

#[test]
fn play_album_starts_its_first_track() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);
    c.handle(PlayerEvent::PlayAlbum(1)).unwrap();
    assert_eq!(c.now_playing(), Some((1, 0)));
    assert_eq!(c.state().playback, PlaybackState::Playing);
}

#[test]
fn play_empty_album_stays_put() {
    let mut c = started(MemoryCatalog::new(&[("full", &["a.mp3"]), ("empty", &[])]), None);
    c.handle(PlayerEvent::PlayAlbum(1)).unwrap();
    assert_eq!(c.state().album_index, Some(0));
    assert_eq!(loaded(&c), Some("a.mp3"));
}

#[test]
fn out_of_range_selection_is_an_error() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);
    assert!(matches!(
        c.handle(PlayerEvent::PlayAlbum(7)),
        Err(PlayerError::NoSuchAlbum(7))
    ));
    assert!(matches!(
        c.handle(PlayerEvent::PlayTrack { album: 0, track: 9 }),
        Err(PlayerError::NoSuchTrack { album: 0, track: 9 })
    ));
    assert_eq!(loaded(&c), Some("a.mp3"));
}

#[test]
fn refresh_keeps_active_album_and_refetches_its_tracks() {
    let mut c = started(MemoryCatalog::ncs_lofi(), Some("lofi"));
    let fetches = c.provider().track_fetches();

    c.handle(PlayerEvent::RefreshCatalog).unwrap();
    assert_eq!(c.state().album_index, Some(1));
    assert_eq!(names(&c.state().track_list), ["c.mp3"]);
    assert_eq!(c.provider().track_fetches(), fetches + 1);
}

#[test]
fn refresh_to_empty_catalog_unloads_the_device() {
    let mut c = started(MemoryCatalog::ncs_lofi(), None);
    c.handle(PlayerEvent::TogglePlayPause).unwrap();
    tick(&mut c, 10, 180);

    c.provider().clear();
    c.handle(PlayerEvent::RefreshCatalog).unwrap();

    assert!(c.catalog().is_empty());
    assert_eq!(c.state().album_index, None);
    assert!(c.state().track_list.is_empty());
    assert_eq!(loaded(&c), None);
    assert!(!c.device().playing);
    assert_eq!(c.state().playback, PlaybackState::Stopped);
    assert_eq!(c.state().elapsed, Duration::ZERO);
    assert_eq!(c.now_playing(), None);

    // Nothing left to seek in or resume.
    c.handle(PlayerEvent::Seek(Duration::ZERO)).unwrap();
    assert!(c.device().seeks.is_empty());
    c.handle(PlayerEvent::TogglePlayPause).unwrap();
    assert_eq!(loaded(&c), None);
    assert_eq!(c.state().playback, PlaybackState::Stopped);
}

#[test]
fn empty_catalog_is_inert() {
    let mut c = started(MemoryCatalog::new(&[]), None);
    assert_eq!(c.state().album_index, None);

    for event in [
        PlayerEvent::Next,
        PlayerEvent::Previous,
        PlayerEvent::TogglePlayPause,
    ] {
        c.handle(event).unwrap();
    }
    assert!(c.device().loads.is_empty());
    assert_eq!(c.state().playback, PlaybackState::Stopped);
}
