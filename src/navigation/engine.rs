use crate::catalog::{Catalog, CatalogProvider};
use crate::error::CatalogError;
use crate::player::PlayerState;

/// What asked the engine for a decision.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    RequestNext,
    RequestPrevious,
    /// The loaded track played to its end.
    TrackEnded,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavigationDecision {
    PlayTrack { album: usize, track: usize },
    /// Nothing further to play.
    NoOp,
}

/// Decide what plays after `trigger`.
///
/// `loaded` is the filename the device currently holds; it is located in
/// `state.track_list` and an unknown or missing filename counts as position
/// `-1` ("before the first track"). Crossing into a neighbouring album fetches
/// its track list through `provider` when it isn't cached yet.
///
/// Nothing is mutated except the catalog's track-list cache. An `Err` means
/// the fetch failed and nothing should be played.
pub fn decide<P: CatalogProvider + ?Sized>(
    trigger: Trigger,
    state: &PlayerState,
    loaded: Option<&str>,
    catalog: &mut Catalog,
    provider: &P,
) -> Result<NavigationDecision, CatalogError> {
    let Some(album) = state.album_index.filter(|&a| a < catalog.len()) else {
        return Ok(NavigationDecision::NoOp);
    };

    let position = state
        .track_index(loaded)
        .map(|i| i as isize)
        .unwrap_or(-1);
    let len = state.track_list.len() as isize;

    let decision = match trigger {
        Trigger::RequestNext | Trigger::TrackEnded => {
            if position + 1 < len {
                NavigationDecision::PlayTrack {
                    album,
                    track: (position + 1) as usize,
                }
            } else if album + 1 < catalog.len() {
                first_track_of(album + 1, catalog, provider)?
            } else {
                if trigger == Trigger::TrackEnded {
                    tracing::info!("catalog exhausted, stopping");
                }
                NavigationDecision::NoOp
            }
        }
        Trigger::RequestPrevious => {
            if position >= 1 {
                NavigationDecision::PlayTrack {
                    album,
                    track: (position - 1) as usize,
                }
            } else if position == 0 && album >= 1 {
                last_track_of(album - 1, catalog, provider)?
            } else {
                NavigationDecision::NoOp
            }
        }
    };

    tracing::debug!(?trigger, ?loaded, album, ?decision, "navigation decision");
    Ok(decision)
}

fn first_track_of<P: CatalogProvider + ?Sized>(
    album: usize,
    catalog: &mut Catalog,
    provider: &P,
) -> Result<NavigationDecision, CatalogError> {
    let tracks = catalog.ensure_tracks(album, provider)?;
    Ok(if tracks.is_empty() {
        NavigationDecision::NoOp
    } else {
        NavigationDecision::PlayTrack { album, track: 0 }
    })
}

fn last_track_of<P: CatalogProvider + ?Sized>(
    album: usize,
    catalog: &mut Catalog,
    provider: &P,
) -> Result<NavigationDecision, CatalogError> {
    let tracks = catalog.ensure_tracks(album, provider)?;
    Ok(match tracks.len() {
        0 => NavigationDecision::NoOp,
        n => NavigationDecision::PlayTrack { album, track: n - 1 },
    })
}
