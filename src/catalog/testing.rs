//! In-memory catalog provider for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::io;
use std::path::PathBuf;

use crate::error::CatalogError;

use super::model::AlbumInfo;
use super::provider::CatalogProvider;

pub(crate) struct MemoryCatalog {
    albums: RefCell<Vec<(String, Vec<String>)>>,
    track_fetches: Cell<usize>,
    failing: RefCell<HashSet<String>>,
}

impl MemoryCatalog {
    pub(crate) fn new(albums: &[(&str, &[&str])]) -> Self {
        Self {
            albums: RefCell::new(
                albums
                    .iter()
                    .map(|(id, tracks)| {
                        (
                            id.to_string(),
                            tracks.iter().map(|t| t.to_string()).collect(),
                        )
                    })
                    .collect(),
            ),
            track_fetches: Cell::new(0),
            failing: RefCell::new(HashSet::new()),
        }
    }

    /// `[ncs: a.mp3, b.mp3], [lofi: c.mp3]`
    pub(crate) fn ncs_lofi() -> Self {
        Self::new(&[("ncs", &["a.mp3", "b.mp3"]), ("lofi", &["c.mp3"])])
    }

    /// Number of `list_tracks` calls served so far.
    pub(crate) fn track_fetches(&self) -> usize {
        self.track_fetches.get()
    }

    /// Make `list_tracks` for `album_id` fail until `heal` is called.
    pub(crate) fn fail(&self, album_id: &str) {
        self.failing.borrow_mut().insert(album_id.to_string());
    }

    pub(crate) fn heal(&self, album_id: &str) {
        self.failing.borrow_mut().remove(album_id);
    }

    /// Drop every album, as if the music directory was emptied.
    pub(crate) fn clear(&self) {
        self.albums.borrow_mut().clear();
    }
}

impl CatalogProvider for MemoryCatalog {
    fn list_albums(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.albums.borrow().iter().map(|(id, _)| id.clone()).collect())
    }

    fn list_tracks(&self, album_id: &str) -> Result<Vec<String>, CatalogError> {
        self.track_fetches.set(self.track_fetches.get() + 1);
        if self.failing.borrow().contains(album_id) {
            return Err(CatalogError::Fetch {
                path: PathBuf::from(album_id),
                source: io::Error::other("simulated outage"),
            });
        }
        self.albums
            .borrow()
            .iter()
            .find(|(id, _)| id == album_id)
            .map(|(_, tracks)| tracks.clone())
            .ok_or_else(|| CatalogError::NotFound(album_id.to_string()))
    }

    fn album_metadata(&self, album_id: &str) -> Result<AlbumInfo, CatalogError> {
        Ok(AlbumInfo {
            title: album_id.to_uppercase(),
            description: format!("{album_id} songs"),
            cover: None,
        })
    }

    fn track_source(&self, album_id: &str, filename: &str) -> PathBuf {
        PathBuf::from("/music").join(album_id).join(filename)
    }
}
