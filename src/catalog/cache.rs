use crate::error::CatalogError;

use super::model::{Album, Track};
use super::provider::CatalogProvider;

struct Entry {
    album: Album,
    /// `None` until the album's track list has been fetched once.
    tracks: Option<Vec<Track>>,
}

/// Ordered albums with lazily fetched track lists.
///
/// Album order is exactly the provider's order. Albums and their metadata are
/// never edited in place; a refresh replaces the whole catalog.
#[derive(Default)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    /// Fetch the album list and every album's metadata.
    ///
    /// An album whose metadata can't be read stays in the catalog (titled by
    /// its id) so navigation still walks through it.
    pub fn load<P: CatalogProvider + ?Sized>(provider: &P) -> Result<Self, CatalogError> {
        let ids = provider.list_albums()?;
        let entries = ids
            .into_iter()
            .map(|id| {
                let info = match provider.album_metadata(&id) {
                    Ok(info) => Some(info),
                    Err(e) => {
                        tracing::warn!(album = %id, error = %e, "album metadata unavailable");
                        None
                    }
                };
                Entry {
                    album: Album::new(id, info),
                    tracks: None,
                }
            })
            .collect::<Vec<_>>();

        tracing::info!(albums = entries.len(), "catalog loaded");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn album(&self, index: usize) -> Option<&Album> {
        self.entries.get(index).map(|e| &e.album)
    }

    pub fn albums(&self) -> impl Iterator<Item = &Album> {
        self.entries.iter().map(|e| &e.album)
    }

    pub fn index_of(&self, album_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.album.id == album_id)
    }

    /// Album selected at startup: `default_album` when present, else the first album.
    pub fn initial_album(&self, default_album: Option<&str>) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        default_album.and_then(|id| self.index_of(id)).or(Some(0))
    }

    /// Cached track list, if the album has been visited.
    pub fn tracks(&self, index: usize) -> Option<&[Track]> {
        self.entries.get(index).and_then(|e| e.tracks.as_deref())
    }

    /// Return the album's track list, fetching it through `provider` on first use.
    ///
    /// A failed fetch leaves the cache untouched.
    pub fn ensure_tracks<P: CatalogProvider + ?Sized>(
        &mut self,
        index: usize,
        provider: &P,
    ) -> Result<&[Track], CatalogError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or_else(|| CatalogError::NotFound(format!("album #{index}")))?;

        if entry.tracks.is_none() {
            let names = provider.list_tracks(&entry.album.id)?;
            entry.tracks = Some(names.into_iter().map(Track::new).collect());
        }

        Ok(entry.tracks.as_deref().unwrap_or_default())
    }
}
