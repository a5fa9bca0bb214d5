use std::path::PathBuf;

use crate::error::CatalogError;

use super::model::AlbumInfo;

/// Source of album identifiers, track filenames and album metadata.
///
/// Every listing is returned in the provider's order; callers never re-sort.
pub trait CatalogProvider {
    /// Ordered album identifiers.
    fn list_albums(&self) -> Result<Vec<String>, CatalogError>;

    /// Ordered track filenames of one album.
    fn list_tracks(&self, album_id: &str) -> Result<Vec<String>, CatalogError>;

    fn album_metadata(&self, album_id: &str) -> Result<AlbumInfo, CatalogError>;

    /// Resolve a track to something the audio device can load.
    fn track_source(&self, album_id: &str, filename: &str) -> PathBuf;
}
