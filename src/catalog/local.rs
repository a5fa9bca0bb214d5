use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;
use crate::error::CatalogError;

use super::model::AlbumInfo;
use super::provider::CatalogProvider;

/// Catalog backed by a music directory with one sub-directory per album.
///
/// ```text
/// <root>/<album>/<track>.mp3
/// <root>/<album>/info.json
/// <root>/<album>/cover.jpg
/// ```
pub struct LocalCatalog {
    root: PathBuf,
    settings: LibrarySettings,
    extensions: Vec<String>,
}

impl LocalCatalog {
    pub fn new(root: impl Into<PathBuf>, settings: LibrarySettings) -> Self {
        let extensions = settings
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        Self {
            root: root.into(),
            settings,
            extensions,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an album directory, refusing ids that would escape the root.
    fn album_dir(&self, album_id: &str) -> Result<PathBuf, CatalogError> {
        let escapes = album_id.is_empty()
            || album_id == "."
            || album_id == ".."
            || album_id.contains(['/', '\\']);
        if escapes {
            return Err(CatalogError::NotFound(album_id.to_string()));
        }

        let dir = self.root.join(album_id);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(CatalogError::NotFound(album_id.to_string()))
        }
    }

    fn is_track_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|e| e == &ext)
            })
            .unwrap_or(false)
    }

    /// Immediate children of `dir`, sorted by file name.
    fn children(&self, dir: &Path) -> impl Iterator<Item = DirEntry> {
        let include_hidden = self.settings.include_hidden;
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| include_hidden || !is_hidden(e.path()))
            .filter_map(Result::ok)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn file_name_of(entry: &DirEntry) -> Option<String> {
    entry.file_name().to_str().map(str::to_string)
}

impl CatalogProvider for LocalCatalog {
    fn list_albums(&self) -> Result<Vec<String>, CatalogError> {
        let meta = fs::metadata(&self.root).map_err(|source| CatalogError::Fetch {
            path: self.root.clone(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(CatalogError::Fetch {
                path: self.root.clone(),
                source: io::Error::new(io::ErrorKind::NotADirectory, "music root is not a directory"),
            });
        }

        let albums: Vec<String> = self
            .children(&self.root)
            .filter(|e| e.file_type().is_dir())
            .filter_map(|e| file_name_of(&e))
            .collect();

        tracing::debug!(root = %self.root.display(), count = albums.len(), "listed albums");
        Ok(albums)
    }

    fn list_tracks(&self, album_id: &str) -> Result<Vec<String>, CatalogError> {
        let dir = self.album_dir(album_id)?;

        let tracks: Vec<String> = self
            .children(&dir)
            .filter(|e| e.file_type().is_file() && self.is_track_file(e.path()))
            .filter_map(|e| file_name_of(&e))
            .collect();

        tracing::debug!(album = album_id, count = tracks.len(), "listed tracks");
        Ok(tracks)
    }

    fn album_metadata(&self, album_id: &str) -> Result<AlbumInfo, CatalogError> {
        let dir = self.album_dir(album_id)?;
        let path = dir.join(&self.settings.info_file);

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CatalogError::NotFound(format!(
                    "{album_id}/{}",
                    self.settings.info_file
                )));
            }
            Err(source) => return Err(CatalogError::Fetch { path, source }),
        };

        let mut info: AlbumInfo =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Malformed {
                path: path.clone(),
                source,
            })?;

        let cover = dir.join(&self.settings.cover_file);
        info.cover = cover.is_file().then_some(cover);
        Ok(info)
    }

    fn track_source(&self, album_id: &str, filename: &str) -> PathBuf {
        self.root.join(album_id).join(filename)
    }
}
