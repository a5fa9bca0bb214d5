use std::path::PathBuf;

use serde::Deserialize;

use super::title::display_title;

/// Album metadata as stored in the album's info file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlbumInfo {
    pub title: String,
    pub description: String,
    /// Filled in by the provider, never read from the info file.
    #[serde(skip)]
    pub cover: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub description: String,
    pub cover: Option<PathBuf>,
}

impl Album {
    pub fn new(id: String, info: Option<AlbumInfo>) -> Self {
        match info {
            Some(info) => {
                let title = if info.title.trim().is_empty() {
                    id.clone()
                } else {
                    info.title
                };
                Self {
                    id,
                    title,
                    description: info.description,
                    cover: info.cover,
                }
            }
            None => Self {
                title: id.clone(),
                id,
                description: String::new(),
                cover: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub filename: String,
}

impl Track {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }

    pub fn display_title(&self) -> String {
        display_title(&self.filename)
    }
}
