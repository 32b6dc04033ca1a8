use lofty::file::{FileType, TaggedFileExt};
use lofty::tag::{ItemKey, Tag};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    /// The container could not be parsed, or carried no tags at all.
    #[error("unreadable tag container in {path}: {message}")]
    Unreadable { path: String, message: String },
    /// No artist tag. Unlike the title there is no sensible substitute,
    /// so absence fails the file.
    #[error("no artist tag in {path}")]
    MissingArtist { path: String },
}

/// Read-only view over one audio file's tag container.
///
/// MP4-like containers expose keyed atoms holding at most one value;
/// everything else exposes frames, and comment frames may repeat. Both
/// families answer the same three questions here, so the container format
/// never leaks past this module.
pub struct TagView {
    pub(crate) path: PathBuf,
    pub(crate) container: Container,
}

impl std::fmt::Debug for TagView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagView")
            .field("path", &self.path)
            .field("container", &self.container)
            .finish()
    }
}

pub(crate) enum Container {
    /// MP4-like container: keyed single-valued atoms.
    Atoms(Tag),
    /// Frame-based container: frames, repeatable.
    Frames(Tag),
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Container::Atoms(_) => write!(f, "Container::Atoms(..)"),
            Container::Frames(_) => write!(f, "Container::Frames(..)"),
        }
    }
}

impl TagView {
    pub fn open(path: &Path) -> Result<Self, TagError> {
        let tagged = lofty::read_from_path(path).map_err(|e| TagError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let tag = tagged
            .primary_tag()
            .or_else(|| tagged.first_tag())
            .cloned()
            .ok_or_else(|| TagError::Unreadable {
                path: path.display().to_string(),
                message: "no tags present".to_string(),
            })?;

        let container = match tagged.file_type() {
            FileType::Mp4 => Container::Atoms(tag),
            _ => Container::Frames(tag),
        };

        Ok(Self { path: path.to_path_buf(), container })
    }

    fn tag(&self) -> &Tag {
        match &self.container {
            Container::Atoms(tag) | Container::Frames(tag) => tag,
        }
    }

    /// Title tag, if present. No fallback at this layer.
    pub fn title(&self) -> Option<&str> {
        self.tag().get_string(&ItemKey::TrackTitle)
    }

    pub fn artist(&self) -> Result<&str, TagError> {
        self.tag()
            .get_string(&ItemKey::TrackArtist)
            .ok_or_else(|| TagError::MissingArtist {
                path: self.path.display().to_string(),
            })
    }

    /// Every candidate comment, in container order. Atom containers carry
    /// at most one; frame containers may carry several.
    pub fn comments(&self) -> Vec<&str> {
        match &self.container {
            Container::Atoms(tag) => tag.get_string(&ItemKey::Comment).into_iter().collect(),
            Container::Frames(tag) => tag.get_strings(&ItemKey::Comment).collect(),
        }
    }
}
