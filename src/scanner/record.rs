use std::path::{Path, PathBuf};
use thiserror::Error;

use super::classify::{self, ClassifierTriple, ClassifyError};
use super::tags::{TagError, TagView};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Tag(#[from] TagError),
    #[error("bad comment in {path}: {source}")]
    Classify { path: String, source: ClassifyError },
}

/// Everything needed to route one file: the resolved title and artist plus
/// the validated classifier triple. Built once per source file, then
/// read-only.
#[derive(Debug)]
pub struct MetadataRecord {
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub classifiers: ClassifierTriple,
}

impl MetadataRecord {
    pub fn build(path: &Path) -> Result<Self, RecordError> {
        let view = TagView::open(path)?;
        Self::from_view(&view, path)
    }

    fn from_view(view: &TagView, path: &Path) -> Result<Self, RecordError> {
        // Artist first: it has no fallback, so its absence should surface
        // before any fallback logic runs.
        let artist = view.artist()?.to_string();

        let classifiers =
            classify::select(view.comments()).map_err(|source| RecordError::Classify {
                path: path.display().to_string(),
                source,
            })?;

        // Title falls back to the file name with the extension stripped.
        let title = match view.title() {
            Some(title) => title.to_string(),
            None => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };

        Ok(Self {
            path: path.to_path_buf(),
            title,
            artist,
            classifiers,
        })
    }
}
