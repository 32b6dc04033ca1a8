use std::path::{Path, PathBuf};

use super::record::MetadataRecord;

/// Longest file name we emit, not counting the re-attached extension.
/// Leaves headroom under common 255-byte name limits.
const MAX_NAME_LEN: usize = 250;

/// Characters Windows and SMB shares refuse in file names.
const RESERVED: &[char] = &['<', '>', ':', '"', '/', '|', '\\', '?', '*'];

/// Where one classified record lands below the destination root.
#[derive(Debug, PartialEq, Eq)]
pub struct DestinationPath {
    /// Nested directory segments, stage/clarity/genre order.
    pub segments: [&'static str; 3],
    pub file_name: String,
}

impl DestinationPath {
    pub fn resolve(&self, root: &Path) -> PathBuf {
        let mut full = root.to_path_buf();
        for segment in self.segments {
            full.push(segment);
        }
        full.push(&self.file_name);
        full
    }
}

/// Derive the destination for a classified record. Same-named outputs are
/// possible; the copy step lets the last one win.
pub fn route(record: &MetadataRecord) -> DestinationPath {
    let mut name = sanitize(&format!("{} - {}", record.title, record.artist));
    if name.len() > MAX_NAME_LEN {
        log::warn!(
            "Truncating long destination name for {}",
            record.path.display()
        );
        name.truncate(MAX_NAME_LEN);
    }

    let file_name = match record.path.extension() {
        Some(ext) => format!("{name}.{}", ext.to_string_lossy()),
        None => name,
    };

    DestinationPath {
        segments: record.classifiers.segments(),
        file_name,
    }
}

/// Replace anything outside printable ASCII with `?`, then swap the
/// reserved characters (including any `?` the first pass introduced) for
/// `!`. Idempotent on names that are already clean.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, ' '..='~') { c } else { '?' })
        .map(|c| if RESERVED.contains(&c) { '!' } else { c })
        .collect()
}
