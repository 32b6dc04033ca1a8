pub mod classify;
pub mod record;
pub mod route;
pub mod tags;

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use walkdir::WalkDir;

use crate::scanner::record::{MetadataRecord, RecordError};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to list {path}: {source}")]
    List {
        path: String,
        source: walkdir::Error,
    },
    #[error("failed to reset destination {path}: {source}")]
    Reset {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("copy to {path} failed: {source}")]
    Copy {
        path: String,
        source: std::io::Error,
    },
}

pub struct ScanResult {
    pub scanned: u64,
    pub copied: u64,
    pub failed: u64,
}

/// Classify every file directly under `source` and copy it into the
/// rebuilt tree below `dest`.
///
/// The destination is destroyed and recreated first, so two runs over an
/// unchanged source produce identical trees. Files that cannot be
/// classified are reported and skipped; only failing to enumerate the
/// source (or reset the destination) aborts the run. With `dry_run` the
/// filesystem is left untouched and planned copies are printed instead.
pub fn run(source: &Path, dest: &Path, dry_run: bool) -> Result<ScanResult, ScanError> {
    if !dry_run {
        reset_dest(dest)?;
    }

    // Immediate entries only; anything that is not a regular file (after
    // following symlinks) is not part of the input set.
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(source).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| ScanError::List {
            path: source.display().to_string(),
            source: e,
        })?;
        if entry.path().is_file() {
            files.push(entry.into_path());
        }
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}) {msg}",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb.set_message("Sorting...");

    let mut result = ScanResult {
        scanned: 0,
        copied: 0,
        failed: 0,
    };

    for path in &files {
        result.scanned += 1;

        match process_file(path, dest, dry_run) {
            Ok(target) => {
                result.copied += 1;
                if dry_run {
                    pb.println(format!("{} -> {}", path.display(), target.display()));
                }
            }
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                result.failed += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message(format!(
        "Done: {} copied, {} failed",
        result.copied, result.failed
    ));

    Ok(result)
}

/// Classify one file and copy it to its destination. Returns the target
/// path; with `dry_run` the copy is skipped.
fn process_file(path: &Path, dest_root: &Path, dry_run: bool) -> Result<PathBuf, ScanError> {
    let record = MetadataRecord::build(path)?;
    let target = route::route(&record).resolve(dest_root);

    if dry_run {
        return Ok(target);
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| ScanError::Copy {
            path: target.display().to_string(),
            source: e,
        })?;
    }
    // Overwrites an earlier file that routed to the same name.
    fs::copy(path, &target).map_err(|e| ScanError::Copy {
        path: target.display().to_string(),
        source: e,
    })?;
    log::debug!("copy: {} -> {}", path.display(), target.display());

    Ok(target)
}

/// Destroy and recreate the destination root. A missing tree is fine.
fn reset_dest(dest: &Path) -> Result<(), ScanError> {
    match fs::remove_dir_all(dest) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(ScanError::Reset {
                path: dest.display().to_string(),
                source: e,
            });
        }
    }
    fs::create_dir_all(dest).map_err(|e| ScanError::Reset {
        path: dest.display().to_string(),
        source: e,
    })
}
