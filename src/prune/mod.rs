//! Removes downloaded images that are too small or have the wrong shape.
//!
//! Only image files directly inside the folder are judged, going by the same
//! suffixes the lister accepts. Only the image header is read. Images that
//! cannot be decoded at all are treated as corrupt and removed as well.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::app::{GrabError, Result};
use crate::config::ResolutionConfig;
use crate::lister::has_accepted_suffix;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneReport {
    pub files_scanned: usize,
    pub removed_small: Vec<PathBuf>,
    pub removed_aspect: Vec<PathBuf>,
    pub removed_corrupt: Vec<PathBuf>,
    pub failed_deletions: usize,
}

impl PruneReport {
    pub fn removed(&self) -> usize {
        self.removed_small.len() + self.removed_aspect.len() + self.removed_corrupt.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Keep,
    TooSmall,
    WrongAspect,
    Corrupt,
}

fn judge(path: &Path, rule: &ResolutionConfig) -> Verdict {
    let (width, height) = match image::image_dimensions(path) {
        Ok(dimensions) => dimensions,
        Err(e) => {
            warn!("Could not read image {}: {}", path.display(), e);
            return Verdict::Corrupt;
        }
    };

    if width < rule.min_width || height < rule.min_height {
        return Verdict::TooSmall;
    }

    match rule.aspect {
        Some(aspect) if !aspect.matches(width, height) => Verdict::WrongAspect,
        _ => Verdict::Keep,
    }
}

pub fn prune_by_resolution(folder: &Path, rule: &ResolutionConfig) -> Result<PruneReport> {
    let mut report = PruneReport::default();

    for entry in WalkDir::new(folder).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| GrabError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !has_accepted_suffix(&entry.file_name().to_string_lossy()) {
            continue;
        }

        report.files_scanned += 1;
        let path = entry.into_path();

        let bucket = match judge(&path, rule) {
            Verdict::Keep => continue,
            Verdict::TooSmall => &mut report.removed_small,
            Verdict::WrongAspect => &mut report.removed_aspect,
            Verdict::Corrupt => &mut report.removed_corrupt,
        };

        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!("Removed {} (resolution rule)", path.display());
                bucket.push(path);
            }
            Err(e) => {
                let e = GrabError::DeleteFailed { path, source: e };
                warn!("{}", e);
                report.failed_deletions += 1;
            }
        }
    }

    Ok(report)
}
