//! Content-addressed duplicate removal over a download folder.
//!
//! Runs strictly after the pipeline has drained. Every regular file under the
//! folder is hashed first; only when the whole folder hashed cleanly are
//! duplicates deleted, keeping the first path of each group in walk order.
//! The walk is sorted by file name so the surviving file is stable.

mod hasher;

pub use hasher::hash_file;

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::app::{GrabError, Result};
use crate::domain::{DuplicateGroup, FileDigest};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DedupReport {
    pub files_scanned: usize,
    pub duplicate_groups: usize,
    pub removed: Vec<PathBuf>,
    pub failed_deletions: usize,
}

pub fn deduplicate(folder: &Path) -> Result<DedupReport> {
    deduplicate_with(folder, hash_file)
}

pub fn deduplicate_with<H>(folder: &Path, hash: H) -> Result<DedupReport>
where
    H: Fn(&Path) -> Result<FileDigest>,
{
    let (files_scanned, groups) = group_by_digest(folder, hash)?;

    let mut report = DedupReport {
        files_scanned,
        ..Default::default()
    };

    for group in groups.iter().filter(|g| g.is_duplicate()) {
        report.duplicate_groups += 1;

        for path in group.redundant() {
            match remove(path) {
                Ok(()) => {
                    info!(
                        "Removed duplicate {} (kept {})",
                        path.display(),
                        group.keeper().display()
                    );
                    report.removed.push(path.clone());
                }
                Err(e) => {
                    warn!("{}", e);
                    report.failed_deletions += 1;
                }
            }
        }
    }

    Ok(report)
}

/// Hash every regular file under `folder` and group paths by digest.
///
/// Groups come back in order of first appearance. Any walk or hash error
/// aborts the whole scan.
pub fn group_by_digest<H>(folder: &Path, hash: H) -> Result<(usize, Vec<DuplicateGroup>)>
where
    H: Fn(&Path) -> Result<FileDigest>,
{
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut index: HashMap<FileDigest, usize> = HashMap::new();
    let mut scanned = 0;

    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry.map_err(|e| GrabError::HashFailed {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| folder.to_path_buf()),
            source: io::Error::from(e),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        let digest = hash(&path)?;
        scanned += 1;
        debug!("{} {}", digest, path.display());

        match index.get(&digest) {
            Some(&i) => groups[i].paths.push(path),
            None => {
                index.insert(digest, groups.len());
                groups.push(DuplicateGroup::new(digest, path));
            }
        }
    }

    Ok((scanned, groups))
}

fn remove(path: &Path) -> Result<()> {
    std::fs::remove_file(path).map_err(|e| GrabError::DeleteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
