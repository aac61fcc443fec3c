use std::path::{Path, PathBuf};

use crate::app::GrabError;
use crate::domain::FeedEntry;

/// A feed entry that passed suffix and maturity filtering.
///
/// Only [`SourceLister`](crate::lister::SourceLister) builds these, so every
/// `ImageRef` reaching the download stage is already filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub title: String,
    pub source_id: String,
    pub is_mature: bool,
    pub asset_url: String,
}

impl ImageRef {
    pub(crate) fn from_entry(entry: FeedEntry) -> Self {
        Self {
            title: entry.title,
            source_id: entry.source_id,
            is_mature: entry.is_mature,
            asset_url: entry.asset_url,
        }
    }
}

/// Outcome of one download attempt. Only ever logged.
#[derive(Debug)]
pub struct DownloadResult {
    pub image: ImageRef,
    outcome: Result<PathBuf, GrabError>,
}

impl DownloadResult {
    pub fn new(image: ImageRef, outcome: Result<PathBuf, GrabError>) -> Self {
        Self { image, outcome }
    }

    pub fn outcome(&self) -> Result<&Path, &GrabError> {
        self.outcome.as_ref().map(PathBuf::as_path)
    }
}
