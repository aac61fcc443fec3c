//! Resolves a source into the images worth downloading.
//!
//! ```text
//! source id → feed URL → fetch → decode → filter → Vec<ImageRef>
//! ```

use std::sync::Arc;

use crate::app::{GrabError, Result};
use crate::domain::{FeedEntry, ImageRef};
use crate::fetcher::{collect_body, Fetcher};
use crate::normalizer::Normalizer;

pub const DEFAULT_FEED_BASE_URL: &str = "https://www.reddit.com";

/// Accepted asset suffixes, checked in this order.
pub const ACCEPTED_SUFFIXES: [&str; 3] = [".jpeg", ".png", ".jpg"];

pub struct SourceLister {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    base_url: String,
}

impl SourceLister {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_base_url(fetcher, DEFAULT_FEED_BASE_URL)
    }

    pub fn with_base_url(fetcher: Arc<dyn Fetcher + Send + Sync>, base_url: &str) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn feed_url(&self, source_id: &str) -> String {
        feed_url(&self.base_url, source_id)
    }

    pub async fn list(&self, source_id: &str, filter_mature: bool) -> Result<Vec<ImageRef>> {
        let url = self.feed_url(source_id);

        let unavailable = |e: GrabError| GrabError::SourceUnavailable {
            source_id: source_id.to_string(),
            reason: e.to_string(),
        };

        let stream = self.fetcher.fetch(&url).await.map_err(unavailable)?;
        let body = collect_body(stream).await.map_err(unavailable)?;
        let page = self.normalizer.normalize(source_id, &body)?;

        Ok(filter_entries(page.entries, filter_mature))
    }
}

pub fn feed_url(base_url: &str, source_id: &str) -> String {
    format!("{}/r/{}.json", base_url, source_id)
}

/// Keeps entries with an accepted suffix, dropping mature ones first when
/// `filter_mature` is set. Feed order is preserved.
pub fn filter_entries(entries: Vec<FeedEntry>, filter_mature: bool) -> Vec<ImageRef> {
    entries
        .into_iter()
        .filter(|entry| is_accepted(entry, filter_mature))
        .map(ImageRef::from_entry)
        .collect()
}

fn is_accepted(entry: &FeedEntry, filter_mature: bool) -> bool {
    if filter_mature && entry.is_mature {
        return false;
    }

    has_accepted_suffix(&entry.asset_url)
}

pub fn has_accepted_suffix(name: &str) -> bool {
    ACCEPTED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}
