use serde::Deserialize;

use crate::app::{GrabError, Result};
use crate::domain::{FeedEntry, FeedPage};

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    #[serde(default)]
    title: String,
    #[serde(default)]
    subreddit: String,
    #[serde(default)]
    over_18: bool,
    #[serde(default)]
    url: String,
}

/// Decodes listing JSON into a [`FeedPage`].
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Either the whole page decodes or nothing is returned.
    pub fn normalize(&self, source_id: &str, body: &[u8]) -> Result<FeedPage> {
        let listing: Listing =
            serde_json::from_slice(body).map_err(|e| GrabError::DecodeFailed {
                source_id: source_id.to_string(),
                reason: e.to_string(),
            })?;

        let entries = listing
            .data
            .children
            .into_iter()
            .map(|child| FeedEntry {
                title: child.data.title,
                source_id: child.data.subreddit,
                is_mature: child.data.over_18,
                asset_url: child.data.url,
            })
            .collect();

        Ok(FeedPage::new(entries))
    }
}
