/// One post in a source listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub source_id: String,
    pub is_mature: bool,
    pub asset_url: String,
}

impl FeedEntry {
    pub fn new(title: &str, source_id: &str, is_mature: bool, asset_url: &str) -> Self {
        Self {
            title: title.to_string(),
            source_id: source_id.to_string(),
            is_mature,
            asset_url: asset_url.to_string(),
        }
    }
}

/// Decoded response for one source, entries in feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedPage {
    pub entries: Vec<FeedEntry>,
}

impl FeedPage {
    pub fn new(entries: Vec<FeedEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
