use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::StreamExt;

use crate::app::{GrabError, Result};
use crate::fetcher::{ByteStream, Fetcher};

/// Serves canned bodies by exact URL. Unknown URLs fail like a 404.
#[derive(Default)]
pub struct MockFetcher {
    bodies: HashMap<String, Vec<u8>>,
    broken: HashMap<String, Vec<u8>>,
    requests: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }

    /// Yields `partial` and then fails mid-stream.
    pub fn with_broken(mut self, url: &str, partial: impl Into<Vec<u8>>) -> Self {
        self.broken.insert(url.to_string(), partial.into());
        self
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<ByteStream> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if let Some(partial) = self.broken.get(url) {
            let chunks = vec![
                Ok(partial.clone()),
                Err(GrabError::Other("connection reset".into())),
            ];
            return Ok(futures::stream::iter(chunks).boxed());
        }

        match self.bodies.get(url) {
            Some(body) => {
                let chunks: Vec<Result<Vec<u8>>> =
                    body.chunks(4).map(|c| Ok(c.to_vec())).collect();
                Ok(futures::stream::iter(chunks).boxed())
            }
            None => Err(GrabError::Other(format!("404 Not Found: {}", url))),
        }
    }
}
