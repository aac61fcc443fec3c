pub mod http_fetcher;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::TryStreamExt;

use crate::app::{GrabError, Result};

/// Response body delivered chunk by chunk.
pub type ByteStream = BoxStream<'static, Result<Vec<u8>>>;

#[async_trait]
pub trait Fetcher {
    /// GET `url`, returning the body once the response status is known to be
    /// successful.
    async fn fetch(&self, url: &str) -> Result<ByteStream>;
}

/// Drain a body into memory.
pub async fn collect_body(stream: ByteStream) -> Result<Vec<u8>> {
    stream
        .try_fold(Vec::new(), |mut body, chunk| async move {
            body.extend_from_slice(&chunk);
            Ok::<_, GrabError>(body)
        })
        .await
}
