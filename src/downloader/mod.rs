use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use percent_encoding::percent_decode_str;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::app::{GrabError, Result};
use crate::domain::ImageRef;
use crate::fetcher::Fetcher;

const PARTIAL_PREFIX: &str = ".subgrab-";
const PARTIAL_SUFFIX: &str = ".part";

/// Output file for an asset: the last `/` segment of the percent-decoded URL
/// path under `dest`. Two URLs ending in the same segment map to the same file.
pub fn output_path(asset_url: &str, dest: &Path) -> Result<PathBuf> {
    let url = Url::parse(asset_url)?;
    let path = percent_decode_str(url.path()).decode_utf8_lossy();
    let name = path
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .ok_or_else(|| GrabError::Other(format!("No file name in URL: {}", asset_url)))?;

    Ok(dest.join(name))
}

pub struct Downloader {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl Downloader {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self { fetcher }
    }

    /// Fetch one image into `dest`. Single attempt, no retries.
    ///
    /// The body is streamed into a hidden temporary file in `dest` which is
    /// renamed onto the output path only once fully written, so a failed
    /// attempt never leaves a file at the output path.
    pub async fn download(&self, image: &ImageRef, dest: &Path) -> Result<PathBuf> {
        let url = image.asset_url.as_str();
        let output = output_path(url, dest)?;

        let fetch_failed = |e: GrabError| GrabError::FetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        };
        let write_failed = |e: std::io::Error| GrabError::WriteFailed {
            path: output.clone(),
            source: e,
        };

        let mut stream = self.fetcher.fetch(url).await.map_err(fetch_failed)?;

        let partial = tempfile::Builder::new()
            .prefix(PARTIAL_PREFIX)
            .suffix(PARTIAL_SUFFIX)
            .tempfile_in(dest)
            .map_err(write_failed)?;
        let (file, partial_path) = partial.into_parts();
        let mut file = tokio::fs::File::from_std(file);

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(fetch_failed)?;
            file.write_all(&chunk).await.map_err(write_failed)?;
        }
        file.flush().await.map_err(write_failed)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o644))
                .await
                .map_err(write_failed)?;
        }
        drop(file);

        partial_path
            .persist(&output)
            .map_err(|e| write_failed(e.error))?;

        Ok(output)
    }
}
