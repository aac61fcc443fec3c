use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::domain::{DownloadResult, ImageRef};
use crate::downloader::Downloader;
use crate::lister::SourceLister;
use crate::pipeline::tracker::{Tracked, WorkTracker};

/// Receiving end of a queue shared by every worker of one pool.
pub(super) type SharedQueue<T> = Arc<Mutex<mpsc::Receiver<Tracked<T>>>>;

async fn next<T>(queue: &SharedQueue<T>) -> Option<Tracked<T>> {
    queue.lock().await.recv().await
}

#[derive(Default)]
pub(super) struct PipelineStats {
    pub sources_listed: AtomicUsize,
    pub sources_failed: AtomicUsize,
    pub images_downloaded: AtomicUsize,
    pub images_failed: AtomicUsize,
}

impl PipelineStats {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

pub(super) struct ListingWorker {
    pub id: usize,
    pub sources: SharedQueue<String>,
    pub images: mpsc::Sender<Tracked<ImageRef>>,
    pub lister: Arc<SourceLister>,
    pub tracker: WorkTracker,
    pub stats: Arc<PipelineStats>,
    pub filter_mature: bool,
}

impl ListingWorker {
    /// Runs until the source queue closes.
    pub async fn run(self) {
        while let Some(unit) = next(&self.sources).await {
            // `_ticket` is held until every child has been issued and queued.
            let (source_id, _ticket) = unit.into_parts();

            match self.lister.list(&source_id, self.filter_mature).await {
                Ok(images) => {
                    PipelineStats::bump(&self.stats.sources_listed);
                    info!("Listed {} images from r/{}", images.len(), source_id);

                    for image in images {
                        let child = Tracked::new(image, self.tracker.issue());
                        if self.images.send(child).await.is_err() {
                            warn!("Image queue closed; dropping remaining images of r/{}", source_id);
                            break;
                        }
                    }
                }
                Err(e) => {
                    PipelineStats::bump(&self.stats.sources_failed);
                    warn!("Could not list images for r/{}: {}", source_id, e);
                }
            }
        }

        debug!("Listing worker {} stopped", self.id);
    }
}

pub(super) struct DownloadWorker {
    pub id: usize,
    pub images: SharedQueue<ImageRef>,
    pub downloader: Arc<Downloader>,
    pub stats: Arc<PipelineStats>,
    pub dest: PathBuf,
}

impl DownloadWorker {
    /// Runs until the image queue closes.
    pub async fn run(self) {
        while let Some(unit) = next(&self.images).await {
            let (image, _ticket) = unit.into_parts();

            let outcome = self.downloader.download(&image, &self.dest).await;
            let result = DownloadResult::new(image, outcome);
            self.report(&result);
        }

        debug!("Download worker {} stopped", self.id);
    }

    fn report(&self, result: &DownloadResult) {
        let image = &result.image;

        match result.outcome() {
            Ok(path) => {
                PipelineStats::bump(&self.stats.images_downloaded);
                info!(
                    "Downloaded (r/{}) {} -> {}",
                    image.source_id,
                    image.asset_url,
                    path.display()
                );
            }
            Err(e) => {
                PipelineStats::bump(&self.stats.images_failed);
                warn!(
                    "Could not download image: (r/{}) {}, error: {}",
                    image.source_id, image.asset_url, e
                );
            }
        }
    }
}
