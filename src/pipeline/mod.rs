//! Two worker pools joined by bounded queues.
//!
//! ```text
//! sources ─▶ [source queue] ─▶ listing workers ─▶ [image queue] ─▶ download workers
//! ```
//!
//! Every source and every image is a unit of work tracked by a
//! [`WorkTracker`]. A listing worker issues the tickets for a source's images
//! before the source's own ticket is released, so the pending count cannot
//! touch zero while children are still being queued. [`Pipeline::run`]
//! returns once the count drains; nothing is downloaded after that, which is
//! what lets deduplication run safely afterwards.

pub mod tracker;
mod worker;

pub use tracker::{Ticket, Tracked, WorkTracker};

use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::downloader::Downloader;
use crate::lister::SourceLister;
use worker::{DownloadWorker, ListingWorker, PipelineStats};

pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Default pool size, one worker per available core.
pub fn default_workers() -> usize {
    num_cpus::get().max(1)
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub listing_workers: usize,
    pub download_workers: usize,
    pub queue_capacity: usize,
    pub filter_mature: bool,
    pub dest: PathBuf,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub sources_listed: usize,
    pub sources_failed: usize,
    pub images_downloaded: usize,
    pub images_failed: usize,
    pub units_issued: usize,
    pub units_completed: usize,
}

pub struct Pipeline {
    lister: Arc<SourceLister>,
    downloader: Arc<Downloader>,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(
        lister: Arc<SourceLister>,
        downloader: Arc<Downloader>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            lister,
            downloader,
            settings,
        }
    }

    /// Process every source and each image it yields, returning once all of
    /// them are done. Individual failures are logged and counted, never
    /// returned.
    pub async fn run(&self, sources: Vec<String>) -> PipelineReport {
        let settings = &self.settings;
        let tracker = WorkTracker::new();
        let stats = Arc::new(PipelineStats::default());

        let units: Vec<Tracked<String>> = sources
            .into_iter()
            .map(|source| Tracked::new(source, tracker.issue()))
            .collect();

        info!(
            "Starting pipeline: {} sources, {} listing / {} download workers",
            units.len(),
            settings.listing_workers,
            settings.download_workers
        );

        let capacity = settings.queue_capacity.max(1);
        let (source_tx, source_rx) = mpsc::channel::<Tracked<String>>(capacity);
        let (image_tx, image_rx) = mpsc::channel(capacity);
        let source_rx = Arc::new(Mutex::new(source_rx));
        let image_rx = Arc::new(Mutex::new(image_rx));

        let mut workers = JoinSet::new();

        for id in 0..settings.listing_workers.max(1) {
            let worker = ListingWorker {
                id,
                sources: source_rx.clone(),
                images: image_tx.clone(),
                lister: self.lister.clone(),
                tracker: tracker.clone(),
                stats: stats.clone(),
                filter_mature: settings.filter_mature,
            };
            workers.spawn(worker.run());
        }
        // Listing workers own the only image senders from here on.
        drop(image_tx);

        for id in 0..settings.download_workers.max(1) {
            let worker = DownloadWorker {
                id,
                images: image_rx.clone(),
                downloader: self.downloader.clone(),
                stats: stats.clone(),
                dest: settings.dest.clone(),
            };
            workers.spawn(worker.run());
        }
        drop(source_rx);
        drop(image_rx);

        for unit in units {
            if source_tx.send(unit).await.is_err() {
                error!("Source queue closed before all sources were queued");
                break;
            }
        }

        tracker.drained().await;

        // Closing the source queue stops the listing workers, whose dropped
        // senders in turn close the image queue.
        drop(source_tx);
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                error!("Pipeline worker failed: {}", e);
            }
        }

        let report = PipelineReport {
            sources_listed: stats.sources_listed.load(Ordering::Relaxed),
            sources_failed: stats.sources_failed.load(Ordering::Relaxed),
            images_downloaded: stats.images_downloaded.load(Ordering::Relaxed),
            images_failed: stats.images_failed.load(Ordering::Relaxed),
            units_issued: tracker.issued(),
            units_completed: tracker.completed(),
        };

        info!(
            "Pipeline drained: {} sources listed ({} failed), {} images downloaded ({} failed)",
            report.sources_listed,
            report.sources_failed,
            report.images_downloaded,
            report.images_failed
        );

        report
    }
}
