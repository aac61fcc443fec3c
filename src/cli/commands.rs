use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::app::{AppContext, GrabError, Result};
use crate::config::ResolutionConfig;
use crate::dedup::{self, DedupReport};
use crate::pipeline::PipelineReport;
use crate::prune::{self, PruneReport};

#[derive(Debug, Default)]
pub struct RunSummary {
    pub pipeline: PipelineReport,
    /// `None` when deduplication was disabled or aborted.
    pub dedup: Option<DedupReport>,
    pub prune: Option<PruneReport>,
}

/// Make sure `folder` exists and is a directory. Failure here is fatal.
pub fn prepare_folder(folder: &Path) -> Result<()> {
    std::fs::create_dir_all(folder)?;

    if !std::fs::metadata(folder)?.is_dir() {
        return Err(GrabError::Config(format!(
            "Destination is not a directory: {}",
            folder.display()
        )));
    }

    Ok(())
}

/// Download every configured source, then deduplicate and prune.
///
/// Only an unusable destination folder is an error; failed sources, failed
/// downloads and an aborted dedup pass are logged.
pub async fn grab(ctx: &AppContext) -> Result<RunSummary> {
    let config = &ctx.config;
    prepare_folder(&config.folder)?;

    if config.sources.is_empty() {
        info!("No sources configured");
    }

    let pipeline = ctx.pipeline().run(config.sources.clone()).await;

    let dedup = if config.dedup {
        match dedup_folder(config.folder.clone()).await {
            Ok(report) => Some(report),
            Err(e) => {
                error!("Deduplication aborted: {}", e);
                None
            }
        }
    } else {
        None
    };

    let prune = if config.resolution.enabled {
        match prune_folder(config.folder.clone(), config.resolution.clone()).await {
            Ok(report) => Some(report),
            Err(e) => {
                error!("Resolution prune aborted: {}", e);
                None
            }
        }
    } else {
        None
    };

    info!(
        "Run complete: {} downloaded, {} failed, {} duplicates removed, {} pruned",
        pipeline.images_downloaded,
        pipeline.images_failed,
        dedup.as_ref().map_or(0, |d| d.removed.len()),
        prune.as_ref().map_or(0, PruneReport::removed)
    );

    Ok(RunSummary {
        pipeline,
        dedup,
        prune,
    })
}

/// Run the dedup pass off the async runtime.
pub async fn dedup_folder(folder: PathBuf) -> Result<DedupReport> {
    let report = tokio::task::spawn_blocking(move || dedup::deduplicate(&folder))
        .await
        .map_err(|e| GrabError::Other(format!("Dedup task failed: {}", e)))??;

    info!(
        "Dedup: {} files scanned, {} duplicate groups, {} removed",
        report.files_scanned,
        report.duplicate_groups,
        report.removed.len()
    );

    Ok(report)
}

pub async fn prune_folder(folder: PathBuf, rule: ResolutionConfig) -> Result<PruneReport> {
    let report = tokio::task::spawn_blocking(move || prune::prune_by_resolution(&folder, &rule))
        .await
        .map_err(|e| GrabError::Other(format!("Prune task failed: {}", e)))??;

    info!(
        "Prune: {} files scanned, {} too small, {} wrong aspect, {} corrupt",
        report.files_scanned,
        report.removed_small.len(),
        report.removed_aspect.len(),
        report.removed_corrupt.len()
    );

    Ok(report)
}
