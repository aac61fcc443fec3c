use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::downloader::Downloader;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::lister::SourceLister;
use crate::pipeline::Pipeline;

pub struct AppContext {
    pub config: Config,
    pub lister: Arc<SourceLister>,
    pub downloader: Arc<Downloader>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::with_options(config.timeout(), &config.user_agent)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let lister = Arc::new(SourceLister::with_base_url(
            fetcher.clone(),
            &config.feed_base_url,
        ));
        let downloader = Arc::new(Downloader::new(fetcher));

        Self {
            config,
            lister,
            downloader,
        }
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(
            self.lister.clone(),
            self.downloader.clone(),
            self.config.pipeline_settings(),
        )
    }
}
