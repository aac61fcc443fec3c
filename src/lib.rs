//! # subgrab
//!
//! Downloads images from subreddit listings and removes duplicate files.
//!
//! ## Architecture
//!
//! ```text
//! sources → Lister → Downloader → (drain) → Dedup → Prune
//! ```
//!
//! Listing and downloading run as two worker pools joined by bounded queues
//! (see [`pipeline`]). Deduplication only starts once every source has been
//! listed and every accepted image has been attempted.
//!
//! ## Quick Start
//!
//! ```bash
//! # Fetch the default subreddits into /tmp
//! subgrab
//!
//! # Pick sources and a folder, skip mature posts
//! subgrab --subreddits wallpapers,EarthPorn --folder ~/walls --mature false
//!
//! # Only deduplicate an existing folder
//! subgrab dedup ~/walls
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires the fetcher, lister and downloader
/// together from a [`Config`](config::Config).
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration file handling (`~/.config/subgrab/config.toml`).
pub mod config;

/// Content-hash duplicate removal.
pub mod dedup;

/// Core domain models: feed entries, image references, digests.
pub mod domain;

/// Fetches one image into the destination folder.
pub mod downloader;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait returning a body stream
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Resolves a source into filtered image references.
pub mod lister;

/// Listing JSON decoding.
pub mod normalizer;

/// Listing and download worker pools with drain tracking.
pub mod pipeline;

/// Optional resolution and aspect-ratio cleanup.
pub mod prune;
