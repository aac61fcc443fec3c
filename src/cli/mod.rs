pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{AspectRatio, Config, Resolution};

#[derive(Parser, Debug)]
#[command(name = "subgrab")]
#[command(about = "Download images from subreddit feeds and drop duplicates", long_about = None)]
pub struct Cli {
    /// Comma separated list of subreddit names
    #[arg(short, long, value_delimiter = ',')]
    pub subreddits: Option<Vec<String>>,

    /// Path where to download images
    #[arg(short, long)]
    pub folder: Option<PathBuf>,

    /// Allow mature content (true/false, bare flag means true)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub mature: Option<bool>,

    /// Number of workers in each pool
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Config file to use instead of the default one
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep duplicate files
    #[arg(long)]
    pub no_dedup: bool,

    /// Remove images smaller than this (e.g. 1920x1080)
    #[arg(long, global = true)]
    pub min_resolution: Option<Resolution>,

    /// Remove images with another aspect ratio (e.g. 16:9)
    #[arg(long, global = true)]
    pub aspect: Option<AspectRatio>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Only remove duplicate files from a folder
    Dedup {
        /// Folder to deduplicate
        folder: PathBuf,
    },
    /// Only remove images failing the resolution rule from a folder
    Prune {
        /// Folder to prune
        folder: PathBuf,
    },
}

impl Cli {
    /// Overlay flags given on the command line onto `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref sources) = self.subreddits {
            config.sources = sources
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(ref folder) = self.folder {
            config.folder = folder.clone();
        }
        if let Some(mature) = self.mature {
            config.allow_mature = mature;
        }
        if let Some(workers) = self.workers {
            config.listing_workers = workers;
            config.download_workers = workers;
        }
        if self.no_dedup {
            config.dedup = false;
        }
        if let Some(min) = self.min_resolution {
            config.resolution.enabled = true;
            config.resolution.min_width = min.width;
            config.resolution.min_height = min.height;
        }
        if let Some(aspect) = self.aspect {
            config.resolution.enabled = true;
            config.resolution.aspect = Some(aspect);
        }
    }
}
