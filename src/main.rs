use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use subgrab::app::AppContext;
use subgrab::cli::{commands, Cli, Commands};
use subgrab::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "subgrab=debug" } else { "subgrab=info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);

    let work = async {
        match cli.command {
            Some(Commands::Dedup { ref folder }) => {
                commands::dedup_folder(folder.clone()).await?;
            }
            Some(Commands::Prune { ref folder }) => {
                commands::prune_folder(folder.clone(), config.resolution.clone()).await?;
            }
            None => {
                let ctx = AppContext::new(config.clone())?;
                commands::grab(&ctx).await?;
            }
        }
        anyhow::Ok(())
    };

    tokio::select! {
        result = work => result,
        _ = tokio::signal::ctrl_c() => {
            anyhow::bail!("Interrupted");
        }
    }
}
