use anyhow::Context;
use clap::Parser;
use flickr_renamer::config::{read_config, ConfigOverrides, FileConfig, RenamerConfig};
use flickr_renamer::flickr::FlickrClient;
use flickr_renamer::pipeline::run;
use flickr_renamer::records::ExifExtractor;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Rename local photo originals after their titles in a Flickr album
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Flickr API key
    #[arg(short = 'k', long, env = "FLICKR_API_KEY")]
    api_key: Option<String>,

    /// Flickr username
    #[arg(short, long)]
    username: Option<String>,

    /// Set (album) id - grab it from the URL
    #[arg(short, long)]
    set_id: Option<String>,

    /// Path to folder containing originals
    #[arg(short, long)]
    originals_dir: Option<PathBuf>,

    /// Dry run; do not carry out the renames
    #[arg(long)]
    dry_run: bool,

    /// JSON file with default settings (camelCase keys)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Flickr REST endpoint
    #[arg(long, env = "FLICKR_ENDPOINT")]
    endpoint: Option<String>,

    /// Request timeout for Flickr calls, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Photos per page to request from Flickr (the service allows up to 500)
    #[arg(long)]
    per_page: Option<u32>,

    /// Treat originals with malformed capture times as unmatched instead of failing
    #[arg(long)]
    skip_malformed: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_key: self.api_key.clone(),
            username: self.username.clone(),
            set_id: self.set_id.clone(),
            originals_dir: self.originals_dir.clone(),
            endpoint: self.endpoint.clone(),
            timeout_secs: self.timeout_secs,
            per_page: self.per_page,
            dry_run: self.dry_run,
            skip_malformed: self.skip_malformed,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse CLI arguments
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => read_config(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?,
        None => FileConfig::default(),
    };
    let config =
        RenamerConfig::resolve(args.overrides(), file_config).context("Invalid configuration")?;

    let client = FlickrClient::new(&config.flickr).context("Failed to create Flickr client")?;
    let summary = run(&config, &client, Arc::new(ExifExtractor)).await?;

    if summary.report.has_failures() {
        warn!(
            "{} of {} renames could not be applied",
            summary.report.failed.len(),
            summary.plans.len()
        );
        for failure in &summary.report.failed {
            warn!("  {}: {}", failure.plan.from_name(), failure.error);
        }
    }

    info!("Done");
    Ok(())
}
