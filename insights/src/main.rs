//! Command-line entry point producing a dashboard snapshot as JSON

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use insights::{
    config::StoreEndpoint,
    services::{InMemoryRecordStore, RestRecordStore, TokioClock},
    Dashboard, InsightsConfig, RecordStore,
};
use shared::{component_info, logging, Component, ProfileId};

/// Inclusion insights over a job board record store
#[derive(Parser)]
#[command(name = "insights")]
#[command(about = "Computes platform statistics, inclusion ratings and career history snapshots")]
pub struct Args {
    /// Read records from a JSON snapshot file instead of the REST store
    #[arg(long, conflicts_with_all = ["store_url", "store_key"])]
    pub snapshot: Option<PathBuf>,

    /// REST store base URL (overrides INSIGHTS_STORE_URL)
    #[arg(long)]
    pub store_url: Option<String>,

    /// REST store API key (overrides INSIGHTS_STORE_KEY)
    #[arg(long)]
    pub store_key: Option<String>,

    /// Include the rating aggregate of this company
    #[arg(long)]
    pub company: Option<ProfileId>,

    /// Number of latest reviews to include
    #[arg(long)]
    pub review_limit: Option<usize>,

    /// Number of career status changes to include (at most 50)
    #[arg(long)]
    pub history_limit: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Update this profile's career status before taking the snapshot
    #[arg(long, requires = "career_status")]
    pub sync_profile: Option<ProfileId>,

    /// New career status used with --sync-profile
    #[arg(long, requires = "sync_profile")]
    pub career_status: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_tracing_with_level(Some(&args.log_level));

    let mut config = InsightsConfig::from_env().context("loading configuration")?;
    if let Some(limit) = args.review_limit {
        config.review_limit = limit;
    }
    if let Some(limit) = args.history_limit {
        config.history_limit = limit;
    }
    config.validate().context("validating configuration")?;

    if let Some(path) = &args.snapshot {
        let store = InMemoryRecordStore::load_snapshot_file(path)
            .await
            .with_context(|| format!("loading snapshot {}", path.display()))?;
        return run(Arc::new(store), &config, &args).await;
    }

    let endpoint = match (args.store_url.clone(), args.store_key.clone(), config.store.clone()) {
        (Some(url), Some(api_key), _) => StoreEndpoint { url, api_key },
        (Some(url), None, Some(env)) => StoreEndpoint { url, api_key: env.api_key },
        (None, Some(api_key), Some(env)) => StoreEndpoint { url: env.url, api_key },
        (None, None, Some(env)) => env,
        _ => bail!("no record store configured: pass --snapshot or --store-url/--store-key"),
    };
    let store = RestRecordStore::new(&endpoint.url, &endpoint.api_key)?;
    run(Arc::new(store), &config, &args).await
}

async fn run<S: RecordStore + 'static>(store: Arc<S>, config: &InsightsConfig, args: &Args) -> anyhow::Result<()> {
    let dashboard = Dashboard::new(store, TokioClock, config);

    if let (Some(id), Some(status)) = (args.sync_profile, args.career_status.as_deref()) {
        let profile = dashboard
            .update_career_status(id, status)
            .await
            .with_context(|| format!("updating career status of {id}"))?;
        component_info!(
            Component::ProfileSync,
            "Career status of {} is now {:?}",
            profile.id,
            profile.career_status
        );
    }

    let snapshot = dashboard.snapshot(args.company).await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
