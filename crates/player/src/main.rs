//! formwalk player - terminal composition root binary.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formwalk_player::infrastructure::{HttpFormApi, JsonWriterSink, LogFormSink};
use formwalk_player::ports::outbound::FormSinkPort;
use formwalk_player::{run, PlayerConfig, RunOutcome, RunnerDeps};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let _ = dotenvy::from_filename(filename);
    }

    // stdout belongs to the form; logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formwalk_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = PlayerConfig::from_env().context("loading configuration")?;
    tracing::info!(api = %config.api_base_url, "Starting formwalk player");

    let api = Arc::new(HttpFormApi::with_timeout(
        &config.api_base_url,
        config.http_timeout,
    ));
    let sink: Arc<dyn FormSinkPort> = match &config.submission_path {
        Some(path) => Arc::new(
            JsonWriterSink::append_to_file(path)
                .with_context(|| format!("opening {}", path.display()))?,
        ),
        None => Arc::new(LogFormSink),
    };

    let deps = RunnerDeps {
        source: api.clone(),
        sink,
        identity: api,
    };

    let outcome = run(&config, deps, std::io::stdin().lock(), std::io::stdout()).await?;
    tracing::info!(?outcome, "Player finished");
    if outcome == RunOutcome::LoadFailed {
        anyhow::bail!("the form could not be loaded");
    }
    Ok(())
}
