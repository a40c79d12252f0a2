//! Herald CLI entrypoint for pull request status notification.

use std::io;
use std::process::ExitCode;

use herald::{
    HeraldConfig, OctocrabGateway, PersonalAccessToken, PullRequestLocator, ReqwestWebhookSender,
    RunError, RunOutcome, RunSettings, StatusRun,
};
use ortho_config::OrthoConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herald=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run() -> Result<(), RunError> {
    let config = load_config()?;
    let settings = RunSettings::from_config(&config)?;

    let pr_url = config.resolve_pr_url()?;
    let token_value = config.resolve_token()?;

    let locator = PullRequestLocator::parse(&pr_url)?;
    let token = PersonalAccessToken::new(token_value)?;

    let gateway = OctocrabGateway::for_token(&token, &locator)?;
    let sender = ReqwestWebhookSender::with_default_timeout()
        .map_err(|error| RunError::Configuration {
            message: error.to_string(),
        })?;

    let outcome = StatusRun::new(&gateway, &sender, &settings)
        .execute(locator.repository(), locator.number())
        .await?;

    match outcome {
        RunOutcome::NothingToReport => tracing::info!("no issue identifiers found"),
        RunOutcome::Dispatched { index, report } => {
            for (id, status) in index.iter() {
                tracing::info!("{id}: {status}");
            }
            let attempted = report.attempted();
            tracing::info!("{attempted} webhook calls attempted");
        }
    }
    Ok(())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`RunError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<HeraldConfig, RunError> {
    HeraldConfig::load().map_err(|error| RunError::Configuration {
        message: error.to_string(),
    })
}
