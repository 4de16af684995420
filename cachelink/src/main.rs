//! cachelink - local invocation CLI
//!
//! Runs one handler entry point against the real secret store and cache
//! service, using the same environment contract the hosting platform
//! provides: `redis_endpoint`, `redis_port`, and `secret_arn` for the
//! credentialed handlers.

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cachelink::{connect_with_credentials, handle_consume, handle_produce, handle_roundtrip};
use cachelink_core::{HandlerConfig, InvocationContext, InvocationEvent};
use cachelink_secrets::AwsSecretSource;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HandlerKind {
    /// Plaintext SET/GET round trip, errors propagate
    Roundtrip,
    /// Credentialed producer: SET "time", read it back, catch-and-log
    Produce,
    /// Credentialed consumer: GET "time", catch-and-log
    Consume,
}

impl HandlerKind {
    fn function_name(self) -> &'static str {
        match self {
            Self::Roundtrip => "roundtripFn",
            Self::Produce => "producerFn",
            Self::Consume => "consumerFn",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cachelink")]
#[command(about = "Invoke a cache handler locally", long_about = None)]
struct Args {
    /// Handler entry point to invoke
    #[arg(long, value_enum, default_value = "roundtrip")]
    handler: HandlerKind,

    /// Invocation timeout in milliseconds (platform default)
    #[arg(long, default_value = "30000", env = "CACHELINK_TIMEOUT_MS")]
    timeout_ms: i64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "CACHELINK_LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("cachelink={}", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = HandlerConfig::from_env()?;
    let event = InvocationEvent::default();
    let ctx = InvocationContext::new(args.handler.function_name(), args.timeout_ms);

    info!(
        handler = ?args.handler,
        endpoint = %config.endpoint,
        port = config.port,
        tls = config.tls,
        "Invoking handler"
    );

    let secrets = AwsSecretSource::from_env().await;

    match args.handler {
        HandlerKind::Roundtrip => {
            let mut store = connect_with_credentials(&config, &secrets).await?;
            handle_roundtrip(&event, &ctx, &mut store).await?;
        }
        HandlerKind::Produce => {
            config.require_secret_arn()?;
            let mut store = connect_with_credentials(&config, &secrets).await?;
            let report = handle_produce(&event, &ctx, &mut store).await;
            if !report.all_succeeded() {
                warn!(?report, "Producer completed with failed operations");
            }
        }
        HandlerKind::Consume => {
            config.require_secret_arn()?;
            let mut store = connect_with_credentials(&config, &secrets).await?;
            let report = handle_consume(&event, &ctx, &mut store).await;
            if !report.all_succeeded() {
                warn!(?report, "Consumer completed with failed operations");
            }
        }
    }

    Ok(())
}
