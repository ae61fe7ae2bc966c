//! Stream a forensic report for the sample hurricane reading.
//!
//! Set `BACKEND_URL` to point at a running backend (defaults to
//! `http://localhost:8000`) and `RUST_LOG=hyperion_forensics=debug` to see
//! request logging.

use std::io::Write;

use futures::StreamExt;
use hyperion_forensics::{
    BackendConfig, ExecutionContext, ForensicReportRequest, ForensicsClient, OraclePayload,
    PolicyMetadata, StreamOutcome,
};
use hyperion_types::{format_timestamp, ms_to_mph};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = BackendConfig::from_env();
    let client = ForensicsClient::from_config(&config, ExecutionContext::Server);

    let health = client.health().await;
    if !health.is_healthy() {
        eprintln!("backend offline (api: {})", health.services.api);
        return Ok(());
    }

    let payload = OraclePayload::example();
    let request = ForensicReportRequest::new(payload.clone()).with_policy(PolicyMetadata::example());

    let speed = payload.wind_speed.unwrap_or_default();
    let when = payload
        .measurement_time
        .and_then(format_timestamp)
        .unwrap_or_else(|| "unknown time".into());
    println!("{speed} m/s ({:.1} mph) at {when}\n", ms_to_mph(speed));

    let mut report = client.stream(&request).await?;
    let mut stdout = std::io::stdout();
    while let Some(chunk) = report.next().await {
        match chunk {
            Ok(text) => {
                print!("{text}");
                stdout.flush()?;
            }
            Err(e) => eprintln!("\nstream error: {e}"),
        }
    }

    if report.outcome() == Some(&StreamOutcome::Completed) {
        println!("\n\n[report complete]");
    }
    Ok(())
}
