//! `medclinic` -- prints a dashboard snapshot of the clinic's list views.
//!
//! Seeds demo records, applies the filter configured through the
//! environment and writes the filtered lists plus summary metrics to stdout
//! as JSON. A "snapshot ready" feedback message is scheduled with the
//! configured simulated latency and logged when it completes.
//!
//! # Environment variables
//!
//! | Variable                      | Required | Default          | Description                         |
//! |-------------------------------|----------|------------------|-------------------------------------|
//! | `MEDCLINIC_SEARCH`            | no       | --               | Free-text query for every list      |
//! | `MEDCLINIC_PROFESSIONALS`     | no       | --               | Comma-separated professional filter |
//! | `MEDCLINIC_MIN_SCORE`         | no       | `0`              | Lead score lower bound              |
//! | `MEDCLINIC_MAX_SCORE`         | no       | `100`            | Lead score upper bound              |
//! | `MEDCLINIC_FEEDBACK_DELAY_MS` | no       | `300`            | Simulated feedback latency          |
//! | `RUST_LOG`                    | no       | `medclinic=info` | Log filter                          |

use std::sync::Arc;

use medclinic_cli::config::CliConfig;
use medclinic_cli::report;
use medclinic_cli::seed::SeedData;
use medclinic_events::{EventBus, FeedbackKind, FeedbackScheduler};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "medclinic=info,medclinic_cli=info,medclinic_events=info";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CliConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        search = ?config.search,
        professionals = config.professionals.len(),
        min_score = config.score_range.min(),
        max_score = config.score_range.max(),
        "Building dashboard snapshot",
    );

    let data = SeedData::demo().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to seed demo data");
        std::process::exit(1);
    });

    let report = report::build_report(&config, &data);

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize report");
            std::process::exit(1);
        }
    }

    let bus = Arc::new(EventBus::default());
    let scheduler = FeedbackScheduler::new(config.feedback_delay).with_bus(bus);
    let pending = scheduler.schedule(
        FeedbackKind::Success,
        format!(
            "Snapshot ready: {} queue entries, {} leads",
            report.queue.entries.len(),
            report.leads.cards.len()
        ),
    );

    if let Err(e) = pending.wait().await {
        tracing::warn!(error = %e, "Snapshot feedback did not complete");
    }
    scheduler.shutdown();
}
