// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trail Elevation Enricher
//!
//! Batch-enriches the trail dataset with elevation profiles and aspect,
//! resuming from the last checkpoint if a prior run was interrupted.

use trail_enricher::{config::Config, services::EnrichmentPipeline, store::CheckpointStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env();
    tracing::info!(
        service_trail_limit = config.service_trail_limit,
        samples_per_trail = config.samples_per_trail,
        lookup_batch_width = config.lookup_batch_width,
        "Starting trail elevation enrichment"
    );

    let store = match CheckpointStore::from_config(&config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Cannot locate input dataset");
            std::process::exit(1);
        }
    };

    let pipeline = EnrichmentPipeline::new(config);
    match pipeline.run(&store).await {
        Ok(summary) => println!("{}", summary.report()),
        Err(e) => {
            tracing::error!(error = %e, "Enrichment run failed");
            std::process::exit(1);
        }
    }
}

/// Initialize compact console logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trail_enricher=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
