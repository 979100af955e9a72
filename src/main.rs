//! Tempest demo: walk every retrieval mode against a configured stream
//!
//! Reads the last day of the stream through window, paged window, range,
//! interpolated and filtered queries, printing each event's rendering.

use anyhow::Result;
use chrono::{Duration, Utc};
use clap::Parser;
use futures::TryStreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use tempest_client::{
    BoundaryType, ClientCredentials, DataService, Filter, HttpTransport, MetadataService,
    StoreConfig, VerbosityTransport,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tempest")]
#[command(version)]
#[command(about = "Read-only client for a remote time-series event store")]
struct Cli {
    /// Settings file path
    #[arg(short, long, env = "TEMPEST_CONFIG", default_value = "appsettings.json")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Events per page for the paged retrieval step
    #[arg(long, default_value = "2")]
    page_size: usize,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tempest_client={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Boolean success/failure outward, errors logged at the top level
    if let Err(e) = run(&cli).await {
        tracing::error!("{:#}", e);
        println!("Complete!");
        std::process::exit(1);
    }
    println!("Complete!");
}

async fn run(cli: &Cli) -> Result<()> {
    println!("Step 1. Authenticate against the store");
    let config = StoreConfig::from_file(&cli.config)?;
    println!("Store endpoint at {}", config.resource);

    let credentials = ClientCredentials::new(
        &config.resource,
        config.client_id.as_str(),
        config.client_secret.as_str(),
    );
    let transport = Arc::new(VerbosityTransport::new(HttpTransport::new(
        &config.resource,
        credentials,
    )?));
    let metadata = MetadataService::new(transport.clone(), &config.tenant_id, &config.namespace_id);
    let data = DataService::new(transport.clone(), &config.tenant_id, &config.namespace_id);

    // Indices covering the last day
    let end = Utc::now();
    let start = end - Duration::days(1);

    println!("Step 2. Retrieve stream");
    let stream = metadata.get_stream(&config.stream_id).await?;
    println!("Found stream: {}", stream.id);

    println!("Step 3. Retrieve window events");
    let window = data.window_values(&config.stream_id, start, end).await?;
    println!("Total events found: {}", window.len());
    for event in &window {
        println!("{}", event);
    }

    println!("Step 4. Retrieve window events in table form");
    let table = data.window_table(&config.stream_id, start, end).await?;
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        println!("{}", cells.join(","));
    }

    println!("Step 5. Retrieve paged events");
    println!(
        "The store caps a single data call at {} events; paging reads past the cap one page at a time:",
        tempest_client::SINGLE_CALL_EVENT_CAP
    );
    let paged = data.paged_events(
        &config.stream_id,
        start,
        end,
        BoundaryType::Inside,
        cli.page_size,
    );
    futures::pin_mut!(paged);
    while let Some(event) = paged.try_next().await? {
        println!("{}", event);
    }

    println!("Step 6. Retrieve range events");
    let range = data.range_values(&config.stream_id, start, 10).await?;
    println!("Total events found: {}", range.len());
    for event in &range {
        println!("{}", event);
    }

    println!("Step 7. Retrieve interpolated events");
    println!("The store interpolates or extrapolates at indices where data does not explicitly exist:");
    let interpolated = data
        .interpolated_values(&config.stream_id, start, end, 10)
        .await?;
    println!("Total events found: {}", interpolated.len());
    for event in &interpolated {
        println!("{}", event);
    }

    println!("Step 8. Retrieve filtered events");
    println!("Using the less-than operator to keep values below 0:");
    let filtered = data
        .filtered_values(
            &config.stream_id,
            start,
            end,
            BoundaryType::Exact,
            &Filter::value_lt(0.0),
        )
        .await?;
    println!("Total events found: {}", filtered.len());
    for event in &filtered {
        println!("{}", event);
    }

    Ok(())
}
