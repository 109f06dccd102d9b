use acscraper::{
    aggregate,
    fetch::{self, vars, RawTable},
    merge, output,
};
use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;
use std::{path::PathBuf, time::Duration};
use tokio::task::JoinHandle;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Build the ACS state demographics dataset: fetch the raw tables, merge
/// them on state FIPS, derive the percentage columns, write one CSV.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Census API key.
    #[arg(long, env = "CENSUS_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Output CSV path.
    #[arg(long, default_value = "data/final_state_dataset.csv")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    let args = Args::parse();
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("building HTTP client")?;

    // ─── 2) fetch the four tables concurrently ───────────────────────
    let queries: [(&str, Vec<String>); 4] = [
        ("race", vars::race_query()),
        ("age", vars::age_query()),
        ("education", vars::education_query()),
        ("gender", vars::gender_query()),
    ];

    let mut handles: Vec<(&str, JoinHandle<Result<RawTable>>)> = Vec::with_capacity(queries.len());
    for (label, variables) in queries {
        let client = client.clone();
        let api_key = args.api_key.clone();
        handles.push((
            label,
            tokio::spawn(async move { fetch::fetch_table(&client, &api_key, &variables).await }),
        ));
    }

    // await in fixed order: the merge order decides how duplicate column
    // names are numbered
    let mut tables = Vec::with_capacity(handles.len());
    for (label, handle) in handles {
        let table = handle
            .await?
            .with_context(|| format!("fetching {} table", label))?;
        info!(table = label, rows = table.rows.len(), "fetched");
        tables.push(table);
    }

    // ─── 3) merge on the FIPS key ────────────────────────────────────
    let merged = merge::merge(&tables);
    info!(
        regions = merged.len(),
        columns = merged.columns().len(),
        "merged"
    );

    // ─── 4) aggregate into the output schema ─────────────────────────
    let rows = aggregate::aggregate(&merged)?;

    // ─── 5) write the dataset ────────────────────────────────────────
    output::write_csv(&args.out, &rows)?;
    info!("all done");
    Ok(())
}
