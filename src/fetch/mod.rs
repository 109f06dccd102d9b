// src/fetch/mod.rs

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

pub mod vars;

/// Dataset vintage and table, fixed at build time.
pub const YEAR: &str = "2023";
pub const DATASET: &str = "acs/acs5";

const BASE_URL: &str = "https://api.census.gov/data";

/// Name of the region-key column appended by the API to every response.
pub const KEY_COLUMN: &str = "state";

/// One fetched table: a header row plus one row of string cells per region.
/// The key column is normalized to a zero-padded 2-character FIPS code.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table from the decoded JSON array-of-arrays payload.
    /// Nulls become empty strings; the key column is zero-padded.
    pub fn from_values(values: Vec<Vec<Value>>) -> Result<Self> {
        let mut iter = values.into_iter();
        let headers: Vec<String> = iter
            .next()
            .ok_or_else(|| anyhow!("response contained no header row"))?
            .into_iter()
            .map(cell_to_string)
            .collect();

        let key_idx = headers.iter().position(|h| h == KEY_COLUMN);
        let rows = iter
            .map(|row| {
                let mut cells: Vec<String> = row.into_iter().map(cell_to_string).collect();
                if let Some(idx) = key_idx {
                    if let Some(cell) = cells.get_mut(idx) {
                        *cell = pad_fips(cell);
                    }
                }
                cells
            })
            .collect();

        Ok(RawTable { headers, rows })
    }

    /// Index of the region-key column, if present.
    pub fn key_index(&self) -> Option<usize> {
        self.headers.iter().position(|h| h == KEY_COLUMN)
    }
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

// The API is inconsistent about zero-padding single-digit state codes.
fn pad_fips(raw: &str) -> String {
    format!("{:0>2}", raw.trim())
}

fn query_url(api_key: &str, variables: &[String]) -> Result<Url> {
    let mut url = Url::parse(&format!("{}/{}/{}", BASE_URL, YEAR, DATASET))
        .context("parsing API base URL")?;
    let get = format!("NAME,{}", variables.join(","));
    url.query_pairs_mut()
        .append_pair("get", &get)
        .append_pair("for", "state:*")
        .append_pair("key", api_key);
    Ok(url)
}

/// Fetch one table of ACS estimates for all states. One GET, no retry:
/// a transport error or non-success status aborts the run.
pub async fn fetch_table(client: &Client, api_key: &str, variables: &[String]) -> Result<RawTable> {
    let url = query_url(api_key, variables)?;
    debug!(variables = variables.len(), "fetching ACS table");
    let values: Vec<Vec<Value>> = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url.path()))?
        .error_for_status()
        .with_context(|| format!("non-success status from {}", url.path()))?
        .json()
        .await
        .with_context(|| format!("decoding JSON from {}", url.path()))?;

    RawTable::from_values(values)
}
