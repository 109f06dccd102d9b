// src/output.rs

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::info;

use crate::aggregate::StateRow;

/// Output column order. `StateRow`'s field order must match; the FIPS key
/// is never part of the output.
pub const SCHEMA_COLUMNS: &[&str] = &[
    "state_name",
    "total_population",
    "pct_white",
    "pct_black",
    "pct_native",
    "pct_asian",
    "pct_two_or_more",
    "male_pop",
    "female_pop",
    "pct_male",
    "pct_female",
    "pct_18_29",
    "pct_30_44",
    "pct_45_64",
    "pct_65_plus",
    "pct_hs_or_less",
    "pct_some_college",
    "pct_assoc",
    "pct_bachelor",
    "pct_grad",
    "urban_pop",
    "rural_pop",
    "pct_urban",
    "pct_rural",
];

/// Serialize the rows as a header-first CSV at `path`, creating parent
/// directories as needed.
pub fn write_csv(path: &Path, rows: &[StateRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("serializing output row")?;
    }
    writer.flush().context("flushing output file")?;

    info!(rows = rows.len(), path = %path.display(), "wrote dataset");
    Ok(())
}
