// src/merge/mod.rs

use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::fetch::RawTable;

/// The reconciled join of several fetched tables, keyed by FIPS code.
///
/// All tables are joined on the key column with an outer union of keys: a
/// region absent from one table keeps its row, with that table's columns
/// filled with zero. Column-name collisions across tables keep both values
/// under suffixed names rather than overwriting. Every cell is an integer
/// count after coercion.
#[derive(Debug, Default)]
pub struct MergedTable {
    columns: Vec<String>,
    rows: BTreeMap<String, HashMap<String, i64>>,
}

/// Join the given tables on the region key, in the order given. The order
/// matters: it decides which duplicate column keeps the bare name and which
/// get `_1`, `_2`, ... suffixes.
pub fn merge(tables: &[RawTable]) -> MergedTable {
    let mut merged = MergedTable::default();
    let mut name_counts: HashMap<String, usize> = HashMap::new();

    // union of region keys first, so every table's columns are materialized
    // (as zero) even for regions that table never returned
    for table in tables {
        let Some(key_idx) = table.key_index() else {
            warn!("fetched table has no region-key column; skipped");
            continue;
        };
        for row in &table.rows {
            if let Some(fips) = row.get(key_idx) {
                merged.rows.entry(fips.clone()).or_default();
            }
        }
    }

    for table in tables {
        let Some(key_idx) = table.key_index() else {
            continue;
        };

        // resolve collisions against everything merged so far
        let mut resolved: Vec<(usize, String)> = Vec::new();
        for (idx, name) in table.headers.iter().enumerate() {
            if idx == key_idx {
                continue; // the key is consumed by the join, not kept as data
            }
            let seen = name_counts.entry(name.clone()).or_insert(0);
            let final_name = if *seen == 0 {
                name.clone()
            } else {
                format!("{}_{}", name, seen)
            };
            *seen += 1;
            merged.columns.push(final_name.clone());
            resolved.push((idx, final_name));
        }

        let by_fips: HashMap<&str, &Vec<String>> = table
            .rows
            .iter()
            .filter_map(|row| row.get(key_idx).map(|fips| (fips.as_str(), row)))
            .collect();

        for (fips, cells) in merged.rows.iter_mut() {
            let source = by_fips.get(fips.as_str());
            for (idx, column) in &resolved {
                let value = source
                    .and_then(|row| row.get(*idx))
                    .map(|raw| coerce_count(column, fips, raw))
                    .unwrap_or(0);
                cells.insert(column.clone(), value);
            }
        }
    }

    merged
}

// Integer parse, then float truncated toward zero, else 0. The NAME columns
// land here too and coerce to 0, which is fine: state names come from the
// static FIPS table downstream, not from the API.
fn coerce_count(column: &str, fips: &str, raw: &str) -> i64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0;
    }
    if let Ok(v) = s.parse::<i64>() {
        return v;
    }
    if let Ok(v) = s.parse::<f64>() {
        return v as i64;
    }
    debug!(column, fips, value = s, "non-numeric cell coerced to zero");
    0
}

impl MergedTable {
    /// Reconciled column names, in arrival order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Region keys in sorted order.
    pub fn fips_codes(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value; 0 for an absent column or region.
    pub fn get(&self, fips: &str, column: &str) -> i64 {
        self.rows
            .get(fips)
            .and_then(|cells| cells.get(column))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of a variable group. Columns missing from the merged table
    /// contribute 0 rather than failing.
    pub fn sum(&self, fips: &str, columns: &[String]) -> i64 {
        columns.iter().map(|c| self.get(fips, c)).sum()
    }

    /// Which of the given columns never arrived in any fetched table.
    pub fn missing_columns<'a>(&self, wanted: &'a [String]) -> Vec<&'a str> {
        wanted
            .iter()
            .filter(|c| !self.columns.iter().any(|have| have == *c))
            .map(String::as_str)
            .collect()
    }
}
