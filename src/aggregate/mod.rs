// src/aggregate/mod.rs

use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing::warn;

use crate::fetch::vars;
use crate::merge::MergedTable;
use crate::states;

/// One output row. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateRow {
    pub state_name: String,
    pub total_population: i64,
    pub pct_white: f64,
    pub pct_black: f64,
    pub pct_native: f64,
    pub pct_asian: f64,
    pub pct_two_or_more: f64,
    pub male_pop: i64,
    pub female_pop: i64,
    pub pct_male: f64,
    pub pct_female: f64,
    pub pct_18_29: f64,
    pub pct_30_44: f64,
    pub pct_45_64: f64,
    pub pct_65_plus: f64,
    pub pct_hs_or_less: f64,
    pub pct_some_college: f64,
    pub pct_assoc: f64,
    pub pct_bachelor: f64,
    pub pct_grad: f64,
    pub urban_pop: i64,
    pub rural_pop: i64,
    pub pct_urban: f64,
    pub pct_rural: f64,
}

// Zero denominators are substituted with 1 so the affected percentages come
// out 0 instead of NaN/inf. Applies uniformly to every category.
fn ratio(count: i64, denominator: i64) -> f64 {
    let denominator = if denominator == 0 { 1 } else { denominator };
    count as f64 / denominator as f64
}

/// Turn the merged raw counts into the output schema, one row per state in
/// FIPS order.
///
/// A FIPS code with no entry in the static name table is skipped with a
/// diagnostic: the live endpoint returns territories (Puerto Rico) that the
/// static tables deliberately omit. A state name with no urban/rural entry
/// is a fatal configuration error.
pub fn aggregate(merged: &MergedTable) -> Result<Vec<StateRow>> {
    warn_missing_variables(merged);

    let mut rows = Vec::with_capacity(merged.len());
    for fips in merged.fips_codes() {
        let Some(name) = states::state_name(fips) else {
            warn!(fips, "no state name for FIPS code; row skipped");
            continue;
        };

        let total = merged.get(fips, vars::TOTAL_POPULATION);

        // race: the residual picks up everything the five fetched codes
        // miss (two-or-more plus pacific islander), floored at zero
        let white = merged.get(fips, vars::RACE_WHITE);
        let black = merged.get(fips, vars::RACE_BLACK);
        let native = merged.get(fips, vars::RACE_NATIVE);
        let asian = merged.get(fips, vars::RACE_ASIAN);
        let pacific = merged.get(fips, vars::RACE_PACIFIC);
        let two_or_more = (total - (white + black + native + asian + pacific)).max(0);

        // sex
        let male_pop = merged.get(fips, vars::SEX_MALE);
        let female_pop = merged.get(fips, vars::SEX_FEMALE);
        let sex_total = male_pop + female_pop;

        // age bands over the sex-by-age table universe
        let age_total = merged.get(fips, vars::AGE_TOTAL);

        // education bands over the attainment table universe
        let edu_total = merged.get(fips, vars::EDU_TOTAL);

        // urban/rural: counts derive from the static split so that
        // urban + rural always equals the total exactly
        let split = states::urban_rural(name)
            .ok_or_else(|| anyhow!("no urban/rural percentages for {}", name))?;
        let urban_pop = (split.pct_urban * total as f64).round() as i64;
        let rural_pop = total - urban_pop;

        rows.push(StateRow {
            state_name: name.to_string(),
            total_population: total,
            pct_white: ratio(white, total),
            pct_black: ratio(black, total),
            pct_native: ratio(native, total),
            pct_asian: ratio(asian, total),
            pct_two_or_more: ratio(two_or_more, total),
            male_pop,
            female_pop,
            pct_male: ratio(male_pop, sex_total),
            pct_female: ratio(female_pop, sex_total),
            pct_18_29: ratio(merged.sum(fips, &vars::age_18_29()), age_total),
            pct_30_44: ratio(merged.sum(fips, &vars::age_30_44()), age_total),
            pct_45_64: ratio(merged.sum(fips, &vars::age_45_64()), age_total),
            pct_65_plus: ratio(merged.sum(fips, &vars::age_65_plus()), age_total),
            pct_hs_or_less: ratio(merged.sum(fips, &vars::edu_hs_or_less()), edu_total),
            pct_some_college: ratio(merged.sum(fips, &vars::edu_some_college()), edu_total),
            pct_assoc: ratio(merged.get(fips, vars::EDU_ASSOCIATE), edu_total),
            pct_bachelor: ratio(merged.get(fips, vars::EDU_BACHELOR), edu_total),
            pct_grad: ratio(merged.sum(fips, &vars::edu_graduate()), edu_total),
            urban_pop,
            rural_pop,
            pct_urban: split.pct_urban,
            pct_rural: split.pct_rural,
        });
    }

    Ok(rows)
}

// Absent variable columns still aggregate (as zero), but say so once per
// column: a silently mistyped code would otherwise under-count forever.
fn warn_missing_variables(merged: &MergedTable) {
    let mut wanted = vars::race_query();
    wanted.extend(vars::age_query());
    wanted.extend(vars::education_query());
    wanted.extend(vars::gender_query());

    for column in merged.missing_columns(&wanted) {
        warn!(column, "variable absent from merged table; treated as zero");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::RawTable;
    use crate::merge;

    const TOLERANCE: f64 = 1e-9;

    fn table(headers: &[&str], rows: &[Vec<&str>]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    fn race_table(rows: &[Vec<&str>]) -> RawTable {
        table(
            &[
                "NAME",
                "B02001_001E",
                "B02001_002E",
                "B02001_003E",
                "B02001_004E",
                "B02001_005E",
                "B02001_006E",
                "state",
            ],
            rows,
        )
    }

    #[test]
    fn race_percentages_sum_to_one_without_unmodeled_groups() -> Result<()> {
        // pacific at zero, so the residual is exactly "two or more"
        let merged = merge::merge(&[race_table(&[vec![
            "Vermont", "1000", "600", "150", "50", "100", "0", "50",
        ]])]);
        let rows = aggregate(&merged)?;
        assert_eq!(rows.len(), 1);
        let row = &rows[0];

        assert_eq!(row.state_name, "Vermont");
        assert!((row.pct_white - 0.6).abs() < TOLERANCE);
        assert!((row.pct_two_or_more - 0.1).abs() < TOLERANCE);
        let sum = row.pct_white + row.pct_black + row.pct_native + row.pct_asian
            + row.pct_two_or_more;
        assert!((sum - 1.0).abs() < TOLERANCE);
        Ok(())
    }

    #[test]
    fn race_residual_is_floored_at_zero() -> Result<()> {
        // fetched groups overshoot the total; the residual must not go negative
        let merged = merge::merge(&[race_table(&[vec![
            "Vermont", "100", "80", "30", "0", "0", "0", "50",
        ]])]);
        let rows = aggregate(&merged)?;
        assert_eq!(rows[0].pct_two_or_more, 0.0);
        Ok(())
    }

    #[test]
    fn sex_percentages_guard_a_zero_denominator() -> Result<()> {
        let gender = table(
            &["NAME", "B01001_002E", "B01001_026E", "state"],
            &[vec!["Vermont", "480", "520", "50"], vec!["Wyoming", "0", "0", "56"]],
        );
        let rows = aggregate(&merge::merge(&[gender]))?;

        let vermont = &rows[0];
        assert!((vermont.pct_male - 0.48).abs() < TOLERANCE);
        assert!((vermont.pct_female - 0.52).abs() < TOLERANCE);
        assert!((vermont.pct_male + vermont.pct_female - 1.0).abs() < TOLERANCE);

        // both counts zero: substituted denominator, both percentages zero
        let wyoming = &rows[1];
        assert_eq!(wyoming.male_pop, 0);
        assert_eq!(wyoming.pct_male, 0.0);
        assert_eq!(wyoming.pct_female, 0.0);
        Ok(())
    }

    #[test]
    fn zeroed_age_bands_do_not_divide_by_zero() -> Result<()> {
        // one region with real age data, one with every age variable zero
        let age = table(
            &["NAME", "B01001_001E", "B01001_007E", "B01001_031E", "state"],
            &[
                vec!["Vermont", "1000", "60", "60", "50"],
                vec!["Wyoming", "0", "0", "0", "56"],
            ],
        );
        let rows = aggregate(&merge::merge(&[age]))?;

        assert!((rows[0].pct_18_29 - 0.12).abs() < TOLERANCE);

        let wyoming = &rows[1];
        assert_eq!(wyoming.pct_18_29, 0.0);
        assert_eq!(wyoming.pct_30_44, 0.0);
        assert_eq!(wyoming.pct_45_64, 0.0);
        assert_eq!(wyoming.pct_65_plus, 0.0);
        Ok(())
    }

    #[test]
    fn education_bands_use_the_attainment_universe() -> Result<()> {
        let education = table(
            &[
                "NAME",
                "B15003_001E",
                "B15003_002E",
                "B15003_017E",
                "B15003_021E",
                "B15003_022E",
                "B15003_023E",
                "state",
            ],
            &[vec!["Vermont", "500", "200", "100", "50", "100", "50", "50"]],
        );
        let rows = aggregate(&merge::merge(&[education]))?;
        let row = &rows[0];

        assert!((row.pct_hs_or_less - 0.4).abs() < TOLERANCE);
        assert!((row.pct_some_college - 0.2).abs() < TOLERANCE);
        assert!((row.pct_assoc - 0.1).abs() < TOLERANCE);
        assert!((row.pct_bachelor - 0.2).abs() < TOLERANCE);
        assert!((row.pct_grad - 0.1).abs() < TOLERANCE);
        Ok(())
    }

    #[test]
    fn urban_and_rural_counts_sum_to_the_total_exactly() -> Result<()> {
        // odd total so the rounded urban count cannot split evenly
        let merged = merge::merge(&[race_table(&[vec![
            "Vermont", "1001", "1001", "0", "0", "0", "0", "50",
        ]])]);
        let rows = aggregate(&merged)?;
        let row = &rows[0];

        // Vermont is 62% urban: round(0.62 * 1001) = 621
        assert_eq!(row.urban_pop, 621);
        assert_eq!(row.rural_pop, 380);
        assert_eq!(row.urban_pop + row.rural_pop, row.total_population);
        assert!((row.pct_urban - 0.62).abs() < TOLERANCE);
        assert!((row.pct_rural - 0.38).abs() < TOLERANCE);
        Ok(())
    }

    #[test]
    fn unknown_fips_codes_are_skipped() -> Result<()> {
        let merged = merge::merge(&[race_table(&[
            vec!["Vermont", "1000", "1000", "0", "0", "0", "0", "50"],
            vec!["Puerto Rico", "3200000", "0", "0", "0", "0", "0", "72"],
        ])]);
        let rows = aggregate(&merged)?;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].state_name, "Vermont");
        Ok(())
    }
}
