// src/states.rs
//
// Static reference tables: state FIPS codes and the 2020 decennial
// urban/rural population split. Loaded once at process start.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Urban/rural share of a state's population. The pair always sums to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UrbanRural {
    pub pct_urban: f64,
    pub pct_rural: f64,
}

static STATE_FIPS_TABLE: &[(&str, &str)] = &[
    ("01", "Alabama"),
    ("02", "Alaska"),
    ("04", "Arizona"),
    ("05", "Arkansas"),
    ("06", "California"),
    ("08", "Colorado"),
    ("09", "Connecticut"),
    ("10", "Delaware"),
    ("11", "District of Columbia"),
    ("12", "Florida"),
    ("13", "Georgia"),
    ("15", "Hawaii"),
    ("16", "Idaho"),
    ("17", "Illinois"),
    ("18", "Indiana"),
    ("19", "Iowa"),
    ("20", "Kansas"),
    ("21", "Kentucky"),
    ("22", "Louisiana"),
    ("23", "Maine"),
    ("24", "Maryland"),
    ("25", "Massachusetts"),
    ("26", "Michigan"),
    ("27", "Minnesota"),
    ("28", "Mississippi"),
    ("29", "Missouri"),
    ("30", "Montana"),
    ("31", "Nebraska"),
    ("32", "Nevada"),
    ("33", "New Hampshire"),
    ("34", "New Jersey"),
    ("35", "New Mexico"),
    ("36", "New York"),
    ("37", "North Carolina"),
    ("38", "North Dakota"),
    ("39", "Ohio"),
    ("40", "Oklahoma"),
    ("41", "Oregon"),
    ("42", "Pennsylvania"),
    ("44", "Rhode Island"),
    ("45", "South Carolina"),
    ("46", "South Dakota"),
    ("47", "Tennessee"),
    ("48", "Texas"),
    ("49", "Utah"),
    ("50", "Vermont"),
    ("51", "Virginia"),
    ("53", "Washington"),
    ("54", "West Virginia"),
    ("55", "Wisconsin"),
    ("56", "Wyoming"),
];

static URBAN_RURAL_TABLE: &[(&str, f64, f64)] = &[
    ("Alabama", 0.59, 0.41),
    ("Alaska", 0.66, 0.34),
    ("Arizona", 0.89, 0.11),
    ("Arkansas", 0.56, 0.44),
    ("California", 0.95, 0.05),
    ("Colorado", 0.88, 0.12),
    ("Connecticut", 0.87, 0.13),
    ("Delaware", 0.83, 0.17),
    ("District of Columbia", 1.0, 0.0),
    ("Florida", 0.91, 0.09),
    ("Georgia", 0.75, 0.25),
    ("Hawaii", 0.93, 0.07),
    ("Idaho", 0.72, 0.28),
    ("Illinois", 0.87, 0.13),
    ("Indiana", 0.72, 0.28),
    ("Iowa", 0.64, 0.36),
    ("Kansas", 0.67, 0.33),
    ("Kentucky", 0.59, 0.41),
    ("Louisiana", 0.79, 0.21),
    ("Maine", 0.61, 0.39),
    ("Maryland", 0.87, 0.13),
    ("Massachusetts", 0.92, 0.08),
    ("Michigan", 0.73, 0.27),
    ("Minnesota", 0.75, 0.25),
    ("Mississippi", 0.53, 0.47),
    ("Missouri", 0.70, 0.30),
    ("Montana", 0.54, 0.46),
    ("Nebraska", 0.65, 0.35),
    ("Nevada", 0.95, 0.05),
    ("New Hampshire", 0.61, 0.39),
    ("New Jersey", 0.95, 0.05),
    ("New Mexico", 0.78, 0.22),
    ("New York", 0.88, 0.12),
    ("North Carolina", 0.62, 0.38),
    ("North Dakota", 0.57, 0.43),
    ("Ohio", 0.77, 0.23),
    ("Oklahoma", 0.65, 0.35),
    ("Oregon", 0.81, 0.19),
    ("Pennsylvania", 0.79, 0.21),
    ("Rhode Island", 0.93, 0.07),
    ("South Carolina", 0.67, 0.33),
    ("South Dakota", 0.56, 0.44),
    ("Tennessee", 0.66, 0.34),
    ("Texas", 0.84, 0.16),
    ("Utah", 0.88, 0.12),
    ("Vermont", 0.62, 0.38),
    ("Virginia", 0.74, 0.26),
    ("Washington", 0.84, 0.16),
    ("West Virginia", 0.49, 0.51),
    ("Wisconsin", 0.70, 0.30),
    ("Wyoming", 0.64, 0.36),
];

static STATE_FIPS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| STATE_FIPS_TABLE.iter().copied().collect());

static URBAN_RURAL: Lazy<HashMap<&'static str, UrbanRural>> = Lazy::new(|| {
    URBAN_RURAL_TABLE
        .iter()
        .map(|&(name, pct_urban, pct_rural)| {
            (
                name,
                UrbanRural {
                    pct_urban,
                    pct_rural,
                },
            )
        })
        .collect()
});

/// State name for a zero-padded FIPS code. Territories (e.g. Puerto Rico)
/// are deliberately absent.
pub fn state_name(fips: &str) -> Option<&'static str> {
    STATE_FIPS.get(fips).copied()
}

/// Urban/rural split for a state name produced by [`state_name`].
pub fn urban_rural(name: &str) -> Option<UrbanRural> {
    URBAN_RURAL.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fips_table_covers_fifty_states_plus_dc() {
        assert_eq!(STATE_FIPS_TABLE.len(), 51);
        assert_eq!(state_name("01"), Some("Alabama"));
        assert_eq!(state_name("56"), Some("Wyoming"));
        assert_eq!(state_name("72"), None); // Puerto Rico
    }

    #[test]
    fn every_state_has_an_urban_rural_entry() {
        for (fips, name) in STATE_FIPS_TABLE {
            assert!(
                urban_rural(name).is_some(),
                "missing urban/rural split for {name} ({fips})"
            );
        }
        assert_eq!(URBAN_RURAL_TABLE.len(), STATE_FIPS_TABLE.len());
    }

    #[test]
    fn urban_rural_pairs_sum_to_one() {
        for (name, pct_urban, pct_rural) in URBAN_RURAL_TABLE {
            assert!(
                (pct_urban + pct_rural - 1.0).abs() < 1e-9,
                "split for {name} does not sum to 1"
            );
        }
    }
}
