// src/fetch/vars.rs
//
// ACS 5-year variable codes. Detailed tables used:
//   B02001 - race, B01001 - sex by age, B15003 - educational attainment.

/// Total population (race table universe).
pub const TOTAL_POPULATION: &str = "B02001_001E";

pub const RACE_WHITE: &str = "B02001_002E";
pub const RACE_BLACK: &str = "B02001_003E";
pub const RACE_NATIVE: &str = "B02001_004E";
pub const RACE_ASIAN: &str = "B02001_005E";
pub const RACE_PACIFIC: &str = "B02001_006E";

/// Universe of the sex-by-age table.
pub const AGE_TOTAL: &str = "B01001_001E";
pub const SEX_MALE: &str = "B01001_002E";
pub const SEX_FEMALE: &str = "B01001_026E";

/// Universe of the educational-attainment table (population 25 and over).
pub const EDU_TOTAL: &str = "B15003_001E";
pub const EDU_ASSOCIATE: &str = "B15003_021E";
pub const EDU_BACHELOR: &str = "B15003_022E";

fn sex_by_age(indices: impl Iterator<Item = u32>) -> Vec<String> {
    indices.map(|i| format!("B01001_{:03}E", i)).collect()
}

fn attainment(indices: impl Iterator<Item = u32>) -> Vec<String> {
    indices.map(|i| format!("B15003_{:03}E", i)).collect()
}

/// Variables requested by the race query.
pub fn race_query() -> Vec<String> {
    (1..7).map(|i| format!("B02001_{:03}E", i)).collect()
}

/// Variables requested by the age query: every male and female
/// single-age-band estimate plus the table total.
pub fn age_query() -> Vec<String> {
    let mut vars = sex_by_age((3..26).chain(27..50));
    vars.push(AGE_TOTAL.to_string());
    vars
}

/// Variables requested by the education query.
pub fn education_query() -> Vec<String> {
    attainment(1..26)
}

/// Variables requested by the gender query.
pub fn gender_query() -> Vec<String> {
    vec![SEX_MALE.to_string(), SEX_FEMALE.to_string()]
}

// Age buckets. Each is the union of a male and a female band range from
// B01001; the bands are disjoint across buckets.

pub fn age_18_29() -> Vec<String> {
    sex_by_age((7..12).chain(31..36))
}

pub fn age_30_44() -> Vec<String> {
    sex_by_age((12..15).chain(36..39))
}

pub fn age_45_64() -> Vec<String> {
    sex_by_age((15..19).chain(39..43))
}

pub fn age_65_plus() -> Vec<String> {
    sex_by_age((19..26).chain(43..50))
}

// Education buckets. Associate and bachelor are single codes
// (EDU_ASSOCIATE, EDU_BACHELOR); the rest are ranges.

pub fn edu_hs_or_less() -> Vec<String> {
    attainment(2..17)
}

pub fn edu_some_college() -> Vec<String> {
    attainment(17..21)
}

pub fn edu_graduate() -> Vec<String> {
    attainment(23..26)
}
