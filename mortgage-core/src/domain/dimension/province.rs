// mortgage-core/src/domain/dimension/province.rs

use serde::Serialize;

use crate::domain::table::Table;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct Province {
    #[serde(rename = "Province_Code")]
    pub code: &'static str,
    #[serde(rename = "Province_Name")]
    pub name: &'static str,
    #[serde(rename = "Region")]
    pub region: &'static str,
    /// Share of national applications, used as the sampling weight.
    #[serde(rename = "Population_Weight")]
    pub population_weight: f64,
    /// Multiplier applied to sampled property values.
    #[serde(rename = "Price_Index")]
    pub price_index: f64,
}

impl Table for Province {
    const NAME: &'static str = "dim_province";
    const COLUMNS: &'static [&'static str] = &[
        "Province_Code",
        "Province_Name",
        "Region",
        "Population_Weight",
        "Price_Index",
    ];
}

const fn province(
    code: &'static str,
    name: &'static str,
    region: &'static str,
    population_weight: f64,
    price_index: f64,
) -> Province {
    Province {
        code,
        name,
        region,
        population_weight,
        price_index,
    }
}

pub const PROVINCES: [Province; 13] = [
    province("ON", "Ontario", "Central", 0.38, 1.4),
    province("QC", "Quebec", "Central", 0.23, 1.0),
    province("BC", "British Columbia", "West", 0.13, 1.4),
    province("AB", "Alberta", "West", 0.11, 1.1),
    province("MB", "Manitoba", "West", 0.04, 1.0),
    province("SK", "Saskatchewan", "West", 0.03, 1.0),
    province("NS", "Nova Scotia", "Atlantic", 0.03, 1.0),
    province("NB", "New Brunswick", "Atlantic", 0.02, 1.0),
    province("NL", "Newfoundland and Labrador", "Atlantic", 0.01, 1.0),
    province("PE", "Prince Edward Island", "Atlantic", 0.005, 1.0),
    province("NT", "Northwest Territories", "North", 0.005, 1.0),
    province("YT", "Yukon", "North", 0.005, 1.0),
    province("NU", "Nunavut", "North", 0.005, 1.0),
];

pub fn provinces() -> Vec<Province> {
    PROVINCES.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_thirteen_unique_codes() {
        let codes: HashSet<&str> = PROVINCES.iter().map(|p| p.code).collect();
        assert_eq!(codes.len(), 13);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = PROVINCES.iter().map(|p| p.population_weight).sum();
        assert!((total - 1.0).abs() < 1e-9, "got {}", total);
    }
}
