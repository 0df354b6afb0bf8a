// mortgage-core/src/domain/table.rs

/// A row type that maps onto one exported file of the star schema.
///
/// `COLUMNS` is the contract shared by the exporter (header row, written even
/// for an empty table) and the loader (required columns). It must list the
/// serde names of the row's fields in declaration order.
pub trait Table {
    const NAME: &'static str;
    const COLUMNS: &'static [&'static str];

    fn file_name() -> String {
        format!("{}.csv", Self::NAME)
    }
}

/// Rounds a currency amount or percentage to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(412_345.678), 412_345.68);
        assert_eq!(round2(79.994), 79.99);
        assert_eq!(round2(40.0), 40.0);
    }
}
