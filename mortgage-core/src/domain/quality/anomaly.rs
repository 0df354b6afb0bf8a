// mortgage-core/src/domain/quality/anomaly.rs

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::domain::summary::TrendRow;
use crate::domain::table::round2;

/// Missing months listed in the text report.
const SHOWN_GAPS: usize = 5;
const IQR_FACTOR: f64 = 1.5;

/// Tukey fences of one monthly series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IqrFences {
    pub lower: f64,
    pub upper: f64,
}

impl IqrFences {
    /// `None` below four points: quartiles mean nothing there.
    pub fn of(values: &[u64]) -> Option<Self> {
        if values.len() < 4 {
            return None;
        }
        let mut sorted: Vec<f64> = values.iter().map(|v| *v as f64).collect();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        Some(Self {
            lower: round2(q1 - IQR_FACTOR * iqr),
            upper: round2(q3 + IQR_FACTOR * iqr),
        })
    }

    pub fn contains(&self, value: u64) -> bool {
        let v = value as f64;
        v >= self.lower && v <= self.upper
    }
}

/// Linear interpolation between closest ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyOutlier {
    pub year_month: String,
    pub value: u64,
}

/// Outliers of one monthly counter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutlierSeries {
    pub fences: Option<IqrFences>,
    pub outliers: Vec<MonthlyOutlier>,
}

impl OutlierSeries {
    fn scan(trends: &[TrendRow], value: impl Fn(&TrendRow) -> u64) -> Self {
        let values: Vec<u64> = trends.iter().map(&value).collect();
        let Some(fences) = IqrFences::of(&values) else {
            return Self::default();
        };
        let outliers = trends
            .iter()
            .filter(|row| !fences.contains(value(row)))
            .map(|row| MonthlyOutlier {
                year_month: row.year_month.clone(),
                value: value(row),
            })
            .collect();
        Self {
            fences: Some(fences),
            outliers,
        }
    }
}

/// Time-series checks on the national monthly rollup. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnomalyScan {
    /// Months between the first and last active month with no application.
    pub missing_months: Vec<String>,
    pub applications: OutlierSeries,
    pub approvals: OutlierSeries,
}

impl AnomalyScan {
    pub fn from_trends(trends: &[TrendRow]) -> Self {
        Self {
            missing_months: missing_months(trends),
            applications: OutlierSeries::scan(trends, |r| r.total_applications),
            approvals: OutlierSeries::scan(trends, |r| r.approved_applications),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.missing_months.is_empty()
            && self.applications.outliers.is_empty()
            && self.approvals.outliers.is_empty()
    }
}

fn parse_year_month(key: &str) -> Option<(i32, u32)> {
    let (year, month) = key.split_once('-')?;
    Some((year.parse().ok()?, month.parse().ok()?))
}

fn missing_months(trends: &[TrendRow]) -> Vec<String> {
    let present: BTreeSet<(i32, u32)> = trends
        .iter()
        .filter_map(|r| parse_year_month(&r.year_month))
        .collect();
    let (Some(first), Some(last)) = (present.first(), present.last()) else {
        return Vec::new();
    };

    let mut gaps = Vec::new();
    let (mut year, mut month) = *first;
    while (year, month) < *last {
        if !present.contains(&(year, month)) {
            gaps.push(format!("{:04}-{:02}", year, month));
        }
        (year, month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    }
    gaps
}

impl fmt::Display for AnomalyScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ANOMALIES")?;
        if self.is_empty() {
            return writeln!(f, "  None detected.");
        }
        if !self.missing_months.is_empty() {
            writeln!(f, "  Missing months: {} gap(s)", self.missing_months.len())?;
            for month in self.missing_months.iter().take(SHOWN_GAPS) {
                writeln!(f, "    - {}", month)?;
            }
        }
        for (label, series) in [("Application", &self.applications), ("Approval", &self.approvals)] {
            if let (Some(fences), false) = (series.fences, series.outliers.is_empty()) {
                writeln!(
                    f,
                    "  {} outliers: {} month(s) outside [{:.2}, {:.2}]",
                    label,
                    series.outliers.len(),
                    fences.lower,
                    fences.upper
                )?;
                for outlier in &series.outliers {
                    writeln!(f, "    - {}: {}", outlier.year_month, outlier.value)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(key: &str, total: u64, approved: u64) -> TrendRow {
        TrendRow {
            year_month: key.to_string(),
            total_applications: total,
            approved_applications: approved,
            total_mortgage_value: 0.0,
            mom_applications_change: None,
            mom_mortgage_value_change: None,
            yoy_applications_change: None,
        }
    }

    #[test]
    fn test_quartiles_interpolate() {
        // q1 = 2.0, q3 = 4.0 sur [1..5]
        let fences = IqrFences::of(&[5, 1, 4, 2, 3]);
        assert_eq!(fences, Some(IqrFences { lower: -1.0, upper: 7.0 }));
        assert_eq!(IqrFences::of(&[1, 2, 3]), None);
    }

    #[test]
    fn test_gaps_across_year_end() {
        let trends = vec![
            month("2020-11", 10, 7),
            month("2021-02", 10, 7),
            month("2021-03", 10, 7),
        ];
        let scan = AnomalyScan::from_trends(&trends);
        assert_eq!(scan.missing_months, vec!["2020-12", "2021-01"]);
    }

    #[test]
    fn test_volume_spike_is_flagged() {
        let trends = vec![
            month("2020-01", 100, 75),
            month("2020-02", 104, 80),
            month("2020-03", 98, 72),
            month("2020-04", 101, 77),
            month("2020-05", 400, 76),
        ];
        let scan = AnomalyScan::from_trends(&trends);
        assert_eq!(
            scan.applications.outliers,
            vec![MonthlyOutlier {
                year_month: "2020-05".to_string(),
                value: 400
            }]
        );
        assert!(scan.approvals.outliers.is_empty());
        assert!(scan.missing_months.is_empty());

        let text = scan.to_string();
        assert!(text.contains("Application outliers: 1 month(s)"));
        assert!(text.contains("2020-05: 400"));
    }

    #[test]
    fn test_steady_series_is_clean() {
        let trends: Vec<TrendRow> = (1..=12)
            .map(|m| month(&format!("2022-{:02}", m), 50, 40))
            .collect();
        let scan = AnomalyScan::from_trends(&trends);
        assert!(scan.is_empty());
        assert_eq!(scan.to_string(), "ANOMALIES\n  None detected.\n");
    }
}
