// mortgage-core/src/domain/quality/report.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::quality::rules::Rule;

/// Sample identifiers kept per rule.
pub const MAX_SAMPLES: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleFinding {
    pub count: u64,
    /// First offending identifiers, in table order.
    pub sample_ids: Vec<u64>,
}

/// Outcome of a validation pass. Findings are data, not errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub facts_checked: u64,
    pub summary_rows_checked: u64,
    pub findings: BTreeMap<Rule, RuleFinding>,
}

impl ValidationReport {
    pub fn record(&mut self, rule: Rule, id: Option<u64>) {
        let finding = self.findings.entry(rule).or_default();
        finding.count += 1;
        if let Some(id) = id
            && finding.sample_ids.len() < MAX_SAMPLES
        {
            finding.sample_ids.push(id);
        }
    }

    pub fn count(&self, rule: Rule) -> u64 {
        self.findings.get(&rule).map_or(0, |f| f.count)
    }

    pub fn total_violations(&self) -> u64 {
        self.findings.values().map(|f| f.count).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}
