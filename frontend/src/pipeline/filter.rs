use std::collections::BTreeSet;

use crate::models::Snapshot;

pub const ALL_FUND_TYPES: &str = "all";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FundTypeFilter {
    #[default]
    All,
    Only(String),
}

impl FundTypeFilter {
    pub fn from_value(value: &str) -> Self {
        if value.is_empty() || value == ALL_FUND_TYPES {
            FundTypeFilter::All
        } else {
            FundTypeFilter::Only(value.to_string())
        }
    }

    /// Value stored in preferences and used by the select element.
    pub fn as_value(&self) -> &str {
        match self {
            FundTypeFilter::All => ALL_FUND_TYPES,
            FundTypeFilter::Only(kind) => kind,
        }
    }
}

/// User-entered filters for the visible month. The minimum amount is kept as
/// typed so the input round-trips through preferences untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterCriteria {
    pub fund_type: FundTypeFilter,
    pub search_text: String,
    pub min_amount: String,
}

impl FilterCriteria {
    pub fn is_active(&self) -> bool {
        self.fund_type != FundTypeFilter::All
            || !self.search_text.trim().is_empty()
            || parse_min_amount(&self.min_amount).is_some()
    }

    pub fn matches_type(&self, snapshot: &Snapshot) -> bool {
        match &self.fund_type {
            FundTypeFilter::All => true,
            FundTypeFilter::Only(kind) => {
                snapshot.fund_type_str().trim().to_lowercase() == kind.trim().to_lowercase()
            }
        }
    }

    pub fn matches_search(&self, snapshot: &Snapshot) -> bool {
        let query = self.search_text.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [
            snapshot.fund_name_str(),
            snapshot.fund_number_str(),
            snapshot.fund_code_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }

    pub fn matches_min_amount(&self, snapshot: &Snapshot) -> bool {
        match parse_min_amount(&self.min_amount) {
            Some(min) => snapshot.amount_or_zero() >= min,
            None => true,
        }
    }

    pub fn matches(&self, snapshot: &Snapshot) -> bool {
        self.matches_type(snapshot)
            && self.matches_search(snapshot)
            && self.matches_min_amount(snapshot)
    }

    /// Visible subset, input order preserved.
    pub fn apply(&self, snapshots: &[Snapshot]) -> Vec<Snapshot> {
        snapshots
            .iter()
            .filter(|s| self.matches(s))
            .cloned()
            .collect()
    }
}

/// Parses `"1,000"` style input. Anything that is not a positive number
/// disables the filter.
pub fn parse_min_amount(input: &str) -> Option<f64> {
    let cleaned: String = input.chars().filter(|c| *c != ',').collect();
    let value = cleaned.trim().parse::<f64>().ok()?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Distinct non-empty fund types, sorted, for the type select.
pub fn fund_type_options(snapshots: &[Snapshot]) -> Vec<String> {
    snapshots
        .iter()
        .map(|s| s.fund_type_str().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
