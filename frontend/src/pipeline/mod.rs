//! Pure transformations from fetched snapshots to what the accounts page
//! shows: month groups, merged fund rows, sorting, filtering, summary
//! figures, the history chart geometry and the CSV export body.
//!
//! Nothing here touches the browser, so every function is safe to call on
//! each render.

pub mod canonical;
pub mod chart;
pub mod csv;
pub mod filter;
pub mod grouping;
pub mod sort;
pub mod summary;

pub use canonical::{canonicalize_funds, CanonicalFund};
pub use chart::build_history_chart;
pub use filter::{FilterCriteria, FundTypeFilter, ALL_FUND_TYPES};
pub use grouping::{group_by_month, known_month_keys, snapshots_for_month};
pub use sort::{sort_rows, SortDirection, SortField, SortSpec};
pub use summary::{trend_text, Summary};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{HistoryPoint, Snapshot};

    pub fn snapshot(id: i64, amount: f64, date: &str, code: &str, name: &str) -> Snapshot {
        Snapshot {
            id,
            client_id: Some(1),
            fund_code: Some(code.to_string()),
            fund_type: Some("פנסיה".to_string()),
            fund_name: Some(name.to_string()),
            fund_number: Some(format!("N-{}", id)),
            amount: Some(amount),
            snapshot_date: Some(date.to_string()),
        }
    }

    pub fn history(month: &str, amount: f64) -> HistoryPoint {
        HistoryPoint {
            month: month.to_string(),
            amount: Some(amount),
        }
    }
}
