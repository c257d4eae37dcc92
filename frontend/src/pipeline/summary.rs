use crate::models::{HistoryPoint, Snapshot};
use crate::pipeline::canonical::CanonicalFund;
use crate::pipeline::chart::sorted_history;

/// Headline figures for the visible rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub total_amount: f64,
    /// Number of merged fund rows, not raw snapshots.
    pub fund_count: usize,
    pub average_amount: f64,
}

impl Summary {
    pub fn compute(visible: &[Snapshot], funds: &[CanonicalFund]) -> Self {
        let total_amount: f64 = visible.iter().map(Snapshot::amount_or_zero).sum();
        let fund_count = funds.len();
        let average_amount = if fund_count > 0 {
            total_amount / fund_count as f64
        } else {
            0.0
        };
        Self {
            total_amount,
            fund_count,
            average_amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Trend {
    Unchanged,
    Up(f64),
    Down(f64),
}

impl Trend {
    /// Compares `month` with the nearest earlier month present in the
    /// history, which is not necessarily the previous calendar month.
    pub fn between(history: &[HistoryPoint], month: &str) -> Option<Self> {
        let ordered = sorted_history(history);
        let index = ordered.iter().position(|p| p.month == month)?;
        let previous = ordered.get(index.checked_sub(1)?)?;

        let current = crate::models::amount_or_zero(ordered[index].amount);
        let previous = crate::models::amount_or_zero(previous.amount);
        let diff = current - previous;

        if diff == 0.0 {
            return Some(Trend::Unchanged);
        }
        if previous <= 0.0 {
            return None;
        }

        let percent = (diff.abs() / previous * 100.0 * 10.0).round() / 10.0;
        Some(if diff > 0.0 {
            Trend::Up(percent)
        } else {
            Trend::Down(percent)
        })
    }

    pub fn text(&self) -> String {
        match self {
            Trend::Unchanged => "ללא שינוי לעומת החודש הקודם".to_string(),
            Trend::Up(percent) => format!("עלייה של {:.1}% לעומת החודש הקודם", percent),
            Trend::Down(percent) => format!("ירידה של {:.1}% לעומת החודש הקודם", percent),
        }
    }
}

pub fn trend_text(history: &[HistoryPoint], month: Option<&str>) -> Option<String> {
    Trend::between(history, month?).map(|t| t.text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::canonical::canonicalize_funds;
    use crate::pipeline::fixtures::{history, snapshot};

    #[test]
    fn summary_counts_merged_funds() {
        let mut missing = snapshot(3, 0.0, "2024-01-01", "B", "b");
        missing.amount = None;
        let visible = vec![
            snapshot(1, 100.0, "2024-01-01", "A (1)", "a"),
            snapshot(2, 50.0, "2024-01-01", "A (1)", "a2"),
            missing,
        ];
        let funds = canonicalize_funds(&visible);
        let summary = Summary::compute(&visible, &funds);

        assert_eq!(summary.total_amount, 150.0);
        assert_eq!(summary.fund_count, 2);
        assert_eq!(summary.average_amount, 75.0);
    }

    #[test]
    fn empty_summary_has_zero_average() {
        assert_eq!(Summary::compute(&[], &[]), Summary::default());
    }

    #[test]
    fn trend_reports_increase() {
        let points = vec![history("2024-02", 150.0), history("2024-01", 100.0)];
        assert_eq!(Trend::between(&points, "2024-02"), Some(Trend::Up(50.0)));
        assert_eq!(
            trend_text(&points, Some("2024-02")).as_deref(),
            Some("עלייה של 50.0% לעומת החודש הקודם")
        );
    }

    #[test]
    fn trend_reports_decrease_rounded() {
        let points = vec![history("2024-01", 300.0), history("2024-02", 200.0)];
        assert_eq!(Trend::between(&points, "2024-02"), Some(Trend::Down(33.3)));
    }

    #[test]
    fn trend_skips_gaps_in_history() {
        let points = vec![history("2023-10", 100.0), history("2024-02", 110.0)];
        assert_eq!(Trend::between(&points, "2024-02"), Some(Trend::Up(10.0)));
    }

    #[test]
    fn zero_previous_suppresses_trend() {
        let points = vec![history("2024-01", 0.0), history("2024-02", 100.0)];
        assert_eq!(trend_text(&points, Some("2024-02")), None);
    }

    #[test]
    fn equal_months_are_unchanged() {
        let points = vec![history("2024-01", 80.0), history("2024-02", 80.0)];
        assert_eq!(
            trend_text(&points, Some("2024-02")).as_deref(),
            Some("ללא שינוי לעומת החודש הקודם")
        );
    }

    #[test]
    fn no_trend_without_previous_month() {
        let points = vec![history("2024-01", 80.0), history("2024-02", 90.0)];
        assert_eq!(trend_text(&points, Some("2024-01")), None);
        assert_eq!(trend_text(&points, Some("2023-05")), None);
        assert_eq!(trend_text(&points, None), None);
    }
}
