use std::cmp::Ordering;

use crate::models::Snapshot;
use crate::pipeline::canonical::CanonicalFund;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    None,
    Date,
    Amount,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header click cycle: a new field starts ascending, the same field flips
    /// to descending, and a third click clears the sort.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field != field {
            return Self::new(field, SortDirection::Asc);
        }
        match self.direction {
            SortDirection::Asc => Self::new(field, SortDirection::Desc),
            SortDirection::Desc => Self::default(),
        }
    }
}

/// Row types that can be ordered by the table headers.
pub trait SortKey {
    fn sort_date(&self) -> &str;
    fn sort_amount(&self) -> f64;
}

impl SortKey for Snapshot {
    fn sort_date(&self) -> &str {
        self.date_str()
    }

    fn sort_amount(&self) -> f64 {
        self.amount_or_zero()
    }
}

impl SortKey for CanonicalFund {
    fn sort_date(&self) -> &str {
        &self.snapshot_date
    }

    fn sort_amount(&self) -> f64 {
        if self.total_amount.is_finite() {
            self.total_amount
        } else {
            0.0
        }
    }
}

/// Returns a sorted copy. Equal keys keep their input order in both
/// directions; descending reverses the comparator, not the result.
pub fn sort_rows<T: SortKey + Clone>(rows: &[T], spec: SortSpec) -> Vec<T> {
    let mut sorted = rows.to_vec();
    let compare: fn(&T, &T) -> Ordering = match spec.field {
        SortField::None => return sorted,
        SortField::Date => |a, b| a.sort_date().cmp(b.sort_date()),
        SortField::Amount => |a, b| {
            a.sort_amount()
                .partial_cmp(&b.sort_amount())
                .unwrap_or(Ordering::Equal)
        },
    };

    match spec.direction {
        SortDirection::Asc => sorted.sort_by(compare),
        SortDirection::Desc => sorted.sort_by(|a, b| compare(b, a)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::canonical::canonicalize_funds;
    use crate::pipeline::fixtures::snapshot;

    fn ids(rows: &[Snapshot]) -> Vec<i64> {
        rows.iter().map(|s| s.id).collect()
    }

    fn rows() -> Vec<Snapshot> {
        let mut missing = snapshot(5, 0.0, "", "E", "e");
        missing.amount = None;
        vec![
            snapshot(1, 300.0, "2024-01-03", "A", "a"),
            snapshot(2, 100.0, "2024-01-01", "B", "b"),
            snapshot(3, 300.0, "2024-01-02", "C", "c"),
            snapshot(4, 100.0, "2024-01-03", "D", "d"),
            missing,
        ]
    }

    #[test]
    fn none_keeps_input_order() {
        let input = rows();
        let sorted = sort_rows(&input, SortSpec::new(SortField::None, SortDirection::Desc));
        assert_eq!(ids(&sorted), ids(&input));
    }

    #[test]
    fn amount_sort_is_stable_both_ways() {
        let input = rows();
        let asc = sort_rows(&input, SortSpec::new(SortField::Amount, SortDirection::Asc));
        let desc = sort_rows(&input, SortSpec::new(SortField::Amount, SortDirection::Desc));

        assert_eq!(ids(&asc), vec![5, 2, 4, 1, 3]);
        // ties (2,4) and (1,3) keep input order, they are not inverted
        assert_eq!(ids(&desc), vec![1, 3, 2, 4, 5]);

        let mut reversed = asc.clone();
        reversed.reverse();
        assert_ne!(ids(&reversed), ids(&desc));
    }

    #[test]
    fn date_sort_puts_empty_dates_lowest() {
        let input = rows();
        let asc = sort_rows(&input, SortSpec::new(SortField::Date, SortDirection::Asc));
        assert_eq!(ids(&asc), vec![5, 2, 3, 1, 4]);

        let desc = sort_rows(&input, SortSpec::new(SortField::Date, SortDirection::Desc));
        assert_eq!(ids(&desc), vec![1, 4, 3, 2, 5]);
    }

    #[test]
    fn sorting_is_idempotent() {
        for field in [SortField::Date, SortField::Amount] {
            for direction in [SortDirection::Asc, SortDirection::Desc] {
                let spec = SortSpec::new(field, direction);
                let once = sort_rows(&rows(), spec);
                let twice = sort_rows(&once, spec);
                assert_eq!(ids(&once), ids(&twice));
            }
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let input = rows();
        let _ = sort_rows(&input, SortSpec::new(SortField::Amount, SortDirection::Desc));
        assert_eq!(ids(&input), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn canonical_funds_sort_by_total() {
        let input = vec![
            snapshot(1, 10.0, "2024-01-01", "A (1)", "a"),
            snapshot(2, 50.0, "2024-01-01", "B (2)", "b"),
            snapshot(3, 45.0, "2024-01-01", "A (1)", "a"),
        ];
        let funds = canonicalize_funds(&input);
        let sorted = sort_rows(&funds, SortSpec::new(SortField::Amount, SortDirection::Desc));
        let codes: Vec<&str> = sorted.iter().map(|f| f.core_code.as_str()).collect();
        assert_eq!(codes, vec!["1", "2"]);
    }

    #[test]
    fn header_toggle_cycles() {
        let spec = SortSpec::default().toggle(SortField::Amount);
        assert_eq!(spec, SortSpec::new(SortField::Amount, SortDirection::Asc));
        let spec = spec.toggle(SortField::Amount);
        assert_eq!(spec.direction, SortDirection::Desc);
        assert_eq!(spec.toggle(SortField::Amount), SortSpec::default());
        assert_eq!(
            spec.toggle(SortField::Date),
            SortSpec::new(SortField::Date, SortDirection::Asc)
        );
    }
}
