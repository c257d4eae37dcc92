use std::collections::{BTreeMap, BTreeSet};

use crate::models::{MonthKey, Snapshot};

/// Partitions snapshots by month, keeping input order inside each group.
/// Iterate the map in reverse for most-recent-first display.
pub fn group_by_month(snapshots: &[Snapshot]) -> BTreeMap<MonthKey, Vec<Snapshot>> {
    let mut groups: BTreeMap<MonthKey, Vec<Snapshot>> = BTreeMap::new();
    for snapshot in snapshots {
        groups
            .entry(snapshot.month_key())
            .or_default()
            .push(snapshot.clone());
    }
    groups
}

/// Distinct `YYYY-MM` keys, newest first. Undated snapshots are not
/// navigable and are left out.
pub fn known_month_keys(snapshots: &[Snapshot]) -> Vec<String> {
    let keys: BTreeSet<String> = snapshots
        .iter()
        .filter_map(|s| s.month_key().known().map(str::to_string))
        .collect();
    keys.into_iter().rev().collect()
}

/// Snapshots of one month, or all of them when no month is selected.
pub fn snapshots_for_month(snapshots: &[Snapshot], month: Option<&str>) -> Vec<Snapshot> {
    match month {
        None => snapshots.to_vec(),
        Some(month) => snapshots
            .iter()
            .filter(|s| s.month_key().known() == Some(month))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fixtures::snapshot;

    fn total(snapshots: &[Snapshot]) -> f64 {
        snapshots.iter().map(Snapshot::amount_or_zero).sum()
    }

    fn sample() -> Vec<Snapshot> {
        let mut undated = snapshot(4, 30.0, "", "C", "Undated");
        undated.amount = Some(f64::NAN);
        vec![
            snapshot(1, 100.0, "2024-01-05", "A (1)", "Fund A"),
            snapshot(2, 200.0, "2024-02-01", "B (2)", "Fund B"),
            snapshot(3, 50.0, "2024-01-10", "A (1)", "Fund A-alt"),
            undated,
            snapshot(5, 25.0, "2024-1", "D", "Short date"),
        ]
    }

    #[test]
    fn groups_preserve_input_order() {
        let groups = group_by_month(&sample());

        let jan = &groups[&MonthKey::Known("2024-01".to_string())];
        assert_eq!(jan.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3]);
        let unknown = &groups[&MonthKey::Unknown];
        assert_eq!(unknown.iter().map(|s| s.id).collect::<Vec<_>>(), vec![4, 5]);
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn every_snapshot_lands_in_exactly_one_group() {
        let input = sample();
        let groups = group_by_month(&input);

        let count: usize = groups.values().map(Vec::len).sum();
        assert_eq!(count, input.len());

        let grouped_total: f64 = groups.values().map(|g| total(g)).sum();
        assert_eq!(grouped_total, total(&input));
    }

    #[test]
    fn newest_group_first_when_reversed() {
        let groups = group_by_month(&sample());
        let order: Vec<&str> = groups.keys().rev().map(MonthKey::as_str).collect();
        assert_eq!(order, vec!["unknown", "2024-02", "2024-01"]);
    }

    #[test]
    fn month_keys_skip_undated_rows() {
        assert_eq!(known_month_keys(&sample()), vec!["2024-02", "2024-01"]);
        assert!(known_month_keys(&[]).is_empty());
    }

    #[test]
    fn month_selection_filters_by_prefix() {
        let input = sample();
        let jan = snapshots_for_month(&input, Some("2024-01"));
        assert_eq!(jan.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(snapshots_for_month(&input, None).len(), input.len());
    }
}
