use crate::models::HistoryPoint;

/// Chart geometry in a 100x100 SVG viewBox.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryChart {
    pub path: String,
    pub points: Vec<(f64, f64)>,
    /// The plotted history points, oldest first, for the label row.
    pub series: Vec<HistoryPoint>,
}

/// History ordered by month key. The backend does not guarantee an order and
/// the keys are zero-padded, so string order is calendar order.
pub fn sorted_history(history: &[HistoryPoint]) -> Vec<HistoryPoint> {
    let mut ordered = history.to_vec();
    ordered.sort_by(|a, b| a.month.cmp(&b.month));
    ordered
}

/// Returns `None` when there is nothing meaningful to draw: fewer than two
/// finite points, or no positive amount to scale against.
pub fn build_history_chart(history: &[HistoryPoint]) -> Option<HistoryChart> {
    let series: Vec<HistoryPoint> = sorted_history(history)
        .into_iter()
        .filter(|p| p.amount.map_or(false, f64::is_finite))
        .collect();
    if series.len() < 2 {
        return None;
    }

    let amounts: Vec<f64> = series.iter().map(|p| p.amount.unwrap_or(0.0)).collect();
    let max = amounts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return None;
    }

    let last = (amounts.len() - 1) as f64;
    let points: Vec<(f64, f64)> = amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| {
            let x = i as f64 / last * 100.0;
            let y = 95.0 - (amount / max) * 80.0;
            (x, y)
        })
        .collect();

    let path = points
        .iter()
        .enumerate()
        .map(|(i, (x, y))| format!("{} {},{}", if i == 0 { "M" } else { "L" }, x, y))
        .collect::<Vec<_>>()
        .join(" ");

    Some(HistoryChart {
        path,
        points,
        series,
    })
}
