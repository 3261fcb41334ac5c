use std::collections::HashMap;

use crate::types::HistoryPoint;

/// Rescale each count into its share of the total on the same date.
///
/// The denominator is the sum over the points passed in, so after top-N selection the
/// shares are relative to the shown versions only. A date whose total is zero maps every
/// point on it to `0.0`.
pub fn to_percentage(points: &[HistoryPoint]) -> Vec<HistoryPoint> {
    let mut totals: HashMap<i64, f64> = HashMap::new();
    for point in points {
        *totals.entry(point.date).or_insert(0.0) += point.count;
    }

    points
        .iter()
        .map(|point| {
            let total = totals.get(&point.date).copied().unwrap_or(0.0);
            let share = if total == 0.0 { 0.0 } else { point.count / total };
            HistoryPoint {
                count: share,
                ..point.clone()
            }
        })
        .collect()
}
