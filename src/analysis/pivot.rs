use std::collections::{HashMap, HashSet};

use crate::types::{ChartRow, HistoryPoint};

/// Distinct versions in the order they first appear.
pub fn distinct_versions(points: &[HistoryPoint]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    points
        .iter()
        .filter(|p| seen.insert(p.version.as_str()))
        .map(|p| p.version.clone())
        .collect()
}

/// Regroup a flat point list into one row per date.
///
/// Versions are visited in first-seen order and each version's points in input order,
/// so a repeated (date, version) pair keeps its last value. Rows come back sorted by
/// ascending date.
pub fn pivot(points: &[HistoryPoint]) -> Vec<ChartRow> {
    let mut groups: Vec<Vec<&HistoryPoint>> = Vec::new();
    let mut group_of: HashMap<&str, usize> = HashMap::new();
    for point in points {
        let slot = *group_of.entry(point.version.as_str()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(point);
    }

    let mut rows: Vec<ChartRow> = Vec::new();
    let mut row_of: HashMap<i64, usize> = HashMap::new();
    for point in groups.into_iter().flatten() {
        let slot = *row_of.entry(point.date).or_insert_with(|| {
            rows.push(ChartRow::new(point.date));
            rows.len() - 1
        });
        rows[slot].counts.insert(point.version.clone(), point.count);
    }

    rows.sort_by_key(|row| row.date);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(date: i64, counts: &[(&str, f64)]) -> ChartRow {
        ChartRow {
            date,
            counts: counts.iter().map(|(v, c)| (v.to_string(), *c)).collect(),
        }
    }

    #[test]
    fn test_pivot_by_date() {
        let points = vec![
            HistoryPoint::new(1, "a", 1.0),
            HistoryPoint::new(1, "b", 2.0),
            HistoryPoint::new(2, "a", 3.0),
            HistoryPoint::new(2, "b", 4.0),
        ];
        assert_eq!(
            pivot(&points),
            vec![row(1, &[("a", 1.0), ("b", 2.0)]), row(2, &[("a", 3.0), ("b", 4.0)])]
        );
    }

    #[test]
    fn test_unsorted_input_yields_sorted_rows() {
        // "b" is visited first, so date 5 is created before date 1
        let points = vec![
            HistoryPoint::new(5, "b", 1.0),
            HistoryPoint::new(1, "a", 2.0),
            HistoryPoint::new(5, "a", 3.0),
        ];
        let dates: Vec<i64> = pivot(&points).iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![1, 5]);
    }

    #[test]
    fn test_sparse_rows_without_zero_fill() {
        let points = vec![HistoryPoint::new(1, "a", 1.0), HistoryPoint::new(2, "b", 2.0)];
        let rows = pivot(&points);
        assert_eq!(rows[0].get("b"), None);
        assert_eq!(rows[1].get("b"), Some(2.0));
    }

    #[test]
    fn test_duplicate_pair_last_write_wins() {
        let points = vec![HistoryPoint::new(1, "a", 1.0), HistoryPoint::new(1, "a", 9.0)];
        assert_eq!(pivot(&points), vec![row(1, &[("a", 9.0)])]);
    }

    #[test]
    fn test_distinct_versions_first_seen() {
        let points = vec![
            HistoryPoint::new(1, "b", 1.0),
            HistoryPoint::new(1, "a", 1.0),
            HistoryPoint::new(2, "b", 1.0),
        ];
        assert_eq!(
            distinct_versions(&points),
            vec!["b".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn test_empty() {
        assert!(pivot(&[]).is_empty());
        assert!(distinct_versions(&[]).is_empty());
    }
}
