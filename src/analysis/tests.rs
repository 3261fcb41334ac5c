#[cfg(test)]
mod tests {
    use crate::analysis::*;
    use crate::config::ChartConfig;
    use crate::types::{HistoryPoint, MeasurementTransform};
    use crate::utils::{calculate_ticks_in, days_before_in, DAY_MS};
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::{BTreeMap, HashMap, HashSet};

    // 2024-01-01T00:00:00Z
    const DAY0: i64 = 1_704_067_200_000;

    fn sample_history() -> Vec<HistoryPoint> {
        let mut points = Vec::new();
        for d in 0..45 {
            let date = DAY0 + d * DAY_MS;
            points.push(HistoryPoint::new(date, "1.0.0", 100.0 - d as f64));
            if d >= 10 {
                points.push(HistoryPoint::new(date, "1.1.0", 10.0 * d as f64));
            }
            if d % 3 == 0 {
                points.push(HistoryPoint::new(date, "0.9.0", 5.0));
            }
            if d >= 40 {
                points.push(HistoryPoint::new(date, "2.0.0-beta.1", 1.0));
            }
        }
        points
    }

    #[test]
    fn test_pipeline_without_filtering() {
        let points = sample_history();
        let chart = prepare_chart_in(&points, &ChartConfig::default(), &Utc);

        assert_eq!(chart.rows.len(), 45);
        assert_eq!(
            chart.versions,
            vec!["1.0.0", "0.9.0", "1.1.0", "2.0.0-beta.1"]
        );
        // no zero-fill without a version limit
        assert_eq!(chart.rows[1].get("0.9.0"), None);
        assert_eq!(chart.ticks[0], DAY0);
        assert!(chart.ticks.len() <= 6);
    }

    #[test]
    fn test_pipeline_top_versions() {
        let points = sample_history();
        let config = ChartConfig {
            max_versions_shown: Some(2),
            max_days_shown: 30,
            ..ChartConfig::default()
        };
        let chart = prepare_chart_in(&points, &config, &Utc);

        assert_eq!(chart.versions, vec!["1.0.0", "1.1.0"]);
        // window starts 30 days before day 44
        assert_eq!(chart.rows.len(), 31);
        assert_eq!(chart.rows[0].date, DAY0 + 14 * DAY_MS);
        for row in &chart.rows {
            assert_eq!(row.counts.len(), 2);
        }
    }

    #[test]
    fn test_pipeline_percentage_of_shown_versions() {
        let points = vec![
            HistoryPoint::new(DAY0, "a", 10.0),
            HistoryPoint::new(DAY0, "b", 30.0),
            HistoryPoint::new(DAY0, "c", 60.0),
        ];
        let config = ChartConfig {
            max_versions_shown: Some(2),
            measurement_transform: MeasurementTransform::Percentage,
            ..ChartConfig::default()
        };
        let chart = prepare_chart_in(&points, &config, &Utc);

        assert_eq!(chart.transform, MeasurementTransform::Percentage);
        assert_eq!(chart.versions, vec!["b", "c"]);
        let row = &chart.rows[0];
        assert!((row.get("b").unwrap() - 30.0 / 90.0).abs() < 1e-12);
        assert!((row.get("c").unwrap() - 60.0 / 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_pipeline_zero_filled_percentage_is_finite() {
        let points = vec![
            HistoryPoint::new(DAY0, "a", 0.0),
            HistoryPoint::new(DAY0 + DAY_MS, "b", 4.0),
        ];
        let config = ChartConfig {
            max_versions_shown: Some(2),
            measurement_transform: MeasurementTransform::Percentage,
            ..ChartConfig::default()
        };
        let chart = prepare_chart_in(&points, &config, &Utc);

        assert_eq!(chart.rows[0].get("a"), Some(0.0));
        assert_eq!(chart.rows[0].get("b"), Some(0.0));
        assert_eq!(chart.rows[1].get("b"), Some(1.0));
    }

    #[test]
    fn test_pipeline_empty() {
        let config = ChartConfig {
            max_versions_shown: Some(3),
            ..ChartConfig::default()
        };
        let chart = prepare_chart_in(&[], &config, &Utc);
        assert!(chart.is_empty());
        assert!(chart.ticks.is_empty());
        assert!(chart.versions.is_empty());
    }

    #[test]
    fn test_pipeline_zero_version_limit() {
        let config = ChartConfig {
            max_versions_shown: Some(0),
            ..ChartConfig::default()
        };
        let chart = prepare_chart_in(&sample_history(), &config, &Utc);
        assert!(chart.is_empty());
        assert!(chart.ticks.is_empty());
    }

    #[test]
    fn test_pipeline_negative_version_limit() {
        let config = ChartConfig::from_json_str(r#"{"max_versions_shown": -3}"#).unwrap();
        let chart = prepare_chart_in(&sample_history(), &config, &Utc);
        assert!(chart.is_empty());
        assert!(chart.versions.is_empty());
    }

    #[test]
    fn test_pipeline_unsorted_input_measures_window_from_last_point() {
        // the window hangs off the last point, day 0, so day 40 still falls inside it
        let points = vec![
            HistoryPoint::new(DAY0 + 40 * DAY_MS, "a", 1.0),
            HistoryPoint::new(DAY0, "b", 5.0),
        ];
        let config = ChartConfig {
            max_versions_shown: Some(2),
            ..ChartConfig::default()
        };
        let chart = prepare_chart_in(&points, &config, &Utc);

        assert_eq!(chart.versions, vec!["a", "b"]);
        let dates: Vec<i64> = chart.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![DAY0, DAY0 + 40 * DAY_MS]);
        assert_eq!(chart.rows[0].get("a"), Some(0.0));
        assert_eq!(chart.rows[0].get("b"), Some(5.0));
        assert_eq!(chart.rows[1].get("a"), Some(1.0));
        assert_eq!(chart.rows[1].get("b"), Some(0.0));
    }

    fn history_strategy() -> impl Strategy<Value = Vec<HistoryPoint>> {
        prop::collection::vec((0i64..60, 0usize..6, 0u32..1000), 0..120).prop_map(|raw| {
            let mut points: Vec<HistoryPoint> = raw
                .into_iter()
                .map(|(d, v, c)| {
                    HistoryPoint::new(DAY0 + d * DAY_MS, format!("v{}", v), c as f64)
                })
                .collect();
            points.sort_by_key(|p| p.date);
            points
        })
    }

    fn without_duplicates(points: Vec<HistoryPoint>) -> Vec<HistoryPoint> {
        let mut seen = HashSet::new();
        points
            .into_iter()
            .filter(|p| seen.insert((p.date, p.version.clone())))
            .collect()
    }

    proptest! {
        #[test]
        fn prop_top_versions_bounded(points in history_strategy(), n in 1usize..5, window in 1u32..40) {
            let top = select_top_versions_in(&points, n, window, &Utc);
            let versions: HashSet<&str> = top.iter().map(|p| p.version.as_str()).collect();
            prop_assert!(versions.len() <= n);

            if let Some(latest) = points.last() {
                let earliest = days_before_in(latest.date, window, &Utc);
                for point in &top {
                    prop_assert!(point.date >= earliest && point.date <= latest.date);
                }
            }
        }

        #[test]
        fn prop_zero_fill_complete(points in history_strategy(), n in 1usize..5, window in 1u32..40) {
            let top = select_top_versions_in(&points, n, window, &Utc);
            let kept: HashSet<&str> = top.iter().map(|p| p.version.as_str()).collect();

            let mut per_date: BTreeMap<i64, Vec<&str>> = BTreeMap::new();
            for point in &top {
                per_date.entry(point.date).or_default().push(point.version.as_str());
            }
            for versions in per_date.values() {
                prop_assert_eq!(versions.len(), kept.len());
                let distinct: HashSet<&str> = versions.iter().copied().collect();
                prop_assert_eq!(&distinct, &kept);
            }
        }

        #[test]
        fn prop_percentage_sums_to_one(points in history_strategy()) {
            let mut totals: HashMap<i64, f64> = HashMap::new();
            for point in to_percentage(&points) {
                prop_assert!(point.count.is_finite());
                *totals.entry(point.date).or_insert(0.0) += point.count;
            }
            for (date, share) in totals {
                let raw: f64 = points.iter().filter(|p| p.date == date).map(|p| p.count).sum();
                if raw > 0.0 {
                    prop_assert!((share - 1.0).abs() < 1e-9);
                } else {
                    prop_assert_eq!(share, 0.0);
                }
            }
        }

        #[test]
        fn prop_pivot_round_trip(points in history_strategy().prop_map(without_duplicates)) {
            let rows = pivot(&points);
            let by_date: HashMap<i64, usize> =
                rows.iter().enumerate().map(|(i, r)| (r.date, i)).collect();
            prop_assert_eq!(by_date.len(), rows.len());
            for point in &points {
                let row = &rows[by_date[&point.date]];
                prop_assert_eq!(row.get(&point.version), Some(point.count));
            }
        }

        #[test]
        fn prop_ticks_well_formed(points in history_strategy(), max_ticks in 0usize..10) {
            let dates: Vec<i64> = points.iter().map(|p| p.date).collect();
            let ticks = calculate_ticks_in(&dates, max_ticks, &Utc);

            prop_assert!(ticks.len() <= max_ticks);
            prop_assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
            if max_ticks >= 1 && !dates.is_empty() {
                prop_assert_eq!(ticks[0], dates[0]);
            }
            for tick in &ticks {
                prop_assert!(dates.contains(tick));
            }
        }
    }
}
