use chrono::{Local, TimeZone};
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::types::HistoryPoint;
use crate::utils::days_before_in;

/// Total downloads of one version inside the ranking window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowAggregate {
    pub version: String,
    pub total: f64,
}

/// Sum counts per version for points dated at or after `earliest`.
///
/// Every version in `points` gets an entry, in first-encounter order; versions seen only
/// before `earliest` total zero.
pub fn aggregate_window(points: &[HistoryPoint], earliest: i64) -> Vec<WindowAggregate> {
    let mut aggregates: Vec<WindowAggregate> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for point in points {
        let slot = *slots.entry(point.version.as_str()).or_insert_with(|| {
            aggregates.push(WindowAggregate {
                version: point.version.clone(),
                total: 0.0,
            });
            aggregates.len() - 1
        });
        if point.date >= earliest {
            aggregates[slot].total += point.count;
        }
    }

    aggregates
}

/// Order aggregates by ascending total. The sort is stable, so equal totals keep their
/// first-encounter order and the highest-ranked versions end up at the tail.
pub fn rank_versions(mut aggregates: Vec<WindowAggregate>) -> Vec<WindowAggregate> {
    aggregates.sort_by(|a, b| a.total.total_cmp(&b.total));
    aggregates
}

/// Keep the `n` versions with the most downloads in the trailing `window_days`, using
/// local day boundaries. See [`select_top_versions_in`].
pub fn select_top_versions(
    points: &[HistoryPoint],
    n: usize,
    window_days: u32,
) -> Vec<HistoryPoint> {
    select_top_versions_in(points, n, window_days, &Local)
}

/// Keep the `n` versions with the most downloads in the trailing `window_days`, and
/// zero-fill them.
///
/// `points` must be sorted by ascending date. The window starts `window_days` calendar
/// days before the day of the last point. The result holds one point per (date, kept
/// version) for every date inside the window that has data for a kept version; missing
/// pairs get a count of zero. Points are grouped by ascending date and, within a date,
/// follow the order in which the kept versions first appear in `points`.
///
/// If a (date, version) pair repeats, the last occurrence wins.
pub fn select_top_versions_in<Tz: TimeZone>(
    points: &[HistoryPoint],
    n: usize,
    window_days: u32,
    tz: &Tz,
) -> Vec<HistoryPoint> {
    let Some(latest) = points.last() else {
        return Vec::new();
    };
    if n == 0 {
        return Vec::new();
    }

    let earliest = days_before_in(latest.date, window_days, tz);
    let ranking = rank_versions(aggregate_window(points, earliest));
    let kept: HashSet<&str> = ranking[ranking.len().saturating_sub(n)..]
        .iter()
        .map(|a| a.version.as_str())
        .collect();

    let mut order: Vec<&str> = Vec::with_capacity(kept.len());
    let mut seen: HashSet<&str> = HashSet::with_capacity(kept.len());
    let mut counts: HashMap<(i64, &str), f64> = HashMap::new();
    let mut dates = BTreeSet::new();
    for point in points {
        let version = point.version.as_str();
        if !kept.contains(version) {
            continue;
        }
        if seen.insert(version) {
            order.push(version);
        }
        counts.insert((point.date, version), point.count);
        if point.date >= earliest {
            dates.insert(point.date);
        }
    }

    let mut filled = Vec::with_capacity(dates.len() * order.len());
    for &date in &dates {
        for &version in &order {
            filled.push(HistoryPoint {
                date,
                version: version.to_string(),
                count: counts.get(&(date, version)).copied().unwrap_or(0.0),
            });
        }
    }
    filled
}
