use chrono::{Local, TimeZone};
use std::collections::BTreeSet;

use super::dates::{start_of_day_in, WEEK_MS};

/// Pick up to `max_ticks` time-axis ticks from `dates`, using local day boundaries.
///
/// See [`calculate_ticks_in`].
pub fn calculate_ticks(dates: &[i64], max_ticks: usize) -> Vec<i64> {
    calculate_ticks_in(dates, max_ticks, &Local)
}

/// Pick up to `max_ticks` time-axis ticks from `dates`.
///
/// The step is the smallest power-of-two number of weeks that covers the span from the
/// first to the last date in at most `max_ticks - 1` steps. Ticks land on actual dates:
/// the first date always, then every date reaching the next boundary, where a boundary
/// is the start of the previous tick's day plus one step. Ticks therefore stay aligned
/// to calendar days, with an irregular gap near the end of the data.
pub fn calculate_ticks_in<Tz: TimeZone>(dates: &[i64], max_ticks: usize, tz: &Tz) -> Vec<i64> {
    let (Some(&first), Some(&last)) = (dates.first(), dates.last()) else {
        return Vec::new();
    };

    match max_ticks {
        0 => return Vec::new(),
        1 => return vec![first],
        2 if first == last => return vec![first],
        2 => return vec![first, last],
        _ => {}
    }

    let span = last.saturating_sub(first);
    let max_steps = (max_ticks - 1) as i64;
    let mut interval = WEEK_MS;
    while span / interval > max_steps {
        interval *= 2;
    }

    let mut ticks = BTreeSet::new();
    ticks.insert(first);
    let mut boundary = start_of_day_in(first, tz).saturating_add(interval);
    for &date in dates {
        if date >= boundary {
            ticks.insert(date);
            boundary = start_of_day_in(date, tz).saturating_add(interval);
        }
    }

    // day alignment can pull boundaries up to a day early, so cap the count
    ticks.into_iter().take(max_ticks).collect()
}
