use chrono::{Days, Local, NaiveTime, Offset, TimeZone};

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;
pub const WEEK_MS: i64 = 7 * DAY_MS;

/// Midnight of the calendar day containing `ms`, as seen in `tz`.
pub fn start_of_day_in<Tz: TimeZone>(ms: i64, tz: &Tz) -> i64 {
    days_before_in(ms, 0, tz)
}

/// Midnight of the local calendar day containing `ms`.
pub fn start_of_local_day(ms: i64) -> i64 {
    start_of_day_in(ms, &Local)
}

/// Midnight of the calendar day `days` before the one containing `ms`, in `tz`.
///
/// Days are calendar days, so a DST transition inside the span does not shift the
/// result away from midnight.
pub fn days_before_in<Tz: TimeZone>(ms: i64, days: u32, tz: &Tz) -> i64 {
    let Some(instant) = tz.timestamp_millis_opt(ms).earliest() else {
        return ms.saturating_sub(days as i64 * DAY_MS);
    };
    let date = instant.date_naive();
    let date = date.checked_sub_days(Days::new(days as u64)).unwrap_or(date);
    let midnight = date.and_time(NaiveTime::MIN);

    match tz.from_local_datetime(&midnight).earliest() {
        Some(start) => start.timestamp_millis(),
        // midnight skipped by a DST gap: use the offset in effect at `ms`
        None => {
            let offset_ms = instant.offset().fix().local_minus_utc() as i64 * 1000;
            midnight.and_utc().timestamp_millis() - offset_ms
        }
    }
}

/// Local-time variant of [`days_before_in`].
pub fn days_before(ms: i64, days: u32) -> i64 {
    days_before_in(ms, days, &Local)
}
