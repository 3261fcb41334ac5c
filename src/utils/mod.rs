mod dates;
mod labels;
mod ticks;

pub use dates::{days_before, days_before_in, start_of_day_in, start_of_local_day, DAY_MS, WEEK_MS};
pub use labels::VersionLabeler;
pub use ticks::{calculate_ticks, calculate_ticks_in};
