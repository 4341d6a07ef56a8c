/// Time representation: HHMM times of day and weekly occupancy masks
mod clock;
mod mask;

pub use clock::{TimeOfDay, MINUTES_PER_DAY};
pub use mask::{WeeklyTimeMask, DAYS_PER_WEEK, SLOTS_PER_DAY, SLOT_MINUTES};

pub use chrono::Weekday;
