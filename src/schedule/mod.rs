//! Bell schedules and wall-clock time.

pub mod catalog;
pub mod time;

pub use catalog::{periods_for, DaySchedule, Period, Profile, Slot, Weekday, WeekdayGroup};
pub use time::ClockTime;
