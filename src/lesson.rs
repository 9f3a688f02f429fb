//! Lesson records, the unit of timetable output.

use serde::{Deserialize, Serialize};

use crate::schedule::{ClockTime, Period, Weekday};

/// Subject text used for generated recess entries.
pub const RECESS_SUBJECT: &str = "INTERVALLO";

/// Display color of recess entries.
pub const RECESS_COLOR: &str = "#ffd54f";

/// One entry of a class timetable.
///
/// The `[start_time, end_time)` window is always the union of one or more
/// contiguous periods of the day schedule that applies to the class on
/// `day_of_week`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRecord {
    /// Subject name, first line of the cell
    pub subject: String,
    /// Teacher, possibly empty
    pub teacher: String,
    /// Classroom, possibly empty
    pub classroom: String,
    /// Weekday, serialized as 1-6
    pub day_of_week: Weekday,
    /// Start of the first period
    pub start_time: ClockTime,
    /// End of the last period
    pub end_time: ClockTime,
    /// Hex display color
    pub color: String,
}

impl LessonRecord {
    /// Generated recess entry covering `period` on `day`.
    pub fn recess(day: Weekday, period: &Period) -> Self {
        Self {
            subject: RECESS_SUBJECT.to_string(),
            teacher: String::new(),
            classroom: String::new(),
            day_of_week: day,
            start_time: period.start,
            end_time: period.end,
            color: RECESS_COLOR.to_string(),
        }
    }

    /// True for generated recess entries.
    pub fn is_recess(&self) -> bool {
        self.subject == RECESS_SUBJECT && self.color == RECESS_COLOR
    }

    /// Length of the lesson in minutes.
    pub fn duration_minutes(&self) -> u16 {
        self.end_time
            .minutes_since_midnight()
            .saturating_sub(self.start_time.minutes_since_midnight())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Profile;

    #[test]
    fn test_recess_entry() {
        let day = Profile::Standard.day_schedule(Weekday::Tuesday);
        let period = day.recesses().next().unwrap();
        let entry = LessonRecord::recess(Weekday::Tuesday, period);
        assert!(entry.is_recess());
        assert_eq!(entry.subject, "INTERVALLO");
        assert_eq!(entry.duration_minutes(), 5);
    }

    #[test]
    fn test_serialized_field_names() {
        let lesson = LessonRecord {
            subject: "Matematica".to_string(),
            teacher: "Rossi".to_string(),
            classroom: "12".to_string(),
            day_of_week: Weekday::Monday,
            start_time: ClockTime::new(7, 50),
            end_time: ClockTime::new(8, 50),
            color: "#ef5350".to_string(),
        };
        let json = serde_json::to_value(&lesson).unwrap();
        assert_eq!(json["dayOfWeek"], 1);
        assert_eq!(json["startTime"], "07:50");
        assert_eq!(json["endTime"], "08:50");
        assert_eq!(json["color"], "#ef5350");
        assert!(!lesson.is_recess());
    }
}
