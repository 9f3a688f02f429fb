//! Recess injection and final per-class ordering.

use std::collections::BTreeMap;

use crate::class_label::ClassLabel;
use crate::lesson::LessonRecord;
use crate::schedule::{periods_for, Weekday};

/// Merge recess entries into a class's lessons and order the result.
///
/// Only weekdays that already have at least one lesson get recesses. Each
/// day is stably sorted by start time, recesses appended after the lessons
/// so a lesson wins a start-time tie, and days are concatenated Monday
/// through Saturday.
pub fn with_intervals(label: &ClassLabel, lessons: Vec<LessonRecord>) -> Vec<LessonRecord> {
    let mut by_day: BTreeMap<Weekday, Vec<LessonRecord>> = BTreeMap::new();
    for lesson in lessons {
        by_day.entry(lesson.day_of_week).or_default().push(lesson);
    }

    let mut result = Vec::new();
    for (day, mut entries) in by_day {
        entries.sort_by_key(|lesson| lesson.start_time);
        entries.extend(
            periods_for(label, day)
                .recesses()
                .map(|period| LessonRecord::recess(day, period)),
        );
        entries.sort_by_key(|lesson| lesson.start_time);
        result.extend(entries);
    }
    result
}
