//! Per-class aggregation of lessons across pages.
//!
//! Pages append their resolved lessons under the page's class label. When a
//! label shows up on more than one page the lists are concatenated. Nothing
//! is sorted until [`Timetable::finish`], so the order in which pages are
//! processed does not change the result.

pub mod intervals;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::class_label::ClassLabel;
use crate::lesson::LessonRecord;
use crate::schedule::Profile;

pub use intervals::with_intervals;

/// Final timetable of one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassScheduleRecord {
    /// Class label
    pub class_name: ClassLabel,
    /// Bell-schedule profile
    pub schedule_type: Profile,
    /// Number of entries, recesses included
    pub total_lessons: usize,
    /// Lessons and recesses, by weekday then start time
    pub lessons: Vec<LessonRecord>,
}

/// Finished timetables keyed by class label, in label order.
pub type ClassSchedules = IndexMap<ClassLabel, ClassScheduleRecord>;

/// Lessons collected so far, per class.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    classes: IndexMap<ClassLabel, Vec<LessonRecord>>,
}

impl Timetable {
    /// Create an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page's lessons for `label`.
    ///
    /// The class is registered even when `lessons` is empty.
    pub fn add_lessons(&mut self, label: ClassLabel, lessons: Vec<LessonRecord>) {
        self.classes.entry(label).or_default().extend(lessons);
    }

    /// Number of classes seen.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of parsed lessons, recesses excluded.
    pub fn lesson_count(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }

    /// Lessons collected for `label` so far.
    pub fn lessons(&self, label: &ClassLabel) -> Option<&[LessonRecord]> {
        self.classes.get(label).map(Vec::as_slice)
    }

    /// Inject recesses, order every class and build the final records.
    pub fn finish(self) -> ClassSchedules {
        let mut schedules: ClassSchedules = self
            .classes
            .into_iter()
            .map(|(label, lessons)| {
                let lessons = with_intervals(&label, lessons);
                log::info!("{}: {} entries (recesses included)", label, lessons.len());
                let record = ClassScheduleRecord {
                    class_name: label.clone(),
                    schedule_type: Profile::detect(&label),
                    total_lessons: lessons.len(),
                    lessons,
                };
                (label, record)
            })
            .collect();
        schedules.sort_keys();
        schedules
    }
}
