//! Turning reconstructed cells into timed lesson records.
//!
//! The grid is walked row-major. Text cells open a lesson at their
//! (weekday, period) slot with the period's time window from the schedule
//! catalog. Continuation cells extend the nearest lesson above them in the
//! same column; once the whole grid has been walked, every extended lesson
//! gets the end time of its last covered period.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use lazy_static::lazy_static;
use regex::Regex;

use crate::class_label::ClassLabel;
use crate::colors::color_for;
use crate::config::ForwardFill;
use crate::grid::reconstruct::{GridCell, ReconstructedGrid};
use crate::lesson::LessonRecord;
use crate::schedule::{periods_for, Weekday};

lazy_static! {
    /// Characters allowed in teacher names besides word characters and spaces
    static ref RE_TEACHER_DISALLOWED: Regex = Regex::new(r"[^\w\s,.']").unwrap();

    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Subject, teacher and classroom lines of a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellText {
    /// First line
    pub subject: String,
    /// Second line, sanitized; empty if missing
    pub teacher: String,
    /// Third line; empty if missing
    pub classroom: String,
}

/// Split cell text into subject, teacher and classroom.
///
/// Blank lines and lines holding the continuation glyph are ignored.
/// Returns `None` when nothing is left.
pub fn parse_cell(text: &str, glyph: char) -> Option<CellText> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains(glyph));

    let subject = lines.next()?.to_string();
    let teacher = lines.next().map(sanitize_teacher).unwrap_or_default();
    let classroom = lines.next().unwrap_or_default().to_string();

    Some(CellText {
        subject,
        teacher,
        classroom,
    })
}

/// Strip punctuation other than `,` `.` `'` and collapse whitespace.
pub fn sanitize_teacher(raw: &str) -> String {
    let stripped = RE_TEACHER_DISALLOWED.replace_all(raw.trim(), "");
    RE_WHITESPACE.replace_all(stripped.trim(), " ").into_owned()
}

/// Counters for the cells the resolver could not use as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Text cells with no usable lines
    pub empty_cells: usize,
    /// Text cells whose period is not in the day schedule
    pub lookup_misses: usize,
    /// Continuation cells with no lesson above them
    pub orphan_markers: usize,
    /// Extensions reaching past the last period of the day
    pub overlong_extensions: usize,
    /// Lessons extended by merged cells without an arrow
    pub unmarked_merges: usize,
}

impl AddAssign for ResolveStats {
    fn add_assign(&mut self, other: Self) {
        self.empty_cells += other.empty_cells;
        self.lookup_misses += other.lookup_misses;
        self.orphan_markers += other.orphan_markers;
        self.overlong_extensions += other.overlong_extensions;
        self.unmarked_merges += other.unmarked_merges;
    }
}

/// Lessons resolved from one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    /// Lessons ordered by weekday, then period
    pub lessons: Vec<LessonRecord>,
    /// Skipped and flagged cells
    pub stats: ResolveStats,
}

/// A lesson whose end time is not final yet.
#[derive(Debug)]
struct OpenLesson {
    record: LessonRecord,
    ordinal: u8,
    extensions: u8,
    unmarked: u8,
}

impl OpenLesson {
    fn last_period(&self) -> u8 {
        self.ordinal.saturating_add(self.extensions)
    }
}

/// Resolves reconstructed grids for one class.
#[derive(Debug, Clone)]
pub struct SlotResolver<'a> {
    label: &'a ClassLabel,
    glyph: char,
    forward_fill: ForwardFill,
}

impl<'a> SlotResolver<'a> {
    /// Create a resolver for `label`.
    pub fn new(label: &'a ClassLabel, glyph: char, forward_fill: ForwardFill) -> Self {
        Self {
            label,
            glyph,
            forward_fill,
        }
    }

    /// Resolve every weekday column of `grid`.
    pub fn resolve(&self, grid: &ReconstructedGrid) -> Resolved {
        let mut open: BTreeMap<(Weekday, u8), OpenLesson> = BTreeMap::new();
        let mut stats = ResolveStats::default();

        for (row_idx, row) in grid.rows().iter().enumerate() {
            let Ok(period) = u8::try_from(row_idx + 1) else {
                break;
            };
            for (col, cell) in row.iter().enumerate().skip(1) {
                let Some(day) = Weekday::from_column(col) else {
                    break;
                };
                match cell {
                    GridCell::Fresh(text) => self.open_lesson(&mut open, &mut stats, text, day, period),
                    GridCell::Filled(text) => match self.forward_fill {
                        ForwardFill::Repeat => self.open_lesson(&mut open, &mut stats, text, day, period),
                        ForwardFill::Extend => {
                            if !extend_adjacent(&mut open, day, period) {
                                self.open_lesson(&mut open, &mut stats, text, day, period);
                            }
                        },
                    },
                    GridCell::Marker | GridCell::Skip => {
                        if !extend_nearest(&mut open, day, period) {
                            log::warn!(
                                "{}: continuation at {} period {} has no lesson to extend",
                                self.label,
                                day,
                                period
                            );
                            stats.orphan_markers += 1;
                        }
                    },
                    GridCell::Vacant => {},
                }
            }
        }

        let lessons = open
            .into_values()
            .map(|lesson| self.close_lesson(lesson, &mut stats))
            .collect();

        Resolved { lessons, stats }
    }

    fn open_lesson(
        &self,
        open: &mut BTreeMap<(Weekday, u8), OpenLesson>,
        stats: &mut ResolveStats,
        text: &str,
        day: Weekday,
        period: u8,
    ) {
        let Some(cell) = parse_cell(text, self.glyph) else {
            log::debug!("{}: empty cell at {} period {}", self.label, day, period);
            stats.empty_cells += 1;
            return;
        };
        let Some(slot) = periods_for(self.label, day).lesson(period) else {
            log::warn!(
                "{}: no period {} on {}, skipping '{}'",
                self.label,
                period,
                day,
                cell.subject
            );
            stats.lookup_misses += 1;
            return;
        };

        let color = color_for(&cell.subject).to_string();
        let record = LessonRecord {
            subject: cell.subject,
            teacher: cell.teacher,
            classroom: cell.classroom,
            day_of_week: day,
            start_time: slot.start,
            end_time: slot.end,
            color,
        };
        open.insert(
            (day, period),
            OpenLesson {
                record,
                ordinal: period,
                extensions: 0,
                unmarked: 0,
            },
        );
    }

    fn close_lesson(&self, mut lesson: OpenLesson, stats: &mut ResolveStats) -> LessonRecord {
        if lesson.extensions == 0 {
            return lesson.record;
        }

        let day = lesson.record.day_of_week;
        match periods_for(self.label, day).lesson(lesson.last_period()) {
            Some(last) => {
                lesson.record.end_time = last.end;
                log::debug!(
                    "{}: extended {} on {} over {} periods: {}-{}",
                    self.label,
                    lesson.record.subject,
                    day,
                    lesson.extensions + 1,
                    lesson.record.start_time,
                    lesson.record.end_time
                );
            },
            None => {
                log::warn!(
                    "{}: {} on {} extends to missing period {}, keeping {}-{}",
                    self.label,
                    lesson.record.subject,
                    day,
                    lesson.last_period(),
                    lesson.record.start_time,
                    lesson.record.end_time
                );
                stats.overlong_extensions += 1;
            },
        }

        if lesson.unmarked > 0 {
            log::warn!(
                "{}: {} on {} spans {} periods through a merged cell without a continuation arrow; review",
                self.label,
                lesson.record.subject,
                day,
                lesson.extensions + 1
            );
            stats.unmarked_merges += 1;
        }

        lesson.record
    }
}

/// Extend the closest lesson above `period` in `day`'s column.
fn extend_nearest(open: &mut BTreeMap<(Weekday, u8), OpenLesson>, day: Weekday, period: u8) -> bool {
    match open.range_mut((day, 0)..(day, period)).next_back() {
        Some((_, lesson)) => {
            lesson.extensions = lesson.extensions.saturating_add(1);
            true
        },
        None => false,
    }
}

/// Extend the lesson above `period` only if it currently ends right before it.
fn extend_adjacent(open: &mut BTreeMap<(Weekday, u8), OpenLesson>, day: Weekday, period: u8) -> bool {
    match open.range_mut((day, 0)..(day, period)).next_back() {
        Some((_, lesson)) if lesson.last_period().saturating_add(1) == period => {
            lesson.extensions = lesson.extensions.saturating_add(1);
            lesson.unmarked = lesson.unmarked.saturating_add(1);
            true
        },
        _ => false,
    }
}
