//! Timetable grids: merge reconstruction and slot resolution.
//!
//! A [`RawTable`] from the page extractor goes through [`reconstruct`] to
//! classify every weekday cell, then [`SlotResolver`] turns the classified
//! grid into [`LessonRecord`](crate::lesson::LessonRecord)s for one class.

pub mod reconstruct;
pub mod resolve;

pub use reconstruct::{reconstruct, GridCell, RawTable, ReconstructedGrid};
pub use resolve::{parse_cell, sanitize_teacher, CellText, ResolveStats, Resolved, SlotResolver};
