// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::needless_return)]
#![allow(clippy::new_without_default)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Timetable Oxide
//!
//! Rebuilds machine-readable weekly class timetables from a school's
//! published timetable PDF.
//!
//! ## What the PDF does to the data
//!
//! - **Merged cells**: a lesson lasting several periods is one vertically
//!   merged cell; table extraction returns its text in the first sub-cell
//!   and blanks below it.
//! - **Continuation arrows**: some multi-period lessons are drawn as a
//!   private-use arrow glyph (U+EA1E) in the following cell instead.
//! - **Doubled headers**: the bold class header comes back with every
//!   character doubled (`11AA AAFFMM ((2277))` for `1A AFM (27)`).
//! - **Per-class bell schedules**: period times depend on the class profile
//!   and the weekday.
//!
//! ## Pipeline
//!
//! 1. [`class_label::identify_class`] decodes the page header into a [`ClassLabel`].
//! 2. [`grid::reconstruct`] classifies every weekday cell of each table.
//! 3. [`grid::SlotResolver`] emits timed [`LessonRecord`]s, extending
//!    lessons over continuation cells, using the [`schedule`] catalog.
//! 4. [`timetable::Timetable`] aggregates pages per class and injects recesses.
//! 5. [`output`] writes the aggregate and per-class JSON files.
//!
//! ## Quick Start
//!
//! ```no_run
//! use timetable_oxide::{open_source, output, Extractor, ExtractorConfig, TimetableDocument};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractorConfig::default();
//! let mut source = open_source("orario.pdf")?;
//! let extraction = Extractor::new(config.clone()).run(source.as_mut())?;
//!
//! let document = TimetableDocument::new(extraction.schedules, &config);
//! output::write_document(&document, &config.output_file)?;
//! output::write_class_files(&document.classes, &config.output_dir)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Static bell schedules
pub mod rules;
pub mod schedule;

// Header and cell decoding
pub mod class_label;
pub mod colors;
pub mod grid;
pub mod lesson;

// Aggregation
pub mod extractor;
pub mod timetable;

// Input and output
pub mod output;
pub mod source;

// Re-exports
pub use class_label::{identify_class, ClassHeader, ClassLabel};
pub use config::{ExtractorConfig, ForwardFill};
pub use error::{Error, Result};
pub use extractor::{Extraction, ExtractionStats, Extractor};
pub use lesson::LessonRecord;
pub use output::TimetableDocument;
pub use schedule::{periods_for, ClockTime, DaySchedule, Period, Profile, Weekday};
pub use source::{open_source, PageContent, PageDump, PageSource};
pub use timetable::{ClassScheduleRecord, ClassSchedules, Timetable};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "timetable_oxide");
    }
}
