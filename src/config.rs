//! Configuration for timetable extraction.

use std::path::PathBuf;

/// Continuation arrow drawn in cells whose lesson runs into the next period.
pub const CONTINUATION_GLYPH: char = '\u{ea1e}';

/// How a forward-filled cell (a vertically merged cell without an arrow) is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForwardFill {
    /// The cell continues the lesson above it, which is extended by one period.
    #[default]
    Extend,
    /// The cell is an independent single-period lesson with the same text.
    Repeat,
}

/// Timetable extraction configuration.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// School name written to the aggregate document.
    pub school: String,

    /// Extraction date; today's date when unset.
    pub extraction_date: Option<String>,

    /// Continuation marker character.
    pub continuation_glyph: char,

    /// Treatment of forward-filled cells.
    pub forward_fill: ForwardFill,

    /// Aggregate JSON output path.
    pub output_file: PathBuf,

    /// Directory for the per-class JSON files.
    pub output_dir: PathBuf,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            school: "Istituto Vallauri".to_string(),
            extraction_date: None,
            continuation_glyph: CONTINUATION_GLYPH,
            forward_fill: ForwardFill::default(),
            output_file: PathBuf::from("orari_tutte_classi.json"),
            output_dir: PathBuf::from("orari_classi"),
        }
    }

    /// Set the school name.
    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = school.into();
        self
    }

    /// Pin the extraction date instead of using today's date.
    pub fn with_extraction_date(mut self, date: impl Into<String>) -> Self {
        self.extraction_date = Some(date.into());
        self
    }

    /// Set the continuation marker character.
    pub fn with_continuation_glyph(mut self, glyph: char) -> Self {
        self.continuation_glyph = glyph;
        self
    }

    /// Set the forward-fill treatment.
    pub fn with_forward_fill(mut self, forward_fill: ForwardFill) -> Self {
        self.forward_fill = forward_fill;
        self
    }

    /// Set the aggregate JSON output path.
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    /// Set the per-class output directory.
    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    /// The configured extraction date, or today's local date as `YYYY-MM-DD`.
    pub fn resolved_extraction_date(&self) -> String {
        self.extraction_date
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string())
    }
}
