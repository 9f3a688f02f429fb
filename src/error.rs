//! Error types for timetable extraction.
//!
//! Only fatal conditions are errors. Malformed pages, cells and markers are
//! skipped and logged by the pipeline instead of being reported here.

/// Result type alias for timetable operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting a timetable.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed `HH:MM` wall-clock time
    #[error("Invalid time: '{0}' (expected HH:MM)")]
    InvalidTime(String),

    /// Text that is not a canonical class label such as "1A AFM"
    #[error("Invalid class label: '{0}'")]
    InvalidClassLabel(String),

    /// Weekday number outside 1..=6
    #[error("Invalid weekday: {0} (expected 1-6)")]
    InvalidWeekday(u8),

    /// The upstream page source could not be read
    #[error("Page source error: {0}")]
    Source(String),

    /// The whole document yielded no lessons
    #[error("No lessons extracted from the document")]
    NoLessons,

    /// PDF backend error
    #[cfg(feature = "pdf")]
    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_oxide::Error),
}
