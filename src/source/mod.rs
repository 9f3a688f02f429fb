//! Page sources: where page text and tables come from.
//!
//! The extractor only needs, per page, the raw text (for the class header)
//! and the tables as grids of optional strings. [`PageSource`] abstracts
//! over where that comes from:
//!
//! - [`PageDump`]: a JSON file of pages already extracted by some other tool
//! - [`pdf::PdfSource`]: a PDF read with `pdf_oxide` (feature `pdf`)

#[cfg(feature = "pdf")]
pub mod pdf;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::RawTable;

/// Text and tables of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// Full extracted page text
    #[serde(default)]
    pub text: String,
    /// Tables found on the page
    #[serde(default)]
    pub tables: Vec<RawTable>,
}

impl PageContent {
    /// Create a page.
    pub fn new(text: impl Into<String>, tables: Vec<RawTable>) -> Self {
        Self {
            text: text.into(),
            tables,
        }
    }
}

/// Upstream page extraction.
pub trait PageSource {
    /// Number of pages.
    fn page_count(&mut self) -> Result<usize>;

    /// Extract one page (0-based).
    fn page(&mut self, index: usize) -> Result<PageContent>;
}

/// Pages held in memory, usually loaded from a JSON dump.
///
/// The JSON layout is a list of `{"text": "...", "tables": [[[cell, ...], ...]]}`
/// objects where each cell is a string or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageDump {
    /// Pages in document order
    pub pages: Vec<PageContent>,
}

impl PageDump {
    /// Wrap pages.
    pub fn new(pages: Vec<PageContent>) -> Self {
        Self { pages }
    }

    /// Load a JSON page dump.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Parse a JSON page dump from a string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl PageSource for PageDump {
    fn page_count(&mut self) -> Result<usize> {
        Ok(self.pages.len())
    }

    fn page(&mut self, index: usize) -> Result<PageContent> {
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| Error::Source(format!("page {} out of range", index)))
    }
}

/// Open `path` as a page source: `.json` files as page dumps, anything else as PDF.
pub fn open_source(path: impl AsRef<Path>) -> Result<Box<dyn PageSource>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        return Ok(Box::new(PageDump::open(path)?));
    }

    #[cfg(feature = "pdf")]
    {
        return Ok(Box::new(pdf::PdfSource::open(path)?));
    }

    #[cfg(not(feature = "pdf"))]
    {
        return Err(Error::Source(format!(
            "{}: PDF input needs the `pdf` feature; pass a JSON page dump instead",
            path.display()
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_dump_from_json() {
        let json = r#"[
            {"text": "1A AFM (27)", "tables": [[[null, "LUN"], ["1", "Arte\nRossi"]]]},
            {"text": "no tables here"}
        ]"#;
        let mut dump = PageDump::from_json(json).unwrap();
        assert_eq!(dump.page_count().unwrap(), 2);

        let first = dump.page(0).unwrap();
        assert_eq!(first.text, "1A AFM (27)");
        assert_eq!(first.tables.len(), 1);
        assert_eq!(first.tables[0].rows[0][0], None);
        assert_eq!(first.tables[0].rows[1][1].as_deref(), Some("Arte\nRossi"));

        assert!(dump.page(1).unwrap().tables.is_empty());
        assert!(dump.page(2).is_err());
    }

    #[test]
    fn test_malformed_dump() {
        assert!(matches!(PageDump::from_json("{\"pages\": 3}"), Err(Error::Json(_))));
    }

    #[test]
    fn test_open_missing_json() {
        let result = open_source("/definitely/not/here.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
