//! Page-by-page timetable extraction.
//!
//! For every page: decode the class header from the page text, rebuild and
//! resolve each table, and append the lessons to the class's timetable.
//! Pages without a class header are skipped. Once all pages are in,
//! recesses are injected and every class is ordered.

use crate::class_label::{identify_class, ClassLabel};
use crate::config::ExtractorConfig;
use crate::error::{Error, Result};
use crate::grid::{reconstruct, RawTable, ResolveStats, Resolved, SlotResolver};
use crate::source::{PageContent, PageSource};
use crate::timetable::{ClassSchedules, Timetable};

/// Counters collected over a whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Pages looked at
    pub pages: usize,
    /// Pages without a class header or unreadable
    pub pages_skipped: usize,
    /// Tables resolved
    pub tables: usize,
    /// Parsed lessons, recesses excluded
    pub lessons: usize,
    /// Cell-level skips and review flags
    pub cells: ResolveStats,
}

/// Result of a finished extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Per-class timetables in label order
    pub schedules: ClassSchedules,
    /// Document counters
    pub stats: ExtractionStats,
}

/// Resolve all timetable tables of one page for `label`.
///
/// Tables without a row under the header are ignored.
pub fn resolve_tables(label: &ClassLabel, tables: &[RawTable], config: &ExtractorConfig) -> Vec<Resolved> {
    let resolver = SlotResolver::new(label, config.continuation_glyph, config.forward_fill);
    tables
        .iter()
        .filter(|table| table.has_body())
        .map(|table| resolver.resolve(&reconstruct(table, config.continuation_glyph)))
        .collect()
}

/// Stateful extractor that accumulates pages.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
    timetable: Timetable,
    stats: ExtractionStats,
}

impl Extractor {
    /// Create an extractor.
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            timetable: Timetable::new(),
            stats: ExtractionStats::default(),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Counters so far.
    pub fn stats(&self) -> &ExtractionStats {
        &self.stats
    }

    /// Process one page; returns the class label if the page had one.
    pub fn process_page(&mut self, page: &PageContent) -> Option<ClassLabel> {
        self.stats.pages += 1;

        let Some(header) = identify_class(&page.text) else {
            log::debug!("No class header on page {}, skipping", self.stats.pages);
            self.stats.pages_skipped += 1;
            return None;
        };
        let label = header.label;
        log::info!("Class {} ({} students)", label, header.headcount);

        let mut lessons = Vec::new();
        for resolved in resolve_tables(&label, &page.tables, &self.config) {
            self.stats.tables += 1;
            self.stats.cells += resolved.stats;
            lessons.extend(resolved.lessons);
        }
        self.stats.lessons += lessons.len();
        log::debug!("{}: {} lessons on this page", label, lessons.len());

        self.timetable.add_lessons(label.clone(), lessons);
        Some(label)
    }

    /// Process every page of `source` and finish.
    ///
    /// A page that cannot be read is logged and skipped. Fails with
    /// [`Error::NoLessons`] if the document yields no lessons at all.
    pub fn run(mut self, source: &mut dyn PageSource) -> Result<Extraction> {
        let page_count = source.page_count()?;
        log::info!("Processing {} pages", page_count);

        for index in 0..page_count {
            match source.page(index) {
                Ok(page) => {
                    self.process_page(&page);
                },
                Err(e) => {
                    log::warn!("Failed to read page {}: {}", index + 1, e);
                    self.stats.pages += 1;
                    self.stats.pages_skipped += 1;
                },
            }
        }

        if self.stats.lessons == 0 {
            return Err(Error::NoLessons);
        }
        Ok(self.finish())
    }

    /// Inject recesses and order every class.
    pub fn finish(self) -> Extraction {
        log::info!(
            "Extracted {} lessons for {} classes",
            self.stats.lessons,
            self.timetable.class_count()
        );
        Extraction {
            schedules: self.timetable.finish(),
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PageDump;

    fn table(rows: &[&[Option<&str>]]) -> RawTable {
        RawTable::new(
            rows.iter()
                .map(|row| row.iter().map(|c| c.map(str::to_string)).collect())
                .collect(),
        )
    }

    fn monday_page(header: &str, cells: &[Option<&str>]) -> PageContent {
        let mut rows: Vec<Vec<Option<&str>>> = vec![vec![None, Some("LUN")]];
        let labels = ["1", "2", "3", "4", "5", "6", "7"];
        for (i, cell) in cells.iter().enumerate() {
            rows.push(vec![Some(labels[i]), *cell]);
        }
        let row_refs: Vec<&[Option<&str>]> = rows.iter().map(Vec::as_slice).collect();
        PageContent::new(header, vec![table(&row_refs)])
    }

    #[test]
    fn test_page_without_header_is_skipped() {
        let mut extractor = Extractor::new(ExtractorConfig::default());
        let page = monday_page("Indice", &[Some("Arte")]);
        assert!(extractor.process_page(&page).is_none());
        assert_eq!(extractor.stats().pages_skipped, 1);
        assert_eq!(extractor.stats().lessons, 0);
    }

    #[test]
    fn test_header_only_table_is_ignored() {
        let mut extractor = Extractor::new(ExtractorConfig::default());
        let page = PageContent::new("2A INF (20)", vec![table(&[&[None, Some("LUN")]])]);
        extractor.process_page(&page);
        assert_eq!(extractor.stats().tables, 0);
    }

    #[test]
    fn test_run_collects_pages() {
        let dump = PageDump::new(vec![
            monday_page("11AA AAFFMM ((2277))", &[Some("Matematica\nRossi\n12"), Some("Storia")]),
            monday_page("Note", &[Some("ignored")]),
            monday_page("3C LSSA (22)", &[Some("Fisica")]),
        ]);
        let extraction = Extractor::new(ExtractorConfig::default()).run(&mut dump.clone()).unwrap();
        assert_eq!(extraction.stats.pages, 3);
        assert_eq!(extraction.stats.pages_skipped, 1);
        assert_eq!(extraction.stats.lessons, 3);
        assert_eq!(extraction.schedules.len(), 2);
        let afm = &extraction.schedules[0];
        assert_eq!(afm.class_name.to_string(), "1A AFM");
        // Two lessons plus Monday's single recess.
        assert_eq!(afm.total_lessons, 3);
    }

    #[test]
    fn test_run_without_lessons_fails() {
        let mut dump = PageDump::new(vec![monday_page("1A AFM (27)", &[None, None])]);
        let result = Extractor::new(ExtractorConfig::default()).run(&mut dump);
        assert!(matches!(result, Err(Error::NoLessons)));
    }
}
