//! PDF page source backed by `pdf_oxide`.
//!
//! Page text comes straight from `extract_text`. The timetable grid is
//! assembled from positioned text spans:
//!
//! 1. Spans reading as a weekday name (full, abbreviated or doubled) anchor
//!    the day columns.
//! 2. Single-digit spans left of the first day column anchor the period rows.
//! 3. Every other span goes to its nearest row and column. Spans closer to
//!    the header line than to any period row, or far below the last row,
//!    are left out.
//!
//! Each cell's spans are joined into lines top to bottom, so a lesson cell
//! reads "subject\nteacher\nroom" the same way a ruled-table extractor
//! would return it. Text of a merged cell lands on the row it is drawn
//! closest to.

use std::collections::BTreeMap;
use std::path::Path;

use pdf_oxide::PdfDocument;

use crate::class_label::undouble;
use crate::error::Result;
use crate::grid::RawTable;
use crate::schedule::Weekday;
use crate::source::{PageContent, PageSource};

/// Spans whose vertical centers differ by less than this share a line.
const LINE_TOLERANCE: f32 = 2.0;

/// Spans further than this many row pitches from every row are ignored.
const MAX_ROW_DISTANCE: f32 = 1.5;

/// A piece of page text at its bounding-box center.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    /// Span text
    pub text: String,
    /// Horizontal center
    pub x: f32,
    /// Vertical center
    pub y: f32,
}

impl PlacedText {
    /// Create a placed text.
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

/// PDF document read page by page.
pub struct PdfSource {
    doc: PdfDocument,
}

impl PdfSource {
    /// Open a PDF file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let doc = PdfDocument::open(path.as_ref())?;
        Ok(Self { doc })
    }
}

impl PageSource for PdfSource {
    fn page_count(&mut self) -> Result<usize> {
        Ok(self.doc.page_count()?)
    }

    fn page(&mut self, index: usize) -> Result<PageContent> {
        let text = self.doc.extract_text(index)?;
        let placed: Vec<PlacedText> = self
            .doc
            .extract_spans(index)?
            .into_iter()
            .filter(|span| !span.text.trim().is_empty())
            .map(|span| {
                let x = span.bbox.x + span.bbox.width / 2.0;
                let y = span.bbox.y + span.bbox.height / 2.0;
                PlacedText::new(span.text, x, y)
            })
            .collect();

        let tables = assemble_table(&placed).into_iter().collect();
        Ok(PageContent { text, tables })
    }
}

fn header_day(text: &str) -> Option<Weekday> {
    Weekday::from_name(text).or_else(|| undouble(text.trim()).and_then(|t| Weekday::from_name(&t)))
}

fn period_label(text: &str) -> Option<u8> {
    let text = text.trim();
    let digit = match text.len() {
        1 => text.to_string(),
        _ => undouble(text)?,
    };
    digit.parse().ok().filter(|n| (1..=9).contains(n))
}

fn nearest<T: Copy>(anchors: &[(T, f32)], value: f32) -> Option<(T, f32)> {
    anchors
        .iter()
        .map(|&(key, pos)| (key, (pos - value).abs()))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Build the timetable grid of one page from positioned text.
///
/// Returns `None` when the page has no weekday header or no period labels.
pub fn assemble_table(items: &[PlacedText]) -> Option<RawTable> {
    let mut columns: Vec<(Weekday, f32)> = Vec::new();
    let mut header_ys: Vec<f32> = Vec::new();
    for item in items {
        if let Some(day) = header_day(&item.text) {
            if !columns.iter().any(|(d, _)| *d == day) {
                columns.push((day, item.x));
                header_ys.push(item.y);
            }
        }
    }
    if columns.is_empty() {
        return None;
    }
    let first_col_x = columns.iter().map(|c| c.1).fold(f32::INFINITY, f32::min);
    let header_y = header_ys.iter().sum::<f32>() / header_ys.len() as f32;

    let mut rows: Vec<(u8, f32)> = Vec::new();
    let mut label_xs: Vec<f32> = Vec::new();
    for item in items.iter().filter(|item| item.x < first_col_x) {
        if let Some(ordinal) = period_label(&item.text) {
            if !rows.iter().any(|(n, _)| *n == ordinal) {
                rows.push((ordinal, item.y));
                label_xs.push(item.x);
            }
        }
    }
    if rows.is_empty() {
        return None;
    }
    rows.sort_by_key(|(ordinal, _)| *ordinal);
    let label_x = label_xs.iter().sum::<f32>() / label_xs.len() as f32;

    let (first_y, last_y) = (rows[0].1, rows[rows.len() - 1].1);
    let downward = if rows.len() > 1 { last_y > first_y } else { first_y > header_y };
    let pitch = if rows.len() > 1 {
        (last_y - first_y).abs() / (rows.len() - 1) as f32
    } else {
        (first_y - header_y).abs()
    };

    let mut cells: BTreeMap<(u8, Weekday), Vec<&PlacedText>> = BTreeMap::new();
    for item in items {
        if header_day(&item.text).is_some() || (item.x < first_col_x && period_label(&item.text).is_some()) {
            continue;
        }
        let Some((ordinal, row_dist)) = nearest(&rows, item.y) else {
            continue;
        };
        if (item.y - header_y).abs() < row_dist || row_dist > pitch * MAX_ROW_DISTANCE {
            continue;
        }
        let Some((day, col_dist)) = nearest(&columns, item.x) else {
            continue;
        };
        if (item.x - label_x).abs() < col_dist {
            continue;
        }
        cells.entry((ordinal, day)).or_default().push(item);
    }

    let max_ordinal = rows[rows.len() - 1].0;
    let width = Weekday::ALL.len() + 1;
    let mut grid = vec![vec![None; width]; max_ordinal as usize + 1];
    for (day, _) in &columns {
        grid[0][day.number() as usize] = Some(day.to_string());
    }
    for (ordinal, _) in &rows {
        grid[*ordinal as usize][0] = Some(ordinal.to_string());
    }
    for ((ordinal, day), mut parts) in cells {
        parts.sort_by(|a, b| {
            let (ay, by) = if downward { (a.y, b.y) } else { (-a.y, -b.y) };
            ay.total_cmp(&by).then(a.x.total_cmp(&b.x))
        });
        grid[ordinal as usize][day.number() as usize] = Some(join_lines(&parts));
    }

    Some(RawTable::new(grid))
}

/// Join spans sorted top to bottom: same line with a space, new line with `\n`.
fn join_lines(parts: &[&PlacedText]) -> String {
    let mut out = String::new();
    let mut last_y: Option<f32> = None;
    for part in parts {
        if let Some(y) = last_y {
            out.push(if (part.y - y).abs() < LINE_TOLERANCE { ' ' } else { '\n' });
        }
        out.push_str(part.text.trim());
        last_y = Some(part.y);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A small page in top-down coordinates: header at y=100, periods every 40.
    fn page() -> Vec<PlacedText> {
        vec![
            PlacedText::new("11AA AAFFMM ((2277))", 200.0, 40.0),
            PlacedText::new("LLUUNN", 150.0, 100.0),
            PlacedText::new("MAR", 250.0, 100.0),
            PlacedText::new("1", 50.0, 140.0),
            PlacedText::new("2", 50.0, 180.0),
            PlacedText::new("3", 50.0, 220.0),
            PlacedText::new("Matematica", 150.0, 135.0),
            PlacedText::new("Rossi", 140.0, 145.0),
            PlacedText::new("M.", 165.0, 145.5),
            PlacedText::new("\u{ea1e}", 150.0, 180.0),
            PlacedText::new("Storia", 250.0, 220.0),
            PlacedText::new("07:50", 55.0, 150.0),
            PlacedText::new("Pagina 4 di 30", 200.0, 600.0),
        ]
    }

    #[test]
    fn test_assemble_table() {
        let table = assemble_table(&page()).unwrap();
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0][1].as_deref(), Some("Lunedì"));
        assert_eq!(table.rows[0][2].as_deref(), Some("Martedì"));
        assert_eq!(table.rows[1][0].as_deref(), Some("1"));
        assert_eq!(table.rows[1][1].as_deref(), Some("Matematica\nRossi M."));
        assert_eq!(table.rows[2][1].as_deref(), Some("\u{ea1e}"));
        assert_eq!(table.rows[3][2].as_deref(), Some("Storia"));
        assert_eq!(table.rows[2][2], None);
    }

    #[test]
    fn test_upward_coordinates() {
        let flipped: Vec<PlacedText> = page()
            .into_iter()
            .map(|p| PlacedText::new(p.text, p.x, 800.0 - p.y))
            .collect();
        let table = assemble_table(&flipped).unwrap();
        assert_eq!(table.rows[1][1].as_deref(), Some("Matematica\nRossi M."));
    }

    #[test]
    fn test_page_without_header() {
        let items = vec![PlacedText::new("Circolare n. 12", 100.0, 100.0)];
        assert!(assemble_table(&items).is_none());
    }

    #[test]
    fn test_period_label() {
        assert_eq!(period_label(" 3 "), Some(3));
        assert_eq!(period_label("44"), Some(4));
        assert_eq!(period_label("0"), None);
        assert_eq!(period_label("12"), None);
        assert_eq!(header_day("GGIIOO"), Some(Weekday::Thursday));
    }
}
