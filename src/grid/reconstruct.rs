//! Reconstruction of vertically merged timetable cells.
//!
//! The upstream table extractor attaches the text of a merged cell to its
//! first sub-cell only; the other sub-cells come back blank. A lesson that
//! runs into following periods may instead be drawn as an arrow glyph in
//! the next cell, whose own merged area is blank again. Each weekday
//! column is scanned top to bottom with a two-field state machine that
//! tells these cases apart.

use serde::{Deserialize, Serialize};

use crate::schedule::Weekday;

/// One extracted table: row-major cells, `None` for absent cells.
///
/// Row 0 is the compound header. Row `n` is period `n`, column 0 holds the
/// period labels and columns 1..=6 are Monday..Saturday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTable {
    /// Table rows, each a list of optional multi-line cell texts
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Wrap a grid of cells.
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    /// Number of rows including the header.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True if the table has at least one period row under the header.
    pub fn has_body(&self) -> bool {
        self.rows.len() >= 2
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Classification of one reconstructed cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    /// Text printed in this cell
    Fresh(String),
    /// Blank sub-cell of a merged cell, carrying the text printed above it
    Filled(String),
    /// Continuation arrow
    Marker,
    /// Blank sub-cell of a continuation arrow's merged area
    Skip,
    /// Blank cell with nothing above it to fill from
    Vacant,
}

impl GridCell {
    fn from_raw(cell: Option<&String>) -> Self {
        match cell {
            Some(text) if !text.trim().is_empty() => GridCell::Fresh(text.clone()),
            _ => GridCell::Vacant,
        }
    }

    /// Cell text for `Fresh` and `Filled` cells.
    pub fn text(&self) -> Option<&str> {
        match self {
            GridCell::Fresh(text) | GridCell::Filled(text) => Some(text),
            _ => None,
        }
    }
}

/// Per-column scan state.
#[derive(Debug, Default)]
struct ColumnScan {
    last_value: Option<String>,
    arrow_active: bool,
}

impl ColumnScan {
    fn step(&mut self, cell: Option<&String>, glyph: char) -> GridCell {
        match cell.filter(|text| !text.trim().is_empty()) {
            Some(text) if text.contains(glyph) => {
                self.arrow_active = true;
                GridCell::Marker
            },
            Some(text) => {
                self.last_value = Some(text.clone());
                self.arrow_active = false;
                GridCell::Fresh(text.clone())
            },
            None if self.arrow_active => GridCell::Skip,
            None => match &self.last_value {
                Some(value) => GridCell::Filled(value.clone()),
                None => GridCell::Vacant,
            },
        }
    }
}

/// Period rows of a table after merge reconstruction.
///
/// `rows()[i]` is period `i + 1`; each row keeps the width of its source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructedGrid {
    rows: Vec<Vec<GridCell>>,
}

impl ReconstructedGrid {
    /// Reconstructed period rows.
    pub fn rows(&self) -> &[Vec<GridCell>] {
        &self.rows
    }

    /// Number of period rows.
    pub fn period_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell for a period (from 1) and weekday.
    pub fn cell(&self, period: usize, day: Weekday) -> Option<&GridCell> {
        self.rows
            .get(period.checked_sub(1)?)
            .and_then(|row| row.get(day.number() as usize))
    }
}

/// Rebuild merged cells of `table`, skipping its header row.
///
/// Weekday columns are scanned independently. A non-blank cell containing
/// `glyph` is a [`GridCell::Marker`] and arms the arrow state; blank cells
/// under an armed arrow become [`GridCell::Skip`]; other blank cells are
/// forward-filled from the last text in the column; any other text resets
/// the arrow.
pub fn reconstruct(table: &RawTable, glyph: char) -> ReconstructedGrid {
    let body = table.rows.get(1..).unwrap_or_default();

    let mut rows: Vec<Vec<GridCell>> = body
        .iter()
        .map(|row| row.iter().map(|cell| GridCell::from_raw(cell.as_ref())).collect())
        .collect();

    let last_day_col = table.width().saturating_sub(1).min(Weekday::ALL.len());
    for col in 1..=last_day_col {
        let mut scan = ColumnScan::default();
        for (row_idx, row) in body.iter().enumerate() {
            if let Some(cell) = row.get(col) {
                rows[row_idx][col] = scan.step(cell.as_ref(), glyph);
            }
        }
    }

    ReconstructedGrid { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONTINUATION_GLYPH;

    const ARROW: &str = "\u{ea1e}";

    /// Header row plus one weekday column (Monday) holding `cells`.
    fn monday_column(cells: &[Option<&str>]) -> RawTable {
        let mut rows = vec![vec![None, Some("LUN".to_string())]];
        for (i, cell) in cells.iter().enumerate() {
            rows.push(vec![Some((i + 1).to_string()), cell.map(str::to_string)]);
        }
        RawTable::new(rows)
    }

    fn monday(grid: &ReconstructedGrid) -> Vec<GridCell> {
        grid.rows().iter().map(|row| row[1].clone()).collect()
    }

    #[test]
    fn test_forward_fill() {
        let table = monday_column(&[Some("Storia\nBianchi"), None, Some("  ")]);
        let cells = monday(&reconstruct(&table, CONTINUATION_GLYPH));
        assert_eq!(
            cells,
            vec![
                GridCell::Fresh("Storia\nBianchi".into()),
                GridCell::Filled("Storia\nBianchi".into()),
                GridCell::Filled("Storia\nBianchi".into()),
            ]
        );
    }

    #[test]
    fn test_marker_suppresses_fill() {
        let table = monday_column(&[Some("Fisica"), Some(ARROW), None, None, Some("Chimica"), None]);
        let cells = monday(&reconstruct(&table, CONTINUATION_GLYPH));
        assert_eq!(
            cells,
            vec![
                GridCell::Fresh("Fisica".into()),
                GridCell::Marker,
                GridCell::Skip,
                GridCell::Skip,
                GridCell::Fresh("Chimica".into()),
                GridCell::Filled("Chimica".into()),
            ]
        );
    }

    #[test]
    fn test_blank_column_head_stays_vacant() {
        let table = monday_column(&[None, Some(""), Some("Arte")]);
        let cells = monday(&reconstruct(&table, CONTINUATION_GLYPH));
        assert_eq!(cells[0], GridCell::Vacant);
        assert_eq!(cells[1], GridCell::Vacant);
        assert_eq!(cells[2], GridCell::Fresh("Arte".into()));
    }

    #[test]
    fn test_marker_with_text_is_still_marker() {
        let table = monday_column(&[Some("Diritto"), Some("Diritto \u{ea1e}")]);
        let cells = monday(&reconstruct(&table, CONTINUATION_GLYPH));
        assert_eq!(cells[1], GridCell::Marker);
    }

    #[test]
    fn test_columns_are_independent() {
        let table = RawTable::new(vec![
            vec![None, Some("LUN".into()), Some("MAR".into())],
            vec![Some("1".into()), Some("Arte".into()), Some(ARROW.into())],
            vec![Some("2".into()), None, None],
        ]);
        let grid = reconstruct(&table, CONTINUATION_GLYPH);
        assert_eq!(grid.cell(2, Weekday::Monday), Some(&GridCell::Filled("Arte".into())));
        assert_eq!(grid.cell(1, Weekday::Tuesday), Some(&GridCell::Marker));
        assert_eq!(grid.cell(2, Weekday::Tuesday), Some(&GridCell::Skip));
    }

    #[test]
    fn test_short_rows_keep_their_width() {
        let table = RawTable::new(vec![
            vec![None, Some("LUN".into()), Some("MAR".into())],
            vec![Some("1".into()), Some("Arte".into()), Some("Storia".into())],
            vec![Some("2".into())],
            vec![Some("3".into()), None, None],
        ]);
        let grid = reconstruct(&table, CONTINUATION_GLYPH);
        assert_eq!(grid.rows()[1].len(), 1);
        assert_eq!(grid.cell(3, Weekday::Tuesday), Some(&GridCell::Filled("Storia".into())));
    }

    #[test]
    fn test_period_label_column_untouched() {
        let table = monday_column(&[Some("Arte"), None]);
        let grid = reconstruct(&table, CONTINUATION_GLYPH);
        assert_eq!(grid.rows()[1][0], GridCell::Fresh("2".into()));
        assert_eq!(grid.period_count(), 2);
    }

    #[test]
    fn test_header_only_table() {
        let table = RawTable::new(vec![vec![None, Some("LUN".into())]]);
        assert!(!table.has_body());
        assert_eq!(reconstruct(&table, CONTINUATION_GLYPH).period_count(), 0);
        assert_eq!(reconstruct(&RawTable::default(), CONTINUATION_GLYPH).period_count(), 0);
    }
}
