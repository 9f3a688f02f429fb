//! JSON output: one aggregate document and one file per class.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::timetable::ClassSchedules;

/// Aggregate document with every class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableDocument {
    /// School name
    pub school: String,
    /// Extraction date
    pub extraction_date: String,
    /// Number of classes
    pub total_classes: usize,
    /// Class timetables keyed by label
    pub classes: ClassSchedules,
}

impl TimetableDocument {
    /// Build the document for `classes` using the school and date from `config`.
    pub fn new(classes: ClassSchedules, config: &ExtractorConfig) -> Self {
        Self {
            school: config.school.clone(),
            extraction_date: config.resolved_extraction_date(),
            total_classes: classes.len(),
            classes,
        }
    }

    /// Total entries over all classes, recesses included.
    pub fn total_entries(&self) -> usize {
        self.classes.values().map(|c| c.total_lessons).sum()
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write the aggregate document to `path`.
pub fn write_document(document: &TimetableDocument, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_json(path, document)?;
    log::info!("Wrote {} classes to {}", document.total_classes, path.display());
    Ok(())
}

/// Write one `<label>.json` per class into `dir`, creating it if needed.
///
/// Returns the written paths in class order.
pub fn write_class_files(classes: &ClassSchedules, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(classes.len());
    for (label, record) in classes {
        let path = dir.join(format!("{}.json", label.file_stem()));
        write_json(&path, record)?;
        written.push(path);
    }
    log::info!("Wrote {} class files to {}", written.len(), dir.display());
    Ok(written)
}
