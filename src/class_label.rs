//! Class identification from page header text.
//!
//! Timetable pages carry a bold header such as `1A AFM (27)`: grade digit,
//! section letter, specialization and head count. The bold font is drawn
//! twice by the PDF producer, so text extraction usually returns every
//! character doubled: `11AA AAFFMM ((2277))`. [`identify_class`] accepts
//! both renderings and always yields the canonical label.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

lazy_static! {
    /// Doubled header: "11AA AAFFMM ((2277))". Pairs are verified after matching.
    static ref RE_DOUBLED_HEADER: Regex =
        Regex::new(r"(\d{2})([A-Z]{2})\s+((?:[A-Z]{2})+)\s+\(\((\d+)\)\)").unwrap();

    /// Plain header: "1A AFM (27)"
    static ref RE_PLAIN_HEADER: Regex = Regex::new(r"(\d)([A-Z])\s+([A-Z]+)\s+\((\d+)\)").unwrap();

    /// Canonical label: "1A AFM"
    static ref RE_LABEL: Regex = Regex::new(r"^(\d)([A-Z])\s+([A-Z]+)$").unwrap();
}

/// Canonical class identifier, e.g. `1A AFM`.
///
/// Used as the join key for every lesson found on the class's pages.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassLabel {
    /// Grade digit
    pub grade: char,
    /// Section letter
    pub section: char,
    /// Specialization token (AFM, INF, LSSA, ...)
    pub specialization: String,
}

impl ClassLabel {
    /// File-system friendly form: spaces become `_`, slashes become `-`.
    pub fn file_stem(&self) -> String {
        self.to_string().replace(' ', "_").replace('/', "-")
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", self.grade, self.section, self.specialization)
    }
}

impl FromStr for ClassLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let caps = RE_LABEL
            .captures(s.trim())
            .ok_or_else(|| Error::InvalidClassLabel(s.to_string()))?;
        Ok(label_from_parts(&caps[1], &caps[2], &caps[3]))
    }
}

impl Serialize for ClassLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClassLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A decoded page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHeader {
    /// Canonical label
    pub label: ClassLabel,
    /// Number of students printed next to the label
    pub headcount: u32,
    /// True if the header was rendered with doubled characters
    pub doubled: bool,
}

/// Collapse a doubled rendering (`"AAFFMM"` → `"AFM"`).
///
/// Returns `None` unless the text has even length and every pair of
/// characters is identical.
pub fn undouble(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() || chars.len() % 2 != 0 {
        return None;
    }
    chars
        .chunks(2)
        .map(|pair| (pair[0] == pair[1]).then_some(pair[0]))
        .collect()
}

/// Decode the class header from a page's extracted text.
///
/// The doubled rendering is tried first, then the plain one. Pages without
/// a recognizable header yield `None` and are skipped by the caller.
pub fn identify_class(page_text: &str) -> Option<ClassHeader> {
    for caps in RE_DOUBLED_HEADER.captures_iter(page_text) {
        let parts = (
            undouble(&caps[1]),
            undouble(&caps[2]),
            undouble(&caps[3]),
            undouble(&caps[4]),
        );
        if let (Some(grade), Some(section), Some(spec), Some(count)) = parts {
            if let Ok(headcount) = count.parse() {
                return Some(ClassHeader {
                    label: label_from_parts(&grade, &section, &spec),
                    headcount,
                    doubled: true,
                });
            }
        }
        log::debug!("Rejected doubled header candidate '{}'", &caps[0]);
    }

    let caps = RE_PLAIN_HEADER.captures(page_text)?;
    Some(ClassHeader {
        label: label_from_parts(&caps[1], &caps[2], &caps[3]),
        headcount: caps[4].parse().ok()?,
        doubled: false,
    })
}

fn label_from_parts(grade: &str, section: &str, specialization: &str) -> ClassLabel {
    ClassLabel {
        grade: grade.chars().next().unwrap_or('0'),
        section: section.chars().next().unwrap_or('A'),
        specialization: specialization.to_string(),
    }
}
