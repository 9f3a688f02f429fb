//! Subject display colors.
//!
//! Subjects are matched by case-insensitive substring in either direction,
//! so "Matematica e complementi" and "Ginn" both find a color. The table
//! is ordered: the first matching entry wins.

use crate::rules::{first_match, Rule};

/// Color for subjects that match no entry.
pub const DEFAULT_COLOR: &str = "#78909c";

/// Known subjects and their colors, in match order.
pub const SUBJECT_COLORS: &[Rule<&str, &str>] = &[
    Rule::new("Inglese", "#42a5f5"),
    Rule::new("Lingua inglese", "#42a5f5"),
    Rule::new("Sistemi e reti", "#66bb6a"),
    Rule::new("Sistemi automatici", "#66bb6a"),
    Rule::new("Informatica", "#7e57c2"),
    Rule::new("Tecnologie informatiche", "#7e57c2"),
    Rule::new("T.P.S.I.T.", "#ffa726"),
    Rule::new("T.P.S.E.E.", "#ffa726"),
    Rule::new("Gestione progetto", "#26a69a"),
    Rule::new("Matematica", "#ef5350"),
    Rule::new("Italiano", "#8d6e63"),
    Rule::new("Storia", "#6d4c41"),
    Rule::new("Religione", "#fbc02d"),
    Rule::new("Ginnastica", "#ff7043"),
    Rule::new("Scienze motorie", "#ff7043"),
    Rule::new("Telecomunicazioni", "#9c27b0"),
    Rule::new("Elettrotecnica", "#f44336"),
    Rule::new("Meccanica", "#795548"),
    Rule::new("Francese", "#4fc3f7"),
    Rule::new("Spagnolo", "#ffa726"),
    Rule::new("Economia aziendale", "#4caf50"),
    Rule::new("Diritto", "#2196f3"),
    Rule::new("Fisica", "#ff5722"),
    Rule::new("Chimica", "#00bcd4"),
    Rule::new("Geografia", "#8bc34a"),
    Rule::new("Filosofia", "#673ab7"),
    Rule::new("Scienze naturali", "#4caf50"),
    Rule::new("Arte", "#ff9800"),
    Rule::new("INTERVALLO", "#ffd54f"),
];

/// Display color for a subject.
pub fn color_for(subject: &str) -> &'static str {
    let subject = subject.trim().to_lowercase();
    if subject.is_empty() {
        return DEFAULT_COLOR;
    }
    first_match(SUBJECT_COLORS, |key| {
        let key = key.to_lowercase();
        subject.contains(&key) || key.contains(&subject)
    })
    .copied()
    .unwrap_or(DEFAULT_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_subject() {
        assert_eq!(color_for("Matematica"), "#ef5350");
        assert_eq!(color_for("INFORMATICA"), "#7e57c2");
    }

    #[test]
    fn test_subject_contains_key() {
        assert_eq!(color_for("Matematica e complementi"), "#ef5350");
        assert_eq!(color_for("Lingua e letteratura: Italiano"), "#8d6e63");
    }

    #[test]
    fn test_key_contains_subject() {
        assert_eq!(color_for("Ginn"), "#ff7043");
    }

    #[test]
    fn test_first_entry_wins() {
        // Both "Sistemi e reti" and "Sistemi automatici" contain "sistemi".
        assert_eq!(color_for("Sistemi"), "#66bb6a");
        // "Storia" precedes "Arte" and both occur in the subject.
        assert_eq!(color_for("Storia dell'arte"), "#6d4c41");
    }

    #[test]
    fn test_unknown_and_empty_subjects() {
        assert_eq!(color_for("Astronomia"), DEFAULT_COLOR);
        assert_eq!(color_for("   "), DEFAULT_COLOR);
    }
}
