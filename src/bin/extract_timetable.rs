//! Extract class timetables from a school timetable PDF
//!
//! Writes one aggregate JSON document and one JSON file per class.
//!
//! Usage:
//!   cargo run --release --bin extract_timetable -- orario.pdf
//!   cargo run --release --bin extract_timetable -- pages.json --output-dir out/classi --date 2025-09-15
//!
//! Options:
//!   --output FILE        Aggregate JSON file (default: orari_tutte_classi.json)
//!   --output-dir DIR     Per-class JSON directory (default: orari_classi)
//!   --school NAME        School name written to the aggregate document
//!   --date YYYY-MM-DD    Extraction date (default: today)
//!   --repeat-merged      Read merged cells without an arrow as separate lessons
//!   --verbose, -v        Debug logging

use std::path::{Path, PathBuf};
use std::process;

use timetable_oxide::output::{write_class_files, write_document};
use timetable_oxide::{open_source, Error, Extraction, Extractor, ExtractorConfig, ForwardFill, TimetableDocument};

struct CliConfig {
    input: Option<PathBuf>,
    extractor: ExtractorConfig,
    verbose: bool,
}

impl CliConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut extractor = ExtractorConfig::new();
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--output" => {
                    i += 1;
                    if i < args.len() {
                        extractor = extractor.with_output_file(&args[i]);
                    }
                },
                "--output-dir" => {
                    i += 1;
                    if i < args.len() {
                        extractor = extractor.with_output_dir(&args[i]);
                    }
                },
                "--school" => {
                    i += 1;
                    if i < args.len() {
                        extractor = extractor.with_school(&args[i]);
                    }
                },
                "--date" => {
                    i += 1;
                    if i < args.len() {
                        extractor = extractor.with_extraction_date(&args[i]);
                    }
                },
                "--repeat-merged" => {
                    extractor = extractor.with_forward_fill(ForwardFill::Repeat);
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                arg if !arg.starts_with("--") && input.is_none() => {
                    input = Some(PathBuf::from(arg));
                },
                other => {
                    eprintln!("Ignoring unknown argument: {}", other);
                },
            }
            i += 1;
        }

        Self {
            input,
            extractor,
            verbose,
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_summary(extraction: &Extraction, document: &TimetableDocument) {
    println!();
    println!("{}", "=".repeat(60));
    println!("Classes: {}", document.total_classes);
    for record in document.classes.values() {
        println!("  {:<12} {:>3} entries ({})", record.class_name.to_string(), record.total_lessons, record.schedule_type);
    }
    println!("Lessons extracted: {}", extraction.stats.lessons);
    println!("Entries written (with recesses): {}", document.total_entries());
    println!(
        "Pages: {} read, {} skipped",
        extraction.stats.pages, extraction.stats.pages_skipped
    );

    let cells = &extraction.stats.cells;
    if cells.unmarked_merges > 0 {
        println!("Merged cells read as continuations (check these): {}", cells.unmarked_merges);
    }
    if cells.orphan_markers > 0 {
        println!("Continuation arrows without a lesson above: {}", cells.orphan_markers);
    }
    println!("{}", "=".repeat(60));
}

fn run(config: &CliConfig, input: &Path) -> Result<(), Error> {
    let mut source = open_source(input)?;
    let extraction = Extractor::new(config.extractor.clone()).run(source.as_mut())?;

    let document = TimetableDocument::new(extraction.schedules.clone(), &config.extractor);
    write_document(&document, &config.extractor.output_file)?;
    let written = write_class_files(&document.classes, &config.extractor.output_dir)?;

    print_summary(&extraction, &document);
    println!("Aggregate: {}", config.extractor.output_file.display());
    println!("Class files: {} in {}", written.len(), config.extractor.output_dir.display());
    Ok(())
}

fn main() {
    let config = CliConfig::from_args();
    init_logging(config.verbose);

    let Some(input) = config.input.clone() else {
        eprintln!("Usage: extract_timetable <pdf-or-json> [--output FILE] [--output-dir DIR] [--school NAME] [--date YYYY-MM-DD] [--repeat-merged] [--verbose]");
        process::exit(1);
    };

    if !input.exists() {
        eprintln!("Error: File {} does not exist", input.display());
        process::exit(1);
    }

    match run(&config, &input) {
        Ok(()) => {},
        Err(Error::NoLessons) => {
            eprintln!("Error: no lessons extracted from {}", input.display());
            process::exit(1);
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        },
    }
}
