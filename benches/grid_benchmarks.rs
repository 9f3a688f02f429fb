//! Benchmarks for merged-cell reconstruction and slot resolution.
//!
//! Run with: `cargo bench --bench grid_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use timetable_oxide::grid::{reconstruct, RawTable, SlotResolver};
use timetable_oxide::{ClassLabel, Extractor, ExtractorConfig, ForwardFill, PageContent, PageDump};

const ARROW: &str = "\u{ea1e}";

const SUBJECTS: &[&str] = &[
    "Matematica\nRossi\nAula 12",
    "Lingua e letteratura italiana\nBianchi M.\nAula 3",
    "Sistemi e reti\nVerdi\nLab. 2",
    "Scienze motorie\nNeri\nPalestra",
    "Inglese\nBrown\nAula 7",
];

/// A six-day, seven-period week mixing text, merged blanks and arrows.
fn full_week() -> RawTable {
    let mut rows = vec![vec![None, Some("LUN"), Some("MAR"), Some("MER"), Some("GIO"), Some("VEN"), Some("SAB")]
        .into_iter()
        .map(|c| c.map(str::to_string))
        .collect::<Vec<_>>()];

    for period in 0..7 {
        let mut row = vec![Some((period + 1).to_string())];
        for day in 0..6 {
            let cell = match (period + day) % 4 {
                0 => Some(SUBJECTS[(period * 6 + day) % SUBJECTS.len()].to_string()),
                1 => None,
                2 => Some(ARROW.to_string()),
                _ => Some(SUBJECTS[(period + day) % SUBJECTS.len()].to_string()),
            };
            row.push(cell);
        }
        rows.push(row);
    }
    RawTable::new(rows)
}

fn bench_reconstruct(c: &mut Criterion) {
    let table = full_week();
    c.bench_function("reconstruct_full_week", |b| {
        b.iter(|| reconstruct(black_box(&table), '\u{ea1e}'))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let table = full_week();
    let grid = reconstruct(&table, '\u{ea1e}');
    let label: ClassLabel = "3A INF".parse().unwrap();

    let mut group = c.benchmark_group("resolve_full_week");
    for (name, fill) in [("extend", ForwardFill::Extend), ("repeat", ForwardFill::Repeat)] {
        let resolver = SlotResolver::new(&label, '\u{ea1e}', fill);
        group.bench_with_input(BenchmarkId::from_parameter(name), &grid, |b, grid| {
            b.iter(|| resolver.resolve(black_box(grid)))
        });
    }
    group.finish();
}

fn bench_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_document");
    for classes in [10usize, 40, 120] {
        let pages: Vec<PageContent> = (0..classes)
            .map(|i| {
                let header = format!("{}{} AFM ({})", i % 5 + 1, (b'A' + (i / 5 % 26) as u8) as char, 20 + i % 10);
                PageContent::new(header, vec![full_week()])
            })
            .collect();
        let dump = PageDump::new(pages);

        group.throughput(Throughput::Elements(classes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(classes), &dump, |b, dump| {
            b.iter(|| {
                Extractor::new(ExtractorConfig::default())
                    .run(&mut dump.clone())
                    .map(|e| e.stats.lessons)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reconstruct, bench_resolve, bench_document);
criterion_main!(benches);
