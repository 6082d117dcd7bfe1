//! Benchmarks construction and steady-state abbreviation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ltwa_core::TitleAbbreviator;

/// A synthetic dictionary large enough to exercise the prefix trees.
fn synthetic_ltwa() -> String {
    let stems = [
        "journal", "zeitschrift", "international", "geographical", "information", "science",
        "quarterly", "research", "american", "chemical", "society", "proceedings", "review",
        "physics", "biology", "chemistry", "geology", "astronomy", "engineering", "bulletin",
    ];
    let mut out = String::from("PATTERN\tREPLACEMENT\tLANGUAGES\n");
    for stem in stems {
        for suffix in ["", "al", "ique", "ik", "ie", "o", "ia", "us", "um", "en"] {
            let word = format!("{stem}{suffix}");
            let abbrev: String = word.chars().take(4).collect();
            out.push_str(&format!("{word}\t{abbrev}.\teng\n"));
        }
    }
    out
}

const SHORT_WORDS: &str = "of\nthe\nand\nfür\nund\nde\n";

fn bench_construction(c: &mut Criterion) {
    let ltwa = synthetic_ltwa();
    c.bench_function("build_engine", |b| {
        b.iter(|| TitleAbbreviator::new(black_box(&ltwa), black_box(SHORT_WORDS)).unwrap())
    });
}

fn bench_abbreviation(c: &mut Criterion) {
    let ltwa = synthetic_ltwa();
    let engine = TitleAbbreviator::new(&ltwa, SHORT_WORDS).unwrap();
    let titles = [
        "International Journal of Geographical Information Science",
        "Zeitschrift für deutsches Altertum und deutsche Literatur",
        "Proceedings of the American Society of Chemistry",
        "Nature",
    ];
    c.bench_function("make_abbreviation", |b| {
        b.iter(|| {
            for title in titles {
                black_box(engine.abbreviate(black_box(title)));
            }
        })
    });
}

criterion_group!(benches, bench_construction, bench_abbreviation);
criterion_main!(benches);
