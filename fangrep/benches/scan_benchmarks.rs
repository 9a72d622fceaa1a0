use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fangrep::scanner::scan_file;
use regex::Regex;
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

fn create_test_file(dir: &TempDir, lines: usize) -> std::path::PathBuf {
    let path = dir.path().join("bench.txt");
    let mut file = File::create(&path).unwrap();
    for i in 0..lines {
        writeln!(file, "line {} with some TODO text to scan through", i).unwrap();
        writeln!(file, "another line {} with nothing of interest", i).unwrap();
    }
    path
}

fn bench_scan_file(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, 5_000);

    let literal = Regex::new("TODO").unwrap();
    c.bench_function("scan_file_literal", |b| {
        b.iter(|| scan_file(black_box(&literal), black_box(&path)).unwrap())
    });

    let complex = Regex::new(r"line \d+ with some").unwrap();
    c.bench_function("scan_file_regex", |b| {
        b.iter(|| scan_file(black_box(&complex), black_box(&path)).unwrap())
    });
}

criterion_group!(benches, bench_scan_file);
criterion_main!(benches);
