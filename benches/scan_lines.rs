//! Benchmarks for the per-file finders
//!
//! Measures declaration, usage and missing-dependency scans over
//! synthetic sources of increasing length.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use depscan::analysis::{search_declarations, search_missing_dependencies, search_usage};
use depscan::parser::{Dependency, DependencySets, DependencyType};
use depscan::reader::{split_lines, SourceLine};

/// Create a declared dependency list with the given number of packages
fn create_dependencies(count: usize) -> Vec<Dependency> {
    (0..count)
        .map(|i| Dependency::new(format!("dep-{}", i), "1.0.0", DependencyType::Production))
        .collect()
}

/// Create a source file mixing imports, requires and plain code
fn create_source(total_lines: usize, dependency_count: usize) -> Vec<SourceLine> {
    let mut source = String::new();

    for i in 0..total_lines {
        let dep = i % (dependency_count + 1);
        match i % 4 {
            0 => source.push_str(&format!("const d{} = require('dep-{}');\n", i, dep)),
            1 => source.push_str(&format!("import m{} from 'dep-{}/sub';\n", i, dep)),
            2 => source.push_str(&format!("d{}.call(m{}, 'value');\n", i - 2, i - 1)),
            _ => source.push_str("const unrelated = require('left-pad');\n"),
        }
    }

    split_lines(&source)
}

/// Benchmark declaration search
fn bench_declarations(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_declarations");
    let deps = create_dependencies(50);

    for size in [100, 1000, 5000].iter() {
        let lines = create_source(*size, deps.len());

        group.bench_with_input(BenchmarkId::new("lines", size), &lines, |b, lines| {
            b.iter(|| black_box(search_declarations(lines, "bench.js", &deps)));
        });
    }

    group.finish();
}

/// Benchmark the usage ledger, which rescans every line per declaration
fn bench_usage(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_usage");
    let deps = create_dependencies(50);

    for size in [100, 500, 1000].iter() {
        let lines = create_source(*size, deps.len());
        let declarations = search_declarations(&lines, "bench.js", &deps);

        group.bench_with_input(BenchmarkId::new("lines", size), &lines, |b, lines| {
            b.iter(|| black_box(search_usage(lines, "bench.js", &declarations)));
        });
    }

    group.finish();
}

/// Benchmark missing-dependency search
fn bench_missing(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_missing_dependencies");
    let sets = DependencySets::Production(create_dependencies(50));

    for size in [100, 1000, 5000].iter() {
        let lines = create_source(*size, 50);

        group.bench_with_input(BenchmarkId::new("lines", size), &lines, |b, lines| {
            b.iter(|| black_box(search_missing_dependencies(lines, "bench.js", &sets)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_declarations, bench_usage, bench_missing);
criterion_main!(benches);
