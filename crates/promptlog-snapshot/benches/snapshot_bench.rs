// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use std::fs;

use criterion::{Criterion, criterion_group, criterion_main};
use promptlog_snapshot::{IgnoreSet, build_snapshot};

/// Create a tree of 20 directories with 25 small files each
fn setup_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for d in 0..20 {
        let sub = dir.path().join(format!("module_{d:02}"));
        fs::create_dir_all(&sub).expect("Failed to create directory");
        for f in 0..25 {
            fs::write(
                sub.join(format!("file_{f:02}.rs")),
                "pub fn example() -> u32 {\n    42\n}\n".repeat(10),
            )
            .expect("Failed to write file");
        }
    }
    dir
}

fn snapshot_benchmarks(c: &mut Criterion) {
    let tree = setup_tree();

    let mut group = c.benchmark_group("snapshot");

    group.bench_function("build_ignore_set", |b| {
        b.iter(|| {
            let mut ignore = IgnoreSet::new();
            ignore
                .extend_with_patterns(tree.path(), ["module_03", "module_1?/file_0*.rs"])
                .expect("Failed to build ignore set");
            std::hint::black_box(ignore)
        })
    });

    group.bench_function("build_snapshot_500_files", |b| {
        let ignore = IgnoreSet::new();
        b.iter(|| std::hint::black_box(build_snapshot(tree.path(), &ignore)))
    });

    group.finish();
}

criterion_group!(benches, snapshot_benchmarks);
criterion_main!(benches);
