//! Performance benchmarks for command validation
//!
//! This benchmark suite measures:
//! - Validation cost per gate (early rejection vs full option analysis)
//! - Catalog parsing
//! - Batch validation of a configured application list

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use toolbox::commands::check_apps;
use toolbox::data::constants::BUILTIN_MANAGERS;
use toolbox::{AppEntry, CommandValidator, ManagerCatalog, Platform};

/// Benchmark each verdict path through the pipeline
fn bench_validate_levels(c: &mut Criterion) {
    let validator = CommandValidator::builtin();
    let cases = [
        ("empty", ""),
        ("security", "apt install git; rm -rf /"),
        ("manager", "brew install git"),
        ("syntax", "apt git"),
        ("name", "apt install gti"),
        ("success", "apt install git"),
        ("known_options", "apt install git -y --no-install-recommends"),
        ("unknown_options", "apt install git --frobnicate --wibble"),
    ];

    let mut group = c.benchmark_group("validate");
    for (name, command) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), command, |b, command| {
            b.iter(|| validator.validate(black_box(command), "git", &[], "linux"));
        });
    }
    group.finish();
}

/// Benchmark platform filtering against an unfiltered catalog scan
fn bench_platform_filtering(c: &mut Criterion) {
    let validator = CommandValidator::builtin();

    let mut group = c.benchmark_group("platform");
    for platform in ["linux", "darwin", ""] {
        group.bench_with_input(BenchmarkId::from_parameter(platform), platform, |b, p| {
            b.iter(|| validator.validate(black_box("flatpak install firefox"), "firefox", &[], p));
        });
    }
    group.finish();
}

fn bench_catalog_parse(c: &mut Criterion) {
    c.bench_function("catalog_parse", |b| {
        b.iter(|| ManagerCatalog::load_from_str(black_box(BUILTIN_MANAGERS)));
    });
}

/// Benchmark validating many applications in one pass
fn bench_check_apps(c: &mut Criterion) {
    let validator = CommandValidator::builtin();
    let mut group = c.benchmark_group("check_apps");

    for count in [10, 100, 1000] {
        let apps: Vec<AppEntry> = (0..count)
            .map(|i| {
                let mut app = AppEntry::new(&format!("app{i}"));
                app.commands
                    .insert("linux".to_string(), format!("apt install app{i} -y"));
                app
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &apps, |b, apps| {
            b.iter(|| check_apps(black_box(apps), &validator, &Platform::Linux));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_validate_levels,
    bench_platform_filtering,
    bench_catalog_parse,
    bench_check_apps
);
criterion_main!(benches);
