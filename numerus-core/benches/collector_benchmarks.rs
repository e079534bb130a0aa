//! Benchmarks for range merging and whole-rule sample collection

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use numerus_core::rules::{builtin, RuleKind};
use numerus_core::{
    builtin_groups, Diagnostics, GeneratorConfig, NumericSample, RangeSet, ReportGenerator,
    SampleCollector,
};
use std::hint::black_box;

/// Interleaved values so that most inserts hit a gap first
fn scattered_samples(count: i64) -> Vec<NumericSample> {
    (0..count)
        .map(|i| if i % 2 == 0 { i } else { count * 2 - i })
        .map(|value| NumericSample::integer(value).unwrap())
        .collect()
}

fn bench_range_set_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_set_insert");

    for count in [100, 1_000, 10_000] {
        let samples = scattered_samples(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &samples, |b, samples| {
            b.iter(|| {
                let mut set = RangeSet::new();
                for sample in samples {
                    set.insert(*sample).unwrap();
                }
                black_box(set.range_count())
            });
        });
    }

    group.finish();
}

fn bench_collect_family(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect_family");
    group.sample_size(10);

    for locale in ["ja", "en", "fr", "br"] {
        let family = builtin::family_for_locale(RuleKind::Cardinal, locale).unwrap();
        group.bench_function(locale, |b| {
            b.iter(|| {
                let mut diagnostics = Diagnostics::default();
                let collector = SampleCollector::collect(
                    family,
                    family.locales,
                    &GeneratorConfig::default(),
                    &mut diagnostics,
                )
                .unwrap();
                black_box(collector.keywords().count())
            });
        });
    }

    group.finish();
}

fn bench_generate_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_all_cardinal");
    group.sample_size(10);
    let groups = builtin_groups(RuleKind::Cardinal, |_| true);

    group.bench_function("sequential", |b| {
        let generator = ReportGenerator::default();
        b.iter(|| black_box(generator.generate(&groups).unwrap()));
    });

    #[cfg(feature = "parallel")]
    group.bench_function("parallel", |b| {
        let generator = ReportGenerator::default().parallel(true);
        b.iter(|| black_box(generator.generate(&groups).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_range_set_insert,
    bench_collect_family,
    bench_generate_all
);
criterion_main!(benches);
