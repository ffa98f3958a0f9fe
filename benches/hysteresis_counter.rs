/// Hysteresis counter benchmarks
///
/// Measures cycle counting throughput on noisy sine signals and the cost of
/// summarizing a multi-channel record.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cyclecount::hysteresis::count_cycles;
use cyclecount::reader::{Column, RawRecord, ReaderOptions};
use cyclecount::summary::FileSummarizer;
use std::time::Duration;

/// Sine with deterministic pseudo-noise around zero
fn noisy_sine(len: usize, periods: f64, amplitude: f64) -> Vec<f64> {
    let mut state: u32 = 0x1234_5678;
    (0..len)
        .map(|i| {
            // xorshift noise in [-1, 1)
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state as f64 / u32::MAX as f64) * 2.0 - 1.0;
            let phase = 2.0 * std::f64::consts::PI * periods * i as f64 / len as f64;
            amplitude * phase.sin() + noise
        })
        .collect()
}

fn bench_count_cycles(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_cycles");

    for size in [1_000usize, 100_000, 1_000_000] {
        let samples = noisy_sine(size, size as f64 / 100.0, 20.0);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &samples, |b, samples| {
            b.iter(|| count_cycles(black_box(samples), black_box(10.0)))
        });
    }

    group.finish();
}

fn bench_summarize_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_record");
    group.measurement_time(Duration::from_secs(5));

    let len = 50_000;
    let mut columns = vec![Column::new(
        "time",
        (0..len).map(|i| i as f64 / 1000.0).collect(),
    )];
    for ch in 0..16 {
        columns.push(Column::new(
            format!("ch{}", ch),
            noisy_sine(len, 50.0 + ch as f64, 20.0),
        ));
    }
    let record = RawRecord::new(len as f64 / 1000.0, columns);
    let summarizer = FileSummarizer::new(10.0, ReaderOptions::default());

    group.throughput(Throughput::Elements((len * 16) as u64));
    group.bench_function("16_channels", |b| {
        b.iter(|| summarizer.summarize_record(black_box("bench.csv"), black_box(&record)))
    });

    group.finish();
}

criterion_group!(benches, bench_count_cycles, bench_summarize_record);
criterion_main!(benches);
