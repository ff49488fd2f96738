use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use jobmeter_core::{JobDescriptor, JobError, Precision};
use jobmeter_events::{MetricsSink, Point};
use jobmeter_infra::{InstrumentationConfig, InstrumentationMiddleware, WorkerContext};

/// Sink that drops every point (measures middleware overhead only).
struct NullSink;

impl MetricsSink for NullSink {
    fn time_precision(&self) -> Precision {
        Precision::Nanoseconds
    }

    fn write_point(
        &self,
        _series: &str,
        point: Point,
        _precision: Precision,
        _retention_policy: Option<&str>,
    ) -> Result<(), jobmeter_core::SinkError> {
        black_box(point);
        Ok(())
    }
}

fn bench_call(c: &mut Criterion) {
    let mut group = c.benchmark_group("instrumented_call");
    let ctx = WorkerContext::default();
    let job = JobDescriptor::new("Worker").with_queue("default");

    for tag_count in [0usize, 4, 16] {
        let tags = (0..tag_count).map(|i| (format!("tag{i}"), format!("value{i}")));
        let config = InstrumentationConfig::default().with_tags(tags);
        let middleware = InstrumentationMiddleware::new(NullSink, config).unwrap();

        group.bench_with_input(BenchmarkId::new("static_tags", tag_count), &tag_count, |b, _| {
            b.iter(|| {
                middleware
                    .call(&ctx, black_box(&job), "default", || Ok::<_, JobError>(()))
                    .unwrap()
            })
        });
    }

    let excluded = InstrumentationMiddleware::new(
        NullSink,
        InstrumentationConfig::default().except(["Worker"]),
    )
    .unwrap();
    group.bench_function("excluded", |b| {
        b.iter(|| {
            excluded
                .call(&ctx, black_box(&job), "default", || Ok::<_, JobError>(()))
                .unwrap()
        })
    });

    group.finish();
}

fn bench_precision(c: &mut Criterion) {
    let mut group = c.benchmark_group("precision_convert");
    for precision in Precision::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(precision),
            &precision,
            |b, p| b.iter(|| p.convert(black_box(1_234_567_890.123_456_789))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_call, bench_precision);
criterion_main!(benches);
