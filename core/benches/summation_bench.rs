use criterion::{Criterion, criterion_group, criterion_main};
use unroll_core::perf::workloads::bench_workloads;
use std::hint::black_box;

fn bench_summation_workloads(c: &mut Criterion) {
    for workload in bench_workloads() {
        // Fail fast if a kernel drifted before spending time sampling it.
        workload.run().expect("workload result mismatch before benchmarking");
        let kernel = workload.kernel();
        c.bench_function(&workload.bench_case_name(), move |b| {
            b.iter(|| {
                let total = black_box(kernel).run().expect("kernel failed during benchmarking");
                black_box(total);
            });
        });
    }
}

criterion_group!(summation, bench_summation_workloads);
criterion_main!(summation);
