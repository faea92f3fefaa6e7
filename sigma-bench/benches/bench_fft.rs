use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sigma_transform::fft::{ComplexBuffer, FftImpl, FftPlanner, ScalarFftImpl};
use sigma_transform::ndfft::fft2d_inplace;

fn signal(n: usize) -> ComplexBuffer<f64> {
    let re: Vec<f64> = (0..n).map(|i| (i as f64 * 0.37).sin()).collect();
    ComplexBuffer::from_real(&re)
}

fn bench_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft");
    // powers of two take the radix-2 path, the rest the mixed-radix path
    for &n in &[256usize, 1024, 4096, 243, 1000, 3000, 1009] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let fft = ScalarFftImpl::with_planner(FftPlanner::<f64>::new());
            let mut data = signal(n);
            b.iter(|| {
                fft.fft(&mut data).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_fft2d(c: &mut Criterion) {
    let (rows, cols) = (128, 128);
    let fft = ScalarFftImpl::<f64>::default();
    let mut data = signal(rows * cols);
    c.bench_function("fft2d_128x128", |b| {
        b.iter(|| {
            fft2d_inplace(&mut data, rows, cols, &fft).unwrap();
        });
    });
}

criterion_group!(benches, bench_fft, bench_fft2d);
criterion_main!(benches);
