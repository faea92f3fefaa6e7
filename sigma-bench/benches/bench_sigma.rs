use criterion::{criterion_group, criterion_main, Criterion};
use sigma_transform::bank::meshgrid;
use sigma_transform::window::{box2d, gaussian, identity, identity2d};
use sigma_transform::{SigmaTransform1D, SigmaTransform2D};

fn bench_stft_1d(c: &mut Criterion) {
    let n = 1024;
    let fs = 1024.0;
    let chans: Vec<f64> = (0..64).map(|i| -fs / 2.0 + i as f64 * fs / 64.0).collect();
    let signal: Vec<f64> = (0..n).map(|i| (i as f64 * 0.05).sin()).collect();
    let mut st = SigmaTransform1D::new(identity(), gaussian(32.0), fs, n, &chans).unwrap();
    c.bench_function("stft1d_1024x64_roundtrip", |b| {
        b.iter(|| {
            st.analyze(&signal).unwrap().synthesize().unwrap();
        });
    });
}

fn bench_stft_2d(c: &mut Criterion) {
    let shape = [64, 64];
    let axis: Vec<f64> = (0..8).map(|i| -32.0 + i as f64 * 8.0).collect();
    let chans = meshgrid(&axis, &axis);
    let image: Vec<f64> = (0..64 * 64).map(|i| ((i * 31) % 17) as f64).collect();
    let mut st = SigmaTransform2D::new(identity2d(), box2d(4.0), [64.0, 64.0], shape, &chans).unwrap();
    c.bench_function("stft2d_64x64x64_roundtrip", |b| {
        b.iter(|| {
            st.analyze(&image).unwrap().synthesize().unwrap();
        });
    });
}

#[cfg(feature = "parallel")]
fn bench_parallel_threshold(c: &mut Criterion) {
    use sigma_transform::sigma::set_parallel_channel_threshold;
    let n = 4096;
    let chans: Vec<f64> = (0..128).map(|i| -2048.0 + i as f64 * 32.0).collect();
    let signal: Vec<f64> = (0..n).map(|i| (i as f64 * 0.01).cos()).collect();
    let mut st = SigmaTransform1D::new(identity(), gaussian(64.0), 4096.0, n, &chans).unwrap();
    for (name, threshold) in [("serial", usize::MAX), ("parallel", 1)] {
        set_parallel_channel_threshold(threshold);
        c.bench_function(&format!("stft1d_4096x128_{}", name), |b| {
            b.iter(|| {
                st.analyze(&signal).unwrap().synthesize().unwrap();
            });
        });
    }
    set_parallel_channel_threshold(0);
}

#[cfg(not(feature = "parallel"))]
fn bench_parallel_threshold(_c: &mut Criterion) {}

criterion_group!(benches, bench_stft_1d, bench_stft_2d, bench_parallel_threshold);
criterion_main!(benches);
