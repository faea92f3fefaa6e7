use sigma_transform::bank::frequency_axis;
use sigma_transform::window::{gaussian, identity, log2_warp, rectangle};
use sigma_transform::{SigmaError, SigmaTransform1D, Stage};
use std::f64::consts::PI;

fn relative_error(a: &[f64], b: &[f64]) -> f64 {
    let num: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    let den: f64 = b.iter().map(|y| y * y).sum();
    (num / den).sqrt()
}

#[test]
fn flat_window_single_channel_is_identity() {
    let signal: [f64; 8] = [1.0, -2.0, 0.5, 4.0, 3.0, 0.0, -1.5, 2.0];
    let mut st = SigmaTransform1D::new(identity(), |_| 1.0, 8.0, 8, &[0.0]).unwrap();
    st.analyze(&signal).unwrap().synthesize().unwrap();

    let coeffs = st.coefficients().unwrap();
    assert_eq!(coeffs.len(), 1);
    for (c, x) in coeffs[0].iter().zip(signal.iter()) {
        assert!((c.re - x).abs() < 1e-12 && c.im.abs() < 1e-12);
    }
    let rec = st.reconstruction().unwrap();
    assert!(relative_error(rec.re(), &signal) < 1e-12);
}

/// Square root of a Gaussian periodized over the frequency circle; four
/// copies spaced `fs/4` apart have a flat squared sum.
fn root_periodic_gaussian(fs: f64, width: f64, gain: f64) -> impl Fn(f64) -> f64 {
    move |x| {
        let sum: f64 = (-2..=2)
            .map(|k| {
                let u = (x - k as f64 * fs) / width;
                (-PI * u * u).exp()
            })
            .sum();
        (gain * sum).sqrt()
    }
}

#[test]
fn near_tight_gaussian_bank_reconstructs_sinusoid() {
    let (n, fs) = (16, 16.0);
    let chans = [-8.0, -4.0, 0.0, 4.0];
    let mut st = SigmaTransform1D::new(identity(), root_periodic_gaussian(fs, 8.0, 0.5), fs, n, &chans).unwrap();
    assert!(st.windows().is_tight(1e-4));

    let signal: Vec<f64> = (0..n).map(|i| (2.0 * PI * 3.0 * i as f64 / n as f64).sin()).collect();
    st.analyze(&signal).unwrap().synthesize().unwrap();
    let rec = st.reconstruction().unwrap();
    assert!(relative_error(rec.re(), &signal) < 1e-2);
    assert!(rec.im().iter().all(|v| v.abs() < 1e-9));
}

#[test]
fn reconstruction_is_signal_filtered_by_frame_profile() {
    // a loose Gaussian bank: the output is the input spectrum times Σ w²
    let (n, fs) = (12, 12.0);
    let chans = [-3.0, 0.0, 3.0];
    let mut st = SigmaTransform1D::new(identity(), gaussian(2.5), fs, n, &chans).unwrap();
    let profile = st.windows().frame_profile();

    let k = 2;
    let signal: Vec<f64> = (0..n).map(|i| (2.0 * PI * k as f64 * i as f64 / n as f64).cos()).collect();
    st.analyze(&signal).unwrap().synthesize().unwrap();
    // bins k and n-k have the same profile value for a symmetric bank
    assert!((profile[k] - profile[n - k]).abs() < 1e-12);
    for (r, x) in st.reconstruction().unwrap().re().iter().zip(&signal) {
        assert!((r - profile[k] * x).abs() < 1e-9, "{} vs {}", r, profile[k] * x);
    }
}

#[test]
fn identical_configuration_is_deterministic() {
    let chans: Vec<f64> = (0..6).map(|i| -6.0 + 2.0 * i as f64).collect();
    let build = || SigmaTransform1D::new(identity(), gaussian(3.0), 12.0, 12, &chans).unwrap();
    let (mut a, mut b) = (build(), build());
    assert_eq!(a.windows(), b.windows());

    let signal: Vec<f64> = (0..12).map(|i| ((i * i) % 7) as f64).collect();
    a.analyze(&signal).unwrap();
    b.analyze(&signal).unwrap();
    assert_eq!(a.coefficients(), b.coefficients());
}

#[test]
fn log_warp_bank_ignores_negative_frequencies() {
    let (n, fs) = (64, 64.0);
    let sigma = log2_warp();
    let (lower, upper) = (sigma(1.0), sigma(32.0));
    let chans: Vec<f64> = (0..10).map(|i| lower + i as f64 * (upper - lower) / 10.0).collect();
    let st = SigmaTransform1D::new(sigma, gaussian(1.0), fs, n, &chans).unwrap();

    let axis = frequency_axis(fs, n);
    for w in st.windows().windows() {
        for (&f, &v) in axis.iter().zip(w.re()) {
            if f <= 0.0 {
                assert_eq!(v, 0.0);
            }
        }
        assert!(w.re().iter().any(|&v| v > 0.1));
    }
}

#[test]
fn synthesize_requires_analysis() {
    let mut st = SigmaTransform1D::new(identity(), rectangle(-1.0, 1.0), 4.0, 4, &[0.0]).unwrap();
    assert_eq!(st.stage(), Stage::Constructed);
    assert_eq!(st.synthesize().err(), Some(SigmaError::NotAnalyzed));
    assert!(st.reconstruction().is_none());
}

#[test]
fn odd_and_prime_lengths_roundtrip_with_partition() {
    for &n in &[1usize, 5, 7, 9, 15] {
        let fs = n as f64;
        // one unit rectangle centred on every bin
        let chans = frequency_axis(fs, n);
        let mut st = SigmaTransform1D::new(identity(), rectangle(-0.5, 0.5), fs, n, &chans).unwrap();
        assert!(st.windows().is_tight(1e-12), "n={}", n);
        let signal: Vec<f64> = (0..n).map(|i| (i as f64 * 1.3).cos() + 0.25).collect();
        st.analyze(&signal).unwrap().synthesize().unwrap();
        for (r, x) in st.reconstruction().unwrap().re().iter().zip(&signal) {
            assert!((r - x).abs() < 1e-9, "n={} {} vs {}", n, r, x);
        }
    }
}

#[test]
fn positive_channel_coefficient_phase() {
    // cos at 1 Hz, one unit rectangle on the +1 Hz bin
    let n = 8;
    let signal: Vec<f64> = (0..n).map(|i| (2.0 * PI * i as f64 / n as f64).cos()).collect();
    let mut st = SigmaTransform1D::new(identity(), rectangle(-0.5, 0.5), 8.0, n, &[1.0]).unwrap();
    st.analyze(&signal).unwrap();
    let coeff = &st.coefficients().unwrap()[0];
    let h = 0.5 * std::f64::consts::FRAC_1_SQRT_2;
    let expected_im = [0.0, -h, -0.5, -h, 0.0, h, 0.5, h];
    let expected_re = [0.5, h, 0.0, -h, -0.5, -h, 0.0, h];
    for i in 0..n {
        assert!((coeff.im()[i] - expected_im[i]).abs() < 1e-12, "im[{}] = {}", i, coeff.im()[i]);
        assert!((coeff.re()[i] - expected_re[i]).abs() < 1e-12, "re[{}] = {}", i, coeff.re()[i]);
    }
}
