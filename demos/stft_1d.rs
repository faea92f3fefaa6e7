//! STFT of a synthetic chirp.
//! Run with `cargo run --example stft_1d`.
//!
//! Prints the dominant channel of a few coefficient columns and the
//! reconstruction error of the Gaussian bank.

use sigma_transform::window::{gaussian, identity};
use sigma_transform::SigmaTransform1D;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let n = 512;
    let fs = 512.0;
    let signal: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64 / fs;
            (2.0 * std::f64::consts::PI * (20.0 + 100.0 * t) * t).sin()
        })
        .collect();

    let num_channels = 64;
    let chans: Vec<f64> = (0..num_channels)
        .map(|i| -fs / 2.0 + i as f64 * fs / num_channels as f64)
        .collect();
    let mut stft = SigmaTransform1D::new(identity(), gaussian(16.0), fs, n, &chans)?;
    stft.analyze(&signal)?.synthesize()?;

    let coeffs = stft.coefficients().ok_or("no coefficients")?;
    for t in (0..n).step_by(n / 8) {
        let (best, _) = coeffs
            .iter()
            .enumerate()
            .map(|(c, buf)| (c, buf.get(t).norm_sqr()))
            .filter(|&(c, _)| chans[c] >= 0.0)
            .fold((0, 0.0), |acc, x| if x.1 > acc.1 { x } else { acc });
        println!("t = {:>3}: strongest channel at {:>6.1} Hz", t, chans[best]);
    }

    let (lo, hi) = stft.windows().frame_bounds();
    println!("frame bounds: [{:.4}, {:.4}]", lo, hi);
    Ok(())
}
