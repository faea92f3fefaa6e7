//! Constant-Q analysis with a log2 warp.
//! Run with `cargo run --example wavelet_1d`.

use sigma_transform::window::{gaussian, log2_warp};
use sigma_transform::SigmaTransform1D;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let n = 1024;
    let fs = 8000.0;
    let signal: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64 / fs;
            (2.0 * std::f64::consts::PI * 200.0 * t).sin() + 0.5 * (2.0 * std::f64::consts::PI * 1600.0 * t).sin()
        })
        .collect();

    let sigma = log2_warp();
    let lower = sigma(0.005 * fs);
    let upper = sigma(fs / 2.0 * 1.1);
    let num_channels = 48;
    let step = (upper - lower) / num_channels as f64;
    let chans: Vec<f64> = (0..num_channels).map(|i| lower + i as f64 * step).collect();

    let mut wavelet = SigmaTransform1D::new(sigma, gaussian(2.0 * step), fs, n, &chans)?;
    wavelet.analyze(&signal)?;

    for (c, coeff) in wavelet.coefficients().ok_or("no coefficients")?.iter().enumerate() {
        let energy = coeff.energy();
        if energy > 1.0 {
            println!("{:>7.1} Hz: energy {:.2}", chans[c].exp2(), energy);
        }
    }
    Ok(())
}
