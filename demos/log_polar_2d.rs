//! Scale/orientation decomposition of a synthetic image.
//! Run with `cargo run --example log_polar_2d`.

use sigma_transform::bank::meshgrid;
use sigma_transform::window::{log_polar, polar_cell};
use sigma_transform::SigmaTransform2D;
use std::f64::consts::PI;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let shape = [64, 64];
    // oriented grating plus a blob
    let image: Vec<f64> = (0..shape[0] * shape[1])
        .map(|i| {
            let (y, x) = ((i / shape[1]) as f64, (i % shape[1]) as f64);
            let grating = (2.0 * PI * (6.0 * x + 3.0 * y) / 64.0).cos();
            let blob = (-((x - 32.0).powi(2) + (y - 32.0).powi(2)) / 50.0).exp();
            grating + blob
        })
        .collect();

    let angle_step = PI / 16.0;
    let radii: Vec<f64> = (0..7).map(|i| i as f64).collect();
    let angles: Vec<f64> = (0..17).map(|i| -PI / 2.0 + i as f64 * angle_step).collect();
    let chans = meshgrid(&radii, &angles);

    let mut st = SigmaTransform2D::new(log_polar(), polar_cell(1.0, angle_step), [64.0, 64.0], shape, &chans)?;
    st.analyze(&image)?.synthesize()?;

    let coeffs = st.coefficients().ok_or("no coefficients")?;
    let (best, _) = coeffs
        .iter()
        .enumerate()
        .map(|(c, buf)| (c, buf.energy()))
        .fold((0, 0.0), |acc, x| if x.1 > acc.1 { x } else { acc });
    println!(
        "strongest cell: log2 radius {:.0}, angle {:.3} rad",
        chans[best][0], chans[best][1]
    );

    let (lo, hi) = st.windows().frame_bounds();
    println!("{} channels, frame bounds [{}, {}]", st.num_channels(), lo, hi);
    Ok(())
}
