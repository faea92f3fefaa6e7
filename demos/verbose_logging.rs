//! Demonstrates enabling verbose logging for sigma-transform.
//! Run with `cargo run --example verbose_logging --features verbose-logging`.
use sigma_transform::window::{gaussian, identity};
use sigma_transform::SigmaTransform1D;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let signal = vec![1.0, f64::NAN, 3.0, 4.0, 0.0, -1.0];
    let chans = [-2.0, 0.0, 2.0];
    let mut st = SigmaTransform1D::new(identity(), gaussian(2.0), 6.0, signal.len(), &chans).unwrap();
    st.analyze(&signal).unwrap().synthesize().unwrap();
}
