use proptest::prelude::*;
use sigma_transform::bank::WindowBank;
use sigma_transform::window::{
    box2d, gaussian, gaussian2d, identity, identity2d, log2_warp, log_polar, polar_cell, rectangle,
};

fn bank_1d(kind: u8, fs: f64, n: usize, channels: &[f64]) -> WindowBank<f64> {
    match kind % 4 {
        0 => WindowBank::build_1d(identity(), gaussian(fs / 8.0), fs, n, channels),
        1 => WindowBank::build_1d(log2_warp(), gaussian(0.7), fs, n, channels),
        2 => WindowBank::build_1d(|f: f64| f * f, rectangle(-3.0, 3.0), fs, n, channels),
        _ => WindowBank::build_1d(|f: f64| 1.0 / f, |x: f64| x.abs().sqrt(), fs, n, channels),
    }
}

fn bank_2d(kind: u8, fs: [f64; 2], n: [usize; 2], channels: &[[f64; 2]]) -> WindowBank<f64> {
    match kind % 3 {
        0 => WindowBank::build_2d(identity2d(), box2d(2.0), fs, n, channels),
        1 => WindowBank::build_2d(identity2d(), gaussian2d([3.0, 5.0]), fs, n, channels),
        _ => WindowBank::build_2d(log_polar(), polar_cell(1.0, 0.2), fs, n, channels),
    }
}

proptest! {
    #[test]
    fn prop_1d_windows_are_real(
        kind in any::<u8>(),
        n in 1usize..64,
        fs in 0.5f64..50_000.0,
        channels in proptest::collection::vec(-100.0f64..100.0, 0..12),
    ) {
        let bank = bank_1d(kind, fs, n, &channels);
        prop_assert_eq!(bank.num_channels(), channels.len());
        for w in bank.windows() {
            prop_assert_eq!(w.len(), n);
            prop_assert!(w.im().iter().all(|&x| x == 0.0));
        }
    }

    #[test]
    fn prop_2d_windows_are_real(
        kind in any::<u8>(),
        n0 in 1usize..12,
        n1 in 1usize..12,
        fs0 in 0.5f64..200.0,
        fs1 in 0.5f64..200.0,
        channels in proptest::collection::vec((-20.0f64..20.0, -20.0f64..20.0), 0..8),
    ) {
        let channels: Vec<[f64; 2]> = channels.into_iter().map(|(a, b)| [a, b]).collect();
        let bank = bank_2d(kind, [fs0, fs1], [n0, n1], &channels);
        prop_assert_eq!(bank.num_channels(), channels.len());
        for w in bank.windows() {
            prop_assert_eq!(w.len(), n0 * n1);
            prop_assert!(w.im().iter().all(|&x| x == 0.0));
        }
    }
}
