//! Window bank construction over a warped frequency axis.
//!
//! Each channel gets one real frequency-domain window, `win(sigma(f) - center)`,
//! sampled at every FFT bin `f`. Non-finite values from user supplied
//! `sigma`/`win` are stored as they are.

use alloc::vec::Vec;

use crate::num::{float_of, ComplexBuffer, Float};

/// Frequencies of the `n` FFT bins for sampling rate `fs`.
///
/// Starting from `fs/2 - step`, every bin adds `step = fs/n`, reduces modulo
/// `fs` and re-centres by `-fs/2`. Bin `i` therefore holds `i·step` wrapped
/// into `[-fs/2, fs/2)`: bin 0 is DC and the upper half carries the negative
/// frequencies, matching the order of the FFT output.
pub fn frequency_axis<T: Float>(fs: T, n: usize) -> Vec<T> {
    let half = fs / (T::one() + T::one());
    let step = fs / float_of::<T>(n);
    let mut curr = half - step;
    (0..n)
        .map(|_| {
            curr = curr + step;
            (curr % fs) - half
        })
        .collect()
}

/// Cartesian product of two axes, axis 0 varying slowest.
pub fn meshgrid<T: Float>(axis0: &[T], axis1: &[T]) -> Vec<[T; 2]> {
    axis0
        .iter()
        .flat_map(|&x| axis1.iter().map(move |&y| [x, y]))
        .collect()
}

/// One real window per channel; imaginary parts are always zero.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowBank<T: Float> {
    windows: Vec<ComplexBuffer<T>>,
    len: usize,
}

impl<T: Float> WindowBank<T> {
    /// Windows for a 1-D transform of `n` samples at rate `fs`.
    pub fn build_1d<S, W>(sigma: S, win: W, fs: T, n: usize, channels: &[T]) -> Self
    where
        S: Fn(T) -> T,
        W: Fn(T) -> T,
    {
        let warped: Vec<T> = frequency_axis(fs, n).into_iter().map(sigma).collect();
        let windows = channels
            .iter()
            .map(|&center| {
                let weights: Vec<T> = warped.iter().map(|&f| win(f - center)).collect();
                ComplexBuffer::from_real(&weights)
            })
            .collect();
        debug_log!("window bank: n={} channels={}", n, channels.len());
        Self { windows, len: n }
    }

    /// Windows for a 2-D transform on an `n[0] × n[1]` grid, flattened
    /// row-major with axis 0 as rows.
    pub fn build_2d<S, W>(sigma: S, win: W, fs: [T; 2], n: [usize; 2], channels: &[[T; 2]]) -> Self
    where
        S: Fn([T; 2]) -> [T; 2],
        W: Fn([T; 2]) -> T,
    {
        let ax0 = frequency_axis(fs[0], n[0]);
        let ax1 = frequency_axis(fs[1], n[1]);
        let warped: Vec<[T; 2]> = meshgrid(&ax0, &ax1).into_iter().map(sigma).collect();
        let windows = channels
            .iter()
            .map(|&[c0, c1]| {
                let weights: Vec<T> = warped
                    .iter()
                    .map(|&[f0, f1]| win([f0 - c0, f1 - c1]))
                    .collect();
                ComplexBuffer::from_real(&weights)
            })
            .collect();
        debug_log!("window bank: grid={}x{} channels={}", n[0], n[1], channels.len());
        Self {
            windows,
            len: n[0] * n[1],
        }
    }

    pub fn windows(&self) -> &[ComplexBuffer<T>] {
        &self.windows
    }

    pub fn window(&self, channel: usize) -> Option<&ComplexBuffer<T>> {
        self.windows.get(channel)
    }

    pub fn num_channels(&self) -> usize {
        self.windows.len()
    }

    /// Samples per window.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// `Σ_c |w_c[i]|²` for every bin `i`.
    ///
    /// Single-window synthesis multiplies each bin of the signal spectrum by
    /// exactly this profile, so a constant profile of 1 means perfect
    /// reconstruction.
    pub fn frame_profile(&self) -> Vec<T> {
        let mut profile = alloc::vec![T::zero(); self.len];
        for window in &self.windows {
            for (acc, &w) in profile.iter_mut().zip(window.re()) {
                *acc = *acc + w * w;
            }
        }
        profile
    }

    /// Lower and upper frame bounds: min and max of the frame profile.
    pub fn frame_bounds(&self) -> (T, T) {
        let profile = self.frame_profile();
        let mut iter = profile.iter().copied();
        match iter.next() {
            Some(first) => iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))),
            None => (T::zero(), T::zero()),
        }
    }

    /// Whether the frame profile stays within `tol` of 1 on every bin.
    pub fn is_tight(&self, tol: T) -> bool {
        self.frame_profile()
            .iter()
            .all(|&v| (v - T::one()).abs() <= tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{gaussian, identity, rectangle};
    use alloc::vec;

    #[test]
    fn test_frequency_axis_wraps_around() {
        let axis = frequency_axis(8.0f64, 8);
        assert_eq!(axis, vec![0.0, 1.0, 2.0, 3.0, -4.0, -3.0, -2.0, -1.0]);
        let odd = frequency_axis(6.0f64, 3);
        assert_eq!(odd, vec![0.0, 2.0, -2.0]);
    }

    #[test]
    fn test_meshgrid_axis0_major() {
        let grid = meshgrid(&[1.0f64, 2.0], &[10.0, 20.0, 30.0]);
        assert_eq!(
            grid,
            vec![[1.0, 10.0], [1.0, 20.0], [1.0, 30.0], [2.0, 10.0], [2.0, 20.0], [2.0, 30.0]]
        );
    }

    #[test]
    fn test_build_1d_shifts_window_by_center() {
        let bank = WindowBank::build_1d(identity(), rectangle(-0.5, 0.5), 8.0f64, 8, &[0.0, 2.0, -3.0]);
        assert_eq!(bank.num_channels(), 3);
        assert_eq!(bank.window(0).unwrap().re(), &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(bank.window(1).unwrap().re(), &[0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(bank.window(2).unwrap().re(), &[0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert!(bank.window(3).is_none());
    }

    #[test]
    fn test_build_2d_layout() {
        let win = |[x, y]: [f64; 2]| if x == 0.0 && y == 1.0 { 1.0 } else { 0.0 };
        let bank = WindowBank::build_2d(|xy| xy, win, [4.0, 6.0], [4, 6], &[[0.0, 0.0]]);
        assert_eq!(bank.len(), 24);
        let w = bank.window(0).unwrap();
        // axis-0 bin 0 (f0 = 0), axis-1 bin 1 (f1 = 1)
        assert_eq!(w.re()[1], 1.0);
        assert_eq!(w.re().iter().filter(|&&v| v != 0.0).count(), 1);
    }

    #[test]
    fn test_non_finite_windows_propagate() {
        let bank = WindowBank::build_1d(|_f: f64| f64::NAN, gaussian(1.0), 4.0, 4, &[0.0]);
        assert!(bank.window(0).unwrap().re().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_frame_profile_of_partition() {
        // unit rectangles tiling the axis form a tight frame
        let channels: Vec<f64> = (0..8).map(|i| -4.0 + i as f64).collect();
        let bank = WindowBank::build_1d(identity(), rectangle(-0.5, 0.5), 8.0, 8, &channels);
        assert!(bank.is_tight(1e-12));
        assert_eq!(bank.frame_bounds(), (1.0, 1.0));

        let sparse = WindowBank::build_1d(identity(), rectangle(-0.5, 0.5), 8.0, 8, &[0.0]);
        assert!(!sparse.is_tight(0.5));
        assert_eq!(sparse.frame_bounds(), (0.0, 1.0));
    }
}
