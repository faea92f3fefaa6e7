use alloc::vec::Vec;

use super::{
    analyze_channels, check_sampling_rate, sanitized, synthesize_channels, Grid, Layout, SigmaError, Stage,
};
use crate::bank::WindowBank;
use crate::fft::{ComplexBuffer, Float, ScalarFftImpl};

/// Sigma transform of a 2-D signal on an `N0 × N1` grid.
///
/// Samples are flattened row-major with axis 0 as rows: sample `(i0, i1)`
/// lives at `i0 * N1 + i1`, the same order [`meshgrid`](crate::bank::meshgrid)
/// produces. A polar `sigma` such as [`log_polar`](crate::window::log_polar)
/// gives scale/orientation channels.
pub struct SigmaTransform2D<T: Float = f64> {
    fs: [T; 2],
    shape: [usize; 2],
    channels: Vec<[T; 2]>,
    bank: WindowBank<T>,
    fft: ScalarFftImpl<T>,
    coefficients: Option<Vec<ComplexBuffer<T>>>,
    reconstruction: Option<ComplexBuffer<T>>,
}

impl<T: Float> SigmaTransform2D<T> {
    pub fn new<S, W>(
        sigma: S,
        win: W,
        fs: [T; 2],
        shape: [usize; 2],
        channels: &[[T; 2]],
    ) -> Result<Self, SigmaError>
    where
        S: Fn([T; 2]) -> [T; 2],
        W: Fn([T; 2]) -> T,
    {
        if shape[0] == 0 || shape[1] == 0 {
            return Err(SigmaError::ZeroLength);
        }
        check_sampling_rate(fs[0])?;
        check_sampling_rate(fs[1])?;
        Ok(Self {
            fs,
            shape,
            channels: channels.to_vec(),
            bank: WindowBank::build_2d(sigma, win, fs, shape, channels),
            fft: ScalarFftImpl::default(),
            coefficients: None,
            reconstruction: None,
        })
    }

    fn grid(&self) -> Grid {
        Grid {
            rows: self.shape[0],
            cols: self.shape[1],
        }
    }

    /// Analyze a real, row-major grid of samples.
    pub fn analyze(&mut self, signal: &[T]) -> Result<&mut Self, SigmaError> {
        self.analyze_complex(&ComplexBuffer::from_real(signal))
    }

    /// Decompose `signal` into one coefficient grid per channel.
    ///
    /// Non-finite samples are treated as zero. Replaces any earlier
    /// coefficients and drops any earlier reconstruction.
    pub fn analyze_complex(&mut self, signal: &ComplexBuffer<T>) -> Result<&mut Self, SigmaError> {
        let grid = self.grid();
        if signal.len() != self.len() {
            return Err(SigmaError::SignalLength {
                expected: self.len(),
                actual: signal.len(),
            });
        }
        self.reconstruction = None;
        self.coefficients = None;
        let mut spectrum = sanitized(signal);
        grid.forward(&self.fft, &mut spectrum)?;
        let coefficients = analyze_channels(grid, &self.fft, &spectrum, &self.bank)?;
        self.coefficients = Some(coefficients);
        Ok(self)
    }

    /// Reconstruct the grid from the stored coefficients with the analysis
    /// windows. Fails with [`SigmaError::NotAnalyzed`] before `analyze`.
    pub fn synthesize(&mut self) -> Result<&mut Self, SigmaError> {
        let grid = self.grid();
        let coefficients = self.coefficients.as_deref().ok_or(SigmaError::NotAnalyzed)?;
        let rec = synthesize_channels(grid, &self.fft, coefficients, &self.bank)?;
        self.reconstruction = Some(rec);
        Ok(self)
    }

    pub fn coefficients(&self) -> Option<&[ComplexBuffer<T>]> {
        self.coefficients.as_deref()
    }

    pub fn take_coefficients(&mut self) -> Option<Vec<ComplexBuffer<T>>> {
        self.reconstruction = None;
        self.coefficients.take()
    }

    pub fn reconstruction(&self) -> Option<&ComplexBuffer<T>> {
        self.reconstruction.as_ref()
    }

    pub fn stage(&self) -> Stage {
        match (&self.coefficients, &self.reconstruction) {
            (None, _) => Stage::Constructed,
            (Some(_), None) => Stage::Analyzed,
            (Some(_), Some(_)) => Stage::Synthesized,
        }
    }

    pub fn windows(&self) -> &WindowBank<T> {
        &self.bank
    }

    pub fn channels(&self) -> &[[T; 2]] {
        &self.channels
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// `[N0, N1]`
    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    /// Samples per grid, `N0 * N1`.
    pub fn len(&self) -> usize {
        self.shape[0] * self.shape[1]
    }

    /// Always `false`; empty grids are rejected at construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn sampling_rate(&self) -> [T; 2] {
        self.fs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::meshgrid;
    use crate::window::{box2d, identity2d};

    #[test]
    fn test_flat_window_roundtrip_non_square() {
        let shape = [3, 4];
        let signal: Vec<f64> = (0..12).map(|i| (i as f64).sqrt() - 1.0).collect();
        let mut st = SigmaTransform2D::new(identity2d(), |_| 1.0, [3.0, 4.0], shape, &[[0.0, 0.0]]).unwrap();
        st.analyze(&signal).unwrap().synthesize().unwrap();
        let coeff = &st.coefficients().unwrap()[0];
        let rec = st.reconstruction().unwrap();
        for i in 0..12 {
            assert!((coeff.re()[i] - signal[i]).abs() < 1e-12);
            assert!((rec.re()[i] - signal[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_unit_box_tiling_is_tight_on_rectangular_grid() {
        // one unit box per frequency bin on a 4 × 6 grid
        let ax0: Vec<f64> = (0..4).map(|i| -2.0 + i as f64).collect();
        let ax1: Vec<f64> = (0..6).map(|i| -3.0 + i as f64).collect();
        let channels = meshgrid(&ax0, &ax1);
        let mut st = SigmaTransform2D::new(identity2d(), box2d(0.5), [4.0, 6.0], [4, 6], &channels).unwrap();
        assert!(st.windows().is_tight(1e-12));

        let signal: Vec<f64> = (0..24).map(|i| ((i * 5) % 7) as f64).collect();
        st.analyze(&signal).unwrap().synthesize().unwrap();
        for (a, b) in st.reconstruction().unwrap().re().iter().zip(&signal) {
            assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_nan_pixels_are_zeroed() {
        let mut st = SigmaTransform2D::new(identity2d(), |_| 1.0, [2.0, 2.0], [2, 2], &[[0.0, 0.0]]).unwrap();
        st.analyze(&[1.0, f64::NAN, 2.0, 3.0]).unwrap();
        let coeff = &st.coefficients().unwrap()[0];
        assert!((coeff.re()[1]).abs() < 1e-12);
        assert!((coeff.re()[3] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_shape_errors() {
        assert!(matches!(
            SigmaTransform2D::new(identity2d(), box2d(1.0), [4.0, 4.0], [4, 0], &[[0.0, 0.0]]),
            Err(SigmaError::ZeroLength)
        ));
        let mut st = SigmaTransform2D::new(identity2d(), box2d(1.0), [4.0, 4.0], [4, 4], &[[0.0, 0.0]]).unwrap();
        assert_eq!(st.len(), 16);
        assert!(!st.is_empty());
        assert!(matches!(
            st.analyze(&[0.0; 15]),
            Err(SigmaError::SignalLength { expected: 16, actual: 15 })
        ));
        assert!(matches!(st.synthesize(), Err(SigmaError::NotAnalyzed)));
    }
}
