use alloc::vec::Vec;

use super::{analyze_channels, check_sampling_rate, sanitized, synthesize_channels, Line, SigmaError, Stage};
use crate::bank::WindowBank;
use crate::fft::{ComplexBuffer, FftImpl, Float, ScalarFftImpl};

/// Sigma transform of a 1-D signal.
///
/// Identity `sigma` gives an STFT; a logarithmic `sigma` gives a
/// wavelet-like constant-Q bank.
///
/// # Example
/// ```
/// use sigma_transform::sigma::SigmaTransform1D;
/// use sigma_transform::window::{identity, rectangle};
///
/// let channels: Vec<f64> = (0..8).map(|i| -4.0 + i as f64).collect();
/// let mut st = SigmaTransform1D::new(identity(), rectangle(-0.5, 0.5), 8.0, 8, &channels).unwrap();
/// let signal = [1.0, 2.0, 0.5, -1.0, 0.0, 3.0, -2.0, 1.0];
/// let rec = st.analyze(&signal).unwrap().synthesize().unwrap().reconstruction().unwrap();
/// for (a, b) in rec.re().iter().zip(signal.iter()) {
///     assert!((a - b).abs() < 1e-9);
/// }
/// ```
pub struct SigmaTransform1D<T: Float = f64> {
    fs: T,
    len: usize,
    channels: Vec<T>,
    bank: WindowBank<T>,
    fft: ScalarFftImpl<T>,
    coefficients: Option<Vec<ComplexBuffer<T>>>,
    reconstruction: Option<ComplexBuffer<T>>,
}

impl<T: Float> SigmaTransform1D<T> {
    /// Build the window bank for `len` samples at rate `fs`, one window per
    /// entry of `channels` (centres in the warped domain).
    pub fn new<S, W>(sigma: S, win: W, fs: T, len: usize, channels: &[T]) -> Result<Self, SigmaError>
    where
        S: Fn(T) -> T,
        W: Fn(T) -> T,
    {
        if len == 0 {
            return Err(SigmaError::ZeroLength);
        }
        check_sampling_rate(fs)?;
        Ok(Self {
            fs,
            len,
            channels: channels.to_vec(),
            bank: WindowBank::build_1d(sigma, win, fs, len, channels),
            fft: ScalarFftImpl::default(),
            coefficients: None,
            reconstruction: None,
        })
    }

    /// Analyze real samples. See [`analyze_complex`](Self::analyze_complex).
    pub fn analyze(&mut self, signal: &[T]) -> Result<&mut Self, SigmaError> {
        self.analyze_complex(&ComplexBuffer::from_real(signal))
    }

    /// Decompose `signal` into one coefficient buffer per channel.
    ///
    /// Non-finite samples are treated as zero. Replaces any earlier
    /// coefficients and drops any earlier reconstruction.
    pub fn analyze_complex(&mut self, signal: &ComplexBuffer<T>) -> Result<&mut Self, SigmaError> {
        if signal.len() != self.len {
            return Err(SigmaError::SignalLength {
                expected: self.len,
                actual: signal.len(),
            });
        }
        self.reconstruction = None;
        self.coefficients = None;
        let mut spectrum = sanitized(signal);
        self.fft.fft(&mut spectrum)?;
        let coefficients = analyze_channels(Line(self.len), &self.fft, &spectrum, &self.bank)?;
        self.coefficients = Some(coefficients);
        Ok(self)
    }

    /// Reconstruct the signal from the stored coefficients with the analysis
    /// windows. Fails with [`SigmaError::NotAnalyzed`] before `analyze`.
    pub fn synthesize(&mut self) -> Result<&mut Self, SigmaError> {
        let coefficients = self.coefficients.as_deref().ok_or(SigmaError::NotAnalyzed)?;
        let rec = synthesize_channels(Line(self.len), &self.fft, coefficients, &self.bank)?;
        self.reconstruction = Some(rec);
        Ok(self)
    }

    pub fn coefficients(&self) -> Option<&[ComplexBuffer<T>]> {
        self.coefficients.as_deref()
    }

    /// Move the coefficients out, returning to [`Stage::Constructed`].
    pub fn take_coefficients(&mut self) -> Option<Vec<ComplexBuffer<T>>> {
        self.reconstruction = None;
        self.coefficients.take()
    }

    /// Reconstructed samples; the real part is the signal estimate.
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

    pub fn channels(&self) -> &[T] {
        &self.channels
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; zero-length transforms are rejected at construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn sampling_rate(&self) -> T {
        self.fs
    }
}
