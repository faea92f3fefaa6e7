//! Sigma transforms: analysis and single-window synthesis over a window bank.
//!
//! `analyze` takes the spectrum of the input once, multiplies it by every
//! channel window and inverse-transforms each product into one coefficient
//! buffer. `synthesize` forward-transforms every coefficient buffer, weights
//! it by the same window again, sums over channels and inverse-transforms the
//! sum. No dual bank is computed, so reconstruction is exact only when
//! [`WindowBank::is_tight`](crate::bank::WindowBank::is_tight) holds.
//!
//! With the `parallel` feature, channels run on Rayon once their count
//! reaches [`parallel_channel_threshold`]. Synthesis still sums channel
//! contributions in channel order, so the result does not depend on it.

use alloc::vec::Vec;

use crate::bank::WindowBank;
use crate::fft::{ComplexBuffer, FftError, FftImpl, Float, ScalarFftImpl};
use crate::ndfft::{fft2d_inplace, ifft2d_inplace};

mod transform1d;
mod transform2d;

pub use transform1d::SigmaTransform1D;
pub use transform2d::SigmaTransform2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigmaError {
    /// A transform axis has zero samples.
    ZeroLength,
    /// Sampling rate is zero, negative or not finite.
    InvalidSamplingRate,
    /// Input signal does not have the configured number of samples.
    SignalLength { expected: usize, actual: usize },
    /// `synthesize` was called before any `analyze`.
    NotAnalyzed,
    Fft(FftError),
}

impl core::fmt::Display for SigmaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SigmaError::ZeroLength => write!(f, "transform length must be at least 1"),
            SigmaError::InvalidSamplingRate => {
                write!(f, "sampling rate must be finite and positive")
            }
            SigmaError::SignalLength { expected, actual } => {
                write!(f, "expected {} samples, got {}", expected, actual)
            }
            SigmaError::NotAnalyzed => write!(f, "synthesize called before analyze"),
            SigmaError::Fft(e) => write!(f, "fft failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SigmaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SigmaError::Fft(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FftError> for SigmaError {
    fn from(e: FftError) -> Self {
        SigmaError::Fft(e)
    }
}

/// Lifecycle of a transform object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Windows built, nothing analyzed yet.
    Constructed,
    /// Coefficients present.
    Analyzed,
    /// Coefficients and reconstruction present.
    Synthesized,
}

/// Sample layout a transform operates on.
pub(crate) trait Layout: Copy + Send + Sync {
    fn len(&self) -> usize;
    fn forward<T: Float>(&self, fft: &ScalarFftImpl<T>, buf: &mut ComplexBuffer<T>) -> Result<(), FftError>;
    fn inverse<T: Float>(&self, fft: &ScalarFftImpl<T>, buf: &mut ComplexBuffer<T>) -> Result<(), FftError>;
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Line(pub usize);

impl Layout for Line {
    fn len(&self) -> usize {
        self.0
    }
    fn forward<T: Float>(&self, fft: &ScalarFftImpl<T>, buf: &mut ComplexBuffer<T>) -> Result<(), FftError> {
        fft.fft(buf)
    }
    fn inverse<T: Float>(&self, fft: &ScalarFftImpl<T>, buf: &mut ComplexBuffer<T>) -> Result<(), FftError> {
        fft.ifft(buf)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Grid {
    pub rows: usize,
    pub cols: usize,
}

impl Layout for Grid {
    fn len(&self) -> usize {
        self.rows * self.cols
    }
    fn forward<T: Float>(&self, fft: &ScalarFftImpl<T>, buf: &mut ComplexBuffer<T>) -> Result<(), FftError> {
        fft2d_inplace(buf, self.rows, self.cols, fft)
    }
    fn inverse<T: Float>(&self, fft: &ScalarFftImpl<T>, buf: &mut ComplexBuffer<T>) -> Result<(), FftError> {
        ifft2d_inplace(buf, self.rows, self.cols, fft)
    }
}

pub(crate) fn check_sampling_rate<T: Float>(fs: T) -> Result<(), SigmaError> {
    if fs.is_finite() && fs > T::zero() {
        Ok(())
    } else {
        Err(SigmaError::InvalidSamplingRate)
    }
}

/// Copy `signal` into a buffer, replacing non-finite samples by zero.
pub(crate) fn sanitized<T: Float>(signal: &ComplexBuffer<T>) -> ComplexBuffer<T> {
    let mut replaced = 0usize;
    let out = signal.map(|c, _, _| {
        if c.re.is_finite() && c.im.is_finite() {
            c
        } else {
            replaced += 1;
            crate::num::Complex::zero()
        }
    });
    if replaced > 0 {
        debug_log!("sanitized {} non-finite samples", replaced);
    }
    out
}

/// Per-channel coefficients from an input spectrum.
pub(crate) fn analyze_channels<T: Float, L: Layout>(
    layout: L,
    fft: &ScalarFftImpl<T>,
    spectrum: &ComplexBuffer<T>,
    bank: &WindowBank<T>,
) -> Result<Vec<ComplexBuffer<T>>, SigmaError> {
    #[cfg(feature = "parallel")]
    if bank.num_channels() >= parallel_channel_threshold() {
        debug_log!("analyze: {} channels in parallel", bank.num_channels());
        return parallel::analyze_channels(layout, spectrum, bank);
    }
    debug_log!("analyze: {} channels serially", bank.num_channels());
    bank.windows()
        .iter()
        .map(|window| -> Result<ComplexBuffer<T>, SigmaError> {
            let mut coeff = spectrum.weighted(window.re())?;
            layout.inverse(fft, &mut coeff)?;
            Ok(coeff)
        })
        .collect()
}

/// Single-window reconstruction from per-channel coefficients.
pub(crate) fn synthesize_channels<T: Float, L: Layout>(
    layout: L,
    fft: &ScalarFftImpl<T>,
    coefficients: &[ComplexBuffer<T>],
    bank: &WindowBank<T>,
) -> Result<ComplexBuffer<T>, SigmaError> {
    let mut acc = ComplexBuffer::zeros(layout.len());
    #[cfg(feature = "parallel")]
    if coefficients.len() >= parallel_channel_threshold() {
        debug_log!("synthesize: {} channels in parallel", coefficients.len());
        for contribution in parallel::weighted_spectra(layout, coefficients, bank)? {
            acc.accumulate(&contribution)?;
        }
        layout.inverse(fft, &mut acc)?;
        return Ok(acc);
    }
    debug_log!("synthesize: {} channels serially", coefficients.len());
    for (coeff, window) in coefficients.iter().zip(bank.windows()) {
        let mut spectrum = coeff.clone();
        layout.forward(fft, &mut spectrum)?;
        acc.accumulate_weighted(&spectrum, window.re())?;
    }
    layout.inverse(fft, &mut acc)?;
    Ok(acc)
}

#[cfg(feature = "parallel")]
mod parallel {
    use super::*;
    use rayon::prelude::*;

    pub(super) fn analyze_channels<T: Float, L: Layout>(
        layout: L,
        spectrum: &ComplexBuffer<T>,
        bank: &WindowBank<T>,
    ) -> Result<Vec<ComplexBuffer<T>>, SigmaError> {
        bank.windows()
            .par_iter()
            .map(|window| -> Result<ComplexBuffer<T>, SigmaError> {
                let fft = ScalarFftImpl::<T>::default();
                let mut coeff = spectrum.weighted(window.re())?;
                layout.inverse(&fft, &mut coeff)?;
                Ok(coeff)
            })
            .collect()
    }

    /// Forward spectrum of every coefficient buffer times its window, in channel order.
    pub(super) fn weighted_spectra<T: Float, L: Layout>(
        layout: L,
        coefficients: &[ComplexBuffer<T>],
        bank: &WindowBank<T>,
    ) -> Result<Vec<ComplexBuffer<T>>, SigmaError> {
        coefficients
            .par_iter()
            .zip(bank.windows().par_iter())
            .map(|(coeff, window)| -> Result<ComplexBuffer<T>, SigmaError> {
                let fft = ScalarFftImpl::<T>::default();
                let mut spectrum = coeff.clone();
                layout.forward(&fft, &mut spectrum)?;
                Ok(spectrum.weighted(window.re())?)
            })
            .collect()
    }
}

#[cfg(feature = "parallel")]
mod threshold {
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::OnceLock;

    const DEFAULT_PARALLEL_CHANNEL_THRESHOLD: usize = 8;

    /// `0` means no override.
    static PARALLEL_CHANNEL_THRESHOLD_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
    static PARALLEL_CHANNEL_THRESHOLD_ENV: OnceLock<usize> = OnceLock::new();

    /// Set the minimum channel count processed in parallel.
    ///
    /// Passing `0` reverts to `SIGMA_PAR_CHANNEL_THRESHOLD` or the default of 8.
    pub fn set_parallel_channel_threshold(threshold: usize) {
        PARALLEL_CHANNEL_THRESHOLD_OVERRIDE.store(threshold, Ordering::Relaxed);
    }

    pub fn parallel_channel_threshold() -> usize {
        let override_thr = PARALLEL_CHANNEL_THRESHOLD_OVERRIDE.load(Ordering::Relaxed);
        if override_thr != 0 {
            return override_thr;
        }
        *PARALLEL_CHANNEL_THRESHOLD_ENV.get_or_init(|| {
            std::env::var("SIGMA_PAR_CHANNEL_THRESHOLD")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&v| v != 0)
                .unwrap_or(DEFAULT_PARALLEL_CHANNEL_THRESHOLD)
        })
    }
}

#[cfg(feature = "parallel")]
pub use threshold::{parallel_channel_threshold, set_parallel_channel_threshold};
