//! # sigma-transform - warped time-frequency analysis for Rust
//!
//! A unified "sigma transform": warp the frequency axis with an arbitrary
//! function `sigma`, place shifted copies of one window shape at channel
//! centres in the warped domain, and use them as a frequency-domain filter
//! bank. Identity `sigma` gives the STFT, a logarithmic one a wavelet-like
//! constant-Q transform, and a polar map on the plane a scale/orientation
//! decomposition of images.
//!
//! ## Modules
//!
//! - [`num`]: `Float`, `Complex` and the split-layout [`ComplexBuffer`]
//! - [`fft`]: unitary FFT, radix-2 for powers of two and mixed-radix otherwise
//! - [`ndfft`]: separable 2-D FFT over row-major grids
//! - [`window`]: window shapes and warping functions
//! - [`bank`]: frequency axes, `meshgrid` and the [`bank::WindowBank`] builder
//! - [`sigma`]: [`SigmaTransform1D`] and [`SigmaTransform2D`]
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::error::Error` impls
//! - `parallel`: process channels on Rayon (see
//!   `sigma::set_parallel_channel_threshold`)
//! - `verbose-logging`: debug events through the `log` facade
//!
//! ## Example
//!
//! ```
//! use sigma_transform::{SigmaTransform1D, window::{gaussian, identity}};
//!
//! let n = 64;
//! let fs = 64.0;
//! let channels: Vec<f64> = (0..16).map(|i| -32.0 + 4.0 * i as f64).collect();
//! let mut stft = SigmaTransform1D::new(identity(), gaussian(6.0), fs, n, &channels).unwrap();
//! let signal: Vec<f64> = (0..n).map(|i| (0.3 * i as f64).sin()).collect();
//! let coeffs = stft.analyze(&signal).unwrap().coefficients().unwrap();
//! assert_eq!(coeffs.len(), 16);
//! assert!(coeffs.iter().all(|c| c.len() == n));
//! ```

#![no_std]
extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

/// Debug event through `log` when `verbose-logging` is enabled; nothing otherwise.
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        log::debug!($($arg)*);
    };
}

pub mod num;

/// Fast Fourier Transform (FFT)
///
/// Unitary forward/inverse transforms of arbitrary length.
pub mod fft;

/// 2-D FFT
///
/// Row-column transform for image-shaped data.
pub mod ndfft;

pub mod window;

/// Window bank builder
///
/// Warped frequency grids and per-channel frequency-domain windows.
pub mod bank;

pub mod sigma;

pub use fft::{Direction, FftError, FftImpl, FftPlanner, ScalarFftImpl};
pub use num::{Complex, Complex32, Complex64, ComplexBuffer, Float};
pub use sigma::{SigmaError, SigmaTransform1D, SigmaTransform2D, Stage};
