//! Window shapes and warping functions for the sigma transforms.
//!
//! Windows here are shape functions evaluated at an offset in the warped
//! frequency domain, not sampled time-domain tapers. All of them are real and
//! non-negative.

use crate::num::Float;

/// Identity warp; turns the sigma transform into an STFT.
pub fn identity<T: Float>() -> impl Fn(T) -> T + Clone {
    |x| x
}

/// Identity warp on the plane.
pub fn identity2d<T: Float>() -> impl Fn([T; 2]) -> [T; 2] + Clone {
    |xy| xy
}

/// `log2(x)` on positive frequencies, `-inf` elsewhere.
///
/// Negative frequencies land at `-inf` so any decaying window maps them to
/// zero weight; this gives the analytic, wavelet-like bank.
pub fn log2_warp<T: Float>() -> impl Fn(T) -> T + Clone {
    |x| {
        let positive = if x > T::zero() { T::one() } else { T::zero() };
        (x * positive).log2()
    }
}

/// Exponential polar map `(x, y) -> (log2(x² + y² + 1e-7) / 2, atan(y / x))`.
///
/// The angle uses `atan`, not `atan2`, so opposite half-planes share a
/// channel. The origin yields a NaN angle, which any comparison-based window
/// turns into zero weight.
pub fn log_polar<T: Float>() -> impl Fn([T; 2]) -> [T; 2] + Clone {
    |[x, y]| {
        let two = T::one() + T::one();
        let radius = (x * x + y * y + T::from_f64(1e-7)).log2() / two;
        [radius, (y / x).atan()]
    }
}

/// Gaussian bump `exp(-π (x / width)²)`.
pub fn gaussian<T: Float>(width: T) -> impl Fn(T) -> T + Clone {
    move |x| {
        let u = x / width;
        (-T::pi() * u * u).exp()
    }
}

/// Separable Gaussian bump on the plane.
pub fn gaussian2d<T: Float>(width: [T; 2]) -> impl Fn([T; 2]) -> T + Clone {
    let g0 = gaussian(width[0]);
    let g1 = gaussian(width[1]);
    move |[x, y]| g0(x) * g1(y)
}

/// Indicator of the half-open interval `[lo, hi)`.
pub fn rectangle<T: Float>(lo: T, hi: T) -> impl Fn(T) -> T + Clone {
    move |x| {
        if x >= lo && x < hi {
            T::one()
        } else {
            T::zero()
        }
    }
}

/// Indicator of the square `[-half, half) × [-half, half)`.
pub fn box2d<T: Float>(half: T) -> impl Fn([T; 2]) -> T + Clone {
    let side = rectangle(-half, half);
    move |[x, y]| side(x) * side(y)
}

/// Log-polar cell `(0, radius] × [0, angle]` for use with [`log_polar`].
pub fn polar_cell<T: Float>(radius: T, angle: T) -> impl Fn([T; 2]) -> T + Clone {
    move |[r, a]| {
        if r > T::zero() && r <= radius && a >= T::zero() && a <= angle {
            T::one()
        } else {
            T::zero()
        }
    }
}
