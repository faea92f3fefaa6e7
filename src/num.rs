//! Scalar and buffer types shared by the FFT engine and the sigma transforms.
//!
//! [`ComplexBuffer`] stores samples as two parallel real/imaginary vectors of
//! equal, fixed length. `Clone` is the copy constructor; [`ComplexBuffer::map`]
//! is the pure elementwise transform and [`ComplexBuffer::map_inplace`] the
//! explicit mutating one.

use alloc::vec;
use alloc::vec::Vec;

use crate::fft::FftError;

// Minimal float trait for the generic engine (no_std, libm backed)
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + core::fmt::Debug
    + core::fmt::Display
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + core::ops::Rem<Output = Self>
    + core::ops::Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_f64(x: f64) -> Self;
    /// Attempt to convert a `usize` into the floating-point type.
    /// Returns `None` if the value cannot be represented exactly.
    fn from_usize(x: usize) -> Option<Self>;
    fn to_f64(self) -> f64;
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn exp(self) -> Self;
    fn log2(self) -> Self;
    fn atan(self) -> Self;
    fn sin_cos(self) -> (Self, Self);
    fn is_finite(self) -> bool;
    fn pi() -> Self;
    fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }
    fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }
}

impl Float for f32 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f64(x: f64) -> Self {
        x as f32
    }
    fn from_usize(x: usize) -> Option<Self> {
        const MAX_EXACT: usize = 1usize << 24;
        if x < MAX_EXACT {
            Some(x as f32)
        } else {
            None
        }
    }
    fn to_f64(self) -> f64 {
        self as f64
    }
    fn sqrt(self) -> Self {
        libm::sqrtf(self)
    }
    fn abs(self) -> Self {
        libm::fabsf(self)
    }
    fn exp(self) -> Self {
        libm::expf(self)
    }
    fn log2(self) -> Self {
        libm::log2f(self)
    }
    fn atan(self) -> Self {
        libm::atanf(self)
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincosf(self)
    }
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
    fn pi() -> Self {
        core::f32::consts::PI
    }
}

impl Float for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f64(x: f64) -> Self {
        x
    }
    fn from_usize(x: usize) -> Option<Self> {
        const MAX_EXACT: usize = 1usize << 53;
        if x < MAX_EXACT {
            Some(x as f64)
        } else {
            None
        }
    }
    fn to_f64(self) -> f64 {
        self
    }
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }
    fn abs(self) -> Self {
        libm::fabs(self)
    }
    fn exp(self) -> Self {
        libm::exp(self)
    }
    fn log2(self) -> Self {
        libm::log2(self)
    }
    fn atan(self) -> Self {
        libm::atan(self)
    }
    fn sin_cos(self) -> (Self, Self) {
        libm::sincos(self)
    }
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
    fn pi() -> Self {
        core::f64::consts::PI
    }
}

/// Lossy `usize` to float conversion for lengths and indices.
///
/// Lengths beyond the exact range of `T` are rounded through `f64`.
#[inline]
pub(crate) fn float_of<T: Float>(x: usize) -> T {
    T::from_usize(x).unwrap_or_else(|| T::from_f64(x as f64))
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex<T: Float> {
    pub re: T,
    pub im: T,
}

impl<T: Float> Complex<T> {
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
    pub fn zero() -> Self {
        Self {
            re: T::zero(),
            im: T::zero(),
        }
    }
    /// `exp(i * theta)`
    #[inline(always)]
    pub fn expi(theta: T) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self { re: cos, im: sin }
    }
    #[inline(always)]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }
    #[inline(always)]
    pub fn scale(self, k: T) -> Self {
        Self {
            re: self.re * k,
            im: self.im * k,
        }
    }
    #[inline(always)]
    pub fn norm_sqr(self) -> T {
        self.re * self.re + self.im * self.im
    }
    #[inline(always)]
    pub fn norm(self) -> T {
        self.norm_sqr().sqrt()
    }
}

impl<T: Float> core::ops::Neg for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl<T: Float> core::ops::Add for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }
}

impl<T: Float> core::ops::Sub for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }
}

impl<T: Float> core::ops::Mul for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }
}

pub type Complex32 = Complex<f32>;
pub type Complex64 = Complex<f64>;

/// Fixed-length complex samples in split (real, imaginary) layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexBuffer<T: Float> {
    re: Vec<T>,
    im: Vec<T>,
}

impl<T: Float> ComplexBuffer<T> {
    /// All-zero buffer of `len` samples.
    pub fn zeros(len: usize) -> Self {
        Self {
            re: vec![T::zero(); len],
            im: vec![T::zero(); len],
        }
    }

    /// Real samples with zero imaginary part.
    pub fn from_real(samples: &[T]) -> Self {
        Self {
            re: samples.to_vec(),
            im: vec![T::zero(); samples.len()],
        }
    }

    pub fn from_parts(re: Vec<T>, im: Vec<T>) -> Result<Self, FftError> {
        if re.len() != im.len() {
            return Err(FftError::MismatchedLengths);
        }
        Ok(Self { re, im })
    }

    pub fn from_complex(samples: &[Complex<T>]) -> Self {
        let mut re = Vec::with_capacity(samples.len());
        let mut im = Vec::with_capacity(samples.len());
        for c in samples {
            re.push(c.re);
            im.push(c.im);
        }
        Self { re, im }
    }

    pub fn len(&self) -> usize {
        self.re.len()
    }

    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    pub fn re(&self) -> &[T] {
        &self.re
    }

    pub fn im(&self) -> &[T] {
        &self.im
    }

    /// Mutable views of both parts. Slices cannot change length, so the
    /// equal-length invariant survives any write through them.
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        (&mut self.re, &mut self.im)
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<T>) {
        (self.re, self.im)
    }

    /// Sample `i`. Panics when `i >= len()`.
    pub fn get(&self, i: usize) -> Complex<T> {
        Complex::new(self.re[i], self.im[i])
    }

    pub fn set(&mut self, i: usize, value: Complex<T>) {
        self.re[i] = value.re;
        self.im[i] = value.im;
    }

    pub fn iter(&self) -> impl Iterator<Item = Complex<T>> + '_ {
        self.re
            .iter()
            .zip(self.im.iter())
            .map(|(&re, &im)| Complex::new(re, im))
    }

    pub fn to_complex_vec(&self) -> Vec<Complex<T>> {
        self.iter().collect()
    }

    /// Rewrite every sample in place. The mapper receives the current value,
    /// its index and the buffer length.
    pub fn map_inplace<F>(&mut self, mut mapper: F) -> &mut Self
    where
        F: FnMut(Complex<T>, usize, usize) -> Complex<T>,
    {
        let n = self.len();
        for i in 0..n {
            let out = mapper(Complex::new(self.re[i], self.im[i]), i, n);
            self.re[i] = out.re;
            self.im[i] = out.im;
        }
        self
    }

    /// Pure counterpart of [`map_inplace`](Self::map_inplace).
    pub fn map<F>(&self, mapper: F) -> Self
    where
        F: FnMut(Complex<T>, usize, usize) -> Complex<T>,
    {
        let mut out = self.clone();
        out.map_inplace(mapper);
        out
    }

    pub fn conjugate(&self) -> Self {
        Self {
            re: self.re.clone(),
            im: self.im.iter().map(|&x| -x).collect(),
        }
    }

    pub fn magnitude(&self) -> Vec<T> {
        self.iter().map(Complex::norm).collect()
    }

    pub fn magnitude_squared(&self) -> Vec<T> {
        self.iter().map(Complex::norm_sqr).collect()
    }

    /// Total energy `Σ |x_i|²`.
    pub fn energy(&self) -> T {
        self.iter().fold(T::zero(), |acc, c| acc + c.norm_sqr())
    }

    pub fn real_part(&self) -> Vec<T> {
        self.re.clone()
    }

    /// Elementwise product with a real weight sequence.
    pub fn weighted(&self, weights: &[T]) -> Result<Self, FftError> {
        if weights.len() != self.len() {
            return Err(FftError::MismatchedLengths);
        }
        Ok(Self {
            re: self.re.iter().zip(weights).map(|(&x, &w)| x * w).collect(),
            im: self.im.iter().zip(weights).map(|(&x, &w)| x * w).collect(),
        })
    }

    /// `self += other * weights`, elementwise.
    pub fn accumulate_weighted(&mut self, other: &Self, weights: &[T]) -> Result<(), FftError> {
        if other.len() != self.len() || weights.len() != self.len() {
            return Err(FftError::MismatchedLengths);
        }
        for i in 0..self.len() {
            self.re[i] = self.re[i] + other.re[i] * weights[i];
            self.im[i] = self.im[i] + other.im[i] * weights[i];
        }
        Ok(())
    }

    /// `self += other`, elementwise.
    pub fn accumulate(&mut self, other: &Self) -> Result<(), FftError> {
        if other.len() != self.len() {
            return Err(FftError::MismatchedLengths);
        }
        for i in 0..self.len() {
            self.re[i] = self.re[i] + other.re[i];
            self.im[i] = self.im[i] + other.im[i];
        }
        Ok(())
    }
}

impl<T: Float> From<Vec<Complex<T>>> for ComplexBuffer<T> {
    fn from(v: Vec<Complex<T>>) -> Self {
        Self::from_complex(&v)
    }
}

impl<T: Float> From<ComplexBuffer<T>> for Vec<Complex<T>> {
    fn from(buf: ComplexBuffer<T>) -> Self {
        buf.to_complex_vec()
    }
}
