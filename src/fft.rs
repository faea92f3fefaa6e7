//! Fast Fourier Transform (FFT) engine.
//!
//! Both directions are unitary: forward and inverse each scale by
//! `1/sqrt(N)`, so Parseval holds and `ifft(fft(x)) == x` up to rounding.
//! Lengths that are powers of two run the iterative radix-2 Cooley–Tukey
//! butterfly; every other length goes through a mixed-radix recursion over
//! the lowest odd factor. A [`FftPlanner`] caches roots of unity and
//! bit-reversal tables per length.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use hashbrown::HashMap;

pub use crate::num::{Complex, Complex32, Complex64, ComplexBuffer, Float};
use crate::num::float_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// Transform length was zero.
    EmptyInput,
    /// Real and imaginary parts, or a buffer and its declared shape, disagree in length.
    MismatchedLengths,
}

impl core::fmt::Display for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FftError::EmptyInput => write!(f, "transform length must be at least 1"),
            FftError::MismatchedLengths => write!(f, "buffer lengths do not match"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Rotation direction of a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Kernel `exp(+2πi·jk/N)`.
    Forward,
    /// Kernel `exp(-2πi·jk/N)`.
    Inverse,
}

impl Direction {
    #[inline(always)]
    fn rotate<T: Float>(self, root: Complex<T>) -> Complex<T> {
        match self {
            Direction::Forward => root,
            Direction::Inverse => root.conj(),
        }
    }
}

/// Algorithm used for a given length. See [`FftStrategy::for_len`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftStrategy {
    /// Iterative radix-2 butterfly; power-of-two lengths only.
    Radix2,
    /// Recursive decomposition over the lowest odd factor.
    MixedRadix,
}

impl FftStrategy {
    pub fn for_len(n: usize) -> Self {
        if n.is_power_of_two() {
            FftStrategy::Radix2
        } else {
            FftStrategy::MixedRadix
        }
    }
}

/// Reverse the low `log2(n)` bits of `index`. `n` is a power of two.
pub fn bit_reverse_index(mut index: usize, mut n: usize) -> usize {
    let mut reversed = 0;
    while n > 1 {
        reversed = (reversed << 1) | (index & 1);
        index >>= 1;
        n >>= 1;
    }
    reversed
}

/// Bit-reversal permutation table for a power-of-two length.
pub fn bit_reversal_permutation(n: usize) -> Vec<usize> {
    (0..n).map(|i| bit_reverse_index(i, n)).collect()
}

/// Apply a bit-reversal table in place.
///
/// Each pair `(i, table[i])` is swapped exactly once, from its lower index;
/// fixed points are left alone. Applying the same table twice is the identity.
pub fn apply_bit_reversal<T>(re: &mut [T], im: &mut [T], table: &[usize]) {
    for (i, &r) in table.iter().enumerate() {
        if i < r {
            re.swap(i, r);
            im.swap(i, r);
        }
    }
}

/// Lowest odd factor of `n` found by trial division up to `sqrt(n)`, or `n`
/// itself when there is none.
pub fn lowest_odd_factor(n: usize) -> usize {
    let mut factor = 3;
    while factor * factor <= n {
        if n % factor == 0 {
            return factor;
        }
        factor += 2;
    }
    n
}

/// Caches per-length roots of unity and bit-reversal tables.
pub struct FftPlanner<T: Float> {
    /// `roots[n][k] = exp(+2πi k / n)` for `k = 0..n`.
    roots: HashMap<usize, Arc<[Complex<T>]>>,
    bit_reversal: HashMap<usize, Arc<[usize]>>,
}

impl<T: Float> Default for FftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FftPlanner<T> {
    pub fn new() -> Self {
        Self {
            roots: HashMap::new(),
            bit_reversal: HashMap::new(),
        }
    }

    /// Forward roots of unity of order `n`, computed directly per entry.
    pub fn roots(&mut self, n: usize) -> Arc<[Complex<T>]> {
        let table = self.roots.entry(n).or_insert_with(|| {
            let step = (T::pi() + T::pi()) / float_of::<T>(n);
            (0..n)
                .map(|k| Complex::expi(step * float_of::<T>(k)))
                .collect::<Vec<_>>()
                .into()
        });
        Arc::clone(table)
    }

    pub fn bit_reversal(&mut self, n: usize) -> Arc<[usize]> {
        let table = self
            .bit_reversal
            .entry(n)
            .or_insert_with(|| bit_reversal_permutation(n).into());
        Arc::clone(table)
    }

    /// Transform a split-layout sequence in place.
    pub fn process(&mut self, re: &mut [T], im: &mut [T], direction: Direction) -> Result<(), FftError> {
        if re.len() != im.len() {
            return Err(FftError::MismatchedLengths);
        }
        match re.len() {
            0 => Err(FftError::EmptyInput),
            1 => Ok(()),
            n => {
                match FftStrategy::for_len(n) {
                    FftStrategy::Radix2 => {
                        self.radix2(re, im, direction);
                        Ok(())
                    }
                    FftStrategy::MixedRadix => self.mixed_radix(re, im, direction),
                }
            }
        }
    }

    fn radix2(&mut self, re: &mut [T], im: &mut [T], direction: Direction) {
        let n = re.len();
        let table = self.bit_reversal(n);
        apply_bit_reversal(re, im, &table);

        let scale = T::one() / (T::one() + T::one()).sqrt();
        let mut width = 1;
        while width < n {
            // exp(±iπ j / width) for j in 0..width
            let roots = self.roots(2 * width);
            for block in (0..n).step_by(2 * width) {
                for (j, &root) in roots[..width].iter().enumerate() {
                    let w = direction.rotate(root);
                    let l = block + j;
                    let r = l + width;
                    let right_re = w.re * re[r] - w.im * im[r];
                    let right_im = w.re * im[r] + w.im * re[r];
                    let (left_re, left_im) = (re[l], im[l]);
                    re[l] = scale * (left_re + right_re);
                    im[l] = scale * (left_im + right_im);
                    re[r] = scale * (left_re - right_re);
                    im[r] = scale * (left_im - right_im);
                }
            }
            width <<= 1;
        }
    }

    fn mixed_radix(&mut self, re: &mut [T], im: &mut [T], direction: Direction) -> Result<(), FftError> {
        let n = re.len();
        let p = lowest_odd_factor(n);
        let m = n / p;
        let roots = self.roots(n);
        let normalisation = T::one() / float_of::<T>(p).sqrt();

        let mut out_re = vec![T::zero(); n];
        let mut out_im = vec![T::zero(); n];
        let mut sub_re = vec![T::zero(); m];
        let mut sub_im = vec![T::zero(); m];

        for j in 0..p {
            for i in 0..m {
                sub_re[i] = re[i * p + j];
                sub_im[i] = im[i * p + j];
            }
            if m > 1 {
                self.process(&mut sub_re, &mut sub_im, direction)?;
            }
            for k in 0..n {
                let w = direction.rotate(roots[(j * k) % n]);
                let (a, b) = (sub_re[k % m], sub_im[k % m]);
                out_re[k] = out_re[k] + w.re * a - w.im * b;
                out_im[k] = out_im[k] + w.re * b + w.im * a;
            }
        }

        for k in 0..n {
            re[k] = normalisation * out_re[k];
            im[k] = normalisation * out_im[k];
        }
        Ok(())
    }
}

pub trait FftImpl<T: Float> {
    /// Transform a split-layout sequence in place.
    fn transform_split(&self, re: &mut [T], im: &mut [T], direction: Direction) -> Result<(), FftError>;

    fn transform(&self, buffer: &mut ComplexBuffer<T>, direction: Direction) -> Result<(), FftError> {
        let (re, im) = buffer.as_mut_slices();
        self.transform_split(re, im, direction)
    }
    fn fft(&self, buffer: &mut ComplexBuffer<T>) -> Result<(), FftError> {
        self.transform(buffer, Direction::Forward)
    }
    fn ifft(&self, buffer: &mut ComplexBuffer<T>) -> Result<(), FftError> {
        self.transform(buffer, Direction::Inverse)
    }
    /// Out-of-place forward transform; `input` is left untouched.
    fn fft_vec(&self, input: &ComplexBuffer<T>) -> Result<ComplexBuffer<T>, FftError> {
        let mut output = input.clone();
        self.fft(&mut output)?;
        Ok(output)
    }
    /// Out-of-place inverse transform; `input` is left untouched.
    fn ifft_vec(&self, input: &ComplexBuffer<T>) -> Result<ComplexBuffer<T>, FftError> {
        let mut output = input.clone();
        self.ifft(&mut output)?;
        Ok(output)
    }
    /// Frequency-domain filter: forward transform, `filter` over every
    /// spectral bin `(value, index, len)`, inverse transform.
    fn frequency_map<F>(&self, input: &ComplexBuffer<T>, filter: F) -> Result<ComplexBuffer<T>, FftError>
    where
        F: FnMut(Complex<T>, usize, usize) -> Complex<T>,
    {
        let mut spectrum = self.fft_vec(input)?;
        spectrum.map_inplace(filter);
        self.ifft(&mut spectrum)?;
        Ok(spectrum)
    }
}

/// Scalar FFT backed by an interior planner cache.
///
/// Not `Sync`; give each worker thread its own instance.
pub struct ScalarFftImpl<T: Float> {
    planner: RefCell<FftPlanner<T>>,
}

impl<T: Float> Default for ScalarFftImpl<T> {
    fn default() -> Self {
        Self {
            planner: RefCell::new(FftPlanner::new()),
        }
    }
}

impl<T: Float> ScalarFftImpl<T> {
    pub fn with_planner(planner: FftPlanner<T>) -> Self {
        Self {
            planner: RefCell::new(planner),
        }
    }
}

impl<T: Float> FftImpl<T> for ScalarFftImpl<T> {
    fn transform_split(&self, re: &mut [T], im: &mut [T], direction: Direction) -> Result<(), FftError> {
        debug_log!(
            "fft: n={} strategy={:?} direction={:?}",
            re.len(),
            FftStrategy::for_len(re.len()),
            direction
        );
        self.planner.borrow_mut().process(re, im, direction)
    }
}


#[cfg(all(feature = "internal-tests", test))]
mod coverage_tests {
    use super::tests::naive_dft;
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_seeded_mixed_radix_lengths_match_naive_dft() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let fft = ScalarFftImpl::<f64>::default();
        for &n in &[3usize, 5, 9, 10, 18, 21, 45, 63, 75, 99] {
            let input: Vec<Complex64> = (0..n)
                .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
                .collect();
            let expected = naive_dft(&input, Direction::Forward);
            let buf = ComplexBuffer::from_complex(&input);
            let spectrum = fft.fft_vec(&buf).unwrap();
            for (a, e) in spectrum.iter().zip(expected.iter()) {
                assert!((a.re - e.re).abs() < 1e-10 && (a.im - e.im).abs() < 1e-10, "n={}", n);
            }
            assert!((spectrum.energy() - buf.energy()).abs() < 1e-10 * buf.energy());
        }
    }

    proptest! {
        #[test]
        fn prop_matches_naive_dft(
            samples in proptest::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1..72)
        ) {
            let input: Vec<Complex64> = samples.iter().map(|&(re, im)| Complex64::new(re, im)).collect();
            let expected = naive_dft(&input, Direction::Forward);
            let fft = ScalarFftImpl::<f64>::default();
            let actual = fft.fft_vec(&ComplexBuffer::from_complex(&input)).unwrap();
            for (a, e) in actual.iter().zip(expected.iter()) {
                prop_assert!((a.re - e.re).abs() < 1e-7 && (a.im - e.im).abs() < 1e-7);
            }
        }

        #[test]
        fn prop_inverse_matches_naive_idft(
            samples in proptest::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 1..40)
        ) {
            let input: Vec<Complex64> = samples.iter().map(|&(re, im)| Complex64::new(re, im)).collect();
            let expected = naive_dft(&input, Direction::Inverse);
            let fft = ScalarFftImpl::<f64>::default();
            let actual = fft.ifft_vec(&ComplexBuffer::from_complex(&input)).unwrap();
            for (a, e) in actual.iter().zip(expected.iter()) {
                prop_assert!((a.re - e.re).abs() < 1e-9 && (a.im - e.im).abs() < 1e-9);
            }
        }
    }
}
