//! Separable 2-D FFT over a row-major grid.
//!
//! A grid of `rows × cols` samples is stored flat with index `r * cols + c`.
//! The row pass transforms every contiguous row of length `cols`; the column
//! pass gathers each column (length `rows`) into one scratch buffer,
//! transforms it and scatters it back.

extern crate alloc;
use alloc::vec;

use crate::fft::{ComplexBuffer, Direction, FftError, FftImpl, Float};

/// Transform `buffer` in place as a `rows × cols` grid.
pub fn transform2d<T: Float>(
    buffer: &mut ComplexBuffer<T>,
    rows: usize,
    cols: usize,
    fft: &impl FftImpl<T>,
    direction: Direction,
) -> Result<(), FftError> {
    if rows == 0 || cols == 0 {
        return Err(FftError::EmptyInput);
    }
    if rows.checked_mul(cols) != Some(buffer.len()) {
        return Err(FftError::MismatchedLengths);
    }
    let (re, im) = buffer.as_mut_slices();

    // FFT on rows
    for (row_re, row_im) in re.chunks_exact_mut(cols).zip(im.chunks_exact_mut(cols)) {
        fft.transform_split(row_re, row_im, direction)?;
    }

    // FFT on columns
    let mut col_re = vec![T::zero(); rows];
    let mut col_im = vec![T::zero(); rows];
    for c in 0..cols {
        for r in 0..rows {
            col_re[r] = re[r * cols + c];
            col_im[r] = im[r * cols + c];
        }
        fft.transform_split(&mut col_re, &mut col_im, direction)?;
        for r in 0..rows {
            re[r * cols + c] = col_re[r];
            im[r * cols + c] = col_im[r];
        }
    }
    Ok(())
}

/// Forward 2-D FFT in place.
pub fn fft2d_inplace<T: Float>(
    buffer: &mut ComplexBuffer<T>,
    rows: usize,
    cols: usize,
    fft: &impl FftImpl<T>,
) -> Result<(), FftError> {
    transform2d(buffer, rows, cols, fft, Direction::Forward)
}

/// Inverse 2-D FFT in place.
pub fn ifft2d_inplace<T: Float>(
    buffer: &mut ComplexBuffer<T>,
    rows: usize,
    cols: usize,
    fft: &impl FftImpl<T>,
) -> Result<(), FftError> {
    transform2d(buffer, rows, cols, fft, Direction::Inverse)
}
