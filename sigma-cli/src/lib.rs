use anyhow::{bail, ensure, Context, Result};
use clap::ValueEnum;
use sigma_transform::bank::meshgrid;
use sigma_transform::window::{box2d, gaussian, identity, identity2d, log2_warp, log_polar, polar_cell};
use sigma_transform::{ComplexBuffer, SigmaTransform1D, SigmaTransform2D};
use std::f64::consts::PI;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Sampling rate of the 1-D presets when none is given.
pub const DEFAULT_FS_1D: f64 = 143_000.0;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Gaussian STFT, identity warp
    Stft1d,
    /// Constant-Q bank, log2 warp
    Wavelet1d,
    /// Box STFT on a channel meshgrid
    Stft2d,
    /// Log-polar scale/orientation cells
    Polar2d,
}

impl Preset {
    pub fn is_2d(self) -> bool {
        matches!(self, Preset::Stft2d | Preset::Polar2d)
    }
}

/// Knobs shared by all presets; `None` picks the preset's own default.
#[derive(Clone, Debug, Default)]
pub struct PresetConfig {
    pub fs: Option<f64>,
    pub channels: Option<usize>,
    pub width: Option<f64>,
}

/// Everything a preset run produces.
pub struct Output {
    pub coefficients: Vec<ComplexBuffer<f64>>,
    pub reconstruction: ComplexBuffer<f64>,
    pub windows: Vec<ComplexBuffer<f64>>,
    /// Min and max of the window bank's frame profile.
    pub frame_bounds: (f64, f64),
}

/// Read a 1-D signal, one float per line. Blank lines are skipped.
pub fn read_signal(path: &Path) -> Result<Vec<f64>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_signal(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_signal(text: &str) -> Result<Vec<f64>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.trim()
                .parse::<f64>()
                .with_context(|| format!("line {}: not a number: {:?}", i + 1, line))
        })
        .collect()
}

/// Row-major grid of samples with its shape `[rows, cols]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub samples: Vec<f64>,
    pub shape: [usize; 2],
}

/// Read a 2-D grid: one row per line, values separated by whitespace.
pub fn read_grid(path: &Path) -> Result<Grid> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_grid(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_grid(text: &str) -> Result<Grid> {
    let mut samples = Vec::new();
    let mut cols = None;
    let mut rows = 0;
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let before = samples.len();
        for tok in line.split_whitespace() {
            let v = tok
                .parse::<f64>()
                .with_context(|| format!("line {}: not a number: {:?}", i + 1, tok))?;
            samples.push(v);
        }
        let width = samples.len() - before;
        match cols {
            None => cols = Some(width),
            Some(c) if c != width => bail!("line {}: expected {} values, found {}", i + 1, c, width),
            Some(_) => {}
        }
        rows += 1;
    }
    let cols = cols.context("grid is empty")?;
    Ok(Grid {
        samples,
        shape: [rows, cols],
    })
}

fn format_value(v: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, v),
        None => format!("{}", v),
    }
}

/// One line per buffer, every value written as `re²+im²` followed by `,`.
pub fn write_magnitudes<W: Write>(
    out: &mut W,
    buffers: &[ComplexBuffer<f64>],
    precision: Option<usize>,
) -> Result<()> {
    for buf in buffers {
        for v in buf.magnitude_squared() {
            write!(out, "{},", format_value(v, precision))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Real part of every sample, one per line.
pub fn write_real<W: Write>(out: &mut W, buf: &ComplexBuffer<f64>, precision: Option<usize>) -> Result<()> {
    for &v in buf.re() {
        writeln!(out, "{}", format_value(v, precision))?;
    }
    Ok(())
}

pub fn save_magnitudes(path: &Path, buffers: &[ComplexBuffer<f64>], precision: Option<usize>) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_magnitudes(&mut out, buffers, precision)?;
    out.flush()?;
    Ok(())
}

pub fn save_real(path: &Path, buf: &ComplexBuffer<f64>, precision: Option<usize>) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_real(&mut out, buf, precision)?;
    out.flush()?;
    Ok(())
}

/// Evenly spaced values `lower + i·step`, `i < count`.
fn linspace(lower: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| lower + i as f64 * step).collect()
}

/// Run a 1-D preset on `signal`.
pub fn run_1d(preset: Preset, signal: &[f64], cfg: &PresetConfig) -> Result<Output> {
    let n = signal.len();
    ensure!(n > 0, "signal is empty");
    let fs = cfg.fs.unwrap_or(DEFAULT_FS_1D);
    let count = cfg.channels.unwrap_or(n);
    log::info!("{:?}: {} samples at {} Hz, {} channels", preset, n, fs, count);
    let mut st = match preset {
        Preset::Stft1d => {
            let chans = linspace(-fs / 2.0, fs / count as f64, count);
            let width = cfg.width.unwrap_or(16.0 * fs / n as f64);
            SigmaTransform1D::new(identity(), gaussian(width), fs, n, &chans)?
        }
        Preset::Wavelet1d => {
            let sigma = log2_warp();
            let lower = sigma(0.005 * fs);
            let upper = sigma(fs / 2.0 * 1.1);
            let chans = linspace(lower, (upper - lower) / count as f64, count);
            // four channel steps of a 400-step grid over log2(fs)
            let width = cfg.width.unwrap_or(sigma(fs) * 4.0 / 400.0);
            SigmaTransform1D::new(sigma, gaussian(width), fs, n, &chans)?
        }
        other => bail!("{:?} expects a 2-D grid", other),
    };
    let frame_bounds = st.windows().frame_bounds();
    st.analyze(signal)?.synthesize()?;
    let reconstruction = st.reconstruction().cloned().context("missing reconstruction")?;
    let windows = st.windows().windows().to_vec();
    let coefficients = st.take_coefficients().context("missing coefficients")?;
    Ok(Output {
        coefficients,
        reconstruction,
        windows,
        frame_bounds,
    })
}

/// Run a 2-D preset on `grid`.
pub fn run_2d(preset: Preset, grid: &Grid, cfg: &PresetConfig) -> Result<Output> {
    let [rows, cols] = grid.shape;
    ensure!(rows * cols == grid.samples.len(), "grid shape does not match sample count");
    let fs = match cfg.fs {
        Some(fs) => [fs, fs],
        None => [rows as f64, cols as f64],
    };
    let mut st = match preset {
        Preset::Stft2d => {
            let step = cfg.width.unwrap_or(5.0);
            let count = cfg.channels.unwrap_or(25);
            let chans = meshgrid(
                &linspace(-fs[0] / 2.0, step, count),
                &linspace(-fs[1] / 2.0, step, count),
            );
            log::info!("{:?}: {}x{} grid, {} channels", preset, rows, cols, chans.len());
            SigmaTransform2D::new(identity2d(), box2d(step / 2.0), fs, grid.shape, &chans)?
        }
        Preset::Polar2d => {
            let angles = cfg.channels.unwrap_or(17);
            let angle_step = PI / angles.saturating_sub(1).max(1) as f64;
            let radius_step = cfg.width.unwrap_or(1.0);
            let chans = meshgrid(
                &linspace(0.0, radius_step, 7),
                &linspace(-PI / 2.0, angle_step, angles),
            );
            log::info!("{:?}: {}x{} grid, {} channels", preset, rows, cols, chans.len());
            SigmaTransform2D::new(log_polar(), polar_cell(radius_step, angle_step), fs, grid.shape, &chans)?
        }
        other => bail!("{:?} expects a 1-D signal", other),
    };
    let frame_bounds = st.windows().frame_bounds();
    st.analyze(&grid.samples)?.synthesize()?;
    let reconstruction = st.reconstruction().cloned().context("missing reconstruction")?;
    let windows = st.windows().windows().to_vec();
    let coefficients = st.take_coefficients().context("missing coefficients")?;
    Ok(Output {
        coefficients,
        reconstruction,
        windows,
        frame_bounds,
    })
}

/// `‖rec - x‖ / ‖x‖` over the real part; `0` for an all-zero input.
pub fn relative_error(signal: &[f64], reconstruction: &ComplexBuffer<f64>) -> f64 {
    let (num, den) = signal
        .iter()
        .zip(reconstruction.re())
        .fold((0.0, 0.0), |(num, den), (&x, &r)| {
            (num + (r - x) * (r - x), den + x * x)
        });
    if den == 0.0 {
        0.0
    } else {
        (num / den).sqrt()
    }
}
