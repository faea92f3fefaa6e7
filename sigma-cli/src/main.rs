use anyhow::Result;
use clap::Parser;
use sigma_cli::*;
use std::path::PathBuf;

/// Run a sigma transform preset on a text signal and write its coefficients,
/// reconstruction and window spectra as text.
#[derive(Parser)]
#[command(name = "sigma", version, about)]
struct Args {
    /// Input file: one float per line (1-D) or whitespace separated rows (2-D)
    input: PathBuf,

    /// Transform configuration
    #[arg(long, value_enum, default_value_t = Preset::Stft1d)]
    preset: Preset,

    /// Sampling rate; 1-D default 143000, 2-D default is the grid shape
    #[arg(long)]
    fs: Option<f64>,

    /// Number of channels (per axis for stft2d, angles for polar2d)
    #[arg(long)]
    channels: Option<usize>,

    /// Window width (Gaussian width, stft2d channel step, polar2d radius step)
    #[arg(long)]
    width: Option<f64>,

    /// Where to write per-channel |c|², one line per channel
    #[arg(long)]
    coeff: Option<PathBuf>,

    /// Where to write the real part of the reconstruction
    #[arg(long, default_value = "rec.asc")]
    rec: PathBuf,

    /// Where to write per-channel window spectra
    #[arg(long)]
    wins: Option<PathBuf>,

    /// Decimal places in the output files
    #[arg(long)]
    precision: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let cfg = PresetConfig {
        fs: args.fs,
        channels: args.channels,
        width: args.width,
    };

    let (input, output) = if args.preset.is_2d() {
        let grid = read_grid(&args.input)?;
        let output = run_2d(args.preset, &grid, &cfg)?;
        (grid.samples, output)
    } else {
        let signal = read_signal(&args.input)?;
        let output = run_1d(args.preset, &signal, &cfg)?;
        (signal, output)
    };

    let (lo, hi) = output.frame_bounds;
    log::info!("frame bounds [{:.6}, {:.6}]", lo, hi);
    log::info!(
        "relative reconstruction error {:.3e}",
        relative_error(&input, &output.reconstruction)
    );

    if let Some(path) = &args.coeff {
        save_magnitudes(path, &output.coefficients, args.precision)?;
        log::info!("wrote {} channels to {}", output.coefficients.len(), path.display());
    }
    save_real(&args.rec, &output.reconstruction, args.precision)?;
    log::info!("wrote reconstruction to {}", args.rec.display());
    if let Some(path) = &args.wins {
        save_magnitudes(path, &output.windows, args.precision)?;
        log::info!("wrote window spectra to {}", path.display());
    }
    Ok(())
}
