//! pixelmatch CLI - compare two images pixel by pixel.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use pixelmatch::{compare, Config, RawImage, Rgb};

/// Count perceptually different pixels between two images
///
/// Prints the number of differing pixels, or writes a diff image when
/// --output is given. Differing pixels are not an error: the exit code is 0
/// whenever the comparison ran.
#[derive(Parser, Debug)]
#[command(name = "pixelmatch")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    pixelmatch expected.png actual.png
    pixelmatch --threshold 0.05 --detect-anti-aliasing expected.png actual.png
    pixelmatch -o diff.png --diff-color-alt 0,255,0 expected.png actual.png

EXIT CODES:
    0 - Comparison ran (regardless of how many pixels differ)
    1 - Error (unreadable file, invalid image, dimension mismatch, bad option)")]
struct Cli {
    /// Expected (baseline) image
    #[arg(value_name = "EXPECTED")]
    expected: PathBuf,

    /// Actual (candidate) image
    #[arg(value_name = "ACTUAL")]
    actual: PathBuf,

    /// File to write the diff image to; format follows the extension
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Sensitivity of the diff, in [0, 1]; smaller is more sensitive
    #[arg(short, long, default_value_t = 0.1)]
    threshold: f64,

    /// Do anti-aliasing detection and leave anti-aliased pixels out of the count
    #[arg(long, visible_alias = "include-anti-aliasing")]
    detect_anti_aliasing: bool,

    /// Opacity of the original image behind matching pixels, in [0, 1]
    #[arg(long, default_value_t = 0.1)]
    alpha: f64,

    /// Colour of anti-aliased pixels (r,g,b)
    #[arg(long, value_name = "R,G,B", default_value = "255,255,0")]
    aa_color: Rgb,

    /// Colour of differing pixels (r,g,b)
    #[arg(long, value_name = "R,G,B", default_value = "255,0,0")]
    diff_color: Rgb,

    /// Colour of differing pixels where EXPECTED is the lighter image (r,g,b)
    #[arg(long, value_name = "R,G,B")]
    diff_color_alt: Option<Rgb>,

    /// Draw only differing pixels on a transparent background
    #[arg(long)]
    diff_mask: bool,
}

impl Cli {
    fn config(&self) -> pixelmatch::Result<Config> {
        let mut builder = Config::builder()
            .threshold(self.threshold)
            .detect_anti_aliasing(self.detect_anti_aliasing)
            .alpha(self.alpha)
            .anti_alias_color(self.aa_color)
            .diff_color(self.diff_color)
            .diff_mask(self.diff_mask);
        if let Some(alt) = self.diff_color_alt {
            builder = builder.diff_color_alt(alt);
        }
        builder.build()
    }
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.config()?;

    let expected = load(&cli.expected)?;
    let actual = load(&cli.actual)?;

    let result = compare(&expected, &actual, &config).with_context(|| {
        format!(
            "Failed to compare {} and {}",
            cli.expected.display(),
            cli.actual.display()
        )
    })?;

    debug!("mismatch: {:.2}%", result.mismatch_percent());

    match &cli.output {
        Some(path) => {
            result
                .image
                .into_rgba_image()
                .save(path)
                .with_context(|| format!("Failed to write diff to {}", path.display()))?;
        }
        None => {
            println!(
                "There are {} pixels different between {} and {}",
                result.diff_count,
                cli.expected.display(),
                cli.actual.display()
            );
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<RawImage> {
    let image = image::open(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(RawImage::from(image.to_rgba8()))
}
