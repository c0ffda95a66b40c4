//! Pixel-level image comparison.
//!
//! Compares two equally sized RGBA images with a perceptual YIQ colour
//! metric, optionally ignoring anti-aliased edge pixels, and renders a diff
//! image highlighting what changed.
//!
//! ```
//! use pixelmatch::{compare, Config, RawImage};
//!
//! let black = RawImage::new(1, 1, vec![0, 0, 0, 255]).unwrap();
//! let white = RawImage::new(1, 1, vec![255, 255, 255, 255]).unwrap();
//!
//! let result = compare(&black, &white, &Config::default()).unwrap();
//! assert_eq!(result.diff_count, 1);
//! assert_eq!(result.image.as_bytes(), &[255, 0, 0, 255]);
//! ```

pub mod antialias;
pub mod color;
pub mod config;
pub mod error;
pub mod raw;
pub mod render;

pub use crate::color::{perceptual_delta, Pixel};
pub use crate::config::{Config, ConfigBuilder, Rgb};
pub use crate::error::{Error, Result};
pub use crate::raw::RawImage;

use crate::render::{classify_and_render, gray_pixel};
use image::{GenericImageView, Rgba};
use log::{debug, trace};
use num_traits::ToPrimitive;
use rayon::prelude::*;

/// Outcome of one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Diff image, same dimensions as the inputs.
    pub image: RawImage,
    /// Number of pixels marked as different.
    pub diff_count: usize,
}

impl Comparison {
    /// Share of pixels marked as different, in percent.
    pub fn mismatch_percent(&self) -> f64 {
        let total = self.image.width() as usize * self.image.height() as usize;
        if total == 0 {
            return 0.0;
        }
        let diff = self.diff_count.to_f64().unwrap_or(f64::NAN);
        let total = total.to_f64().unwrap_or(f64::NAN);
        diff * 100.0 / total
    }
}

/// Compares `a` against `b` and renders the diff image.
///
/// Fails with [`Error::InvalidOption`] if `config` is out of range and with
/// [`Error::DimensionMismatch`] if the images differ in size; in both cases
/// no pixel is touched.
pub fn compare(a: &RawImage, b: &RawImage, config: &Config) -> Result<Comparison> {
    config.validate()?;

    if a.dimensions() != b.dimensions() {
        return Err(Error::DimensionMismatch {
            expected: a.dimensions(),
            actual: b.dimensions(),
        });
    }

    let (width, height) = a.dimensions();
    debug!("comparing {}x{} images with {:?}", width, height, config);

    let mut image = RawImage::blank(width, height);

    if a.as_bytes() == b.as_bytes() {
        trace!("inputs are byte-identical");
        if !config.diff_mask {
            for (out, src) in image
                .bytes_mut()
                .chunks_exact_mut(4)
                .zip(a.as_bytes().chunks_exact(4))
            {
                let pixel: [u8; 4] = gray_pixel(Pixel::from_slice(src), config.alpha).into();
                out.copy_from_slice(&pixel);
            }
        }
        return Ok(Comparison {
            image,
            diff_count: 0,
        });
    }

    // Rows are independent: each worker owns one row of the output.
    let diff_count: usize = image
        .bytes_mut()
        .par_chunks_mut(width as usize * 4)
        .enumerate()
        .map(|(y, row)| compare_row(a, b, y as u32, row, config))
        .sum();

    debug!("{} of {} pixels differ", diff_count, width as usize * height as usize);

    Ok(Comparison { image, diff_count })
}

fn compare_row(a: &RawImage, b: &RawImage, y: u32, row: &mut [u8], config: &Config) -> usize {
    let mut diff_count = 0;
    for (x, out) in (0..a.width()).zip(row.chunks_exact_mut(4)) {
        let delta = perceptual_delta(a.pixel(x, y), b.pixel(x, y), false);
        let (verdict, pixel) = classify_and_render(a, b, x, y, delta, config);
        let pixel: [u8; 4] = pixel.into();
        out.copy_from_slice(&pixel);
        if verdict.is_different() {
            diff_count += 1;
        }
    }
    diff_count
}

/// Compares two images from the `image` crate.
pub fn compare_images<I1, I2>(img1: &I1, img2: &I2, config: &Config) -> Result<Comparison>
where
    I1: GenericImageView<Pixel = Rgba<u8>>,
    I2: GenericImageView<Pixel = Rgba<u8>>,
{
    if img1.dimensions() != img2.dimensions() {
        return Err(Error::DimensionMismatch {
            expected: img1.dimensions(),
            actual: img2.dimensions(),
        });
    }
    compare(&RawImage::from_view(img1), &RawImage::from_view(img2), config)
}
