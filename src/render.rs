use crate::antialias::is_anti_aliased;
use crate::color::{blend, Pixel};
use crate::config::Config;
use crate::raw::RawImage;

/// How a pixel position was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    /// Over the threshold but attributed to anti-aliasing; not counted.
    AntiAliased,
    Different,
}

impl Verdict {
    pub fn is_different(self) -> bool {
        self == Verdict::Different
    }
}

const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);

/// Classifies position `(x, y)` given its signed full-precision `delta`
/// between `a` and `b`, and returns the pixel to write into the diff image.
pub fn classify_and_render(
    a: &RawImage,
    b: &RawImage,
    x: u32,
    y: u32,
    delta: f64,
    config: &Config,
) -> (Verdict, Pixel) {
    if delta.abs() <= config.max_delta() {
        let pixel = if config.diff_mask {
            TRANSPARENT
        } else {
            gray_pixel(a.pixel(x, y), config.alpha)
        };
        return (Verdict::Match, pixel);
    }

    if config.detect_anti_aliasing
        && (is_anti_aliased(a, x, y, b) || is_anti_aliased(b, x, y, a))
    {
        let pixel = if config.diff_mask {
            TRANSPARENT
        } else {
            Pixel::from(config.anti_alias_color.to_rgba())
        };
        return (Verdict::AntiAliased, pixel);
    }

    // A negative delta means `a` is the lighter image here.
    let color = if delta < 0.0 {
        config.alt_diff_color()
    } else {
        config.diff_color
    };
    (Verdict::Different, Pixel::from(color.to_rgba()))
}

/// Grayscale rendition of `p`, faded toward white by `alpha` and by the
/// pixel's own opacity.
pub fn gray_pixel(p: Pixel, alpha: f64) -> Pixel {
    let v = blend(p.luma(), alpha * f64::from(p.a) / 255.0) as u8;
    Pixel::new(v, v, v, 255)
}
