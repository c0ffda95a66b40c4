//! YIQ-based perceptual colour distance.
//!
//! The weights come from "Measuring perceived color difference using YIQ
//! NTSC transmission color space in mobile applications" (Kotsarenko and
//! Ramos, 2010) and must not be altered: the diff output is expected to be
//! byte-identical to other implementations of the same metric.

/// One RGBA8 sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Pixel { r, g, b, a }
    }

    /// Reads the first four bytes of `bytes` as `r, g, b, a`.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Luma of the colour channels, ignoring alpha.
    pub fn luma(&self) -> f64 {
        rgb2y(f64::from(self.r), f64::from(self.g), f64::from(self.b))
    }

    /// Colour channels composited over white by this pixel's own opacity.
    fn over_white(&self) -> (f64, f64, f64) {
        let (r, g, b) = (f64::from(self.r), f64::from(self.g), f64::from(self.b));
        if self.a < 255 {
            let a = f64::from(self.a) / 255.0;
            (blend(r, a), blend(g, a), blend(b, a))
        } else {
            (r, g, b)
        }
    }
}

impl From<[u8; 4]> for Pixel {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Pixel::new(r, g, b, a)
    }
}

impl From<Pixel> for [u8; 4] {
    fn from(p: Pixel) -> Self {
        [p.r, p.g, p.b, p.a]
    }
}

/// Blends channel value `c` toward white with opacity `a`.
pub(crate) fn blend(c: f64, a: f64) -> f64 {
    255.0 + (c - 255.0) * a
}

fn rgb2y(r: f64, g: f64, b: f64) -> f64 {
    r * 0.29889531 + g * 0.58662247 + b * 0.11448223
}

fn rgb2i(r: f64, g: f64, b: f64) -> f64 {
    r * 0.59597799 - g * 0.27417610 - b * 0.32180189
}

fn rgb2q(r: f64, g: f64, b: f64) -> f64 {
    r * 0.21147017 - g * 0.52261711 + b * 0.31114694
}

/// Signed squared perceptual distance between two samples.
///
/// With `luma_only` the plain luma difference `Y(a) - Y(b)` is returned.
/// Otherwise the weighted YIQ distance is returned, negated when `a` is the
/// brighter sample. Byte-identical samples always yield exactly `0.0`.
pub fn perceptual_delta(a: Pixel, b: Pixel, luma_only: bool) -> f64 {
    if a == b {
        return 0.0;
    }

    let (r1, g1, b1) = a.over_white();
    let (r2, g2, b2) = b.over_white();

    let y1 = rgb2y(r1, g1, b1);
    let y2 = rgb2y(r2, g2, b2);
    let y = y1 - y2;

    if luma_only {
        return y;
    }

    let i = rgb2i(r1, g1, b1) - rgb2i(r2, g2, b2);
    let q = rgb2q(r1, g1, b1) - rgb2q(r2, g2, b2);

    let delta = 0.5053 * y * y + 0.299 * i * i + 0.1957 * q * q;

    if y1 > y2 {
        -delta
    } else {
        delta
    }
}
