use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB colour used to paint marked pixels in the diff output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub(crate) fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Parses `"r,g,b"`, e.g. `"255,0,0"`.
impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidOption {
            name: "color",
            reason,
        };

        let parts = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u8>()
                    .map_err(|e| invalid(format!("{:?}: {}", part.trim(), e)))
            })
            .collect::<Result<Vec<u8>>>()?;

        match parts[..] {
            [r, g, b] => Ok(Rgb::new(r, g, b)),
            _ => Err(invalid(format!(
                "expected three comma separated channels, got {:?}",
                s
            ))),
        }
    }
}

/// Resolved comparison parameters.
///
/// Built once per comparison and never mutated while it runs. Fields are
/// public so a config can be written out literally; [`Config::builder`]
/// validates every option as it is resolved, and [`crate::compare`] calls
/// [`Config::validate`] before touching any pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Matching threshold in `[0, 1]`; smaller is more sensitive.
    pub threshold: f64,
    /// Exclude anti-aliased pixels from the diff count.
    pub detect_anti_aliasing: bool,
    /// Opacity in `[0, 1]` of the original image behind matching pixels.
    pub alpha: f64,
    pub anti_alias_color: Rgb,
    pub diff_color: Rgb,
    /// Colour for pixels where the first image is the lighter one.
    pub diff_color_alt: Option<Rgb>,
    /// Paint only differing pixels and leave everything else transparent.
    pub diff_mask: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            threshold: 0.1,
            detect_anti_aliasing: false,
            alpha: 0.1,
            anti_alias_color: Rgb::new(255, 255, 0),
            diff_color: Rgb::new(255, 0, 0),
            diff_color_alt: None,
            diff_mask: false,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The colour for pixels where the first image is lighter, falling back
    /// to `diff_color` when no alternative was configured.
    pub fn alt_diff_color(&self) -> Rgb {
        self.diff_color_alt.unwrap_or(self.diff_color)
    }

    /// Squared-threshold cut-off on the perceptual delta.
    ///
    /// 35215 is the largest value the metric can take, for fully opposite
    /// colours.
    pub fn max_delta(&self) -> f64 {
        35215.0 * self.threshold * self.threshold
    }

    pub fn validate(&self) -> Result<()> {
        check_unit("threshold", self.threshold)?;
        check_unit("alpha", self.alpha)?;
        Ok(())
    }
}

fn check_unit(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidOption {
            name,
            reason: format!("{} is outside [0, 1]", value),
        })
    }
}

/// Collects options and resolves them into a [`Config`].
///
/// Unset options keep their defaults. Every supplied value is checked on its
/// own in [`ConfigBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    threshold: Option<f64>,
    detect_anti_aliasing: Option<bool>,
    alpha: Option<f64>,
    anti_alias_color: Option<Rgb>,
    diff_color: Option<Rgb>,
    diff_color_alt: Option<Rgb>,
    diff_mask: Option<bool>,
}

impl ConfigBuilder {
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn detect_anti_aliasing(mut self, enable: bool) -> Self {
        self.detect_anti_aliasing = Some(enable);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn anti_alias_color(mut self, color: Rgb) -> Self {
        self.anti_alias_color = Some(color);
        self
    }

    pub fn diff_color(mut self, color: Rgb) -> Self {
        self.diff_color = Some(color);
        self
    }

    pub fn diff_color_alt(mut self, color: Rgb) -> Self {
        self.diff_color_alt = Some(color);
        self
    }

    pub fn diff_mask(mut self, enable: bool) -> Self {
        self.diff_mask = Some(enable);
        self
    }

    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();

        let threshold = match self.threshold {
            Some(threshold) => {
                check_unit("threshold", threshold)?;
                threshold
            }
            None => defaults.threshold,
        };

        let alpha = match self.alpha {
            Some(alpha) => {
                check_unit("alpha", alpha)?;
                alpha
            }
            None => defaults.alpha,
        };

        Ok(Config {
            threshold,
            detect_anti_aliasing: self
                .detect_anti_aliasing
                .unwrap_or(defaults.detect_anti_aliasing),
            alpha,
            anti_alias_color: self.anti_alias_color.unwrap_or(defaults.anti_alias_color),
            diff_color: self.diff_color.unwrap_or(defaults.diff_color),
            diff_color_alt: self.diff_color_alt.or(defaults.diff_color_alt),
            diff_mask: self.diff_mask.unwrap_or(defaults.diff_mask),
        })
    }
}
