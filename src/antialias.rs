//! Anti-aliasing detection.
//!
//! Based on "Anti-aliased Pixel and Intensity Slope Detector" by V. Vyšniauskas
//! (2009). An edge pixel whose neighbourhood shows a gradient between two
//! flat regions is treated as anti-aliased rather than as a content change.

use crate::color::perceptual_delta;
use crate::raw::RawImage;

/// The 3x3 window around `(x, y)` clamped to the image, and whether `(x, y)`
/// touches the image border.
struct Window {
    x0: u32,
    y0: u32,
    x2: u32,
    y2: u32,
    on_border: bool,
}

impl Window {
    fn around(image: &RawImage, x: u32, y: u32) -> Self {
        let x0 = x.saturating_sub(1);
        let y0 = y.saturating_sub(1);
        let x2 = (x + 1).min(image.width() - 1);
        let y2 = (y + 1).min(image.height() - 1);
        Window {
            x0,
            y0,
            x2,
            y2,
            on_border: x == x0 || x == x2 || y == y0 || y == y2,
        }
    }

    /// Neighbour coordinates, column by column, skipping the centre.
    fn neighbours(&self, cx: u32, cy: u32) -> impl Iterator<Item = (u32, u32)> {
        let (y0, y2) = (self.y0, self.y2);
        (self.x0..=self.x2)
            .flat_map(move |x| (y0..=y2).map(move |y| (x, y)))
            .filter(move |&(x, y)| x != cx || y != cy)
    }
}

/// Whether the pixel at `(x, y)` of `image` looks like anti-aliasing
/// rather than a real difference against `other`.
///
/// `other` must have the same dimensions as `image`.
pub fn is_anti_aliased(image: &RawImage, x: u32, y: u32, other: &RawImage) -> bool {
    let window = Window::around(image, x, y);
    let center = image.pixel(x, y);

    let mut zeroes = u32::from(window.on_border);
    let mut min = 0.0;
    let mut max = 0.0;
    let (mut min_x, mut min_y) = (0, 0);
    let (mut max_x, mut max_y) = (0, 0);

    for (nx, ny) in window.neighbours(x, y) {
        let delta = perceptual_delta(center, image.pixel(nx, ny), true);

        if delta == 0.0 {
            zeroes += 1;
            // Flat surroundings, not an edge.
            if zeroes > 2 {
                return false;
            }
        } else if delta < min {
            min = delta;
            min_x = nx;
            min_y = ny;
        } else if delta > max {
            max = delta;
            max_x = nx;
            max_y = ny;
        }
    }

    // Need both a darker and a brighter neighbour.
    if min == 0.0 || max == 0.0 {
        return false;
    }

    (has_many_siblings(image, min_x, min_y) && has_many_siblings(image, max_x, max_y))
        || (has_many_siblings(other, min_x, min_y) && has_many_siblings(other, max_x, max_y))
}

/// Whether at least three pixels around `(x, y)` share its exact RGBA value,
/// counting the image border as one.
pub fn has_many_siblings(image: &RawImage, x: u32, y: u32) -> bool {
    let window = Window::around(image, x, y);
    let center = image.pixel(x, y);

    let mut zeroes = u32::from(window.on_border);
    for (nx, ny) in window.neighbours(x, y) {
        if image.pixel(nx, ny) == center {
            zeroes += 1;
        }
        if zeroes > 2 {
            return true;
        }
    }
    false
}
