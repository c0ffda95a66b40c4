use crate::color::Pixel;
use crate::error::{Error, Result};
use image::{GenericImageView, Rgba, RgbaImage};

/// A decoded RGBA8 image stored row-major, four bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RawImage {
    /// Wraps a pixel buffer, checking that it holds exactly
    /// `width * height` RGBA samples.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(Error::InvalidBuffer {
                width,
                height,
                expected,
                len: pixels.len(),
            });
        }
        Ok(RawImage {
            width,
            height,
            pixels,
        })
    }

    /// Copies any RGBA8 view of the `image` crate.
    pub fn from_view<I>(view: &I) -> Self
    where
        I: GenericImageView<Pixel = Rgba<u8>>,
    {
        let (width, height) = view.dimensions();
        RawImage {
            width,
            height,
            pixels: view.pixels().flat_map(|(_, _, p)| p.0).collect(),
        }
    }

    /// A fully transparent image.
    pub fn blank(width: u32, height: u32) -> Self {
        RawImage {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// Pixel at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        let i = self.offset(x, y);
        Pixel::from_slice(&self.pixels[i..i + 4])
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn into_rgba_image(self) -> RgbaImage {
        let (width, height) = self.dimensions();
        RgbaImage::from_raw(width, height, self.pixels)
            .unwrap_or_else(|| unreachable!("buffer length checked on construction"))
    }
}

impl From<RgbaImage> for RawImage {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        RawImage {
            width,
            height,
            pixels: image.into_raw(),
        }
    }
}

impl From<RawImage> for RgbaImage {
    fn from(image: RawImage) -> Self {
        image.into_rgba_image()
    }
}
