use thiserror::Error;

/// Errors raised while resolving options or comparing two images.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The two images being compared do not share the same dimensions.
    #[error(
        "image dimensions do not match: {} vs {}",
        dims(.expected),
        dims(.actual)
    )]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// An option value failed its type or range check.
    #[error("invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    /// A pixel buffer whose length is not `width * height * 4`.
    #[error("invalid pixel buffer: {width}x{height} RGBA needs {expected} bytes, got {len}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        len: usize,
    },
}

fn dims(&(width, height): &(u32, u32)) -> String {
    format!("{width}x{height}")
}

pub type Result<T> = std::result::Result<T, Error>;
