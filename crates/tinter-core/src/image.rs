//! Pixel buffer and per-pixel sample types.

use crate::error::{FilterError, FilterResult};

/// One pixel as four float channels in nominal `[0, 255]`.
///
/// Intermediate pipeline stages may push channels outside that range;
/// only [`Rgba::to_bytes`] brings them back into `u8` storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Widen an interleaved RGBA byte quad.
    pub fn from_bytes(px: [u8; 4]) -> Self {
        Self {
            r: px[0] as f64,
            g: px[1] as f64,
            b: px[2] as f64,
            a: px[3] as f64,
        }
    }

    /// Narrow back to bytes by truncation toward zero.
    ///
    /// Values above 255 saturate to 255, negatives and NaN become 0.
    /// Nothing is rounded here.
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r as u8, self.g as u8, self.b as u8, self.a as u8]
    }
}

/// A fully materialized RGBA8 image, interleaved, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Interleaved RGBA bytes, `width × height × 4` long.
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap existing bytes, checking the length against the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> FilterResult<Self> {
        let buffer = Self {
            width,
            height,
            data,
        };
        match buffer.expected_len() {
            Some(expected) if expected == buffer.data.len() => Ok(buffer),
            expected => Err(FilterError::InvalidBuffer {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: buffer.data.len(),
            }),
        }
    }

    /// A zeroed (transparent black) buffer.
    ///
    /// Dimensions whose byte length overflows `usize` yield an empty, invalid
    /// buffer.
    pub fn blank(width: u32, height: u32) -> Self {
        let mut buffer = Self {
            width,
            height,
            data: Vec::new(),
        };
        if let Some(len) = buffer.expected_len() {
            buffer.data = vec![0; len];
        }
        buffer
    }

    /// Byte length implied by the dimensions, `None` on overflow.
    pub fn expected_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(4)
    }

    /// Whether the byte length matches the dimensions.
    pub fn is_valid(&self) -> bool {
        self.expected_len() == Some(self.data.len())
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    /// View the bytes as RGBA quads.
    ///
    /// Fails only when the length is not a multiple of four.
    pub fn pixels(&self) -> FilterResult<&[[u8; 4]]> {
        bytemuck::try_cast_slice(&self.data).map_err(|_| self.length_error())
    }

    /// Mutable view of the bytes as RGBA quads.
    pub fn pixels_mut(&mut self) -> FilterResult<&mut [[u8; 4]]> {
        let err = self.length_error();
        bytemuck::try_cast_slice_mut(&mut self.data).map_err(|_| err)
    }

    /// Convert into an `image` crate container without copying.
    ///
    /// Returns `None` when the byte length does not match the dimensions.
    pub fn into_rgba_image(self) -> Option<::image::RgbaImage> {
        ::image::RgbaImage::from_raw(self.width, self.height, self.data)
    }

    fn length_error(&self) -> FilterError {
        FilterError::InvalidBuffer {
            width: self.width,
            height: self.height,
            expected: self.expected_len().unwrap_or(usize::MAX),
            actual: self.data.len(),
        }
    }
}

impl From<::image::RgbaImage> for PixelBuffer {
    fn from(img: ::image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}
