//! Decoded pixel data ready to be placed on a page.

use thiserror::Error;

/// Errors raised when constructing a [`RasterImage`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("raster must be at least 1x1 pixels, got {width}x{height}")]
    Empty { width: u32, height: u32 },

    #[error("expected {expected} bytes of RGBA data, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// An 8-bit RGBA pixel buffer, row-major, top row first.
///
/// Exporters consume the buffer in whatever form their format needs: PDF
/// splits it into an RGB image and an optional soft mask, SVG re-encodes it
/// as PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl RasterImage {
    /// Wraps an RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError`] if either dimension is zero or the buffer
    /// length is not `width * height * 4`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use folio_core::draw::RasterImage;
    /// let image = RasterImage::from_rgba(1, 1, vec![255, 0, 0, 255]).unwrap();
    /// assert_eq!(image.rgb_channels(), vec![255, 0, 0]);
    /// assert!(image.alpha_channel().is_none());
    /// ```
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::Empty { width, height });
        }

        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(RasterError::LengthMismatch {
                expected,
                actual: rgba.len(),
            });
        }

        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Returns the width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the raw RGBA bytes
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Returns the color channels with alpha stripped.
    pub fn rgb_channels(&self) -> Vec<u8> {
        self.rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }

    /// Returns the alpha channel, or `None` when every pixel is opaque.
    pub fn alpha_channel(&self) -> Option<Vec<u8>> {
        let has_alpha = self.rgba.chunks_exact(4).any(|px| px[3] < u8::MAX);
        has_alpha.then(|| self.rgba.chunks_exact(4).map(|px| px[3]).collect())
    }
}
