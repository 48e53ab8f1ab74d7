//! Find the bounding box of everything that is not white in an RGBA frame.
//!
//! A pixel is foreground when any of its red, green or blue bytes differs from
//! 255. Alpha is ignored. The scan is a single pass over a borrowed buffer and
//! keeps no state between calls.
//!
//! # Example
//!
//! ```
//! use cropscan::{Framing, Scanner};
//!
//! // 4x3 white frame with a gray pixel at (2, 1) and a black one at (0, 2)
//! let mut pixels = [255u8; 4 * 3 * 4];
//! pixels[(1 * 4 + 2) * 4..][..3].copy_from_slice(&[10, 10, 10]);
//! pixels[(2 * 4) * 4..][..3].copy_from_slice(&[0, 0, 0]);
//!
//! let outcome = Scanner::new(&pixels, 4, 3)
//!     .unwrap()
//!     .framing(Framing::Inclusive)
//!     .scan();
//! assert_eq!(outcome.record(), [1, 2, 2, 0]);
//! assert_eq!(outcome.crop.unwrap().width, 3);
//! ```
#![warn(missing_docs)]

mod bounds;
mod crop;
mod error;
/// Memory contract between a host and the compiled module.
pub mod memory;
mod scan;

pub use bounds::BoundingBox;
pub use crop::{crop_region, CropRegion, Framing};
/// Error type returned by the checked scan entry points.
pub use error::ScanError;
pub use memory::PixelRegion;
pub use scan::{is_foreground, scan, scan_record, try_scan, BACKGROUND, BYTES_PER_PIXEL};

/// Result of a [`Scanner`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Bounding box of the foreground, `None` when the frame is blank.
    pub bounds: Option<BoundingBox>,

    /// Crop rectangle derived from `bounds` with the configured framing and padding.
    pub crop: Option<CropRegion>,

    /// Width of the scanned frame.
    pub width: u32,

    /// Height of the scanned frame.
    pub height: u32,
}

impl ScanOutcome {
    /// The `[top, right, bottom, left]` record, sentinel-encoded when empty.
    pub fn record(&self) -> [u32; 4] {
        memory::record_from_bounds(self.bounds, self.width, self.height)
    }

    /// Whether no foreground pixel was found.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }
}

/// Builder for scanning a frame and deriving its crop region.
///
/// The buffer is validated on construction, so [`Scanner::scan`] cannot fail.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    pixels: &'a [u8],
    width: u32,
    height: u32,
    framing: Framing,
    padding: u32,
}

impl<'a> Scanner<'a> {
    /// Borrow a row-major RGBA frame of `width` x `height` pixels.
    pub fn new(pixels: &'a [u8], width: u32, height: u32) -> Result<Self, ScanError> {
        let len = memory::frame_len(width, height)?;
        if pixels.len() < len {
            return Err(ScanError::BufferTooShort {
                expected: len,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            pixels: &pixels[..len],
            width,
            height,
            framing: Framing::default(),
            padding: 0,
        })
    }

    /// Set how the crop region is sized from the box (default: `Framing::Inclusive`).
    pub fn framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    /// Grow the crop region by `padding` pixels per side, clamped to the frame
    /// (default: 0).
    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Run the scan.
    pub fn scan(&self) -> ScanOutcome {
        let bounds = scan::scan_frame(self.pixels, self.width);
        log::debug!(
            "scanned {}x{} frame: {bounds:?}",
            self.width,
            self.height
        );

        let crop = bounds.as_ref().map(|b| {
            crop_region(b, self.framing, self.padding, self.width, self.height)
        });

        ScanOutcome {
            bounds,
            crop,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32, dots: &[(u32, u32)]) -> Vec<u8> {
        let mut buf = vec![255u8; (width * height * 4) as usize];
        for &(x, y) in dots {
            let at = ((y * width + x) * 4) as usize;
            buf[at..at + 3].copy_from_slice(&[0, 0, 0]);
        }
        buf
    }

    #[test]
    fn builder_defaults() {
        let buf = frame(10, 10, &[(3, 4), (6, 7)]);
        let outcome = Scanner::new(&buf, 10, 10).unwrap().scan();
        assert_eq!(outcome.record(), [4, 6, 7, 3]);
        assert_eq!(
            outcome.crop,
            Some(CropRegion {
                x: 3,
                y: 4,
                width: 4,
                height: 4
            })
        );
    }

    #[test]
    fn builder_with_exclusive_framing_and_padding() {
        let buf = frame(10, 10, &[(3, 4), (6, 7)]);
        let outcome = Scanner::new(&buf, 10, 10)
            .unwrap()
            .framing(Framing::Exclusive)
            .padding(1)
            .scan();
        assert_eq!(
            outcome.crop,
            Some(CropRegion {
                x: 2,
                y: 3,
                width: 5,
                height: 5
            })
        );
        // padding never changes the box itself
        assert_eq!(outcome.bounds.unwrap().to_record(), [4, 6, 7, 3]);
    }

    #[test]
    fn blank_frame_has_no_crop() {
        let buf = frame(5, 2, &[]);
        let outcome = Scanner::new(&buf, 5, 2).unwrap().padding(3).scan();
        assert!(outcome.is_empty());
        assert_eq!(outcome.crop, None);
        assert_eq!(outcome.record(), [2, 0, 0, 5]);
    }

    #[test]
    fn builder_rejects_short_buffer() {
        let buf = frame(5, 2, &[]);
        let err = Scanner::new(&buf[..39], 5, 2).unwrap_err();
        assert_eq!(
            err,
            ScanError::BufferTooShort {
                expected: 40,
                actual: 39
            }
        );
    }

    #[test]
    fn builder_ignores_trailing_bytes() {
        let mut buf = frame(2, 1, &[]);
        buf.extend_from_slice(&[0, 0, 0, 0]);
        assert!(Scanner::new(&buf, 2, 1).unwrap().scan().is_empty());
    }
}
