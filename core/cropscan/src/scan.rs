use crate::bounds::BoundingBox;
use crate::error::ScanError;
use crate::memory::{frame_len, record_from_bounds};

/// RGB value of a background pixel.
pub const BACKGROUND: [u8; 3] = [255, 255, 255];

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Whether an RGBA pixel counts as foreground.
///
/// Any R, G or B byte other than 255 makes the pixel foreground. The alpha byte
/// is not inspected.
#[inline]
pub fn is_foreground(pixel: &[u8]) -> bool {
    pixel[..3] != BACKGROUND
}

/// Scan a row-major RGBA buffer for the bounding box of its non-white pixels.
///
/// Returns `None` when every pixel is white or the image has zero area. Bytes
/// past `width * height * 4` are ignored.
///
/// # Panics
///
/// Panics if `pixels` is shorter than `width * height * 4` bytes or that
/// product does not fit in `usize`. Use [`try_scan`] to get an error instead.
pub fn scan(pixels: &[u8], width: u32, height: u32) -> Option<BoundingBox> {
    match try_scan(pixels, width, height) {
        Ok(bounds) => bounds,
        Err(e) => panic!("{e}"),
    }
}

/// Checked form of [`scan`].
pub fn try_scan(pixels: &[u8], width: u32, height: u32) -> Result<Option<BoundingBox>, ScanError> {
    let len = frame_len(width, height)?;
    if pixels.len() < len {
        return Err(ScanError::BufferTooShort {
            expected: len,
            actual: pixels.len(),
        });
    }

    let bounds = scan_frame(&pixels[..len], width);
    log::debug!("scanned {width}x{height} frame: {bounds:?}");
    Ok(bounds)
}

/// Scan and return the `[top, right, bottom, left]` record, using the sentinel
/// `[height, 0, 0, width]` when nothing was found.
///
/// # Panics
///
/// Same conditions as [`scan`].
pub fn scan_record(pixels: &[u8], width: u32, height: u32) -> [u32; 4] {
    record_from_bounds(scan(pixels, width, height), width, height)
}

/// Scan a frame that is exactly `width * height * 4` bytes long.
///
/// Each row contributes its first and last foreground column, which widens the
/// box exactly as visiting every foreground pixel would.
pub(crate) fn scan_frame(frame: &[u8], width: u32) -> Option<BoundingBox> {
    if width == 0 || frame.is_empty() {
        return None;
    }

    let stride = width as usize * BYTES_PER_PIXEL;
    let mut bounds: Option<BoundingBox> = None;

    for (y, row) in frame.chunks_exact(stride).enumerate() {
        let mut pixels = row.chunks_exact(BYTES_PER_PIXEL);
        let Some(first) = pixels.position(is_foreground) else {
            continue;
        };
        // `pixels` now starts just after `first`
        let last = pixels
            .rposition(is_foreground)
            .map_or(first, |offset| first + 1 + offset);

        let (y, first, last) = (y as u32, first as u32, last as u32);
        match bounds.as_mut() {
            Some(b) => b.include_span(first, last, y),
            None => {
                bounds = Some(BoundingBox {
                    top: y,
                    right: last,
                    bottom: y,
                    left: first,
                })
            }
        }
    }

    bounds
}
