//! Host/module memory contract.
//!
//! A host either passes the pixels straight into a scan call, or writes them
//! into a [`PixelRegion`] owned by the module and scans that in place. Results
//! cross the boundary as a `[top, right, bottom, left]` record of four `u32`s,
//! little-endian when read as raw bytes.

use crate::bounds::BoundingBox;
use crate::error::ScanError;
use crate::scan::{scan_frame, BYTES_PER_PIXEL};

/// Size of one WebAssembly linear-memory page.
pub const WASM_PAGE_SIZE: usize = 64 * 1024;

/// Byte length of a record in its raw form.
pub const RECORD_LEN: usize = 16;

/// Number of bytes a `width` x `height` RGBA frame occupies.
pub fn frame_len(width: u32, height: u32) -> Result<usize, ScanError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or(ScanError::DimensionOverflow { width, height })
}

/// Linear-memory pages a host must expose to hold one frame at offset 0.
pub fn required_pages(width: u32, height: u32) -> Result<usize, ScanError> {
    Ok(frame_len(width, height)?.div_ceil(WASM_PAGE_SIZE))
}

/// The sentinel record reported when no foreground pixel exists.
pub fn empty_record(width: u32, height: u32) -> [u32; 4] {
    [height, 0, 0, width]
}

/// Record form of a scan result.
pub fn record_from_bounds(bounds: Option<BoundingBox>, width: u32, height: u32) -> [u32; 4] {
    match bounds {
        Some(b) => b.to_record(),
        None => empty_record(width, height),
    }
}

/// Read a record back into a box.
///
/// Returns `None` for the sentinel and for any record that does not describe a
/// box inside a `width` x `height` image.
pub fn bounds_from_record(record: [u32; 4], width: u32, height: u32) -> Option<BoundingBox> {
    let [top, right, bottom, left] = record;
    if top > bottom || bottom >= height || left > right || right >= width {
        return None;
    }
    Some(BoundingBox {
        top,
        right,
        bottom,
        left,
    })
}

/// Serialize a record as four consecutive little-endian `u32`s.
pub fn encode_record(record: [u32; 4]) -> [u8; RECORD_LEN] {
    let mut out = [0u8; RECORD_LEN];
    for (chunk, value) in out.chunks_exact_mut(4).zip(record) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
    out
}

/// Inverse of [`encode_record`].
pub fn decode_record(bytes: &[u8; RECORD_LEN]) -> [u32; 4] {
    let mut out = [0u32; 4];
    for (value, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
        *value = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    out
}

/// A pixel buffer owned by the module that the host fills in place.
///
/// The region holds exactly one `width` x `height` RGBA frame and starts out
/// white, so scanning it before the host writes anything reports an empty scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelRegion {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelRegion {
    /// Allocate a white region for a `width` x `height` frame.
    pub fn new(width: u32, height: u32) -> Result<Self, ScanError> {
        let len = frame_len(width, height)?;
        log::trace!("allocating {len} byte pixel region for {width}x{height}");
        Ok(Self {
            pixels: vec![u8::MAX; len],
            width,
            height,
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Length of the region in bytes.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the frame has zero area.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Start of the region in module memory. Valid for [`len`](Self::len) bytes
    /// until the region is dropped.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.pixels.as_mut_ptr()
    }

    /// Reset every pixel to white.
    pub fn clear(&mut self) {
        self.pixels.fill(u8::MAX);
    }

    pub fn scan(&self) -> Option<BoundingBox> {
        let bounds = scan_frame(&self.pixels, self.width);
        log::debug!("scanned {}x{} region: {bounds:?}", self.width, self.height);
        bounds
    }

    pub fn scan_record(&self) -> [u32; 4] {
        record_from_bounds(self.scan(), self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_len_counts_four_bytes_per_pixel() {
        assert_eq!(frame_len(4, 3).unwrap(), 48);
        assert_eq!(frame_len(0, 9).unwrap(), 0);
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn frame_len_overflow_is_reported() {
        assert_eq!(
            frame_len(u32::MAX, 2),
            Err(ScanError::DimensionOverflow {
                width: u32::MAX,
                height: 2
            })
        );
    }

    #[test]
    fn pages_round_up() {
        assert_eq!(required_pages(0, 0).unwrap(), 0);
        assert_eq!(required_pages(1, 1).unwrap(), 1);
        // exactly one page: 128 * 128 * 4 = 65536
        assert_eq!(required_pages(128, 128).unwrap(), 1);
        assert_eq!(required_pages(128, 129).unwrap(), 2);
        // A4 canvas from the drawing demo
        assert_eq!(required_pages(595, 842).unwrap(), 31);
    }

    #[test]
    fn sentinel_record_reads_back_as_none() {
        assert_eq!(bounds_from_record(empty_record(10, 6), 10, 6), None);
        assert_eq!(record_from_bounds(None, 10, 6), [6, 0, 0, 10]);
    }

    #[test]
    fn real_record_reads_back_as_box() {
        let b = BoundingBox {
            top: 1,
            right: 2,
            bottom: 2,
            left: 0,
        };
        let record = record_from_bounds(Some(b), 4, 3);
        assert_eq!(record, [1, 2, 2, 0]);
        assert_eq!(bounds_from_record(record, 4, 3), Some(b));
    }

    #[test]
    fn out_of_range_record_is_rejected() {
        assert_eq!(bounds_from_record([0, 4, 0, 0], 4, 3), None);
        assert_eq!(bounds_from_record([2, 1, 1, 0], 4, 3), None);
        assert_eq!(bounds_from_record([0, 1, 0, 2], 4, 3), None);
    }

    #[test]
    fn record_bytes_are_little_endian() {
        let bytes = encode_record([1, 0x0102_0304, 3, 4]);
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[4, 3, 2, 1]);
        assert_eq!(decode_record(&bytes), [1, 0x0102_0304, 3, 4]);
    }

    #[test]
    fn fresh_region_is_white() {
        let region = PixelRegion::new(3, 2).unwrap();
        assert_eq!(region.len(), 24);
        assert!(region.as_bytes().iter().all(|&b| b == 255));
        assert_eq!(region.scan(), None);
        assert_eq!(region.scan_record(), [2, 0, 0, 3]);
    }

    #[test]
    fn region_scans_in_place() {
        let mut region = PixelRegion::new(3, 2).unwrap();
        // pixel (x=2, y=1) is the last one in the frame
        region.as_bytes_mut()[20..24].copy_from_slice(&[0, 128, 255, 255]);
        assert_eq!(region.scan_record(), [1, 2, 1, 2]);

        region.clear();
        assert_eq!(region.scan(), None);
    }

    #[test]
    fn region_writes_through_pointer_are_visible() {
        let mut region = PixelRegion::new(2, 2).unwrap();
        let ptr = region.as_mut_ptr();
        // SAFETY: offset 0 is within the 16-byte region, which outlives the write
        unsafe { ptr.write(0) };
        assert_eq!(region.scan_record(), [0, 0, 0, 0]);
    }

    #[test]
    fn zero_area_region() {
        let region = PixelRegion::new(0, 5).unwrap();
        assert!(region.is_empty());
        assert_eq!(region.scan_record(), [5, 0, 0, 0]);
    }
}
