uniffi::setup_scaffolding!();

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ScanError {
    #[error("image dimensions {width}x{height} overflow the addressable buffer size")]
    DimensionOverflow { width: u32, height: u32 },
    #[error("pixel buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort { expected: u64, actual: u64 },
}

impl From<cropscan::ScanError> for ScanError {
    fn from(e: cropscan::ScanError) -> Self {
        match e {
            cropscan::ScanError::DimensionOverflow { width, height } => {
                ScanError::DimensionOverflow { width, height }
            }
            cropscan::ScanError::BufferTooShort { expected, actual } => {
                ScanError::BufferTooShort {
                    expected: expected as u64,
                    actual: actual as u64,
                }
            }
        }
    }
}

#[derive(uniffi::Enum)]
pub enum Framing {
    Inclusive,
    Exclusive,
}

impl From<Framing> for cropscan::Framing {
    fn from(framing: Framing) -> Self {
        match framing {
            Framing::Inclusive => cropscan::Framing::Inclusive,
            Framing::Exclusive => cropscan::Framing::Exclusive,
        }
    }
}

#[derive(Debug, PartialEq, uniffi::Record)]
pub struct BoundingBox {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

#[derive(Debug, PartialEq, uniffi::Record)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(uniffi::Record)]
pub struct ScanOutcome {
    pub bounds: Option<BoundingBox>,
    pub crop: Option<CropRegion>,
    pub width: u32,
    pub height: u32,
}

fn convert_bounds(b: &cropscan::BoundingBox) -> BoundingBox {
    BoundingBox {
        top: b.top,
        right: b.right,
        bottom: b.bottom,
        left: b.left,
    }
}

fn convert_crop(c: &cropscan::CropRegion) -> CropRegion {
    CropRegion {
        x: c.x,
        y: c.y,
        width: c.width,
        height: c.height,
    }
}

/// Scan and return `[top, right, bottom, left]`, or `[height, 0, 0, width]`
/// when the image is blank.
#[uniffi::export]
pub fn crop(pixels: Vec<u8>, width: u32, height: u32) -> Result<Vec<u32>, ScanError> {
    let outcome = cropscan::Scanner::new(&pixels, width, height)?.scan();
    Ok(outcome.record().to_vec())
}

/// Scan with full control over the crop rectangle.
#[uniffi::export]
pub fn scan(
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    framing: Framing,
    padding: u32,
) -> Result<ScanOutcome, ScanError> {
    let outcome = cropscan::Scanner::new(&pixels, width, height)?
        .framing(framing.into())
        .padding(padding)
        .scan();

    Ok(ScanOutcome {
        bounds: outcome.bounds.as_ref().map(convert_bounds),
        crop: outcome.crop.as_ref().map(convert_crop),
        width: outcome.width,
        height: outcome.height,
    })
}

/// Number of 64 KiB WebAssembly pages needed for a `width` x `height` frame.
#[uniffi::export]
pub fn required_pages(width: u32, height: u32) -> Result<u64, ScanError> {
    Ok(cropscan::memory::required_pages(width, height)? as u64)
}
