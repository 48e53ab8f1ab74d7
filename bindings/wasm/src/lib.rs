use cropscan::{BoundingBox, CropRegion, Framing, PixelRegion, ScanError, ScanOutcome, Scanner};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Options for deriving the crop rectangle, passed as a JavaScript object.
///
/// All fields are optional.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanOptions {
    pub padding: Option<u32>,
    pub framing: Option<String>,
}

/// Plain JS shape of a non-empty scan.
#[derive(Serialize)]
struct BoundsObject {
    top: u32,
    right: u32,
    bottom: u32,
    left: u32,
    crop: CropRegion,
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
}

fn string_to_framing(framing: &str) -> Result<Framing, JsValue> {
    match framing {
        "inclusive" => Ok(Framing::Inclusive),
        "exclusive" => Ok(Framing::Exclusive),
        _ => Err(make_error(
            "INVALID_OPTIONS",
            &format!("unknown framing: {framing}"),
        )),
    }
}

/// Create a JS `Error` with a `code` property.
fn make_error(code: &str, message: &str) -> JsValue {
    let err = js_sys::Error::new(message);
    let _ = js_sys::Reflect::set(&err, &"code".into(), &JsValue::from_str(code));
    JsValue::from(err)
}

/// Convert a `ScanError` into a JS `Error` with a machine-readable `code` property.
fn to_js_error(e: ScanError) -> JsValue {
    let code = match &e {
        ScanError::DimensionOverflow { .. } => "DIMENSION_OVERFLOW",
        ScanError::BufferTooShort { .. } => "BUFFER_TOO_SHORT",
    };
    make_error(code, &e.to_string())
}

fn parse_options(options: JsValue) -> Result<ScanOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(ScanOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| make_error("INVALID_OPTIONS", &format!("invalid options: {e}")))
    }
}

/// Apply parsed `ScanOptions` to a `Scanner`.
fn apply_options<'a>(
    mut scanner: Scanner<'a>,
    opts: &ScanOptions,
) -> Result<Scanner<'a>, JsValue> {
    if let Some(padding) = opts.padding {
        scanner = scanner.padding(padding);
    }
    if let Some(ref framing) = opts.framing {
        scanner = scanner.framing(string_to_framing(framing)?);
    }
    Ok(scanner)
}

/// Build `{ top, right, bottom, left, crop }`, or `null` for a blank frame.
fn build_bounds_object(outcome: &ScanOutcome) -> Result<JsValue, JsValue> {
    let (Some(BoundingBox { top, right, bottom, left }), Some(crop)) = (outcome.bounds, outcome.crop)
    else {
        return Ok(JsValue::NULL);
    };

    serde_wasm_bindgen::to_value(&BoundsObject {
        top,
        right,
        bottom,
        left,
        crop,
    })
    .map_err(JsValue::from)
}

fn scan_with_options(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let opts = parse_options(options)?;

    let scanner = Scanner::new(pixels, width, height).map_err(to_js_error)?;
    let scanner = apply_options(scanner, &opts)?;

    build_bounds_object(&scanner.scan())
}

/// Scan RGBA pixels for the bounding box of everything that is not white.
///
/// @param pixels - RGBA bytes, e.g. `ImageData.data`
/// @returns `Uint32Array` `[top, right, bottom, left]`; `[height, 0, 0, width]`
///   when the frame is blank
#[wasm_bindgen]
pub fn crop(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u32>, JsValue> {
    let outcome = Scanner::new(pixels, width, height)
        .map_err(to_js_error)?
        .scan();
    Ok(outcome.record().to_vec())
}

/// Scan RGBA pixels and describe the result as an object.
///
/// @param pixels - RGBA bytes, e.g. `ImageData.data`
/// @param options - Optional object with fields: padding, framing
///   ("inclusive" | "exclusive")
/// @returns `{ top, right, bottom, left, crop: { x, y, width, height } }`, or
///   `null` when the frame is blank
#[wasm_bindgen]
pub fn bounds(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    scan_with_options(pixels, width, height, options)
}

/// Number of 64 KiB pages needed to hold a `width` x `height` RGBA frame.
#[wasm_bindgen(js_name = "requiredPages")]
pub fn required_pages(width: u32, height: u32) -> Result<usize, JsValue> {
    cropscan::memory::required_pages(width, height).map_err(to_js_error)
}

/// Pixel buffer living in module memory, filled by the host without a copy
/// through the scan call.
///
/// ```js
/// const buf = new ScanBuffer(imageData.width, imageData.height);
/// new Uint8Array(wasm.memory.buffer, buf.ptr(), buf.byteLength).set(imageData.data);
/// const [top, right, bottom, left] = buf.crop();
/// buf.free();
/// ```
#[wasm_bindgen]
pub struct ScanBuffer {
    region: PixelRegion,
}

#[wasm_bindgen]
impl ScanBuffer {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<ScanBuffer, JsValue> {
        let region = PixelRegion::new(width, height).map_err(to_js_error)?;
        Ok(ScanBuffer { region })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.region.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.region.height()
    }

    /// Length of the pixel region in bytes.
    #[wasm_bindgen(getter, js_name = "byteLength")]
    pub fn byte_length(&self) -> usize {
        self.region.len()
    }

    /// Offset of the pixel region in `wasm.memory.buffer`. Views over it go
    /// stale if memory grows, so create them right before writing.
    pub fn ptr(&mut self) -> *mut u8 {
        self.region.as_mut_ptr()
    }

    /// Reset the region to white.
    pub fn clear(&mut self) {
        self.region.clear();
    }

    /// Same as the free `crop` function, over the region's current contents.
    pub fn crop(&self) -> Vec<u32> {
        self.region.scan_record().to_vec()
    }

    /// Same as the free `bounds` function, over the region's current contents.
    pub fn bounds(&self, options: JsValue) -> Result<JsValue, JsValue> {
        scan_with_options(
            self.region.as_bytes(),
            self.region.width(),
            self.region.height(),
            options,
        )
    }
}
