use cropscan::{Framing, ScanError, Scanner};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

fn to_py_err(e: ScanError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn string_to_framing(framing: &str) -> PyResult<Framing> {
    match framing {
        "inclusive" => Ok(Framing::Inclusive),
        "exclusive" => Ok(Framing::Exclusive),
        _ => Err(PyValueError::new_err(format!("unknown framing: {framing}"))),
    }
}

/// Find the bounding box of the non-white pixels in an RGBA buffer.
///
/// Args:
///     pixels: Row-major RGBA bytes, at least width * height * 4 long
///     width: Image width in pixels
///     height: Image height in pixels
///
/// Returns:
///     (top, right, bottom, left); (height, 0, 0, width) when the image is blank
#[pyfunction]
fn crop(pixels: &[u8], width: u32, height: u32) -> PyResult<(u32, u32, u32, u32)> {
    let outcome = Scanner::new(pixels, width, height)
        .map_err(to_py_err)?
        .scan();
    let [top, right, bottom, left] = outcome.record();
    Ok((top, right, bottom, left))
}

/// Find the bounding box and its crop rectangle.
///
/// Args:
///     pixels: Row-major RGBA bytes, at least width * height * 4 long
///     width: Image width in pixels
///     height: Image height in pixels
///     padding: Pixels added around the crop rectangle, clamped to the image (default: 0)
///     framing: "inclusive" or "exclusive" (default: "inclusive")
///
/// Returns:
///     dict with keys: top, right, bottom, left, crop (dict with x, y, width, height),
///     or None when the image is blank
#[pyfunction]
#[pyo3(signature = (pixels, width, height, *, padding=None, framing=None))]
fn bounds(
    py: Python<'_>,
    pixels: &[u8],
    width: u32,
    height: u32,
    padding: Option<u32>,
    framing: Option<&str>,
) -> PyResult<Option<Py<PyDict>>> {
    let mut scanner = Scanner::new(pixels, width, height).map_err(to_py_err)?;

    if let Some(p) = padding {
        scanner = scanner.padding(p);
    }
    if let Some(f) = framing {
        scanner = scanner.framing(string_to_framing(f)?);
    }

    let outcome = scanner.scan();
    let (Some(b), Some(region)) = (outcome.bounds, outcome.crop) else {
        return Ok(None);
    };

    let crop = PyDict::new(py);
    crop.set_item("x", region.x)?;
    crop.set_item("y", region.y)?;
    crop.set_item("width", region.width)?;
    crop.set_item("height", region.height)?;

    let dict = PyDict::new(py);
    dict.set_item("top", b.top)?;
    dict.set_item("right", b.right)?;
    dict.set_item("bottom", b.bottom)?;
    dict.set_item("left", b.left)?;
    dict.set_item("crop", crop)?;
    Ok(Some(dict.into()))
}

/// Number of 64 KiB WebAssembly pages needed for a width x height RGBA frame.
#[pyfunction]
fn required_pages(width: u32, height: u32) -> PyResult<usize> {
    cropscan::memory::required_pages(width, height).map_err(to_py_err)
}

#[pymodule]
fn pycropscan(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(crop, m)?)?;
    m.add_function(wrap_pyfunction!(bounds, m)?)?;
    m.add_function(wrap_pyfunction!(required_pages, m)?)?;
    Ok(())
}
