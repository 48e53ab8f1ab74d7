use crate::bounds::BoundingBox;

/// Rectangle to crop or outline, in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// How a bounding box turns into a rectangle size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Framing {
    /// Both edge pixels are inside the rectangle: `width = right - left + 1`.
    #[default]
    Inclusive,

    /// Edge-to-edge distance: `width = right - left`. A single pixel yields a
    /// zero-sized rectangle, which is what a 1px canvas stroke around the box
    /// expects.
    Exclusive,
}

/// Calculate the crop region for `bounds` inside an `image_width` x `image_height` image.
///
/// `padding` grows the region on every side and is clamped to the image edges.
pub fn crop_region(
    bounds: &BoundingBox,
    framing: Framing,
    padding: u32,
    image_width: u32,
    image_height: u32,
) -> CropRegion {
    let x = bounds.left.saturating_sub(padding);
    let y = bounds.top.saturating_sub(padding);

    // One past the far edge, clamped to the image
    let x_end = bounds
        .right
        .saturating_add(1)
        .saturating_add(padding)
        .min(image_width)
        .max(x);
    let y_end = bounds
        .bottom
        .saturating_add(1)
        .saturating_add(padding)
        .min(image_height)
        .max(y);

    let (width, height) = match framing {
        Framing::Inclusive => (x_end - x, y_end - y),
        Framing::Exclusive => ((x_end - x).saturating_sub(1), (y_end - y).saturating_sub(1)),
    };

    CropRegion {
        x,
        y,
        width,
        height,
    }
}
